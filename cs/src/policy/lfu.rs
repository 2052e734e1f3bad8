use super::frequency::FrequencyStructure;
use super::{reserved_capacity, EvictionPolicy, PolicyContext};
use crate::entry::CacheEntry;

use tracing::debug;

/// Least-Frequently-Used replacement policy.
///
/// Every entry starts at a count of zero and gains one per cache hit. When
/// the store is full, the entry with the lowest count is evicted.
#[derive(Debug)]
pub struct LfuPolicy {
  limit: usize,
  structure: FrequencyStructure<CacheEntry>,
}

impl LfuPolicy {
  pub const POLICY_NAME: &'static str = "lfu";

  pub fn new() -> Self {
    Self {
      limit: usize::MAX,
      structure: FrequencyStructure::new(),
    }
  }

  /// The tracked entries with their counts, most frequently used first.
  pub fn snapshot(&self) -> Vec<(CacheEntry, u64)> {
    self.structure.snapshot()
  }

  pub fn len(&self) -> usize {
    self.structure.len()
  }

  pub fn is_empty(&self) -> bool {
    self.structure.is_empty()
  }

  fn enforce(&mut self, capacity: usize, cx: &mut PolicyContext<'_>) {
    let victims = self.structure.evict_lowest(capacity);
    if !victims.is_empty() {
      debug!(capacity, victims = victims.len(), "lfu enforcing capacity");
      cx.notify_evicted(&victims);
    }
  }
}

impl Default for LfuPolicy {
  fn default() -> Self {
    Self::new()
  }
}

impl EvictionPolicy for LfuPolicy {
  fn name(&self) -> &'static str {
    Self::POLICY_NAME
  }

  fn limit(&self) -> usize {
    self.limit
  }

  fn set_limit(&mut self, limit: usize, cx: &mut PolicyContext<'_>) {
    self.limit = limit;
    self.enforce(limit, cx);
  }

  fn after_insert(&mut self, entry: &CacheEntry, cx: &mut PolicyContext<'_>) {
    debug!(name = entry.name(), "lfu after insert");
    self.evict_entries(cx);
    self.structure.add(entry.clone());
    if self.limit == 0 {
      // No slot could be reserved; the new entry goes too.
      self.enforce(0, cx);
    }
  }

  fn after_refresh(&mut self, entry: &CacheEntry) {
    // A refresh earns no frequency credit.
    self.structure.add(entry.clone());
  }

  fn before_erase(&mut self, entry: &CacheEntry) {
    self.structure.remove(entry);
  }

  fn before_use(&mut self, entry: &CacheEntry) {
    self.structure.touch(entry);
  }

  fn evict_entries(&mut self, cx: &mut PolicyContext<'_>) {
    self.enforce(reserved_capacity(self.limit), cx);
  }

  fn clear(&mut self) {
    self.structure.clear();
  }
}
