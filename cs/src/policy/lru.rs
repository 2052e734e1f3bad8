use super::lru_list::LruList;
use super::{reserved_capacity, EvictionPolicy, PolicyContext};
use crate::entry::CacheEntry;

use tracing::debug;

/// Least-Recently-Used replacement policy.
///
/// Inserts, refreshes and hits all make an entry the most recent one; the
/// least recent entry is evicted first.
#[derive(Debug)]
pub struct LruPolicy {
  limit: usize,
  queue: LruList<CacheEntry>,
}

impl LruPolicy {
  pub const POLICY_NAME: &'static str = "lru";

  pub fn new() -> Self {
    Self {
      limit: usize::MAX,
      queue: LruList::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.len() == 0
  }

  fn enforce(&mut self, capacity: usize, cx: &mut PolicyContext<'_>) {
    let victims = self.queue.truncate_back(capacity);
    if !victims.is_empty() {
      debug!(capacity, victims = victims.len(), "lru enforcing capacity");
      cx.notify_evicted(&victims);
    }
  }
}

impl Default for LruPolicy {
  fn default() -> Self {
    Self::new()
  }
}

impl EvictionPolicy for LruPolicy {
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
    debug!(name = entry.name(), "lru after insert");
    self.evict_entries(cx);
    self.queue.push_front(entry.clone());
    if self.limit == 0 {
      self.enforce(0, cx);
    }
  }

  fn after_refresh(&mut self, entry: &CacheEntry) {
    self.queue.push_front(entry.clone());
  }

  fn before_erase(&mut self, entry: &CacheEntry) {
    self.queue.remove(entry);
  }

  fn before_use(&mut self, entry: &CacheEntry) {
    self.queue.move_to_front(entry);
  }

  fn evict_entries(&mut self, cx: &mut PolicyContext<'_>) {
    self.enforce(reserved_capacity(self.limit), cx);
  }

  fn clear(&mut self) {
    self.queue.clear();
  }
}
