pub mod fifo;
pub mod frequency;
pub mod lfu;
pub mod lru;
mod lru_list;

use crate::entry::{CacheEntry, EntryRef};

use tracing::{debug, warn};

/// Read access to the live records of the store that owns a policy.
///
/// Policies only hold [`CacheEntry`] values, so to tell the store which
/// record to drop they must look the victim up among the store's records.
pub trait StoreView {
  /// Iterates over every live record together with its handle.
  fn live_entries(&self) -> Box<dyn Iterator<Item = (EntryRef, &CacheEntry)> + '_>;
}

/// Receives eviction notifications emitted by a policy.
///
/// The store implements this and removes each notified record from its own
/// table once the hook returns. It must not call back into the policy's
/// `before_erase` for these records: the policy has already forgotten them.
pub trait EvictionSink {
  fn before_evict(&mut self, entry: EntryRef);
}

impl EvictionSink for Vec<EntryRef> {
  fn before_evict(&mut self, entry: EntryRef) {
    self.push(entry);
  }
}

/// The store boundary handed to policy hooks that may evict.
pub struct PolicyContext<'a> {
  store: &'a dyn StoreView,
  sink: &'a mut dyn EvictionSink,
}

impl<'a> PolicyContext<'a> {
  pub fn new(store: &'a dyn StoreView, sink: &'a mut dyn EvictionSink) -> Self {
    Self { store, sink }
  }

  /// Resolves each victim to the first live record with the same identity and
  /// emits one eviction notification for it.
  ///
  /// Returns the number of notifications emitted. A victim without a live
  /// record is skipped.
  pub fn notify_evicted(&mut self, victims: &[CacheEntry]) -> usize {
    let mut emitted = 0;
    for victim in victims {
      let found = self
        .store
        .live_entries()
        .find(|(_, live)| *live == victim)
        .map(|(handle, _)| handle);

      match found {
        Some(handle) => {
          debug!(name = victim.name(), "emitting eviction notification");
          self.sink.before_evict(handle);
          emitted += 1;
        }
        None => warn!(name = victim.name(), "evicted entry has no live store record"),
      }
    }
    emitted
  }
}

/// The contract every content store replacement policy implements.
///
/// The store invokes these hooks synchronously on every cache mutation or
/// lookup. Hooks for an entry that is not tracked are silent no-ops.
pub trait EvictionPolicy: Send {
  /// The identifier the policy is registered under.
  fn name(&self) -> &'static str;

  /// The maximum number of entries this policy retains.
  fn limit(&self) -> usize;

  /// Changes the limit and immediately evicts down to it.
  fn set_limit(&mut self, limit: usize, cx: &mut PolicyContext<'_>);

  /// A new entry was admitted to the store.
  ///
  /// Capacity is first enforced at `limit - 1` so that, once the entry is
  /// tracked, the policy holds at most `limit` entries.
  fn after_insert(&mut self, entry: &CacheEntry, cx: &mut PolicyContext<'_>);

  /// An existing entry was refreshed in place. It already occupies a slot.
  fn after_refresh(&mut self, entry: &CacheEntry);

  /// The store is about to remove `entry` for a reason other than capacity.
  fn before_erase(&mut self, entry: &CacheEntry);

  /// The store is about to serve `entry` as a cache hit.
  fn before_use(&mut self, entry: &CacheEntry);

  /// Evicts down to the reserved-slot capacity, notifying for each victim.
  fn evict_entries(&mut self, cx: &mut PolicyContext<'_>);

  /// Forgets every tracked entry without emitting notifications.
  fn clear(&mut self);
}

/// The capacity to enforce before tracking a newly inserted entry.
///
/// A limit of zero saturates to zero instead of wrapping.
#[inline]
pub(crate) fn reserved_capacity(limit: usize) -> usize {
  limit.saturating_sub(1)
}
