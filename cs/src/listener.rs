use crate::entry::CacheEntry;

use std::fmt;

/// Describes the reason an entry was removed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
  /// The replacement policy selected the entry to keep the store within its limit.
  Capacity,
  /// The entry was explicitly erased.
  Invalidated,
}

impl fmt::Display for EvictionReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvictionReason::Capacity => write!(f, "evicted due to capacity"),
      EvictionReason::Invalidated => write!(f, "manually invalidated"),
    }
  }
}

/// A listener that can be registered with a store to observe removals.
///
/// `on_evict` runs on the thread driving the store once the operation that
/// removed the record has finished. Under a
/// [`SharedContentStore`](crate::SharedContentStore) it runs after the lock is
/// released, so it may call back into the store.
pub trait EvictionListener: Send + Sync {
  fn on_evict(&self, entry: &CacheEntry, reason: EvictionReason);
}

impl<F> EvictionListener for F
where
  F: Fn(&CacheEntry, EvictionReason) + Send + Sync,
{
  fn on_evict(&self, entry: &CacheEntry, reason: EvictionReason) {
    self(entry, reason)
  }
}
