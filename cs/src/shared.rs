use crate::entry::{CacheEntry, Data};
use crate::store::ContentStore;

use std::sync::Arc;

use parking_lot::Mutex;

/// A cloneable, thread-safe handle to a [`ContentStore`].
///
/// Each call holds one lock for the whole operation, hooks and evictions
/// included, so a policy's internal list is never mutated concurrently.
/// The eviction listener runs after the lock is released and may call back
/// into the store.
#[derive(Debug, Clone)]
pub struct SharedContentStore {
  inner: Arc<Mutex<ContentStore>>,
}

impl SharedContentStore {
  pub fn new(mut store: ContentStore) -> Self {
    store.defer_delivery();
    Self {
      inner: Arc::new(Mutex::new(store)),
    }
  }

  pub fn insert(&self, data: impl Into<Arc<Data>>, unsolicited: bool) -> bool {
    self.with(|store| store.insert(data, unsolicited))
  }

  pub fn find(&self, name: &str) -> Option<CacheEntry> {
    self.inner.lock().find(name)
  }

  pub fn erase(&self, name: &str) -> bool {
    self.with(|store| store.erase(name))
  }

  pub fn set_limit(&self, limit: usize) {
    self.with(|store| store.set_limit(limit))
  }

  pub fn len(&self) -> usize {
    self.inner.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lock().is_empty()
  }

  /// Runs `f` with exclusive access to the store.
  ///
  /// Removals made by `f` reach the listener once the lock is released.
  pub fn with<R>(&self, f: impl FnOnce(&mut ContentStore) -> R) -> R {
    let (result, removals) = {
      let mut store = self.inner.lock();
      let result = f(&mut store);
      (result, store.take_removals())
    };
    removals.deliver();
    result
  }
}
