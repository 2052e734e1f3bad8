#![allow(dead_code)]

use std::sync::Arc;

use cs_policy::{CacheEntry, ContentStore, Data, EvictionListener, EvictionReason};
use parking_lot::Mutex;

/// Records every removal the store reports, in order.
#[derive(Clone, Default)]
pub struct RecordingListener {
  events: Arc<Mutex<Vec<(String, EvictionReason)>>>,
}

impl RecordingListener {
  pub fn events(&self) -> Vec<(String, EvictionReason)> {
    self.events.lock().clone()
  }

  pub fn evicted(&self) -> Vec<String> {
    self
      .events
      .lock()
      .iter()
      .filter(|(_, reason)| *reason == EvictionReason::Capacity)
      .map(|(name, _)| name.clone())
      .collect()
  }
}

impl EvictionListener for RecordingListener {
  fn on_evict(&self, entry: &CacheEntry, reason: EvictionReason) {
    self.events.lock().push((entry.name().to_string(), reason));
  }
}

pub fn data(name: &str) -> Data {
  Data::new(name, name.as_bytes().to_vec())
}

pub fn build_store(policy: &str, limit: usize) -> (ContentStore, RecordingListener) {
  let listener = RecordingListener::default();
  let store = ContentStore::builder()
    .policy(policy)
    .limit(limit)
    .eviction_listener(listener.clone())
    .build()
    .unwrap();
  (store, listener)
}

/// Names currently stored, sorted.
pub fn stored_names(store: &ContentStore) -> Vec<String> {
  let mut names: Vec<String> = store.entries().map(|e| e.name().to_string()).collect();
  names.sort();
  names
}
