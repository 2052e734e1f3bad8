use crate::builder::ContentStoreBuilder;
use crate::entry::{CacheEntry, Data, EntryRef};
use crate::listener::{EvictionListener, EvictionReason};
use crate::policy::{EvictionPolicy, PolicyContext, StoreView};

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use generational_arena::{Arena, Index};
use tracing::{debug, info, warn};

/// The store's own record table, keyed by data name.
#[derive(Default)]
struct Table {
  records: Arena<CacheEntry>,
  by_name: HashMap<String, Index, ahash::RandomState>,
}

impl StoreView for Table {
  fn live_entries(&self) -> Box<dyn Iterator<Item = (EntryRef, &CacheEntry)> + '_> {
    Box::new(self.records.iter().map(|(index, entry)| (EntryRef(index), entry)))
  }
}

/// A minimal in-memory content store driven by a replacement policy.
///
/// Records are keyed by data name. Every mutation or hit is reported to the
/// policy through its lifecycle hooks; whatever the policy selects for
/// eviction is removed from the table before the call returns.
///
/// The store is single-threaded. Wrap it in a
/// [`SharedContentStore`](crate::SharedContentStore) to drive it from several
/// threads.
pub struct ContentStore {
  table: Table,
  policy: Box<dyn EvictionPolicy>,
  listener: Option<Arc<dyn EvictionListener>>,
  // Eviction notifications collected during the current hook.
  pending: Vec<EntryRef>,
  // Removed records not yet handed to the listener.
  removed: Vec<(CacheEntry, EvictionReason)>,
  // Set while owned by a `SharedContentStore`, which delivers removals
  // itself once its lock is released.
  defer_delivery: bool,
}

/// Removals taken out of a store, ready to be handed to its listener.
pub(crate) struct Removals {
  listener: Option<Arc<dyn EvictionListener>>,
  removed: Vec<(CacheEntry, EvictionReason)>,
}

impl Removals {
  pub(crate) fn deliver(self) {
    let Some(listener) = self.listener else {
      return;
    };
    for (entry, reason) in &self.removed {
      listener.on_evict(entry, *reason);
    }
  }
}

impl fmt::Debug for ContentStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContentStore")
      .field("policy", &self.policy.name())
      .field("limit", &self.policy.limit())
      .field("len", &self.len())
      .field("has_listener", &self.listener.is_some())
      .finish()
  }
}

impl ContentStore {
  pub fn builder() -> ContentStoreBuilder {
    ContentStoreBuilder::new()
  }

  /// Creates an empty store around an already constructed policy.
  ///
  /// Any state the policy was tracking is discarded.
  pub fn with_policy(
    mut policy: Box<dyn EvictionPolicy>,
    limit: usize,
    listener: Option<Arc<dyn EvictionListener>>,
  ) -> Self {
    policy.clear();
    let mut store = Self {
      table: Table::default(),
      policy,
      listener,
      pending: Vec::new(),
      removed: Vec::new(),
      defer_delivery: false,
    };
    store.set_limit(limit);
    info!(policy = store.policy.name(), limit, "content store ready");
    store
  }

  /// Admits `data`, or refreshes the record already stored under its name.
  ///
  /// Returns `true` if a new record was admitted. A refresh keeps the stored
  /// record as it is.
  pub fn insert(&mut self, data: impl Into<Arc<Data>>, unsolicited: bool) -> bool {
    let data = data.into();

    if let Some(&index) = self.table.by_name.get(data.name()) {
      let entry = self.table.records[index].clone();
      debug!(name = entry.name(), "refreshing cached entry");
      self.policy.after_refresh(&entry);
      return false;
    }

    let entry = CacheEntry::new(data, unsolicited);
    let index = self.table.records.insert(entry.clone());
    self.table.by_name.insert(entry.name().to_string(), index);
    debug!(name = entry.name(), unsolicited, "admitted new entry");

    let mut cx = PolicyContext::new(&self.table, &mut self.pending);
    self.policy.after_insert(&entry, &mut cx);
    self.apply_evictions();
    self.flush_removals();
    true
  }

  /// Looks up `name`, reporting a hit to the policy.
  pub fn find(&mut self, name: &str) -> Option<CacheEntry> {
    let &index = self.table.by_name.get(name)?;
    let entry = self.table.records[index].clone();
    self.policy.before_use(&entry);
    Some(entry)
  }

  /// Returns `true` if a record is stored under `name`. This is not a hit.
  pub fn contains(&self, name: &str) -> bool {
    self.table.by_name.contains_key(name)
  }

  /// Removes the record stored under `name`.
  pub fn erase(&mut self, name: &str) -> bool {
    let Some(&index) = self.table.by_name.get(name) else {
      return false;
    };

    let entry = self.table.records[index].clone();
    self.policy.before_erase(&entry);
    self.table.records.remove(index);
    self.table.by_name.remove(name);
    debug!(name, "erased entry");

    self.record_removal(entry, EvictionReason::Invalidated);
    self.flush_removals();
    true
  }

  /// Changes the limit, evicting immediately if the store is over it.
  pub fn set_limit(&mut self, limit: usize) {
    let mut cx = PolicyContext::new(&self.table, &mut self.pending);
    self.policy.set_limit(limit, &mut cx);
    self.apply_evictions();
    self.flush_removals();
  }

  pub fn limit(&self) -> usize {
    self.policy.limit()
  }

  pub fn policy_name(&self) -> &'static str {
    self.policy.name()
  }

  pub fn len(&self) -> usize {
    self.table.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.records.is_empty()
  }

  /// Iterates over the stored records in no particular order.
  pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> + '_ {
    self.table.records.iter().map(|(_, entry)| entry)
  }

  /// Drops every record and all policy state without notifying.
  pub fn clear(&mut self) {
    self.policy.clear();
    self.table.records.clear();
    self.table.by_name.clear();
  }

  fn apply_evictions(&mut self) {
    for handle in self.pending.drain(..) {
      let Some(entry) = self.table.records.remove(handle.0) else {
        warn!(?handle, "eviction notification for a record that is already gone");
        continue;
      };
      self.table.by_name.remove(entry.name());
      debug!(name = entry.name(), "evicted entry");

      if self.listener.is_some() {
        self.removed.push((entry, EvictionReason::Capacity));
      }
    }
  }

  fn record_removal(&mut self, entry: CacheEntry, reason: EvictionReason) {
    if self.listener.is_some() {
      self.removed.push((entry, reason));
    }
  }

  fn flush_removals(&mut self) {
    if !self.defer_delivery {
      self.take_removals().deliver();
    }
  }

  pub(crate) fn defer_delivery(&mut self) {
    self.defer_delivery = true;
  }

  pub(crate) fn take_removals(&mut self) -> Removals {
    Removals {
      listener: self.listener.clone(),
      removed: std::mem::take(&mut self.removed),
    }
  }
}
