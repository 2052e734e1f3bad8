use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use generational_arena::Index;

/// A cached data packet: a name and its opaque content.
///
/// Owned by the store. Policies only ever see it through a [`CacheEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
  name: String,
  content: Vec<u8>,
}

impl Data {
  pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    Self {
      name: name.into(),
      content: content.into(),
    }
  }

  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[inline]
  pub fn content(&self) -> &[u8] {
    &self.content
  }
}

/// The identifying value of one cached item: a shared payload plus the
/// provenance flag recording whether it arrived unsolicited.
///
/// Two entries are equal when they share the same payload allocation and
/// carry the same flag. Two separately allocated packets with identical
/// bytes are distinct entries. Cloning is cheap and never copies the payload.
#[derive(Clone)]
pub struct CacheEntry {
  data: Arc<Data>,
  unsolicited: bool,
}

impl CacheEntry {
  pub fn new(data: Arc<Data>, unsolicited: bool) -> Self {
    Self { data, unsolicited }
  }

  /// Returns the shared payload.
  #[inline]
  pub fn data(&self) -> &Arc<Data> {
    &self.data
  }

  #[inline]
  pub fn name(&self) -> &str {
    self.data.name()
  }

  #[inline]
  pub fn is_unsolicited(&self) -> bool {
    self.unsolicited
  }
}

impl PartialEq for CacheEntry {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.data, &other.data) && self.unsolicited == other.unsolicited
  }
}

impl Eq for CacheEntry {}

impl Hash for CacheEntry {
  fn hash<H: Hasher>(&self, state: &mut H) {
    // Must agree with `eq`: hash the allocation, not the bytes.
    (Arc::as_ptr(&self.data) as usize).hash(state);
    self.unsolicited.hash(state);
  }
}

impl fmt::Debug for CacheEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheEntry")
      .field("name", &self.name())
      .field("unsolicited", &self.unsolicited)
      .finish()
  }
}

/// An opaque handle to one live record in a store's table.
///
/// Handles are generational: once the record is removed, its handle never
/// resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryRef(pub(crate) Index);

impl EntryRef {
  /// Builds a handle from a host table's slot and generation.
  pub fn from_raw_parts(slot: usize, generation: u64) -> Self {
    Self(Index::from_raw_parts(slot, generation))
  }

  pub fn into_raw_parts(self) -> (usize, u64) {
    self.0.into_raw_parts()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn equality_is_by_payload_identity_and_flag() {
    let data = Arc::new(Data::new("/a", b"x".to_vec()));
    let twin = Arc::new(Data::new("/a", b"x".to_vec()));

    let e1 = CacheEntry::new(data.clone(), false);
    let e2 = CacheEntry::new(data.clone(), false);
    let e3 = CacheEntry::new(data, true);
    let e4 = CacheEntry::new(twin, false);

    assert_eq!(e1, e2);
    assert_ne!(e1, e3, "flag is part of the identity");
    assert_ne!(e1, e4, "equal bytes in a different allocation are distinct");
  }

  #[test]
  fn handle_survives_raw_parts() {
    let mut arena = generational_arena::Arena::new();
    let index = arena.insert(());
    let handle = EntryRef(index);

    let (slot, generation) = handle.into_raw_parts();
    assert_eq!(EntryRef::from_raw_parts(slot, generation), handle);

    arena.remove(index);
    let reused = arena.insert(());
    assert_ne!(EntryRef(reused), EntryRef::from_raw_parts(slot, generation));
  }

  #[test]
  fn hash_agrees_with_eq() {
    let data = Arc::new(Data::new("/a", Vec::<u8>::new()));
    let mut set = HashSet::new();
    set.insert(CacheEntry::new(data.clone(), false));
    set.insert(CacheEntry::new(data.clone(), false));
    set.insert(CacheEntry::new(data, true));
    assert_eq!(set.len(), 2);
  }
}
