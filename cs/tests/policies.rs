// cs/tests/policies.rs

mod common;

use common::{build_store, data, stored_names};
use cs_policy::EvictionReason;
use pretty_assertions::assert_eq;

// --- LFU Policy Tests ---
mod lfu {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_capacity_two_scenario() {
    let (mut store, listener) = build_store("lfu", 2);

    assert!(store.insert(data("/A"), false));
    assert!(store.insert(data("/B"), false));
    assert!(store.find("/A").is_some());

    assert!(store.insert(data("/C"), false));

    assert_eq!(stored_names(&store), vec!["/A", "/C"]);
    assert_eq!(listener.evicted(), vec!["/B"], "exactly one eviction, for B");
  }

  #[test]
  fn test_frequent_entries_survive_a_scan() {
    let (mut store, listener) = build_store("lfu", 3);
    store.insert(data("/hot"), false);
    for _ in 0..5 {
      store.find("/hot");
    }
    store.insert(data("/warm"), false);
    store.find("/warm");

    for i in 0..10 {
      store.insert(data(&format!("/scan/{i}")), false);
    }

    assert!(store.contains("/hot"));
    assert!(store.contains("/warm"));
    assert_eq!(store.len(), 3);
    assert_eq!(listener.evicted().len(), 9);
  }

  #[test]
  fn test_newest_zero_count_entry_is_evicted_first() {
    let (mut store, listener) = build_store("lfu", 3);
    store.insert(data("/a"), false);
    store.insert(data("/b"), false);
    store.insert(data("/c"), false);
    store.insert(data("/d"), false);

    assert_eq!(listener.evicted(), vec!["/c"]);
    assert_eq!(stored_names(&store), vec!["/a", "/b", "/d"]);
  }

  #[test]
  fn test_refresh_does_not_protect_an_entry() {
    let (mut store, listener) = build_store("lfu", 2);
    store.insert(data("/a"), false);
    store.insert(data("/b"), false);
    store.find("/a");
    assert!(!store.insert(data("/b"), false), "second insert is a refresh");

    store.insert(data("/c"), false);
    assert_eq!(listener.evicted(), vec!["/b"]);
  }

  #[test]
  fn test_erase_is_reported_as_invalidation_and_frees_a_slot() {
    let (mut store, listener) = build_store("lfu", 2);
    store.insert(data("/a"), false);
    store.insert(data("/b"), false);

    assert!(store.erase("/a"));
    assert!(!store.erase("/a"));
    store.insert(data("/c"), false);

    assert_eq!(stored_names(&store), vec!["/b", "/c"]);
    assert_eq!(
      listener.events(),
      vec![("/a".to_string(), EvictionReason::Invalidated)]
    );
  }

  #[test]
  fn test_zero_limit_retains_nothing() {
    let (mut store, listener) = build_store("lfu", 0);
    assert!(store.insert(data("/a"), false));
    assert!(store.is_empty());
    assert!(store.find("/a").is_none());
    assert_eq!(listener.evicted(), vec!["/a"]);
  }

  #[test]
  fn test_lowering_limit_evicts_least_frequent() {
    let (mut store, listener) = build_store("lfu", 4);
    for name in ["/a", "/b", "/c", "/d"] {
      store.insert(data(name), false);
    }
    store.find("/b");
    store.find("/d");
    store.find("/d");

    store.set_limit(2);

    assert_eq!(store.limit(), 2);
    assert_eq!(stored_names(&store), vec!["/b", "/d"]);
    assert_eq!(listener.evicted(), vec!["/c", "/a"]);
  }

  #[test]
  fn test_unsolicited_flag_is_kept() {
    let (mut store, _) = build_store("lfu", 2);
    store.insert(data("/u"), true);
    let entry = store.find("/u").unwrap();
    assert!(entry.is_unsolicited());
    assert_eq!(entry.data().content(), b"/u");
  }
}

// --- LRU Policy Tests ---
mod lru {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_lru_eviction_logic() {
    let (mut store, listener) = build_store("lru", 3);
    store.insert(data("/1"), false);
    store.insert(data("/2"), false);
    store.insert(data("/3"), false);

    store.find("/1");
    store.insert(data("/4"), false);

    assert_eq!(listener.evicted(), vec!["/2"]);
    assert_eq!(stored_names(&store), vec!["/1", "/3", "/4"]);
  }
}

// --- FIFO Policy Tests ---
mod fifo {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_fifo_eviction_logic() {
    let (mut store, listener) = build_store("fifo", 3);
    store.insert(data("/1"), false);
    store.insert(data("/2"), false);
    store.insert(data("/3"), false);

    store.find("/1");
    store.insert(data("/4"), false);

    assert_eq!(listener.evicted(), vec!["/1"]);
    assert_eq!(stored_names(&store), vec!["/2", "/3", "/4"]);
  }
}
