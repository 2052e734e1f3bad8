use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use generational_arena::{Arena, Index};
use tracing::trace;

#[derive(Debug)]
struct Node<K> {
  key: K,
  count: u64,
  prev: Option<Index>,
  next: Option<Index>,
}

/// Tracks entries in a list ordered by access count, highest first.
///
/// Walking from the head to the tail, counts never increase. Within one count
/// the entries keep the order in which they reached that count, so the most
/// recent arrival sits nearest the tail and is the first to be evicted among
/// its equals.
/// This is intentionally not "oldest at a count goes first": a freshly
/// admitted entry that has not been hit yet is the first to leave.
///
/// Every node lives in the arena and is indexed by exactly one lookup entry.
/// The arena owns the node, so dropping it from the arena is the one and only
/// place its memory is released.
pub struct FrequencyStructure<K> {
  nodes: Arena<Node<K>>,
  lookup: HashMap<K, Index, ahash::RandomState>,
  // Highest count.
  head: Option<Index>,
  // Lowest count; the next eviction victim.
  tail: Option<Index>,
}

impl<K> Default for FrequencyStructure<K> {
  fn default() -> Self {
    Self {
      nodes: Arena::new(),
      lookup: HashMap::default(),
      head: None,
      tail: None,
    }
  }
}

impl<K: fmt::Debug> fmt::Debug for FrequencyStructure<K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<K> FrequencyStructure<K> {
  /// Iterates from the most to the least frequently used entry.
  pub fn iter(&self) -> Iter<'_, K> {
    Iter {
      nodes: &self.nodes,
      cursor: self.head,
    }
  }
}

impl<K> FrequencyStructure<K>
where
  K: Eq + Hash + Clone + fmt::Debug,
{
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.lookup.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.lookup.is_empty()
  }

  #[inline]
  pub fn contains(&self, key: &K) -> bool {
    self.lookup.contains_key(key)
  }

  /// Returns the recorded access count of `key`, if it is tracked.
  pub fn count(&self, key: &K) -> Option<u64> {
    self.lookup.get(key).map(|&index| self.nodes[index].count)
  }

  /// Starts tracking `key` with a count of zero.
  ///
  /// Returns `false`, leaving the structure untouched, if `key` is already
  /// tracked.
  pub fn add(&mut self, key: K) -> bool {
    if self.lookup.contains_key(&key) {
      return false;
    }

    trace!(?key, "frequency add");
    let index = self.nodes.insert(Node {
      key: key.clone(),
      count: 0,
      prev: None,
      next: None,
    });
    self.lookup.insert(key, index);

    // Zero is the lowest count, so a fresh node always lands at the tail.
    let tail = self.tail;
    self.place(index, tail);
    true
  }

  /// Records one use of `key`, moving it into the next frequency bucket.
  ///
  /// Returns `false` if `key` is not tracked.
  pub fn touch(&mut self, key: &K) -> bool {
    let Some(&index) = self.lookup.get(key) else {
      return false;
    };

    // Everything after the node counts no more than it does, so the new
    // position is found by walking backwards from the old one.
    let prev = self.nodes[index].prev;
    self.unlink(index);
    let node = &mut self.nodes[index];
    node.count = node.count.saturating_add(1);
    trace!(?key, count = node.count, "frequency touch");
    self.place(index, prev);
    true
  }

  /// Stops tracking `key`, releasing its node.
  ///
  /// Returns `false` if `key` was not tracked.
  pub fn remove(&mut self, key: &K) -> bool {
    let Some(&index) = self.lookup.get(key) else {
      return false;
    };

    // Neighbors are read while the node is still owned; only then is it
    // released and its lookup entry dropped.
    self.unlink(index);
    let node = self.nodes.remove(index);
    debug_assert!(node.is_some(), "lookup pointed at a released node");
    self.lookup.remove(key);
    trace!(?key, "frequency remove");
    true
  }

  /// Evicts the least frequently used entries until at most `capacity`
  /// remain, returning them in eviction order.
  pub fn evict_lowest(&mut self, capacity: usize) -> Vec<K> {
    let mut victims = Vec::with_capacity(self.len().saturating_sub(capacity));

    while self.lookup.len() > capacity {
      let Some(index) = self.tail else {
        debug_assert!(false, "lookup holds {} keys but the list is empty", self.lookup.len());
        break;
      };

      self.unlink(index);
      let Some(node) = self.nodes.remove(index) else {
        debug_assert!(false, "tail pointed at a released node");
        break;
      };
      let indexed = self.lookup.remove(&node.key);
      debug_assert_eq!(indexed, Some(index), "tail node is not indexed under its key");

      trace!(key = ?node.key, count = node.count, "frequency evict");
      victims.push(node.key);
    }

    victims
  }

  /// Returns every tracked entry with its count, most frequently used first.
  pub fn snapshot(&self) -> Vec<(K, u64)> {
    self.iter().map(|(key, count)| (key.clone(), count)).collect()
  }

  /// Drops every node.
  pub fn clear(&mut self) {
    self.nodes.clear();
    self.lookup.clear();
    self.head = None;
    self.tail = None;
  }

  // Detaches a node from its neighbors. The node stays in the arena.
  fn unlink(&mut self, index: Index) {
    let node = &self.nodes[index];
    let prev = node.prev;
    let next = node.next;

    match prev {
      Some(prev) => self.nodes[prev].next = next,
      None => self.head = next,
    }
    match next {
      Some(next) => self.nodes[next].prev = prev,
      None => self.tail = prev,
    }

    let node = &mut self.nodes[index];
    node.prev = None;
    node.next = None;
  }

  // Links a detached node after the last node, at or before `from`, whose
  // count is at least the node's own. Everything after `from` must already
  // count strictly less than the node.
  fn place(&mut self, index: Index, from: Option<Index>) {
    let count = self.nodes[index].count;
    let mut after = from;
    while let Some(candidate) = after {
      if self.nodes[candidate].count >= count {
        break;
      }
      after = self.nodes[candidate].prev;
    }

    let next = match after {
      Some(after) => self.nodes[after].next,
      None => self.head,
    };

    {
      let node = &mut self.nodes[index];
      node.prev = after;
      node.next = next;
    }
    match after {
      Some(after) => self.nodes[after].next = Some(index),
      None => self.head = Some(index),
    }
    match next {
      Some(next) => self.nodes[next].prev = Some(index),
      None => self.tail = Some(index),
    }
  }

  /// Walks the whole list and asserts that it agrees with the lookup map and
  /// is ordered by non-increasing count.
  #[cfg(test)]
  pub(crate) fn assert_invariants(&self) {
    let mut seen = 0;
    let mut prev: Option<Index> = None;
    let mut cursor = self.head;
    while let Some(index) = cursor {
      let node = &self.nodes[index];
      assert_eq!(node.prev, prev, "broken back link at {:?}", node.key);
      assert_eq!(self.lookup.get(&node.key), Some(&index), "{:?} is not indexed", node.key);
      if let Some(prev) = prev {
        assert!(self.nodes[prev].count >= node.count, "order violated at {:?}", node.key);
      }
      seen += 1;
      prev = cursor;
      cursor = node.next;
    }
    assert_eq!(self.tail, prev, "tail does not end the list");
    assert_eq!(seen, self.lookup.len(), "list and lookup disagree on size");
    assert_eq!(seen, self.nodes.len(), "arena holds unlinked nodes");
  }
}

/// Borrowing iterator over `(key, count)` pairs, most frequently used first.
pub struct Iter<'a, K> {
  nodes: &'a Arena<Node<K>>,
  cursor: Option<Index>,
}

impl<'a, K> Iterator for Iter<'a, K> {
  type Item = (&'a K, u64);

  fn next(&mut self) -> Option<Self::Item> {
    let nodes = self.nodes;
    let node = &nodes[self.cursor?];
    self.cursor = node.next;
    Some((&node.key, node.count))
  }
}
