use std::collections::HashMap;
use std::hash::Hash;

use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Node<K> {
  key: K,
  next: Option<Index>,
  prev: Option<Index>,
}

// An arena-backed ordered list with O(1) lookup, push, move and removal.
// The head is the newest (or most recently used) key, the tail the oldest.
#[derive(Debug)]
pub(super) struct LruList<K: Eq + Hash + Clone> {
  nodes: Arena<Node<K>>,
  lookup: HashMap<K, Index, ahash::RandomState>,
  head: Option<Index>,
  tail: Option<Index>,
}

impl<K: Eq + Hash + Clone> LruList<K> {
  pub fn new() -> Self {
    Self {
      nodes: Arena::new(),
      lookup: HashMap::default(),
      head: None,
      tail: None,
    }
  }

  fn unlink(&mut self, index: Index) {
    let node = &self.nodes[index];
    let prev_node_idx = node.prev;
    let next_node_idx = node.next;

    if let Some(prev_idx) = prev_node_idx {
      self.nodes[prev_idx].next = next_node_idx;
    } else {
      self.head = next_node_idx;
    }

    if let Some(next_idx) = next_node_idx {
      self.nodes[next_idx].prev = prev_node_idx;
    } else {
      self.tail = prev_node_idx;
    }
  }

  fn push_front_node(&mut self, index: Index) {
    let old_head_idx = self.head;
    self.nodes[index].next = old_head_idx;
    self.nodes[index].prev = None;
    self.head = Some(index);

    if let Some(old_head) = old_head_idx {
      self.nodes[old_head].prev = Some(index);
    }

    if self.tail.is_none() {
      self.tail = Some(index);
    }
  }

  pub fn contains(&self, key: &K) -> bool {
    self.lookup.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.lookup.len()
  }

  /// Inserts `key` at the front, or moves it there if already present.
  pub fn push_front(&mut self, key: K) {
    if self.contains(&key) {
      self.move_to_front(&key);
    } else {
      self.insert_front(key);
    }
  }

  /// Inserts `key` at the front unless it is already present, in which case
  /// its position is kept. Returns whether it was inserted.
  pub fn push_front_if_absent(&mut self, key: K) -> bool {
    if self.contains(&key) {
      return false;
    }
    self.insert_front(key);
    true
  }

  fn insert_front(&mut self, key: K) {
    let index = self.nodes.insert(Node {
      key: key.clone(),
      next: None,
      prev: None,
    });
    self.lookup.insert(key, index);
    self.push_front_node(index);
  }

  pub fn move_to_front(&mut self, key: &K) -> bool {
    let Some(&index) = self.lookup.get(key) else {
      return false;
    };
    if self.head != Some(index) {
      self.unlink(index);
      self.push_front_node(index);
    }
    true
  }

  pub fn pop_back(&mut self) -> Option<K> {
    let tail_index = self.tail?;
    self.unlink(tail_index);
    let node = self.nodes.remove(tail_index)?;
    self.lookup.remove(&node.key);
    Some(node.key)
  }

  pub fn remove(&mut self, key: &K) -> bool {
    let Some(&index) = self.lookup.get(key) else {
      return false;
    };
    self.unlink(index);
    self.nodes.remove(index);
    self.lookup.remove(key);
    true
  }

  /// Pops from the back until at most `capacity` keys remain, oldest first.
  pub fn truncate_back(&mut self, capacity: usize) -> Vec<K> {
    let mut victims = Vec::new();
    while self.len() > capacity {
      match self.pop_back() {
        Some(key) => victims.push(key),
        None => break,
      }
    }
    victims
  }

  pub fn clear(&mut self) {
    self.nodes.clear();
    self.lookup.clear();
    self.head = None;
    self.tail = None;
  }

  // Keys from head to tail.
  #[cfg(test)]
  pub(crate) fn keys_as_vec(&self) -> Vec<K> {
    let mut keys = Vec::new();
    let mut current = self.head;
    while let Some(index) = current {
      keys.push(self.nodes[index].key.clone());
      current = self.nodes[index].next;
    }
    keys
  }
}
