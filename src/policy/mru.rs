//! MRU (Most Recently Used) cache replacement policy.
//!
//! The inverse of LRU: the same recency list, but eviction takes the FRONT.
//! Useful for cyclic scans where the item touched last is the one least
//! likely to be needed again soon, so cold entries are retained.
//!
//! The recency list has the most recently touched entry at the front; new
//! inserts and accesses both move to the front, and overflow evicts the
//! front. Enumeration is front-to-back, most recent first.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::order_list::{NodeId, OrderList};
use crate::policy::effective_capacity;

/// MRU policy core; evicts the most recently used entry on overflow.
///
/// # Example
///
/// ```
/// use memocache::policy::mru::MruPolicy;
///
/// let mut policy = MruPolicy::with_capacity(2);
/// policy.insert("a", 1);
/// policy.insert("b", 2);
/// policy.insert("c", 3); // evicts "b", the most recently used
///
/// assert!(policy.peek(&"b").is_none());
/// assert_eq!(policy.peek(&"a"), Some(&1));
/// ```
#[derive(Debug)]
pub struct MruPolicy<K, V> {
    items: FxHashMap<K, NodeId>,
    order: OrderList<(K, V)>,
    capacity: usize,
}

impl<K, V> MruPolicy<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a policy with the default capacity of 128.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a policy bounded at `capacity` entries; zero selects the
    /// default capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = effective_capacity(capacity);
        Self {
            items: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: OrderList::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts or replaces `key`, marking it most recently used.
    ///
    /// A new insertion at capacity first evicts the current most recently
    /// used entry, so the incoming key is never its own victim.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(&node) = self.items.get(&key) {
            if let Some((_, slot)) = self.order.get_mut(node) {
                *slot = value;
            }
            self.order.move_to_front(node);
            return;
        }

        if self.items.len() >= self.capacity {
            if let Some((victim, _)) = self.order.pop_front() {
                self.items.remove(&victim);
            }
        }
        let node = self.order.push_front((key.clone(), value));
        self.items.insert(key, node);
    }

    /// Returns the value for `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let node = *self.items.get(key)?;
        self.order.move_to_front(node);
        self.order.get(node).map(|(_, value)| value)
    }

    /// Returns the value for `key` without updating recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let node = *self.items.get(key)?;
        self.order.get(node).map(|(_, value)| value)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.items.remove(key)?;
        self.order.remove(node).map(|(_, value)| value)
    }

    /// Returns keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the policy holds no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> Default for MruPolicy<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
