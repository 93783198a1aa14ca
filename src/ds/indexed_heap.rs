//! Binary min-heap with back-pointers for O(log n) priority updates.
//!
//! A plain `BinaryHeap` cannot reprioritize an element in place, so this heap
//! keeps a side map from key to heap slot. Changing a key's priority sifts
//! the slot up or down; removing a key swaps it with the last slot and sifts
//! the replacement.
//!
//! ## Architecture
//!
//! ```text
//!   data: Vec<(P, K)>                positions: FxHashMap<K, usize>
//!
//!            (1, b)  [0]             ┌─────┬───┐
//!           /      \                 │  b  │ 0 │
//!      (3, a) [1]  (2, c) [2]        │  a  │ 1 │
//!                                    │  c  │ 2 │
//!                                    └─────┴───┘
//! ```
//!
//! ## Performance
//! - `insert` / `update` / `remove` / `pop_min`: O(log n)
//! - `priority` / `contains`: O(1)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Min-heap keyed by `K` with priorities `P` and O(log n) updates.
#[derive(Debug)]
pub struct IndexedMinHeap<K, P> {
    data: Vec<(P, K)>,
    positions: FxHashMap<K, usize>,
}

impl<K, P> IndexedMinHeap<K, P>
where
    K: Eq + Hash + Clone,
    P: Ord,
{
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Creates an empty heap with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the number of keys in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the current priority of `key`, if present.
    pub fn priority(&self, key: &K) -> Option<&P> {
        let idx = *self.positions.get(key)?;
        self.data.get(idx).map(|(priority, _)| priority)
    }

    /// Inserts `key` with `priority`, or reprioritizes it if already present.
    pub fn insert(&mut self, key: K, priority: P) {
        if self.positions.contains_key(&key) {
            self.update(&key, priority);
            return;
        }
        let idx = self.data.len();
        self.positions.insert(key.clone(), idx);
        self.data.push((priority, key));
        self.sift_up(idx);
    }

    /// Changes the priority of `key`; returns `false` if absent.
    pub fn update(&mut self, key: &K, priority: P) -> bool {
        let idx = match self.positions.get(key) {
            Some(idx) => *idx,
            None => return false,
        };
        self.data[idx].0 = priority;
        let idx = self.sift_up(idx);
        self.sift_down(idx);
        true
    }

    /// Removes `key` and returns its priority, if present.
    pub fn remove(&mut self, key: &K) -> Option<P> {
        let idx = self.positions.remove(key)?;
        let last = self.data.len() - 1;
        self.data.swap(idx, last);
        let (priority, _) = self.data.pop().expect("position points into heap");
        if idx < self.data.len() {
            self.positions.insert(self.data[idx].1.clone(), idx);
            let idx = self.sift_up(idx);
            self.sift_down(idx);
        }
        Some(priority)
    }

    /// Removes and returns the minimum `(key, priority)` pair.
    pub fn pop_min(&mut self) -> Option<(K, P)> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let (priority, key) = self.data.pop().expect("heap is non-empty");
        self.positions.remove(&key);
        if !self.data.is_empty() {
            self.positions.insert(self.data[0].1.clone(), 0);
            self.sift_down(0);
        }
        Some((key, priority))
    }

    /// Returns the minimum `(key, priority)` without removing it.
    pub fn peek_min(&self) -> Option<(&K, &P)> {
        self.data.first().map(|(priority, key)| (key, priority))
    }

    fn sift_up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].0 >= self.data[parent].0 {
                break;
            }
            self.swap_slots(idx, parent);
            idx = parent;
        }
        idx
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < self.data.len() && self.data[left].0 < self.data[smallest].0 {
                smallest = left;
            }
            if right < self.data.len() && self.data[right].0 < self.data[smallest].0 {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.swap_slots(idx, smallest);
            idx = smallest;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.positions.insert(self.data[a].1.clone(), a);
        self.positions.insert(self.data[b].1.clone(), b);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.data.len(), self.positions.len());
        for (key, &idx) in &self.positions {
            assert!(idx < self.data.len());
            assert!(&self.data[idx].1 == key);
        }
        for idx in 1..self.data.len() {
            let parent = (idx - 1) / 2;
            assert!(self.data[parent].0 <= self.data[idx].0);
        }
    }
}

impl<K, P> Default for IndexedMinHeap<K, P>
where
    K: Eq + Hash + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
