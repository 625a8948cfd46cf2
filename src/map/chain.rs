//! Ordered map implementation.
//!
//! ## Architecture
//!
//! The map is a singly-linked chain kept in ascending key order:
//!
//! - **Slab**: arena storage for chain nodes, links are slab keys
//! - **Head**: slab key of the smallest node, `None` when empty
//! - **Capability set**: copies, releases and compares every element
//!
//! ```text
//! head -> [k=1] -> [k=2] -> [k=5] -> None
//! ```
//!
//! Lookups walk from the head and stop as soon as a node compares greater
//! than the target, since no later node can match.
//!
//! ## Example
//!
//! ```
//! use ordered_chain::{Natural, OrderedMap};
//!
//! let mut map = OrderedMap::new(Natural);
//! map.put(&1, &"a").unwrap();
//! map.put(&3, &"c").unwrap();
//! map.put(&2, &"b").unwrap();
//!
//! let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
//! assert_eq!(entries, vec![(1, "a"), (2, "b"), (3, "c")]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use slab::Slab;

use crate::caps::{Capabilities, Natural};
use crate::error::{Element, MapError};
use crate::map::cursor::{Cursor, Iter, Keys, Values};
use crate::map::node::ChainNode;

/// Ordered key/value container parameterized by a capability set.
///
/// Keys are unique and kept strictly ascending under `C::compare`. Every key
/// and value in the map is a copy produced by the capability set, and is
/// released through it exactly once.
pub struct OrderedMap<K, V, C = Natural>
where
    C: Capabilities<K, V>,
{
    /// Node storage
    /// Key: slab index, Value: ChainNode
    nodes: Slab<ChainNode<K, V>>,

    /// Smallest node in the chain (slab key)
    head: Option<usize>,

    /// Copy/free/compare behavior, fixed for the map's lifetime
    caps: C,
}

impl<K, V> Default for OrderedMap<K, V, Natural>
where
    K: Ord + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(Natural)
    }
}

impl<K, V, C> OrderedMap<K, V, C>
where
    C: Capabilities<K, V>,
{
    /// Create a new empty map
    pub fn new(caps: C) -> Self {
        Self {
            nodes: Slab::new(),
            head: None,
            caps,
        }
    }

    /// Create a map with pre-allocated node storage
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_chain::{Natural, OrderedMap};
    ///
    /// let map: OrderedMap<u32, u32> = OrderedMap::with_capacity(Natural, 1_000);
    /// assert!(map.capacity() >= 1_000);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(caps: C, capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            caps,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of entries in the map
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the map holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes the map can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserve room for at least `additional` more nodes
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// The capability set this map was built with
    #[inline]
    pub fn capabilities(&self) -> &C {
        &self.caps
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Check if a key compares equal to some stored key
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Borrow the value stored under `key`
    ///
    /// The returned reference borrows the map, so any later mutation of the
    /// map ends its lifetime.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_chain::{Natural, OrderedMap};
    ///
    /// let mut map = OrderedMap::new(Natural);
    /// map.put(&10u64, &"ten").unwrap();
    ///
    /// assert_eq!(map.get(&10), Some(&"ten"));
    /// assert_eq!(map.get(&11), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|idx| &self.nodes[idx].value)
    }

    /// Mutably borrow the value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.nodes[idx].value)
    }

    /// The entry with the smallest key
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.head.map(|idx| {
            let node = &self.nodes[idx];
            (&node.key, &node.value)
        })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a copy of `key` and `value`, or replace the value stored under
    /// an equal key
    ///
    /// When the key is already present its node keeps its position and its
    /// stored key; only the value is swapped for a fresh copy and the old
    /// value is released.
    ///
    /// # Errors
    ///
    /// `MapError::OutOfMemory` if the capability set failed to copy the key or
    /// the value. The map is left exactly as it was before the call.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_chain::{Natural, OrderedMap};
    ///
    /// let mut map = OrderedMap::new(Natural);
    /// map.put(&"b", &1).unwrap();
    /// map.put(&"b", &2).unwrap();
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&"b"), Some(&2));
    /// ```
    pub fn put(&mut self, key: &K, value: &V) -> Result<(), MapError> {
        let (prev, candidate) = self.locate(key);

        // Equal key: update in place
        if let Some(idx) = candidate.filter(|&idx| self.matches(idx, key)) {
            let data = self
                .caps
                .copy_data(value)
                .ok_or(MapError::OutOfMemory { element: Element::Value })?;
            let old = std::mem::replace(&mut self.nodes[idx].value, data);
            self.caps.free_data(old);
            return Ok(());
        }

        let (new_key, data) = self.copy_entry(key, value)?;
        let mut node = ChainNode::new(new_key, data);
        node.next = candidate;
        let idx = self.nodes.insert(node);

        match prev {
            Some(prev) => self.nodes[prev].next = Some(idx),
            None => self.head = Some(idx),
        }

        Ok(())
    }

    /// Remove the entry whose key compares equal to `key`, releasing both its
    /// key and its value
    ///
    /// # Errors
    ///
    /// `MapError::ItemDoesNotExist` if no stored key matches. The map is not
    /// modified.
    pub fn remove(&mut self, key: &K) -> Result<(), MapError> {
        let (prev, candidate) = self.locate(key);
        let idx = match candidate {
            Some(idx) if self.matches(idx, key) => idx,
            _ => return Err(MapError::ItemDoesNotExist),
        };

        let node = self.nodes.remove(idx);
        match prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }

        let (key, value) = node.into_parts();
        self.caps.free_key(key);
        self.caps.free_data(value);

        Ok(())
    }

    /// Release every entry. The capability set is retained.
    pub fn clear(&mut self) {
        self.head = None;
        for node in self.nodes.drain() {
            let (key, value) = node.into_parts();
            self.caps.free_key(key);
            self.caps.free_data(value);
        }
    }

    // ========================================================================
    // Copying
    // ========================================================================

    /// Deep-copy the map
    ///
    /// The copy shares a clone of the capability set but owns an independent
    /// chain: every key and value is re-copied through `copy_key` and
    /// `copy_data`, in the source's order.
    ///
    /// # Errors
    ///
    /// `MapError::OutOfMemory` if any copy fails. Everything copied so far is
    /// released through the free hooks and `self` is untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use ordered_chain::{Natural, OrderedMap};
    ///
    /// let mut original = OrderedMap::new(Natural);
    /// original.put(&1, &"one").unwrap();
    ///
    /// let mut copy = original.try_clone().unwrap();
    /// copy.remove(&1).unwrap();
    ///
    /// assert_eq!(original.len(), 1);
    /// assert!(copy.is_empty());
    /// ```
    pub fn try_clone(&self) -> Result<Self, MapError>
    where
        C: Clone,
    {
        let mut copy = Self::with_capacity(self.caps.clone(), self.len());
        let mut tail: Option<usize> = None;

        for (key, value) in self.iter() {
            // On failure `copy` is dropped here, which frees the partial chain
            let (new_key, data) = copy.copy_entry(key, value)?;
            let idx = copy.nodes.insert(ChainNode::new(new_key, data));

            match tail {
                Some(tail) => copy.nodes[tail].next = Some(idx),
                None => copy.head = Some(idx),
            }
            tail = Some(idx);
        }

        Ok(copy)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Start a cursor over this map
    ///
    /// See [`Cursor`] for the first/next protocol.
    pub fn cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self)
    }

    /// Iterate over entries in ascending key order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.head)
    }

    /// Iterate over keys in ascending order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterate over values in ascending key order
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Slab key of the first node
    #[inline]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    /// Node stored at a slab key reachable from the head
    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &ChainNode<K, V> {
        &self.nodes[idx]
    }

    /// Walk from the head past every node whose key compares less than `key`.
    ///
    /// Returns the last such node (the splice point) and the node right after
    /// it, which is the only node that can compare equal to `key`.
    fn locate(&self, key: &K) -> (Option<usize>, Option<usize>) {
        let mut prev = None;
        let mut current = self.head;

        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if self.caps.compare(&node.key, key) != Ordering::Less {
                break;
            }
            prev = current;
            current = node.next;
        }

        (prev, current)
    }

    #[inline]
    fn matches(&self, idx: usize, key: &K) -> bool {
        self.caps.compare(&self.nodes[idx].key, key) == Ordering::Equal
    }

    fn find(&self, key: &K) -> Option<usize> {
        let (_, candidate) = self.locate(key);
        candidate.filter(|&idx| self.matches(idx, key))
    }

    /// Copy a key and a value. If the value copy fails, the key copy is
    /// released before returning.
    fn copy_entry(&self, key: &K, value: &V) -> Result<(K, V), MapError> {
        let new_key = self
            .caps
            .copy_key(key)
            .ok_or(MapError::OutOfMemory { element: Element::Key })?;

        match self.caps.copy_data(value) {
            Some(data) => Ok((new_key, data)),
            None => {
                self.caps.free_key(new_key);
                Err(MapError::OutOfMemory { element: Element::Value })
            }
        }
    }
}

impl<K, V, C> Drop for OrderedMap<K, V, C>
where
    C: Capabilities<K, V>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V, C> fmt::Debug for OrderedMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Capabilities<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C>
where
    C: Capabilities<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
