//! Traversal over an [`OrderedMap`].
//!
//! ## Cursor
//!
//! [`Cursor`] implements the first/next protocol: `first()` rewinds to the
//! smallest entry, `next()` steps forward, and both hand back a caller-owned
//! copy of the key (made with `copy_key`). A cursor borrows the map, so the
//! map cannot change underneath it; each cursor keeps its own position.
//!
//! ```text
//! cursor.first() -> Some(k1)
//! cursor.next()  -> Some(k2)
//! cursor.next()  -> None        (end of chain)
//! ```
//!
//! ## Borrowing iterators
//!
//! [`Iter`], [`Keys`] and [`Values`] walk the chain in ascending key order
//! without copying anything.

use std::iter::FusedIterator;

use slab::Slab;

use crate::caps::Capabilities;
use crate::error::{Element, MapError};
use crate::map::chain::OrderedMap;
use crate::map::node::ChainNode;

// ============================================================================
// Cursor
// ============================================================================

/// A position in an [`OrderedMap`] that yields owned key copies.
///
/// # Example
///
/// ```
/// use ordered_chain::{Natural, OrderedMap};
///
/// let mut map = OrderedMap::new(Natural);
/// map.put(&2, &"b").unwrap();
/// map.put(&1, &"a").unwrap();
///
/// let mut cursor = map.cursor();
/// assert_eq!(cursor.first(), Ok(Some(1)));
/// assert_eq!(cursor.next(), Ok(Some(2)));
/// assert_eq!(cursor.next(), Ok(None));
/// ```
pub struct Cursor<'a, K, V, C>
where
    C: Capabilities<K, V>,
{
    map: &'a OrderedMap<K, V, C>,

    /// Current node (slab key), `None` before `first()` or past the end
    position: Option<usize>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C>
where
    C: Capabilities<K, V>,
{
    pub(crate) fn new(map: &'a OrderedMap<K, V, C>) -> Self {
        Self {
            map,
            position: None,
        }
    }

    /// Rewind to the smallest entry and copy its key
    ///
    /// Any previous position is abandoned.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the map is empty.
    ///
    /// # Errors
    ///
    /// `MapError::OutOfMemory` if the key copy failed. The cursor is still
    /// positioned on the first entry.
    pub fn first(&mut self) -> Result<Option<K>, MapError> {
        self.position = self.map.head();
        self.copy_current()
    }

    /// Step to the next entry and copy its key
    ///
    /// # Returns
    ///
    /// `Ok(None)` once the end of the chain is passed, or if `first()` was
    /// never called.
    ///
    /// # Errors
    ///
    /// `MapError::OutOfMemory` if the key copy failed. The cursor has still
    /// advanced, so the caller can keep stepping.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<K>, MapError> {
        match self.position {
            Some(idx) => {
                self.position = self.map.node(idx).next;
                self.copy_current()
            }
            None => Ok(None),
        }
    }

    /// Borrow the entry under the cursor without copying
    pub fn current(&self) -> Option<(&'a K, &'a V)> {
        let map = self.map;
        self.position.map(|idx| {
            let node = map.node(idx);
            (&node.key, &node.value)
        })
    }

    fn copy_current(&self) -> Result<Option<K>, MapError> {
        match self.position {
            Some(idx) => self
                .map
                .capabilities()
                .copy_key(&self.map.node(idx).key)
                .map(Some)
                .ok_or(MapError::OutOfMemory { element: Element::Key }),
            None => Ok(None),
        }
    }
}

// ============================================================================
// Borrowing iterators
// ============================================================================

/// Iterator over `(&K, &V)` in ascending key order.
pub struct Iter<'a, K, V> {
    nodes: &'a Slab<ChainNode<K, V>>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a Slab<ChainNode<K, V>>, head: Option<usize>) -> Self {
        Self {
            nodes,
            next: head,
            remaining: nodes.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.next?];
        self.next = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// Iterator over `&K` in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over `&V` in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

// ============================================================================
// Unit Tests
// ============================================================================
