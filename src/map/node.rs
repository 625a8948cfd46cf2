//! Chain node for slab-based storage.
//!
//! ## Design
//!
//! `ChainNode` holds one stored (key, value) pair plus the slab key of its
//! successor. Every node is reachable from exactly one place: the map's head
//! or its predecessor's `next` link.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! Slab keys are an internal detail. They never leave the map.

/// Node stored in the slab.
///
/// ```text
/// head -> ChainNode { key: 1, next: Some(7) } -> ChainNode { key: 2, next: None }
/// ```
#[derive(Debug, Clone)]
pub(crate) struct ChainNode<K, V> {
    /// The stored key (a copy owned by the map)
    pub(crate) key: K,

    /// The stored value (a copy owned by the map)
    pub(crate) value: V,

    /// Next node in ascending key order (slab key)
    /// None if this is the last node
    pub(crate) next: Option<usize>,
}

impl<K, V> ChainNode<K, V> {
    /// Create a new node (not yet linked)
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }

    /// Split the node into its stored key and value, dropping the link
    #[inline]
    pub(crate) fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
