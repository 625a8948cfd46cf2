//! Ordered map module.
//!
//! ## Architecture
//!
//! The map is a sorted singly-linked chain with:
//!
//! - **Slab-based storage**: nodes live in an arena, links are slab keys
//! - **Ascending order**: every put walks to its unique splice point
//! - **Capability set**: all copies, releases and comparisons go through `C`
//!
//! ## Components
//!
//! - `ChainNode`: one stored (key, value) pair and the link to its successor
//! - [`OrderedMap`]: the container and all of its operations
//! - [`Cursor`]: first/next traversal yielding owned key copies
//! - [`Iter`], [`Keys`], [`Values`]: borrowing iterators
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | put / get / contains / remove | O(n) |
//! | first / next | O(1) plus one key copy |
//! | try_clone | O(n) copies |
//! | clear | O(n) releases |
//!
//! There is no rebalancing or hashing; the chain is scanned from its head.

mod node;
pub mod chain;
pub mod cursor;

pub use chain::OrderedMap;
pub use cursor::{Cursor, Iter, Keys, Values};
