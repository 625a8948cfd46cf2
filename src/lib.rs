//! # ordered-chain
//!
//! A sorted key/value container parameterized by a capability set that
//! copies, releases and compares its elements.
//!
//! ## Architecture
//!
//! - **Capabilities**: the copy/free/compare contract ([`Capabilities`],
//!   with [`Natural`] and [`Callbacks`] implementations)
//! - **Map**: [`OrderedMap`], a sorted singly-linked chain over slab storage
//! - **Errors**: [`MapError`] result discriminators
//!
//! ## Guarantees
//!
//! 1. **Order**: keys are unique and strictly ascending under `compare`
//! 2. **Ownership**: every stored key and value is a copy made by the
//!    capability set and released through it exactly once
//! 3. **Transactions**: a failed `put` or `try_clone` has no observable effect
//!
//! ## Example
//!
//! ```
//! use ordered_chain::{MapError, Natural, OrderedMap};
//!
//! let mut map = OrderedMap::new(Natural);
//! map.put(&1, &"a").unwrap();
//! map.put(&3, &"c").unwrap();
//! map.put(&2, &"b").unwrap();
//!
//! map.remove(&2).unwrap();
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&2), None);
//! assert_eq!(map.remove(&2), Err(MapError::ItemDoesNotExist));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Capability sets: copy, free and compare behavior
pub mod caps;

/// Error types
pub mod error;

/// The ordered map, its cursor and iterators
pub mod map;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use caps::{Callbacks, CallbacksBuilder, Capabilities, Natural};
pub use error::{Element, MapError};
pub use map::{Cursor, Iter, Keys, OrderedMap, Values};
