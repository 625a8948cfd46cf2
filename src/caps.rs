//! Capability sets: how a map copies, releases and orders its elements.
//!
//! ## Contract
//!
//! | Method | Contract |
//! |--------|----------|
//! | `copy_key` | Independent copy, or `None` on failure. Never mutates the source. |
//! | `free_key` | Releases a key produced by `copy_key`. Called exactly once per owned key. |
//! | `copy_data` | Same as `copy_key`, for values. |
//! | `free_data` | Same as `free_key`, for values. |
//! | `compare` | Total order. Defines both sort position and equality. |
//!
//! Two implementations ship with the crate:
//!
//! - [`Natural`]: `Ord` for ordering and `Clone` for copies (never fails)
//! - [`Callbacks`]: five closures supplied at runtime through a builder

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::error::MapError;

/// The copy/free/compare behavior a map is parameterized over.
///
/// The capability set is fixed at construction and never changes for the
/// lifetime of the map. Every key and value the map stores was produced by
/// `copy_key`/`copy_data`, and every one of them is handed back to
/// `free_key`/`free_data` exactly once when the map lets go of it.
pub trait Capabilities<K, V> {
    /// Produce an owned copy of `key`, or `None` if the copy failed.
    fn copy_key(&self, key: &K) -> Option<K>;

    /// Release a key the map no longer owns.
    fn free_key(&self, key: K) {
        drop(key);
    }

    /// Produce an owned copy of `data`, or `None` if the copy failed.
    fn copy_data(&self, data: &V) -> Option<V>;

    /// Release a value the map no longer owns.
    fn free_data(&self, data: V) {
        drop(data);
    }

    /// Order two keys. `Ordering::Equal` means the keys are the same key.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

// ============================================================================
// Natural
// ============================================================================

/// Capability set for keys with a natural order and cloneable elements.
///
/// # Example
///
/// ```
/// use ordered_chain::{Natural, OrderedMap};
///
/// let mut map = OrderedMap::new(Natural);
/// map.put(&7u32, &"seven".to_string()).unwrap();
/// assert_eq!(map.get(&7).map(String::as_str), Some("seven"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K, V> Capabilities<K, V> for Natural
where
    K: Ord + Clone,
    V: Clone,
{
    #[inline]
    fn copy_key(&self, key: &K) -> Option<K> {
        Some(key.clone())
    }

    #[inline]
    fn copy_data(&self, data: &V) -> Option<V> {
        Some(data.clone())
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

// ============================================================================
// Callbacks
// ============================================================================

type CopyFn<T> = Rc<dyn Fn(&T) -> Option<T>>;
type FreeFn<T> = Rc<dyn Fn(T)>;
type CompareFn<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Capability set assembled from closures at runtime.
///
/// Cloning a `Callbacks` shares the same closures, so a map copied with
/// [`OrderedMap::try_clone`](crate::OrderedMap::try_clone) keeps the exact
/// behavior of its source.
///
/// # Example
///
/// ```
/// use ordered_chain::{Callbacks, OrderedMap};
///
/// let caps = Callbacks::<i32, String>::builder()
///     .copy_key(|k: &i32| Some(*k))
///     .free_key(drop)
///     .copy_data(|v: &String| Some(v.clone()))
///     .free_data(drop)
///     .compare(|a: &i32, b: &i32| a.cmp(b))
///     .build()
///     .unwrap();
///
/// let mut map = OrderedMap::new(caps);
/// map.put(&1, &"a".to_string()).unwrap();
/// assert_eq!(map.len(), 1);
/// ```
pub struct Callbacks<K, V> {
    copy_key: CopyFn<K>,
    free_key: FreeFn<K>,
    copy_data: CopyFn<V>,
    free_data: FreeFn<V>,
    compare: CompareFn<K>,
}

impl<K, V> Callbacks<K, V> {
    /// Start assembling a capability set
    pub fn builder() -> CallbacksBuilder<K, V> {
        CallbacksBuilder::default()
    }
}

impl<K, V> Clone for Callbacks<K, V> {
    fn clone(&self) -> Self {
        Self {
            copy_key: Rc::clone(&self.copy_key),
            free_key: Rc::clone(&self.free_key),
            copy_data: Rc::clone(&self.copy_data),
            free_data: Rc::clone(&self.free_data),
            compare: Rc::clone(&self.compare),
        }
    }
}

impl<K, V> fmt::Debug for Callbacks<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl<K, V> Capabilities<K, V> for Callbacks<K, V> {
    #[inline]
    fn copy_key(&self, key: &K) -> Option<K> {
        (self.copy_key)(key)
    }

    #[inline]
    fn free_key(&self, key: K) {
        (self.free_key)(key)
    }

    #[inline]
    fn copy_data(&self, data: &V) -> Option<V> {
        (self.copy_data)(data)
    }

    #[inline]
    fn free_data(&self, data: V) {
        (self.free_data)(data)
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.compare)(a, b)
    }
}

/// Builder for [`Callbacks`]. All five callbacks are required.
pub struct CallbacksBuilder<K, V> {
    copy_key: Option<CopyFn<K>>,
    free_key: Option<FreeFn<K>>,
    copy_data: Option<CopyFn<V>>,
    free_data: Option<FreeFn<V>>,
    compare: Option<CompareFn<K>>,
}

impl<K, V> Default for CallbacksBuilder<K, V> {
    fn default() -> Self {
        Self {
            copy_key: None,
            free_key: None,
            copy_data: None,
            free_data: None,
            compare: None,
        }
    }
}

impl<K, V> CallbacksBuilder<K, V> {
    pub fn copy_key(mut self, f: impl Fn(&K) -> Option<K> + 'static) -> Self {
        self.copy_key = Some(Rc::new(f));
        self
    }

    pub fn free_key(mut self, f: impl Fn(K) + 'static) -> Self {
        self.free_key = Some(Rc::new(f));
        self
    }

    pub fn copy_data(mut self, f: impl Fn(&V) -> Option<V> + 'static) -> Self {
        self.copy_data = Some(Rc::new(f));
        self
    }

    pub fn free_data(mut self, f: impl Fn(V) + 'static) -> Self {
        self.free_data = Some(Rc::new(f));
        self
    }

    pub fn compare(mut self, f: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        self.compare = Some(Rc::new(f));
        self
    }

    /// Finish the capability set.
    ///
    /// # Errors
    ///
    /// `MapError::NullArgument` naming the first callback that was never set.
    pub fn build(self) -> Result<Callbacks<K, V>, MapError> {
        Ok(Callbacks {
            copy_key: self.copy_key.ok_or(MapError::NullArgument { argument: "copy_key" })?,
            free_key: self.free_key.ok_or(MapError::NullArgument { argument: "free_key" })?,
            copy_data: self.copy_data.ok_or(MapError::NullArgument { argument: "copy_data" })?,
            free_data: self.free_data.ok_or(MapError::NullArgument { argument: "free_data" })?,
            compare: self.compare.ok_or(MapError::NullArgument { argument: "compare" })?,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
