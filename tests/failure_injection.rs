//! Failure-injection tests for the ordered map.
//!
//! These tests verify:
//! 1. A failed `put` leaves size, order and every entry exactly as before
//! 2. A failed `try_clone` releases its partial copy and leaves the source alone
//! 3. Every copy made through the capability set is released exactly once

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use ordered_chain::{Capabilities, Element, MapError, OrderedMap};

// ============================================================================
// HELPER TYPES
// ============================================================================

#[derive(Default)]
struct Ledger {
    /// Total copy attempts (keys and values)
    copy_calls: usize,
    /// Copy attempt number that should fail, if any
    fail_at: Option<usize>,
    keys_live: i64,
    values_live: i64,
    keys_freed: usize,
    values_freed: usize,
}

/// Capability set that counts every copy/free and fails on demand.
#[derive(Clone, Default)]
struct Audited {
    ledger: Rc<RefCell<Ledger>>,
}

impl Audited {
    /// Make the `n`th copy attempt from now fail (0 = the very next one).
    fn fail_after(&self, n: usize) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.fail_at = Some(ledger.copy_calls + n);
    }

    fn disarm(&self) {
        self.ledger.borrow_mut().fail_at = None;
    }

    fn live(&self) -> (i64, i64) {
        let ledger = self.ledger.borrow();
        (ledger.keys_live, ledger.values_live)
    }

    fn should_fail(&self) -> bool {
        let mut ledger = self.ledger.borrow_mut();
        let call = ledger.copy_calls;
        ledger.copy_calls += 1;
        ledger.fail_at == Some(call)
    }
}

impl Capabilities<u32, String> for Audited {
    fn copy_key(&self, key: &u32) -> Option<u32> {
        if self.should_fail() {
            return None;
        }
        self.ledger.borrow_mut().keys_live += 1;
        Some(*key)
    }

    fn free_key(&self, _key: u32) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.keys_live -= 1;
        ledger.keys_freed += 1;
    }

    fn copy_data(&self, data: &String) -> Option<String> {
        if self.should_fail() {
            return None;
        }
        self.ledger.borrow_mut().values_live += 1;
        Some(data.clone())
    }

    fn free_data(&self, _data: String) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.values_live -= 1;
        ledger.values_freed += 1;
    }

    fn compare(&self, a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }
}

fn snapshot(map: &OrderedMap<u32, String, Audited>) -> Vec<(u32, String)> {
    map.iter().map(|(k, v)| (*k, v.clone())).collect()
}

fn populated(caps: &Audited) -> OrderedMap<u32, String, Audited> {
    let mut map = OrderedMap::new(caps.clone());
    for k in [10u32, 30, 20, 50, 40] {
        map.put(&k, &format!("v{k}")).unwrap();
    }
    map
}

// ============================================================================
// PUT
// ============================================================================

#[test]
fn put_new_key_fails_on_key_copy() {
    let caps = Audited::default();
    let mut map = populated(&caps);
    let before = snapshot(&map);
    let live_before = caps.live();

    caps.fail_after(0);
    let err = map.put(&25, &"new".to_string()).unwrap_err();

    assert_eq!(err, MapError::OutOfMemory { element: Element::Key });
    assert_eq!(map.len(), 5);
    assert_eq!(snapshot(&map), before);
    assert_eq!(caps.live(), live_before);
}

#[test]
fn put_new_key_fails_on_value_copy() {
    let caps = Audited::default();
    let mut map = populated(&caps);
    let before = snapshot(&map);
    let live_before = caps.live();

    // The key copy succeeds, the value copy fails: the key must be released
    caps.fail_after(1);
    let err = map.put(&25, &"new".to_string()).unwrap_err();

    assert_eq!(err, MapError::OutOfMemory { element: Element::Value });
    assert_eq!(snapshot(&map), before);
    assert_eq!(caps.live(), live_before);
    assert!(!map.contains(&25));
}

#[test]
fn put_update_fails_on_value_copy() {
    let caps = Audited::default();
    let mut map = populated(&caps);
    let before = snapshot(&map);

    caps.fail_after(0);
    let err = map.put(&30, &"replacement".to_string()).unwrap_err();

    assert!(err.is_out_of_memory());
    assert_eq!(snapshot(&map), before);
    assert_eq!(map.get(&30).map(String::as_str), Some("v30"));
}

#[test]
fn put_recovers_after_failure() {
    let caps = Audited::default();
    let mut map = populated(&caps);

    caps.fail_after(0);
    assert!(map.put(&5, &"five".to_string()).is_err());
    caps.disarm();
    map.put(&5, &"five".to_string()).unwrap();

    assert_eq!(map.len(), 6);
    assert_eq!(map.keys().next(), Some(&5));
}

#[test]
fn update_releases_old_value_only() {
    let caps = Audited::default();
    let mut map = populated(&caps);

    map.put(&20, &"fresh".to_string()).unwrap();

    let ledger = caps.ledger.borrow();
    assert_eq!(ledger.values_freed, 1);
    assert_eq!(ledger.keys_freed, 0);
    assert_eq!((ledger.keys_live, ledger.values_live), (5, 5));
}

// ============================================================================
// TRY_CLONE
// ============================================================================

#[test]
fn try_clone_fails_at_every_copy_point() {
    // 5 entries = 10 copy attempts; fail each one in turn
    for n in 0..10 {
        let caps = Audited::default();
        let map = populated(&caps);
        let before = snapshot(&map);

        caps.fail_after(n);
        let err = map.try_clone().unwrap_err();

        assert!(err.is_out_of_memory(), "copy point {n}");
        assert_eq!(snapshot(&map), before, "copy point {n}");
        assert_eq!(caps.live(), (5, 5), "partial copy leaked at point {n}");
    }
}

#[test]
fn try_clone_copies_through_capabilities() {
    let caps = Audited::default();
    let map = populated(&caps);

    let copy = map.try_clone().unwrap();
    assert_eq!(caps.live(), (10, 10));
    assert_eq!(snapshot(&copy), snapshot(&map));

    drop(copy);
    assert_eq!(caps.live(), (5, 5));
}

// ============================================================================
// RELEASE ACCOUNTING
// ============================================================================

#[test]
fn remove_releases_key_and_value() {
    let caps = Audited::default();
    let mut map = populated(&caps);

    map.remove(&40).unwrap();
    assert_eq!(caps.live(), (4, 4));

    assert_eq!(map.remove(&40), Err(MapError::ItemDoesNotExist));
    assert_eq!(caps.live(), (4, 4));
}

#[test]
fn clear_and_drop_release_everything() {
    let caps = Audited::default();
    let mut map = populated(&caps);

    map.clear();
    assert_eq!(caps.live(), (0, 0));

    map.put(&1, &"one".to_string()).unwrap();
    map.put(&2, &"two".to_string()).unwrap();
    drop(map);

    let ledger = caps.ledger.borrow();
    assert_eq!((ledger.keys_live, ledger.values_live), (0, 0));
    assert_eq!(ledger.keys_freed, 7);
    assert_eq!(ledger.values_freed, 7);
}

#[test]
fn cursor_keys_are_caller_owned() {
    let caps = Audited::default();
    let mut map = populated(&caps);

    let mut keys = Vec::new();
    {
        let mut cursor = map.cursor();
        let mut next = cursor.first().unwrap();
        while let Some(k) = next {
            keys.push(k);
            next = cursor.next().unwrap();
        }
    }

    // Cursor copies count against the ledger but are never freed by the map
    assert_eq!(caps.live(), (10, 5));

    for k in &keys {
        map.remove(k).unwrap();
    }
    assert!(map.is_empty());
    assert_eq!(keys, vec![10, 20, 30, 40, 50]);
}
