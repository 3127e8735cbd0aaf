//! Integration tests for ordered maps
//!
//! Tests add/set semantics and ordered cursor traversal across mutation.

use ember_runtime::{Handle, MapKey, Registry, Value};
use pretty_assertions::assert_eq;

fn walk_forward(registry: &Registry, map: Handle) -> Vec<MapKey> {
    let mut keys = Vec::new();
    let mut cursor = registry.map_find_first(map).unwrap();
    while let Some(key) = cursor {
        cursor = registry.map_find_next(map, key.clone()).unwrap();
        keys.push(key);
    }
    keys
}

fn walk_backward(registry: &Registry, map: Handle) -> Vec<MapKey> {
    let mut keys = Vec::new();
    let mut cursor = registry.map_find_last(map).unwrap();
    while let Some(key) = cursor {
        cursor = registry.map_find_previous(map, key.clone()).unwrap();
        keys.push(key);
    }
    keys
}

#[test]
fn test_add_then_set_scenario() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();

    assert_eq!(registry.map_add(m, "a", 1), Ok(true));
    assert_eq!(registry.map_add(m, "a", 2), Ok(false));
    assert_eq!(registry.map_find_value(m, "a"), Ok(Some(Value::Number(1.0))));

    registry.map_set(m, "a", 2).unwrap();
    assert_eq!(registry.map_find_value(m, "a"), Ok(Some(Value::Number(2.0))));
    assert_eq!(registry.size(m), Ok(1));
}

#[test]
fn test_set_twice_keeps_last() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    registry.map_set(m, 5, "v1").unwrap();
    registry.map_set(m, 5, "v2").unwrap();
    assert_eq!(registry.map_find_value(m, 5), Ok(Some(Value::string("v2"))));
}

#[test]
fn test_missing_key_is_not_an_error() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();

    assert_eq!(registry.map_find_value(m, "nope"), Ok(None));
    assert_eq!(registry.map_exists(m, "nope"), Ok(false));
    assert_eq!(registry.map_delete(m, "nope"), Ok(()));
    assert_eq!(registry.map_replace(m, "nope", 1), Ok(false));
    assert_eq!(registry.size(m), Ok(0));
}

#[test]
fn test_numeric_and_string_keys_are_distinct() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    registry.map_set(m, 1, "number").unwrap();
    registry.map_set(m, "1", "string").unwrap();

    assert_eq!(registry.size(m), Ok(2));
    assert_eq!(registry.map_find_value(m, 1), Ok(Some(Value::string("number"))));
    assert_eq!(registry.map_find_value(m, "1"), Ok(Some(Value::string("string"))));
}

#[test]
fn test_traversal_order_mixed_keys() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    for key in ["zeta", "alpha", "Beta"] {
        registry.map_set(m, key, 0).unwrap();
    }
    for key in [3.5, -2.0, 100.0, 0.0] {
        registry.map_set(m, key, 0).unwrap();
    }

    let expected = vec![
        MapKey::from(-2.0),
        MapKey::from(0.0),
        MapKey::from(3.5),
        MapKey::from(100.0),
        MapKey::from("Beta"),
        MapKey::from("alpha"),
        MapKey::from("zeta"),
    ];
    assert_eq!(walk_forward(&registry, m), expected);

    let mut reversed = expected;
    reversed.reverse();
    assert_eq!(walk_backward(&registry, m), reversed);
}

#[test]
fn test_nan_is_one_key_between_numbers_and_strings() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    let other_nan = f64::from_bits(f64::NAN.to_bits() | 1);
    registry.map_set(m, "a", "string").unwrap();
    registry.map_set(m, f64::NAN, "first nan").unwrap();
    registry.map_set(m, f64::INFINITY, "inf").unwrap();
    registry.map_set(m, 1, "one").unwrap();
    registry.map_set(m, f64::NEG_INFINITY, "-inf").unwrap();
    registry.map_set(m, other_nan, "second nan").unwrap();

    assert_eq!(registry.size(m), Ok(5));
    assert_eq!(
        registry.map_find_value(m, f64::NAN),
        Ok(Some(Value::string("second nan")))
    );
    assert_eq!(
        walk_forward(&registry, m),
        vec![
            MapKey::from(f64::NEG_INFINITY),
            MapKey::from(1),
            MapKey::from(f64::INFINITY),
            MapKey::from(f64::NAN),
            MapKey::from("a"),
        ]
    );
    assert_eq!(
        registry.map_find_next(m, f64::INFINITY),
        Ok(Some(MapKey::from(other_nan)))
    );
    assert_eq!(registry.map_find_previous(m, "a"), Ok(Some(MapKey::from(f64::NAN))));
}

#[test]
fn test_negative_zero_is_zero() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    registry.map_set(m, -0.0, "negative").unwrap();
    registry.map_set(m, 0.0, "positive").unwrap();
    registry.map_set(m, 1, "one").unwrap();

    assert_eq!(registry.size(m), Ok(2));
    assert_eq!(registry.map_find_value(m, -0.0), Ok(Some(Value::string("positive"))));
    assert_eq!(registry.map_find_next(m, -0.0), Ok(Some(MapKey::from(1))));

    let zero = registry.map_find_previous(m, 1).unwrap().unwrap();
    match zero.to_value() {
        Value::Number(n) => assert!(n == 0.0 && n.is_sign_positive(), "got {}", n),
        other => panic!("Expected number key, got {:?}", other),
    }
}

#[test]
fn test_handle_keys_alias_their_id() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    let q = registry.create_queue().unwrap();

    registry.map_set(m, q, "queue").unwrap();
    assert_eq!(registry.map_add(m, q.id() as f64, "again"), Ok(false));
    assert_eq!(
        registry.map_find_value(m, q.id() as f64),
        Ok(Some(Value::string("queue")))
    );
    assert_eq!(registry.map_exists(m, q), Ok(true));
    assert_eq!(
        registry.map_find_first(m),
        Ok(Some(MapKey::from(q.id() as f64)))
    );
}

#[test]
fn test_traversal_with_deletion_of_visited_key() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    for key in 1..=5 {
        registry.map_set(m, key, key).unwrap();
    }

    // Delete each key right after visiting it; the walk must still see every key once
    let mut seen = Vec::new();
    let mut cursor = registry.map_find_first(m).unwrap();
    while let Some(key) = cursor {
        registry.map_delete(m, key.clone()).unwrap();
        cursor = registry.map_find_next(m, key.clone()).unwrap();
        seen.push(key);
    }

    assert_eq!(seen, (1..=5).map(MapKey::from).collect::<Vec<_>>());
    assert_eq!(registry.empty(m), Ok(true));
}

#[test]
fn test_traversal_with_insertion_behind_cursor() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    for key in ["b", "d"] {
        registry.map_set(m, key, 0).unwrap();
    }

    let first = registry.map_find_first(m).unwrap().unwrap();
    assert_eq!(first, MapKey::from("b"));
    // A key inserted before the cursor is not revisited, one after it is
    registry.map_set(m, "a", 0).unwrap();
    registry.map_set(m, "c", 0).unwrap();

    let second = registry.map_find_next(m, first).unwrap().unwrap();
    assert_eq!(second, MapKey::from("c"));
    let third = registry.map_find_next(m, second).unwrap().unwrap();
    assert_eq!(third, MapKey::from("d"));
    assert_eq!(registry.map_find_next(m, third), Ok(None));
}

#[test]
fn test_cursor_from_absent_key() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    for key in [10, 20, 30] {
        registry.map_set(m, key, 0).unwrap();
    }

    assert_eq!(registry.map_find_next(m, 15), Ok(Some(MapKey::from(20))));
    assert_eq!(registry.map_find_previous(m, 15), Ok(Some(MapKey::from(10))));
    assert_eq!(registry.map_find_next(m, 99), Ok(None));
    assert_eq!(registry.map_find_previous(m, 1), Ok(None));
    // Strings sort after every number
    assert_eq!(registry.map_find_previous(m, "a"), Ok(Some(MapKey::from(30))));
}

#[test]
fn test_boundaries_of_empty_and_single_key_maps() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    assert_eq!(registry.map_find_first(m), Ok(None));
    assert_eq!(registry.map_find_last(m), Ok(None));

    registry.map_set(m, "only", 1).unwrap();
    assert_eq!(registry.map_find_first(m), Ok(Some(MapKey::from("only"))));
    assert_eq!(registry.map_find_last(m), Ok(Some(MapKey::from("only"))));
    assert_eq!(registry.map_find_next(m, "only"), Ok(None));
    assert_eq!(registry.map_find_previous(m, "only"), Ok(None));
}

#[test]
fn test_keys_and_values_in_order() {
    let mut registry = Registry::new();
    let m = registry.create_map().unwrap();
    registry.map_set(m, "y", 2).unwrap();
    registry.map_set(m, "x", 1).unwrap();

    let map = registry.map(m).unwrap();
    assert_eq!(map.keys(), vec![MapKey::from("x"), MapKey::from("y")]);
    assert_eq!(map.values(), vec![Value::Number(1.0), Value::Number(2.0)]);
}
