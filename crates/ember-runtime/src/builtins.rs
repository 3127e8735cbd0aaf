//! Script-facing collection functions
//!
//! The engine's script interpreter calls collections by name with untyped
//! argument lists, using the legacy `ds_*` naming. This module checks
//! arguments, resolves handles through the [`Registry`] and converts results
//! back to script values:
//! - sizes and indices are numbers
//! - booleans are `1` / `0`
//! - "not found" is `undefined` (`-1` for `ds_list_find_index`)
//! - mutators without a result return `undefined`

use crate::collections::MapKey;
use crate::handle::{CollectionKind, Handle};
use crate::registry::Registry;
use crate::value::{RuntimeError, RuntimeResult, Value};
use tracing::debug;

/// Check if a function name is a collection builtin
pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "ds_exists" | "ds_copy"
            // List functions
            | "ds_list_create" | "ds_list_destroy" | "ds_list_copy"
            | "ds_list_size" | "ds_list_empty" | "ds_list_clear"
            | "ds_list_add" | "ds_list_insert" | "ds_list_delete" | "ds_list_replace"
            | "ds_list_find_value" | "ds_list_find_index" | "ds_list_sort"
            // Map functions
            | "ds_map_create" | "ds_map_destroy" | "ds_map_copy"
            | "ds_map_size" | "ds_map_empty" | "ds_map_clear"
            | "ds_map_add" | "ds_map_set" | "ds_map_replace"
            | "ds_map_find_value" | "ds_map_exists" | "ds_map_delete"
            | "ds_map_find_first" | "ds_map_find_next"
            | "ds_map_find_last" | "ds_map_find_previous"
            // Queue functions
            | "ds_queue_create" | "ds_queue_destroy" | "ds_queue_copy"
            | "ds_queue_size" | "ds_queue_empty" | "ds_queue_clear"
            | "ds_queue_enqueue" | "ds_queue_dequeue" | "ds_queue_head" | "ds_queue_tail"
    )
}

/// Call a collection builtin by name
pub fn call_builtin(registry: &mut Registry, name: &str, args: &[Value]) -> RuntimeResult<Value> {
    let result = dispatch(registry, name, args);
    if let Err(error) = &result {
        debug!(function = name, %error, "collection builtin failed");
    }
    result
}

fn dispatch(registry: &mut Registry, name: &str, args: &[Value]) -> RuntimeResult<Value> {
    match name {
        "ds_exists" => {
            check_arity(name, 2, args)?;
            let exists = match (handle_arg(name, &args[0]), kind_arg(&args[1])) {
                (Ok(handle), Some(kind)) => registry.exists(handle, kind),
                _ => false,
            };
            Ok(bool_value(exists))
        }
        "ds_copy" => {
            check_arity(name, 1, args)?;
            let source = handle_arg(name, &args[0])?;
            Ok(Value::Handle(registry.copy(source)?))
        }

        // List functions
        "ds_list_create" => create(registry, name, args, CollectionKind::List),
        "ds_list_destroy" => destroy(registry, name, args, CollectionKind::List),
        "ds_list_copy" => copy_into(registry, name, args, CollectionKind::List),
        "ds_list_size" => size(registry, name, args, CollectionKind::List),
        "ds_list_empty" => empty(registry, name, args, CollectionKind::List),
        "ds_list_clear" => clear(registry, name, args, CollectionKind::List),
        "ds_list_add" => {
            if args.len() < 2 {
                return Err(arity_error(name, 2, args.len()));
            }
            let list = registry.resolve_list(handle_arg(name, &args[0])?)?;
            // Legacy scripts may append several values in one call
            for value in &args[1..] {
                list.add(value.clone());
            }
            Ok(Value::Undefined)
        }
        "ds_list_insert" => {
            check_arity(name, 3, args)?;
            let handle = handle_arg(name, &args[0])?;
            let index = list_index(registry, name, handle, &args[1])?;
            registry.list_insert(handle, index, args[2].clone())?;
            Ok(Value::Undefined)
        }
        "ds_list_delete" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let index = list_index(registry, name, handle, &args[1])?;
            registry.list_delete(handle, index)?;
            Ok(Value::Undefined)
        }
        "ds_list_replace" => {
            check_arity(name, 3, args)?;
            let handle = handle_arg(name, &args[0])?;
            let index = list_index(registry, name, handle, &args[1])?;
            registry.list_replace(handle, index, args[2].clone())?;
            Ok(Value::Undefined)
        }
        "ds_list_find_value" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let index = list_index(registry, name, handle, &args[1])?;
            registry.list_find_value(handle, index)
        }
        "ds_list_find_index" => {
            check_arity(name, 2, args)?;
            let list = registry.list(handle_arg(name, &args[0])?)?;
            let index = list.iter().position(|value| script_eq(value, &args[1]));
            Ok(index.map_or(Value::Number(-1.0), |i| Value::Number(i as f64)))
        }
        "ds_list_sort" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let ascending = truthy_arg(name, &args[1])?;
            registry.list_sort(handle, ascending)?;
            Ok(Value::Undefined)
        }

        // Map functions
        "ds_map_create" => create(registry, name, args, CollectionKind::Map),
        "ds_map_destroy" => destroy(registry, name, args, CollectionKind::Map),
        "ds_map_copy" => copy_into(registry, name, args, CollectionKind::Map),
        "ds_map_size" => size(registry, name, args, CollectionKind::Map),
        "ds_map_empty" => empty(registry, name, args, CollectionKind::Map),
        "ds_map_clear" => clear(registry, name, args, CollectionKind::Map),
        "ds_map_add" => {
            check_arity(name, 3, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            let added = registry.map_add(handle, key, args[2].clone())?;
            Ok(bool_value(added))
        }
        "ds_map_set" => {
            check_arity(name, 3, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            registry.map_set(handle, key, args[2].clone())?;
            Ok(Value::Undefined)
        }
        "ds_map_replace" => {
            check_arity(name, 3, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            let replaced = registry.map_replace(handle, key, args[2].clone())?;
            Ok(bool_value(replaced))
        }
        "ds_map_find_value" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            Ok(registry
                .map_find_value(handle, key)?
                .unwrap_or(Value::Undefined))
        }
        "ds_map_exists" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            Ok(bool_value(registry.map_exists(handle, key)?))
        }
        "ds_map_delete" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            registry.map_delete(handle, key)?;
            Ok(Value::Undefined)
        }
        "ds_map_find_first" => {
            check_arity(name, 1, args)?;
            let handle = handle_arg(name, &args[0])?;
            Ok(key_value(registry.map_find_first(handle)?))
        }
        "ds_map_find_last" => {
            check_arity(name, 1, args)?;
            let handle = handle_arg(name, &args[0])?;
            Ok(key_value(registry.map_find_last(handle)?))
        }
        "ds_map_find_next" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            Ok(key_value(registry.map_find_next(handle, key)?))
        }
        "ds_map_find_previous" => {
            check_arity(name, 2, args)?;
            let handle = handle_arg(name, &args[0])?;
            let key = key_arg(name, &args[1])?;
            Ok(key_value(registry.map_find_previous(handle, key)?))
        }

        // Queue functions
        "ds_queue_create" => create(registry, name, args, CollectionKind::Queue),
        "ds_queue_destroy" => destroy(registry, name, args, CollectionKind::Queue),
        "ds_queue_copy" => copy_into(registry, name, args, CollectionKind::Queue),
        "ds_queue_size" => size(registry, name, args, CollectionKind::Queue),
        "ds_queue_empty" => empty(registry, name, args, CollectionKind::Queue),
        "ds_queue_clear" => clear(registry, name, args, CollectionKind::Queue),
        "ds_queue_enqueue" => {
            if args.len() < 2 {
                return Err(arity_error(name, 2, args.len()));
            }
            let queue = registry.resolve_queue(handle_arg(name, &args[0])?)?;
            for value in &args[1..] {
                queue.enqueue(value.clone());
            }
            Ok(Value::Undefined)
        }
        "ds_queue_dequeue" => {
            check_arity(name, 1, args)?;
            registry.queue_dequeue(handle_arg(name, &args[0])?)
        }
        "ds_queue_head" => {
            check_arity(name, 1, args)?;
            registry.queue_head(handle_arg(name, &args[0])?)
        }
        "ds_queue_tail" => {
            check_arity(name, 1, args)?;
            registry.queue_tail(handle_arg(name, &args[0])?)
        }

        _ => Err(RuntimeError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

// ============================================================================
// Functions shared by all kinds
// ============================================================================

fn create(
    registry: &mut Registry,
    name: &str,
    args: &[Value],
    kind: CollectionKind,
) -> RuntimeResult<Value> {
    check_arity(name, 0, args)?;
    Ok(Value::Handle(registry.create(kind)?))
}

/// Destroy after checking the kind, so `ds_list_destroy` cannot free a map
fn destroy(
    registry: &mut Registry,
    name: &str,
    args: &[Value],
    kind: CollectionKind,
) -> RuntimeResult<Value> {
    check_arity(name, 1, args)?;
    let handle = handle_arg(name, &args[0])?;
    registry.get(handle, kind)?;
    registry.destroy(handle)?;
    Ok(Value::Undefined)
}

/// `ds_*_copy(dest, source)`: overwrite an existing collection
fn copy_into(
    registry: &mut Registry,
    name: &str,
    args: &[Value],
    kind: CollectionKind,
) -> RuntimeResult<Value> {
    check_arity(name, 2, args)?;
    let dest = handle_arg(name, &args[0])?;
    let source = handle_arg(name, &args[1])?;
    registry.get(dest, kind)?;
    registry.get(source, kind)?;
    registry.copy_into(dest, source)?;
    Ok(Value::Undefined)
}

fn size(
    registry: &mut Registry,
    name: &str,
    args: &[Value],
    kind: CollectionKind,
) -> RuntimeResult<Value> {
    check_arity(name, 1, args)?;
    let handle = handle_arg(name, &args[0])?;
    Ok(Value::Number(registry.get(handle, kind)?.len() as f64))
}

fn empty(
    registry: &mut Registry,
    name: &str,
    args: &[Value],
    kind: CollectionKind,
) -> RuntimeResult<Value> {
    check_arity(name, 1, args)?;
    let handle = handle_arg(name, &args[0])?;
    Ok(bool_value(registry.get(handle, kind)?.is_empty()))
}

fn clear(
    registry: &mut Registry,
    name: &str,
    args: &[Value],
    kind: CollectionKind,
) -> RuntimeResult<Value> {
    check_arity(name, 1, args)?;
    let handle = handle_arg(name, &args[0])?;
    registry.resolve(handle, kind)?.clear();
    Ok(Value::Undefined)
}

// ============================================================================
// Argument helpers
// ============================================================================

fn arity_error(function: &str, expected: usize, found: usize) -> RuntimeError {
    RuntimeError::ArityMismatch {
        function: function.to_string(),
        expected,
        found,
    }
}

fn check_arity(function: &str, expected: usize, args: &[Value]) -> RuntimeResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_error(function, expected, args.len()))
    }
}

fn invalid_argument(function: &str, msg: String) -> RuntimeError {
    RuntimeError::InvalidArgument {
        function: function.to_string(),
        msg,
    }
}

/// Handles arrive either as handle values or as plain non-negative integers
fn handle_arg(function: &str, value: &Value) -> RuntimeResult<Handle> {
    match value {
        Value::Handle(handle) => Ok(*handle),
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64 => {
            Ok(Handle::new(*n as u64))
        }
        _ => Err(invalid_argument(
            function,
            format!("expected a collection handle, got {} {}", value.type_name(), value),
        )),
    }
}

/// 2^63, the first magnitude an `i64` cannot hold
const INDEX_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Integral index; negative indices are accepted here and rejected by [`list_index`]
fn integer_arg(function: &str, value: &Value) -> RuntimeResult<i64> {
    match value {
        Value::Number(n) if n.fract() == 0.0 && (-INDEX_LIMIT..INDEX_LIMIT).contains(n) => {
            Ok(*n as i64)
        }
        _ => Err(invalid_argument(
            function,
            format!("expected an integer index, got {} {}", value.type_name(), value),
        )),
    }
}

fn list_index(
    registry: &Registry,
    function: &str,
    handle: Handle,
    value: &Value,
) -> RuntimeResult<usize> {
    let len = registry.list(handle)?.len();
    let raw = integer_arg(function, value)?;
    usize::try_from(raw).map_err(|_| RuntimeError::IndexOutOfRange { index: raw, len })
}

/// Equality for script lookups. A handle matches the plain number carrying its
/// id, the same aliasing [`handle_arg`] and map keys apply.
fn script_eq(stored: &Value, needle: &Value) -> bool {
    match (stored, needle) {
        (Value::Handle(handle), Value::Number(n)) | (Value::Number(n), Value::Handle(handle)) => {
            *n == handle.id() as f64
        }
        _ => stored == needle,
    }
}

fn key_arg(function: &str, value: &Value) -> RuntimeResult<MapKey> {
    MapKey::from_value(value).ok_or_else(|| {
        invalid_argument(
            function,
            format!("{} cannot be used as a map key", value.type_name()),
        )
    })
}

/// Kind names ("list") or legacy numeric codes (0); anything else matches nothing
fn kind_arg(value: &Value) -> Option<CollectionKind> {
    match value {
        Value::String(s) => CollectionKind::from_name(s.as_str()),
        Value::Number(n) if n.fract() == 0.0 && (0.0..=2.0).contains(n) => {
            CollectionKind::from_code(*n as u8)
        }
        _ => None,
    }
}

fn truthy_arg(function: &str, value: &Value) -> RuntimeResult<bool> {
    match value {
        Value::Number(n) => Ok(*n > 0.5),
        _ => Err(invalid_argument(
            function,
            format!("expected a number, got {}", value.type_name()),
        )),
    }
}

fn bool_value(b: bool) -> Value {
    Value::Number(if b { 1.0 } else { 0.0 })
}

fn key_value(key: Option<MapKey>) -> Value {
    key.map_or(Value::Undefined, |k| k.to_value())
}
