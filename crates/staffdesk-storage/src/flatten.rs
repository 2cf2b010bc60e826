//! Dotted-path views of the content document for the admin editor.
//!
//! `{"jobs": [{"title": "RN"}]}` flattens to `{"jobs.0.title": "RN"}`.
//! Numeric path segments are array indices when unflattening.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::StorageError;

/// Largest array length an edited path may create.
pub const MAX_ARRAY_LEN: usize = 10_000;

/// Collapse nested objects and arrays into dotted-path leaves.
///
/// Empty objects and arrays have no leaves and disappear.
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    match value {
        Value::Object(_) | Value::Array(_) => walk(value, "", &mut out),
        leaf => {
            out.insert(String::new(), leaf.clone());
        }
    }
    out
}

fn walk(value: &Value, prefix: &str, out: &mut BTreeMap<String, Value>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(map) => {
            for (k, v) in map {
                walk(v, &join(k), out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                walk(v, &join(&i.to_string()), out);
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
}

/// Rebuild a nested document from dotted-path leaves.
///
/// A container is an array when the segment after it is numeric, else an
/// object. Array gaps are filled with `null`. The strings `"true"` and
/// `"false"` become booleans.
///
/// An array index at or past [`MAX_ARRAY_LEN`] is rejected with
/// [`StorageError::InvalidPath`].
pub fn unflatten<'a, I>(entries: I) -> Result<Value, StorageError>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut root = Value::Object(Map::new());
    for (path, value) in entries {
        let parts: Vec<&str> = path.split('.').collect();
        insert_path(&mut root, &parts, parse_input(value))
            .map_err(|_| StorageError::InvalidPath(path.clone()))?;
    }
    Ok(root)
}

fn parse_input(value: &Value) -> Value {
    match value.as_str() {
        Some("true") => Value::Bool(true),
        Some("false") => Value::Bool(false),
        _ => value.clone(),
    }
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Marker for an array index outside `0..MAX_ARRAY_LEN`.
struct IndexOutOfRange;

fn insert_path(cur: &mut Value, parts: &[&str], value: Value) -> Result<(), IndexOutOfRange> {
    let Some((head, rest)) = parts.split_first() else {
        return Ok(());
    };

    let Some(slot) = child_slot(cur, head)? else {
        return Ok(());
    };

    match rest.first() {
        None => {
            *slot = value;
            Ok(())
        }
        Some(next) => {
            let wants_array = is_index(next);
            let fits = match &*slot {
                Value::Array(_) => wants_array,
                Value::Object(_) => true,
                _ => false,
            };
            if !fits {
                *slot = if wants_array {
                    Value::Array(Vec::new())
                } else {
                    Value::Object(Map::new())
                };
            }
            insert_path(slot, rest, value)
        }
    }
}

/// Slot for `segment` inside `cur`, created as `null` when absent.
fn child_slot<'v>(
    cur: &'v mut Value,
    segment: &str,
) -> Result<Option<&'v mut Value>, IndexOutOfRange> {
    match cur {
        Value::Array(items) => {
            // Digits too long for usize are out of range too.
            let idx = match segment.parse::<usize>() {
                Ok(idx) if idx < MAX_ARRAY_LEN => idx,
                _ => return Err(IndexOutOfRange),
            };
            if items.len() <= idx {
                items.resize(idx + 1, Value::Null);
            }
            Ok(items.get_mut(idx))
        }
        Value::Object(map) => Ok(Some(map.entry(segment.to_string()).or_insert(Value::Null))),
        _ => Ok(None),
    }
}
