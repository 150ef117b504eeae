//! Reading the bits of a record that access decisions depend on.
//!
//! Records come straight from the document store, so nothing here assumes a
//! shape. Anything missing or of the wrong type reads as absent.

use crate::path::FieldPath;
use serde_json::Value;

/// Parent ids from `parentInfo.parentIds`. Non-string entries are skipped.
pub fn parent_ids(record: &Value) -> Vec<&str> {
    record.get("parentInfo")
        .and_then(|info| info.get("parentIds"))
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// The single `parentInfo.parentId` older records carry.
pub fn legacy_parent_id(record: &Value) -> Option<&str> {
    record.get("parentInfo")
        .and_then(|info| info.get("parentId"))
        .and_then(Value::as_str)
}

/// Membership in `parentIds` is enough on its own. The legacy id is still
/// honoured when it disagrees with the set.
pub fn has_parent(record: &Value, id: &str) -> bool {
    if id.is_empty() {
        return false;
    }

    parent_ids(record).contains(&id) || legacy_parent_id(record) == Some(id)
}

pub fn instructor_id(record: &Value) -> Option<&str> {
    record.get("instructorId").and_then(Value::as_str)
}

/// Every leaf of a change set, as the paths it would write.
///
/// Keys may be dotted (`"comments.parent": ...`), the way partial updates
/// are usually sent. Objects are walked, everything else is a leaf. An
/// empty object is a leaf too, since writing it replaces what was there.
/// Keys that aren't valid paths come back in the error list as written.
pub fn leaves(changes: &Value) -> (Vec<FieldPath>, Vec<String>) {
    let mut paths = Vec::new();
    let mut malformed = Vec::new();

    if let Some(map) = changes.as_object() {
        for (key, value) in map {
            match FieldPath::parse(key) {
                Ok(path) => collect(&path, value, &mut paths),
                Err(_) => malformed.push(key.clone())
            }
        }
    }

    (paths, malformed)
}

fn collect(path: &FieldPath, value: &Value, out: &mut Vec<FieldPath>) {
    match value.as_object() {
        Some(map) if !map.is_empty() => {
            for (key, value) in map {
                collect(&path.child(key.as_str()), value, out);
            }
        },
        _ => out.push(path.clone())
    }
}
