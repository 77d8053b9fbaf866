//! Recursive removal of empty leaves and containers.

use super::value::ImmutableValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Decide whether a (cleaned) value is dropped from its parent container.
///
/// | kind    | dropped when         |
/// |---------|----------------------|
/// | null    | always               |
/// | boolean | never                |
/// | number  | never                |
/// | string  | it is empty          |
/// | array   | it has no elements   |
/// | object  | it has no fields     |
///
/// Containers are judged after their own children were cleaned, so `{"a": {"b":
/// null}}` loses `a` as well.
pub fn is_droppable(value: &ImmutableValue) -> bool {
    match value {
        ImmutableValue::Null => true,
        ImmutableValue::Bool(_) | ImmutableValue::Number(_) => false,
        ImmutableValue::String(s) => s.is_empty(),
        ImmutableValue::Array(items) => items.is_empty(),
        ImmutableValue::Object(fields) => fields.is_empty(),
    }
}

/// Strip null, empty strings, and empty arrays and objects from a tree.
///
/// Arrays are filtered rather than hole-punched, so the position of later
/// elements shifts when an earlier one is dropped. Scalars, including a bare
/// top-level null, are returned unchanged.
///
/// # Example
///
/// ```rust
/// use formstate::core::clean;
/// use formstate::ImmutableValue;
/// use serde_json::json;
///
/// let dirty = ImmutableValue::from(json!({"a": {}, "b": 1, "c": false, "d": null}));
/// assert_eq!(clean(&dirty).to_json(), json!({"b": 1, "c": false}));
/// ```
pub fn clean(value: &ImmutableValue) -> ImmutableValue {
    match value {
        ImmutableValue::Array(items) => {
            let cleaned: Vec<ImmutableValue> = items
                .iter()
                .map(clean)
                .filter(|item| !is_droppable(item))
                .collect();
            ImmutableValue::Array(Arc::new(cleaned))
        }
        ImmutableValue::Object(fields) => {
            let cleaned: BTreeMap<String, ImmutableValue> = fields
                .iter()
                .map(|(key, field)| (key.clone(), clean(field)))
                .filter(|(_, field)| !is_droppable(field))
                .collect();
            ImmutableValue::Object(Arc::new(cleaned))
        }
        scalar => scalar.clone(),
    }
}
