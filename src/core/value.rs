//! Immutable form value tree.
//!
//! An [`ImmutableValue`] is a JSON-shaped tree whose containers are held
//! behind `Arc`. Cloning a value is cheap, and a tree derived from another
//! (see [`set_at_path`](super::set_at_path)) shares every untouched subtree
//! with its source. No API hands out mutable access to a node.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared, read-only JSON-like tree.
///
/// # Example
///
/// ```rust
/// use formstate::ImmutableValue;
/// use serde_json::json;
///
/// let value = ImmutableValue::from(json!({"name": "bunsen", "tags": ["a", "b"]}));
/// let copy = value.clone();
///
/// assert!(value.ptr_eq(&copy));
/// assert_eq!(copy.to_json(), json!({"name": "bunsen", "tags": ["a", "b"]}));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ImmutableValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    Array(Arc<Vec<ImmutableValue>>),
    Object(Arc<BTreeMap<String, ImmutableValue>>),
}

impl ImmutableValue {
    /// An empty object, `{}`.
    pub fn empty_object() -> Self {
        Self::Object(Arc::new(BTreeMap::new()))
    }

    /// An empty array, `[]`.
    pub fn empty_array() -> Self {
        Self::Array(Arc::new(Vec::new()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ImmutableValue]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, ImmutableValue>> {
        match self {
            Self::Object(fields) => Some(&**fields),
            _ => None,
        }
    }

    /// Look up a direct child of an object.
    pub fn get(&self, key: &str) -> Option<&ImmutableValue> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// Identity comparison.
    ///
    /// Containers and strings compare by allocation; other scalars have no
    /// identity and compare by value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::String(a), Self::String(b)) => Arc::ptr_eq(a, b),
            (a, b) => a == b,
        }
    }

    /// Deep copy into a plain `serde_json::Value`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.to_string()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Value> for ImmutableValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(Arc::from(s)),
            Value::Array(items) => {
                Self::Array(Arc::new(items.into_iter().map(Self::from).collect()))
            }
            Value::Object(fields) => Self::Object(Arc::new(
                fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            )),
        }
    }
}

impl From<&Value> for ImmutableValue {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<ImmutableValue> for Value {
    fn from(value: ImmutableValue) -> Self {
        value.to_json()
    }
}

impl From<bool> for ImmutableValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ImmutableValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for ImmutableValue {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for ImmutableValue {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Vec<ImmutableValue>> for ImmutableValue {
    fn from(items: Vec<ImmutableValue>) -> Self {
        Self::Array(Arc::new(items))
    }
}

impl From<BTreeMap<String, ImmutableValue>> for ImmutableValue {
    fn from(fields: BTreeMap<String, ImmutableValue>) -> Self {
        Self::Object(Arc::new(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_from_and_to_json() {
        let source = json!({"a": [1, true, null, "x"], "b": {"c": 2.5}});
        let value = ImmutableValue::from(source.clone());

        assert_eq!(value.to_json(), source);
    }

    #[test]
    fn clone_shares_containers() {
        let value = ImmutableValue::from(json!({"a": {"b": 1}}));
        let cloned = value.clone();

        assert!(value.ptr_eq(&cloned));
        assert!(value.get("a").unwrap().ptr_eq(cloned.get("a").unwrap()));
    }

    #[test]
    fn equal_but_distinct_trees_are_not_identical() {
        let a = ImmutableValue::from(json!({"x": 1}));
        let b = ImmutableValue::from(json!({"x": 1}));

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn scalars_compare_by_value_for_identity() {
        assert!(ImmutableValue::Null.ptr_eq(&ImmutableValue::Null));
        assert!(ImmutableValue::from(0_i64).ptr_eq(&ImmutableValue::from(0_i64)));
        assert!(!ImmutableValue::from(false).ptr_eq(&ImmutableValue::from(true)));
    }

    #[test]
    fn serializes_as_plain_json() {
        let value = ImmutableValue::from(json!({"list": [1, 2], "ok": false}));
        let text = serde_json::to_string(&value).unwrap();
        let parsed: ImmutableValue = serde_json::from_str(&text).unwrap();

        assert_eq!(text, r#"{"list":[1,2],"ok":false}"#);
        assert_eq!(parsed, value);
    }
}
