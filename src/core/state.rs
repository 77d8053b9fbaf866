//! The form state snapshot.

use super::value::ImmutableValue;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// A schema, shared so that an unchanged model keeps its identity.
pub type Model = Arc<Value>;

/// Outcome of the most recent validation pass. Opaque to the reducer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub warnings: Vec<Value>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

/// Immutable snapshot of a form.
///
/// `value` and `base_model` distinguish "absent" (`None`) from "present".
/// For `value`, absent is the unset sentinel and `Some(ImmutableValue::Null)`
/// is an explicit null. A default-constructed state has neither; the init
/// transition fills them in.
///
/// Fields that are not part of this struct are kept in `extra` and survive
/// every transition.
///
/// # Example
///
/// ```rust
/// use formstate::FormState;
/// use serde_json::json;
///
/// let state: FormState = serde_json::from_value(json!({
///     "baseModel": {"type": "object"},
///     "value": null,
///     "theme": "dark",
/// }))
/// .unwrap();
///
/// assert!(state.value.as_ref().unwrap().is_null());
/// assert_eq!(state.extra["theme"], json!("dark"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<ImmutableValue>,

    /// Author-supplied schema. Only the change-model transition replaces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_model: Option<Model>,

    /// Schema derived from `base_model` for the current value.
    #[serde(default = "empty_model")]
    pub model: Model,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Arc<Map<String, Value>>,

    #[serde(default)]
    pub validation_result: Arc<ValidationResult>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormState {
    /// State holding `base_model`, ready for the init transition.
    pub fn with_base_model(base_model: Value) -> Self {
        Self {
            base_model: Some(Arc::new(base_model)),
            ..Self::default()
        }
    }

    /// Builder-style setter for the initial value.
    pub fn value(mut self, value: impl Into<ImmutableValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder-style setter for a pass-through field.
    pub fn extra_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The value, with the unset sentinel read as null.
    pub fn value_or_null(&self) -> ImmutableValue {
        self.value.clone().unwrap_or_default()
    }

    /// The base model, or `{}` when the state carries none.
    pub fn base_model_or_empty(&self) -> Model {
        self.base_model.clone().unwrap_or_else(empty_model)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            value: None,
            base_model: None,
            model: empty_model(),
            errors: Arc::default(),
            validation_result: Arc::default(),
            extra: Map::new(),
        }
    }
}

fn empty_model() -> Model {
    Arc::new(json!({}))
}

/// A present key always yields `Some`, even for `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<ImmutableValue>, D::Error>
where
    D: Deserializer<'de>,
{
    ImmutableValue::deserialize(deserializer).map(Some)
}

/// `"errors": null` reads as no errors, as it does in a decoded action.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Arc<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer)
        .map(|errors| Arc::new(errors.unwrap_or_default()))
}
