//! Derivation of the concrete model from the base model.
//!
//! Resolving conditional schema branches is left to the host; the reducer
//! only needs something that maps `(base model, value)` to a model.

use super::value::ImmutableValue;
use serde_json::Value;

/// Derives the model that applies to a value.
///
/// Implementations must be pure and deterministic. The reducer keeps the
/// previous model whenever a fresh derivation is structurally equal to it,
/// and that only holds if equal inputs produce equal outputs.
pub trait ConditionEvaluator: Send + Sync {
    fn evaluate(&self, base_model: &Value, value: &ImmutableValue) -> Value;
}

/// Evaluator for schemas without conditions: the model is the base model.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityEvaluator;

impl ConditionEvaluator for IdentityEvaluator {
    fn evaluate(&self, base_model: &Value, _value: &ImmutableValue) -> Value {
        base_model.clone()
    }
}

/// Evaluator backed by a closure.
///
/// # Example
///
/// ```rust
/// use formstate::core::{ConditionEvaluator, FnEvaluator};
/// use formstate::ImmutableValue;
/// use serde_json::{json, Value};
///
/// let evaluator = FnEvaluator::new(|base: &Value, value: &ImmutableValue| {
///     let mut model = base.clone();
///     model["filled"] = json!(!value.is_null());
///     model
/// });
///
/// let model = evaluator.evaluate(&json!({}), &ImmutableValue::Null);
/// assert_eq!(model, json!({"filled": false}));
/// ```
pub struct FnEvaluator {
    evaluate: Box<dyn Fn(&Value, &ImmutableValue) -> Value + Send + Sync>,
}

impl FnEvaluator {
    pub fn new<F>(evaluate: F) -> Self
    where
        F: Fn(&Value, &ImmutableValue) -> Value + Send + Sync + 'static,
    {
        Self {
            evaluate: Box::new(evaluate),
        }
    }
}

impl ConditionEvaluator for FnEvaluator {
    fn evaluate(&self, base_model: &Value, value: &ImmutableValue) -> Value {
        (self.evaluate)(base_model, value)
    }
}

impl std::fmt::Debug for FnEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEvaluator").finish_non_exhaustive()
    }
}
