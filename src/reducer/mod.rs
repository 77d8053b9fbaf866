//! The form state reducer.
//!
//! [`FormReducer::transition`] is a pure function from `(state, action)` to
//! the next state. Each known action kind has its own handler; unknown kinds
//! are reported to the diagnostic sink and leave the state untouched.
//!
//! Two guarantees matter to consumers that compare by identity:
//! - an ignored action returns the very same `Arc<FormState>`
//! - a value change whose derived model is structurally equal to the current
//!   model keeps the current `Arc` for `model`

mod builder;

pub use builder::ReducerBuilder;

use crate::core::{
    clean, set_at_path, unset_at_path, Action, ConditionEvaluator, DiagnosticSink, FormState,
    ImmutableValue, Model, Path, ValidationResult,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Applies actions to form state.
///
/// # Example
///
/// ```rust
/// use formstate::{Action, FormReducer, FormState};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let reducer = FormReducer::new();
/// let state = Arc::new(FormState::with_base_model(json!({"type": "object"})));
///
/// let state = reducer.transition(state, &Action::init());
/// let state = reducer.transition(state, &Action::change_value("name", "Ada").unwrap());
///
/// assert_eq!(state.value_or_null().to_json(), json!({"name": "Ada"}));
/// ```
#[derive(Clone)]
pub struct FormReducer {
    pub(crate) evaluator: Arc<dyn ConditionEvaluator>,
    pub(crate) diagnostics: Arc<dyn DiagnosticSink>,
}

impl FormReducer {
    /// Reducer with the default collaborators.
    pub fn new() -> Self {
        ReducerBuilder::new().build()
    }

    pub fn builder() -> ReducerBuilder {
        ReducerBuilder::new()
    }

    /// Compute the state that follows `state` under `action`.
    pub fn transition(&self, state: Arc<FormState>, action: &Action) -> Arc<FormState> {
        let next = match action {
            Action::Init { .. } => self.init(&state),
            Action::ChangeModel { model } => self.change_model(&state, model),
            Action::ChangeValue { bunsen_id, value } => {
                self.change_value(&state, bunsen_id.as_ref(), value)
            }
            Action::ValidationResolved {
                validation_result,
                errors,
            } => validation_resolved(&state, validation_result, errors),
            Action::Unrecognized { kind } => {
                self.diagnostics.unrecognized_action(kind);
                return state;
            }
        };
        tracing::trace!(kind = action.discriminator(), "applied transition");
        Arc::new(next)
    }

    /// Bootstrap (or re-bootstrap) the state.
    ///
    /// With a base model present, the model is derived from the cleaned
    /// current value and the value itself is dropped: it has to come back
    /// through a value change so that it gets cleaned and re-derived the
    /// normal way. Missing fields then take their defaults.
    fn init(&self, state: &FormState) -> FormState {
        let mut next = state.clone();

        if let Some(base_model) = &state.base_model {
            let seed = match &state.value {
                Some(value) if !is_falsy(value) => clean(value),
                _ => ImmutableValue::empty_object(),
            };
            next.model = Arc::new(self.evaluator.evaluate(base_model, &seed));
            next.value = None;
        }

        if next.value.is_none() {
            next.value = Some(ImmutableValue::Null);
        }
        if next.base_model.is_none() {
            next.base_model = Some(Arc::new(Value::Object(Map::new())));
        }
        next
    }

    /// Swap in a new base model and derive against the raw current value.
    fn change_model(&self, state: &FormState, model: &Value) -> FormState {
        let base_model: Model = Arc::new(model.clone());
        let model = Arc::new(self.evaluator.evaluate(&base_model, &state.value_or_null()));

        FormState {
            base_model: Some(base_model),
            model,
            ..state.clone()
        }
    }

    /// Replace the whole value, or set or clear one field of it.
    fn change_value(
        &self,
        state: &FormState,
        bunsen_id: Option<&Path>,
        value: &ImmutableValue,
    ) -> FormState {
        let next_value = match bunsen_id {
            None => clean(value),
            Some(path) if clears_field(value) => unset_at_path(&state.value_or_null(), path),
            Some(path) => set_at_path(&state.value_or_null(), path, value.clone()),
        };

        let derived = self
            .evaluator
            .evaluate(&state.base_model_or_empty(), &next_value);
        let model = if *state.model == derived {
            Arc::clone(&state.model)
        } else {
            tracing::debug!(bunsen_id = ?bunsen_id.map(Path::to_string), "model re-derived");
            Arc::new(derived)
        };

        FormState {
            value: Some(next_value),
            model,
            ..state.clone()
        }
    }
}

impl Default for FormReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormReducer").finish_non_exhaustive()
    }
}

/// Null, `""` and `[]` remove the field instead of storing an empty value.
/// `false`, `0` and `{}` are stored.
fn clears_field(value: &ImmutableValue) -> bool {
    match value {
        ImmutableValue::Null => true,
        ImmutableValue::String(s) => s.is_empty(),
        ImmutableValue::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Values that seed a re-init with `{}`: null, `false`, zero and `""`.
fn is_falsy(value: &ImmutableValue) -> bool {
    match value {
        ImmutableValue::Null => true,
        ImmutableValue::Bool(b) => !b,
        ImmutableValue::Number(n) => n.as_f64() == Some(0.0),
        ImmutableValue::String(s) => s.is_empty(),
        ImmutableValue::Array(_) | ImmutableValue::Object(_) => false,
    }
}

fn validation_resolved(
    state: &FormState,
    validation_result: &ValidationResult,
    errors: &Map<String, Value>,
) -> FormState {
    FormState {
        validation_result: Arc::new(validation_result.clone()),
        errors: Arc::new(errors.clone()),
        ..state.clone()
    }
}
