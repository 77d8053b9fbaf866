//! Formstate: a pure state-transition core for schema-driven forms.
//!
//! A form is described by a [`FormState`]: the current value tree, the
//! author-supplied base model, the model derived from it for the current
//! value, and the latest validation output. [`FormReducer::transition`] maps a
//! state and an [`Action`] to the next state without touching the old one.
//!
//! # Core Concepts
//!
//! - **Value**: an [`ImmutableValue`] tree; updates share untouched subtrees
//! - **Actions**: init, change-model, change-value and validation-resolved
//! - **Model stability**: when a value change derives a model equal to the
//!   current one, the current `Arc` is kept so consumers can compare by identity
//! - **Collaborators**: condition evaluation and diagnostics are injected
//!   through [`ReducerBuilder`]
//!
//! # Example
//!
//! ```rust
//! use formstate::{transition, Action, FormState};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let state = Arc::new(FormState::with_base_model(json!({"type": "object"})));
//! let state = transition(state, &Action::init());
//! let state = transition(state, &Action::replace_value(json!({"x": 1, "y": ""})));
//!
//! assert_eq!(state.value_or_null().to_json(), json!({"x": 1}));
//! ```

pub mod core;
pub mod reducer;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Action, ActionKind, FormState, ImmutableValue, Path, ValidationResult};
pub use reducer::{FormReducer, ReducerBuilder};
pub use store::FormStore;

use std::sync::Arc;

/// Apply `action` with a default-configured [`FormReducer`].
///
/// Unrecognized actions are reported through `tracing`.
pub fn transition(state: Arc<FormState>, action: &Action) -> Arc<FormState> {
    FormReducer::new().transition(state, action)
}
