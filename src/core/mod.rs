//! Pure building blocks of the form state.
//!
//! This module holds everything the reducer is made of:
//! - the immutable value tree and path-addressed updates of it
//! - the sanitizer that strips empty leaves
//! - the state snapshot and the action vocabulary
//! - the seams the host plugs into (condition evaluation, diagnostics)
//!
//! Nothing in here mutates shared data or performs I/O.

mod action;
mod clean;
mod diagnostics;
mod error;
mod evaluator;
mod mutate;
mod path;
mod state;
mod value;

pub use action::{
    Action, ActionKind, CHANGE_MODEL, CHANGE_VALUE, INIT, REDUX_INIT, VALIDATION_RESOLVED,
};
pub use clean::{clean, is_droppable};
pub use diagnostics::{DiagnosticSink, NoopSink, RecordingSink, TracingSink};
pub use error::{ActionError, PathError};
pub use evaluator::{ConditionEvaluator, FnEvaluator, IdentityEvaluator};
pub use mutate::{get_at_path, set_at_path, unset_at_path, MAX_ARRAY_PADDING};
pub use path::{Path, Seg};
pub use state::{FormState, Model, ValidationResult};
pub use value::ImmutableValue;
