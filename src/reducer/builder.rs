//! Builder for configuring a [`FormReducer`].

use super::FormReducer;
use crate::core::{
    ConditionEvaluator, DiagnosticSink, FnEvaluator, IdentityEvaluator, ImmutableValue,
    TracingSink,
};
use serde_json::Value;
use std::sync::Arc;

/// Fluent configuration of the reducer's collaborators.
///
/// Anything left unset falls back to [`IdentityEvaluator`] and [`TracingSink`].
///
/// # Example
///
/// ```rust
/// use formstate::core::{ImmutableValue, NoopSink};
/// use formstate::ReducerBuilder;
/// use serde_json::Value;
///
/// let reducer = ReducerBuilder::new()
///     .evaluate_with(|base: &Value, _value: &ImmutableValue| base.clone())
///     .diagnostics(NoopSink)
///     .build();
/// # let _ = reducer;
/// ```
#[derive(Default)]
pub struct ReducerBuilder {
    evaluator: Option<Arc<dyn ConditionEvaluator>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl ReducerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition evaluator.
    pub fn evaluator<E>(self, evaluator: E) -> Self
    where
        E: ConditionEvaluator + 'static,
    {
        self.shared_evaluator(Arc::new(evaluator))
    }

    /// Set the condition evaluator from a closure.
    pub fn evaluate_with<F>(self, evaluate: F) -> Self
    where
        F: Fn(&Value, &ImmutableValue) -> Value + Send + Sync + 'static,
    {
        self.evaluator(FnEvaluator::new(evaluate))
    }

    /// Set a condition evaluator that is shared with other owners.
    pub fn shared_evaluator(mut self, evaluator: Arc<dyn ConditionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Set the diagnostic sink.
    pub fn diagnostics<D>(self, sink: D) -> Self
    where
        D: DiagnosticSink + 'static,
    {
        self.shared_diagnostics(Arc::new(sink))
    }

    /// Set a diagnostic sink the caller keeps a handle to.
    pub fn shared_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub fn build(self) -> FormReducer {
        FormReducer {
            evaluator: self.evaluator.unwrap_or_else(|| Arc::new(IdentityEvaluator)),
            diagnostics: self.diagnostics.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }
}
