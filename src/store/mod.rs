//! Sequential dispatch around the reducer.
//!
//! The reducer is pure; [`FormStore`] is the thin shell that owns the current
//! snapshot, applies one action at a time in the order they arrive, keeps a
//! [`DispatchHistory`], and tells subscribers when the state changed.

mod history;

pub use history::{DispatchHistory, DispatchRecord, DEFAULT_HISTORY_LIMIT};

use crate::core::{Action, FormState};
use crate::reducer::FormReducer;
use chrono::Utc;
use std::sync::Arc;

/// Handle returned by [`FormStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&FormState) + Send + Sync>;

/// Owner of the current form state.
///
/// # Example
///
/// ```rust
/// use formstate::{Action, FormReducer, FormState, FormStore};
/// use serde_json::json;
///
/// let mut store = FormStore::new(
///     FormReducer::new(),
///     FormState::with_base_model(json!({"type": "object"})),
/// );
/// store.dispatch(&Action::change_value("email", "a@b.c").unwrap());
///
/// assert_eq!(store.state().value_or_null().to_json(), json!({"email": "a@b.c"}));
/// assert_eq!(store.history().kinds(), vec!["@@INIT", "CHANGE_VALUE"]);
/// ```
pub struct FormStore {
    reducer: FormReducer,
    current: Arc<FormState>,
    history: DispatchHistory,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FormStore {
    /// Create a store over `seed` and bootstrap it with an init action.
    pub fn new(reducer: FormReducer, seed: FormState) -> Self {
        let mut store = Self {
            reducer,
            current: Arc::new(seed),
            history: DispatchHistory::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        store.dispatch(&Action::init());
        store
    }

    /// Keep at most `limit` dispatch records (builder pattern).
    ///
    /// The oldest records are dropped first. Stores start with
    /// [`DEFAULT_HISTORY_LIMIT`].
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history.set_limit(limit);
        self
    }

    /// Current snapshot (pure).
    pub fn state(&self) -> Arc<FormState> {
        Arc::clone(&self.current)
    }

    /// Dispatch log (pure).
    pub fn history(&self) -> &DispatchHistory {
        &self.history
    }

    /// Apply `action` to the current state and return the new snapshot.
    pub fn dispatch(&mut self, action: &Action) -> Arc<FormState> {
        let previous = Arc::clone(&self.current);
        let next = self.reducer.transition(Arc::clone(&previous), action);

        let record = DispatchRecord {
            kind: action.discriminator().to_string(),
            timestamp: Utc::now(),
            state_changed: !Arc::ptr_eq(&previous, &next),
            value_changed: !same_value(&previous, &next),
            model_changed: !Arc::ptr_eq(&previous.model, &next.model),
        };
        tracing::debug!(
            kind = %record.kind,
            value_changed = record.value_changed,
            model_changed = record.model_changed,
            "dispatched action"
        );

        let notify = record.state_changed;
        self.history.push(record);
        self.current = next;

        if notify {
            for (_, listener) in &self.listeners {
                listener(&self.current);
            }
        }
        Arc::clone(&self.current)
    }

    /// Register a callback run after every dispatch that produced a new state.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&FormState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscription. Returns false when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }
}

fn same_value(previous: &FormState, next: &FormState) -> bool {
    match (&previous.value, &next.value) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        (None, None) => true,
        _ => false,
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("current", &self.current)
            .field("history", &self.history)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
