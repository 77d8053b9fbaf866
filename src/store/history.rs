//! Record of dispatched actions.
//!
//! A [`DispatchHistory`] keeps the most recent records up to its limit and
//! drops the oldest ones beyond it, so a store that lives for a whole form
//! session holds a bounded window of dispatches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Records kept by a history created with [`DispatchHistory::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// What one dispatch did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Discriminator of the dispatched action
    pub kind: String,
    /// When the action was applied
    pub timestamp: DateTime<Utc>,
    /// False when the reducer handed back the same state
    pub state_changed: bool,
    /// Whether the value snapshot was replaced
    pub value_changed: bool,
    /// Whether `model` now points to a different allocation
    pub model_changed: bool,
}

/// Ordered window of dispatch records, oldest first.
///
/// # Example
///
/// ```rust
/// use formstate::store::{DispatchHistory, DispatchRecord};
/// use chrono::Utc;
///
/// let mut history = DispatchHistory::with_limit(2);
/// for kind in ["@@INIT", "CHANGE_VALUE", "VALIDATION_RESOLVED"] {
///     history.push(DispatchRecord {
///         kind: kind.to_string(),
///         timestamp: Utc::now(),
///         state_changed: true,
///         value_changed: false,
///         model_changed: false,
///     });
/// }
///
/// assert_eq!(history.kinds(), vec!["CHANGE_VALUE", "VALIDATION_RESOLVED"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchHistory {
    records: VecDeque<DispatchRecord>,
    #[serde(default = "default_limit")]
    limit: usize,
}

impl DispatchHistory {
    /// Empty history bounded by [`DEFAULT_HISTORY_LIMIT`].
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Empty history keeping at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the bound, dropping the oldest records that no longer fit.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.trim();
    }

    /// Append a record, evicting the oldest one when the history is full.
    pub fn push(&mut self, record: DispatchRecord) {
        self.records.push_back(record);
        self.trim();
    }

    /// Record a dispatch, returning a new history. `self` is left as is.
    pub fn record(&self, record: DispatchRecord) -> Self {
        let mut next = self.clone();
        next.push(record);
        next
    }

    fn trim(&mut self) {
        let excess = self.records.len().saturating_sub(self.limit);
        self.records.drain(..excess);
    }

    /// Records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.records.iter()
    }

    /// The record at `index`, counting from the oldest one kept.
    pub fn get(&self, index: usize) -> Option<&DispatchRecord> {
        self.records.get(index)
    }

    /// Discriminators in dispatch order.
    pub fn kinds(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.kind.as_str()).collect()
    }

    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Time between the oldest and the newest record kept.
    ///
    /// `None` when nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

impl Default for DispatchHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
