//! Actions accepted by the reducer.
//!
//! On the wire an action is a JSON object with a `type` discriminator and
//! camelCase payload fields, e.g.
//! `{"type": "CHANGE_VALUE", "bunsenId": "foo.bar", "value": 1}`.
//! In Rust it is the closed [`Action`] enum; kinds this crate does not know
//! decode into [`Action::Unrecognized`] so that vocabulary skew never fails.

use super::error::{ActionError, PathError};
use super::path::Path;
use super::state::ValidationResult;
use super::value::ImmutableValue;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Bootstrap discriminator.
pub const INIT: &str = "@@INIT";
/// Bootstrap discriminator sent by redux stores. Redux may append a suffix.
pub const REDUX_INIT: &str = "@@redux/INIT";
pub const CHANGE_MODEL: &str = "CHANGE_MODEL";
pub const CHANGE_VALUE: &str = "CHANGE_VALUE";
pub const VALIDATION_RESOLVED: &str = "VALIDATION_RESOLVED";

/// The discriminator of an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Init,
    ChangeModel,
    ChangeValue,
    ValidationResolved,
    Unrecognized,
}

impl ActionKind {
    /// Classify a `type` string.
    pub fn from_discriminator(kind: &str) -> Self {
        match kind {
            INIT => Self::Init,
            CHANGE_MODEL => Self::ChangeModel,
            CHANGE_VALUE => Self::ChangeValue,
            VALIDATION_RESOLVED => Self::ValidationResolved,
            k if k.starts_with(REDUX_INIT) => Self::Init,
            _ => Self::Unrecognized,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => INIT,
            Self::ChangeModel => CHANGE_MODEL,
            Self::ChangeValue => CHANGE_VALUE,
            Self::ValidationResolved => VALIDATION_RESOLVED,
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

/// A request to move the form state forward.
///
/// # Example
///
/// ```rust
/// use formstate::{Action, ActionKind};
/// use serde_json::json;
///
/// let action: Action = serde_json::from_value(json!({
///     "type": "CHANGE_VALUE",
///     "bunsenId": "address.street",
///     "value": "Main St",
/// }))
/// .unwrap();
/// assert_eq!(action.kind(), ActionKind::ChangeValue);
///
/// let unknown: Action = serde_json::from_value(json!({"type": "BOGUS"})).unwrap();
/// assert_eq!(unknown.discriminator(), "BOGUS");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Action {
    /// Bootstrap or replay. `kind` keeps the exact discriminator received.
    Init { kind: String },

    /// Replace the base model.
    ChangeModel { model: Value },

    /// Set (or clear) the value at `bunsen_id`, or replace the whole value
    /// when `bunsen_id` is `None`.
    ChangeValue {
        bunsen_id: Option<Path>,
        value: ImmutableValue,
    },

    /// Store the outcome of a validation pass.
    ValidationResolved {
        validation_result: ValidationResult,
        errors: Map<String, Value>,
    },

    /// Any other discriminator. Ignored by the reducer.
    Unrecognized { kind: String },
}

impl Action {
    pub fn init() -> Self {
        Self::Init {
            kind: INIT.to_string(),
        }
    }

    pub fn change_model(model: Value) -> Self {
        Self::ChangeModel { model }
    }

    /// Set or clear the field addressed by `bunsen_id`.
    pub fn change_value(
        bunsen_id: &str,
        value: impl Into<ImmutableValue>,
    ) -> Result<Self, PathError> {
        Ok(Self::ChangeValue {
            bunsen_id: Some(Path::parse(bunsen_id)?),
            value: value.into(),
        })
    }

    /// Replace the entire value tree.
    pub fn replace_value(value: impl Into<ImmutableValue>) -> Self {
        Self::ChangeValue {
            bunsen_id: None,
            value: value.into(),
        }
    }

    pub fn validation_resolved(
        validation_result: ValidationResult,
        errors: Map<String, Value>,
    ) -> Self {
        Self::ValidationResolved {
            validation_result,
            errors,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Init { .. } => ActionKind::Init,
            Self::ChangeModel { .. } => ActionKind::ChangeModel,
            Self::ChangeValue { .. } => ActionKind::ChangeValue,
            Self::ValidationResolved { .. } => ActionKind::ValidationResolved,
            Self::Unrecognized { .. } => ActionKind::Unrecognized,
        }
    }

    /// The `type` string this action travels under.
    pub fn discriminator(&self) -> &str {
        match self {
            Self::Init { kind } | Self::Unrecognized { kind } => kind.as_str(),
            other => other.kind().name(),
        }
    }
}

impl TryFrom<Value> for Action {
    type Error = ActionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(ActionError::NotAnObject);
        };
        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => return Err(ActionError::MissingKind),
        };

        match ActionKind::from_discriminator(&kind) {
            ActionKind::Init => Ok(Self::Init { kind }),
            ActionKind::ChangeModel => {
                let model = take(&mut fields, &kind, "model")?;
                Ok(Self::ChangeModel { model })
            }
            ActionKind::ChangeValue => {
                let value = take(&mut fields, &kind, "value")?;
                let bunsen_id = match fields.remove("bunsenId") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(id)) => Some(Path::parse(&id)?),
                    Some(other) => {
                        return Err(ActionError::InvalidField {
                            kind,
                            field: "bunsenId",
                            reason: format!("expected string or null, got {}", other),
                        })
                    }
                };
                Ok(Self::ChangeValue {
                    bunsen_id,
                    value: ImmutableValue::from(value),
                })
            }
            ActionKind::ValidationResolved => {
                let validation_result = take(&mut fields, &kind, "validationResult")?;
                let validation_result = serde_json::from_value(validation_result).map_err(|e| {
                    ActionError::InvalidField {
                        kind: kind.clone(),
                        field: "validationResult",
                        reason: e.to_string(),
                    }
                })?;
                let errors = match take(&mut fields, &kind, "errors")? {
                    Value::Object(errors) => errors,
                    Value::Null => Map::new(),
                    other => {
                        return Err(ActionError::InvalidField {
                            kind,
                            field: "errors",
                            reason: format!("expected object, got {}", other),
                        })
                    }
                };
                Ok(Self::ValidationResolved {
                    validation_result,
                    errors,
                })
            }
            ActionKind::Unrecognized => Ok(Self::Unrecognized { kind }),
        }
    }
}

fn take(
    fields: &mut Map<String, Value>,
    kind: &str,
    field: &'static str,
) -> Result<Value, ActionError> {
    fields.remove(field).ok_or_else(|| ActionError::MissingField {
        kind: kind.to_string(),
        field,
    })
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        let kind = action.discriminator().to_string();
        match action {
            Action::Init { .. } | Action::Unrecognized { .. } => json!({ "type": kind }),
            Action::ChangeModel { model } => json!({ "type": kind, "model": model }),
            Action::ChangeValue { bunsen_id, value } => json!({
                "type": kind,
                "bunsenId": bunsen_id.map(|p| p.to_string()),
                "value": value.to_json(),
            }),
            Action::ValidationResolved {
                validation_result,
                errors,
            } => json!({
                "type": kind,
                "validationResult": validation_result,
                "errors": errors,
            }),
        }
    }
}
