//! Decoding errors for paths and actions.

use thiserror::Error;

/// Errors that can occur when parsing a bunsenId into a [`Path`](super::Path).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PathError {
    #[error("bunsenId is empty")]
    Empty,

    #[error("bunsenId '{path}' has an empty segment at byte {position}")]
    EmptySegment { path: String, position: usize },

    #[error("bunsenId '{path}' has an unterminated index bracket")]
    UnterminatedIndex { path: String },

    #[error("bunsenId '{path}' has a non-numeric index '{index}'")]
    InvalidIndex { path: String, index: String },
}

/// Errors that can occur when decoding an [`Action`](super::Action) from JSON.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Action must be a JSON object")]
    NotAnObject,

    #[error("Action is missing its 'type' discriminator")]
    MissingKind,

    #[error("Action '{kind}' is missing required field '{field}'")]
    MissingField { kind: String, field: &'static str },

    #[error("Action '{kind}' has an invalid '{field}': {reason}")]
    InvalidField {
        kind: String,
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Path(#[from] PathError),
}
