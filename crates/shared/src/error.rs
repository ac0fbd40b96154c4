use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Reading the activity set failed.
    Load,
    /// A signup or unregister was rejected or never reached the server.
    Mutation,
}

/// A failure already surfaced to the user; carried back to callers for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?} failure: {message}")]
pub struct BoardFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl BoardFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Load, message)
    }

    pub fn mutation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Mutation, message)
    }
}
