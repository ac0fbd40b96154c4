//! Controller layer: UI events, delegated click routing, and the two mutation workflows.

pub mod events;
pub mod signup;
pub mod unregister;

use client_core::ApiFailure;
use shared::error::BoardFailure;

/// Result of one signup submission or delete-control activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded { message: String },
    Failed(BoardFailure),
    /// A required form field was empty; nothing was sent.
    Blocked { field: &'static str },
    /// The same action is already in flight; nothing was sent.
    Busy,
}

/// Text shown for a failed mutation: the server's detail when it sent one, otherwise the
/// fallback matching how the request failed.
pub(crate) fn failure_text(err: &ApiFailure, rejected: &str, unreachable: &str) -> String {
    match err.detail() {
        Some(detail) => detail.to_string(),
        None if err.is_rejection() => rejected.to_string(),
        None => unreachable.to_string(),
    }
}
