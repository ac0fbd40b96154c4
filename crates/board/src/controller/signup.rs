use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::error::BoardFailure;
use tracing::{debug, info, warn};

use super::{failure_text, SubmissionOutcome};
use crate::{context::BoardContext, message::MessageKind};

pub const SIGNUP_REJECTED_TEXT: &str = "An error occurred";
pub const SIGNUP_UNREACHABLE_TEXT: &str = "Failed to sign up. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SignupPhase {
    /// Succeeded and Failed settle back to Idle as soon as the next submission starts.
    fn accepts_submission(self) -> bool {
        self != Self::Submitting
    }
}

/// Holds the phase at `Submitting` for one submission. Dropping it before `settle` (the
/// submit future was cancelled) puts the phase back to `Idle`.
struct SubmittingGuard<'a> {
    phase: &'a Mutex<SignupPhase>,
    settled: SignupPhase,
}

impl<'a> SubmittingGuard<'a> {
    fn begin(phase: &'a Mutex<SignupPhase>) -> Option<Self> {
        let mut current = lock_phase(phase);
        if !current.accepts_submission() {
            return None;
        }
        *current = SignupPhase::Submitting;
        Some(Self {
            phase,
            settled: SignupPhase::Idle,
        })
    }

    fn settle(mut self, phase: SignupPhase) {
        self.settled = phase;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *lock_phase(self.phase) = self.settled;
    }
}

// The phase is a plain Copy value, so a poisoned lock still holds a usable one.
fn lock_phase(phase: &Mutex<SignupPhase>) -> MutexGuard<'_, SignupPhase> {
    phase.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct SignupController {
    phase: Mutex<SignupPhase>,
}

impl SignupController {
    pub fn phase(&self) -> SignupPhase {
        *lock_phase(&self.phase)
    }

    pub async fn submit(&self, ctx: &Arc<BoardContext>) -> SubmissionOutcome {
        let form = ctx.form().await;
        if let Some(field) = form.missing_field() {
            return SubmissionOutcome::Blocked { field };
        }

        let Some(guard) = SubmittingGuard::begin(&self.phase) else {
            return SubmissionOutcome::Busy;
        };

        let ttl = ctx.options.signup_message_ttl;
        let (outcome, settled) = match ctx.api.signup(&form.activity, &form.email).await {
            Ok(response) => {
                let message = response.message.unwrap_or_default();
                info!(activity = %form.activity, email = %form.email, "signup accepted");
                ctx.show_message(message.clone(), MessageKind::Success, ttl)
                    .await;
                ctx.reset_form().await;
                if let Err(failure) = ctx.refresh().await {
                    debug!(%failure, "board left on load fallback after signup");
                }
                (SubmissionOutcome::Succeeded { message }, SignupPhase::Succeeded)
            }
            Err(err) => {
                warn!(
                    activity = %form.activity,
                    email = %form.email,
                    status = ?err.status(),
                    error = %err,
                    "error signing up"
                );
                let text = failure_text(&err, SIGNUP_REJECTED_TEXT, SIGNUP_UNREACHABLE_TEXT);
                ctx.show_message(text.clone(), MessageKind::Error, ttl)
                    .await;
                (
                    SubmissionOutcome::Failed(BoardFailure::mutation(text)),
                    SignupPhase::Failed,
                )
            }
        };

        guard.settle(settled);
        outcome
    }
}
