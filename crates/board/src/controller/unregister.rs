use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use shared::error::BoardFailure;
use tracing::{debug, info, warn};

use super::{failure_text, SubmissionOutcome};
use crate::{context::BoardContext, message::MessageKind};

pub const UNREGISTER_FAILED_TEXT: &str = "Failed to remove participant.";

type PairKey = (String, String);

/// Marks one (activity, email) pair as in flight until dropped, including when the
/// activation future is cancelled mid-request.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<PairKey>>,
    key: PairKey,
}

impl<'a> InFlightGuard<'a> {
    fn claim(in_flight: &'a Mutex<HashSet<PairKey>>, key: PairKey) -> Option<Self> {
        if !lock_pairs(in_flight).insert(key.clone()) {
            return None;
        }
        Some(Self { in_flight, key })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock_pairs(self.in_flight).remove(&self.key);
    }
}

fn lock_pairs(in_flight: &Mutex<HashSet<PairKey>>) -> MutexGuard<'_, HashSet<PairKey>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Unregisters on delete-control activation. Activation is immediate: no confirmation, and
/// the participant need not appear in the current render.
#[derive(Default)]
pub struct UnregisterController {
    in_flight: Mutex<HashSet<PairKey>>,
}

impl UnregisterController {
    pub fn is_in_flight(&self, activity: &str, email: &str) -> bool {
        lock_pairs(&self.in_flight).contains(&(activity.to_string(), email.to_string()))
    }

    pub async fn activate(
        &self,
        ctx: &Arc<BoardContext>,
        activity: &str,
        email: &str,
    ) -> SubmissionOutcome {
        let key = (activity.to_string(), email.to_string());
        let Some(guard) = InFlightGuard::claim(&self.in_flight, key) else {
            debug!(%activity, %email, "unregister already in flight");
            return SubmissionOutcome::Busy;
        };

        let result = ctx.api.unregister(activity, email).await;
        drop(guard);

        let ttl = ctx.options.unregister_message_ttl;
        match result {
            Ok(response) => {
                let message = response.message.unwrap_or_default();
                info!(%activity, %email, "participant unregistered");
                ctx.show_message(message.clone(), MessageKind::Success, ttl)
                    .await;
                if let Err(failure) = ctx.refresh().await {
                    debug!(%failure, "board left on load fallback after unregister");
                }
                SubmissionOutcome::Succeeded { message }
            }
            Err(err) => {
                warn!(
                    %activity,
                    %email,
                    status = ?err.status(),
                    error = %err,
                    "error deleting participant"
                );
                let text = failure_text(&err, UNREGISTER_FAILED_TEXT, UNREGISTER_FAILED_TEXT);
                ctx.show_message(text.clone(), MessageKind::Error, ttl)
                    .await;
                SubmissionOutcome::Failed(BoardFailure::mutation(text))
            }
        }
    }
}
