//! Activity signup board: loads activities, renders them into a document tree, and runs
//! the signup and unregister workflows against the activities server.

use std::sync::Arc;

use client_core::ActivityApi;
use shared::error::BoardFailure;
use tracing::debug;

pub mod context;
pub mod controller;
pub mod document;
pub mod dom;
pub mod loader;
pub mod message;
pub mod render;
pub mod view;

pub use context::{BoardContext, BoardOptions};
pub use controller::{
    events::{route_click, ControlAction, EventOutcome, UiEvent},
    signup::{SignupController, SignupPhase},
    unregister::UnregisterController,
    SubmissionOutcome,
};
pub use document::{BoardDocument, SignupForm};
pub use message::{MessageArea, MessageKind};

pub struct ActivityBoard {
    ctx: Arc<BoardContext>,
    signup: SignupController,
    unregister: UnregisterController,
}

impl ActivityBoard {
    pub fn new(api: Arc<dyn ActivityApi>, options: BoardOptions) -> Self {
        Self {
            ctx: Arc::new(BoardContext::new(api, options)),
            signup: SignupController::default(),
            unregister: UnregisterController::default(),
        }
    }

    pub async fn dispatch(&self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::PageLoaded => EventOutcome::Loaded(self.refresh().await),
            UiEvent::EmailInput(email) => {
                self.ctx.document.lock().await.form.email = email;
                EventOutcome::FormUpdated
            }
            UiEvent::ActivitySelected(activity) => {
                let mut document = self.ctx.document.lock().await;
                // The dropdown can only hold values it offers.
                if activity.is_empty() || document.has_option(&activity) {
                    document.form.activity = activity;
                    EventOutcome::FormUpdated
                } else {
                    debug!(%activity, "ignoring selection outside the dropdown");
                    EventOutcome::Ignored
                }
            }
            UiEvent::SignupSubmitted => {
                EventOutcome::Submission(self.signup.submit(&self.ctx).await)
            }
            UiEvent::ListClicked { target } => {
                let action = {
                    let document = self.ctx.document.lock().await;
                    route_click(&document.activities_list, &target)
                };
                match action {
                    Some(ControlAction::Unregister { activity, email }) => {
                        EventOutcome::Submission(self.activate_unregister(&activity, &email).await)
                    }
                    None => EventOutcome::Ignored,
                }
            }
        }
    }

    pub async fn refresh(&self) -> Result<usize, BoardFailure> {
        self.ctx.refresh().await
    }

    /// Activates a delete control carrying `activity`/`email`, whether or not that control
    /// is still part of the current render.
    pub async fn activate_unregister(&self, activity: &str, email: &str) -> SubmissionOutcome {
        self.unregister.activate(&self.ctx, activity, email).await
    }

    pub async fn snapshot(&self) -> BoardDocument {
        self.ctx.snapshot().await
    }

    pub fn signup_phase(&self) -> SignupPhase {
        self.signup.phase()
    }

    pub fn unregister_in_flight(&self, activity: &str, email: &str) -> bool {
        self.unregister.is_in_flight(activity, email)
    }

    pub fn options(&self) -> BoardOptions {
        self.ctx.options
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
