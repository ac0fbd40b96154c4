//! State shared by every handler for the lifetime of one board.

use std::{sync::Arc, time::Duration};

use client_core::ActivityApi;
use shared::error::BoardFailure;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::{
    document::{BoardDocument, SignupForm},
    loader,
    message::MessageKind,
    render,
};

pub const SIGNUP_MESSAGE_TTL: Duration = Duration::from_millis(5000);
pub const UNREGISTER_MESSAGE_TTL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOptions {
    pub signup_message_ttl: Duration,
    pub unregister_message_ttl: Duration,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            signup_message_ttl: SIGNUP_MESSAGE_TTL,
            unregister_message_ttl: UNREGISTER_MESSAGE_TTL,
        }
    }
}

pub struct BoardContext {
    pub(crate) api: Arc<dyn ActivityApi>,
    pub(crate) options: BoardOptions,
    pub(crate) document: Mutex<BoardDocument>,
}

impl BoardContext {
    pub fn new(api: Arc<dyn ActivityApi>, options: BoardOptions) -> Self {
        Self {
            api,
            options,
            document: Mutex::new(BoardDocument::default()),
        }
    }

    /// Loader followed by Renderer. On failure the list shows the fallback text and the
    /// error is logged; the returned failure is informational only.
    pub async fn refresh(&self) -> Result<usize, BoardFailure> {
        match loader::load_views(self.api.as_ref()).await {
            Ok(views) => {
                let mut document = self.document.lock().await;
                render::render_board(&mut document, &views);
                info!(activities = views.len(), "board rendered");
                Ok(views.len())
            }
            Err(err) => {
                error!(error = %err, "error fetching activities");
                let mut document = self.document.lock().await;
                render::render_load_failure(&mut document);
                Err(BoardFailure::load(err.to_string()))
            }
        }
    }

    /// Shows `text` and schedules it to disappear after `ttl` unless a newer message has
    /// replaced it by then.
    pub async fn show_message(self: &Arc<Self>, text: String, kind: MessageKind, ttl: Duration) {
        let generation = self.document.lock().await.message.show(text, kind, ttl);

        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let hidden = ctx.document.lock().await.message.hide_if_current(generation);
            debug!(generation, hidden, "message auto-hide fired");
        });
    }

    pub async fn form(&self) -> SignupForm {
        self.document.lock().await.form.clone()
    }

    pub async fn reset_form(&self) {
        self.document.lock().await.form.reset();
    }

    pub async fn snapshot(&self) -> BoardDocument {
        self.document.lock().await.clone()
    }
}
