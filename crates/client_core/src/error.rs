use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiFailure {
    /// Server-provided explanation, present only on a rejection whose body carried a string
    /// `detail`.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when the server answered with a non-success status, as opposed to the request
    /// never completing or the body being unreadable.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
