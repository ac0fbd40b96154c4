use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ACTIVITIES_PATH: &str = "activities";
pub const SIGNUP_SEGMENT: &str = "signup";
pub const PARTICIPANTS_SEGMENT: &str = "participants";
pub const EMAIL_QUERY_KEY: &str = "email";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Signup,
    Unregister,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Unregister => "unregister",
        }
    }
}

/// Body of a signup/unregister response. Success carries `message`, rejection `detail`;
/// either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl MutationResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            detail: None,
        }
    }

    /// `detail` is only usable as display text when the server sent a string; structured
    /// validation errors are ignored.
    pub fn detail_text(&self) -> Option<&str> {
        match &self.detail {
            Some(Value::String(detail)) if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_text_only_accepts_strings() {
        let rejected: MutationResponse =
            serde_json::from_str(r#"{"detail": "Already registered"}"#).expect("parse");
        assert_eq!(rejected.detail_text(), Some("Already registered"));

        let structured: MutationResponse =
            serde_json::from_str(r#"{"detail": [{"loc": ["query", "email"], "msg": "field required"}]}"#)
                .expect("parse");
        assert_eq!(structured.detail_text(), None);

        let empty: MutationResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(empty.detail_text(), None);
        assert_eq!(empty.message, None);
    }
}
