use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use shared::{
    domain::ActivitySet,
    protocol::{
        MutationKind, MutationResponse, ACTIVITIES_PATH, EMAIL_QUERY_KEY, PARTICIPANTS_SEGMENT,
        SIGNUP_SEGMENT,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod error;
pub use error::ApiFailure;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The three calls the board makes against the activities server.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn load_activities(&self) -> Result<ActivitySet, ApiFailure>;
    async fn signup(&self, activity: &str, email: &str) -> Result<MutationResponse, ApiFailure>;
    async fn unregister(&self, activity: &str, email: &str)
        -> Result<MutationResponse, ApiFailure>;
}

pub struct HttpActivityClient {
    http: Client,
    base_url: Url,
}

impl HttpActivityClient {
    pub fn new(server_url: &str, request_timeout: Duration) -> Result<Self, ApiFailure> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Self::with_client(http, server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, ApiFailure> {
        let base_url = Url::parse(server_url.trim()).map_err(|e| ApiFailure::InvalidServerUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiFailure::InvalidServerUrl {
                url: server_url.to_string(),
                reason: "expected an http(s) base url".into(),
            });
        }
        Ok(Self { http, base_url })
    }

    /// `GET /activities`
    pub fn activities_url(&self) -> Result<Url, ApiFailure> {
        self.endpoint(&[ACTIVITIES_PATH], None)
    }

    /// `POST /activities/{activity}/signup?email={email}`
    pub fn signup_url(&self, activity: &str, email: &str) -> Result<Url, ApiFailure> {
        self.endpoint(&[ACTIVITIES_PATH, activity, SIGNUP_SEGMENT], Some(email))
    }

    /// `DELETE /activities/{activity}/participants?email={email}`
    pub fn unregister_url(&self, activity: &str, email: &str) -> Result<Url, ApiFailure> {
        self.endpoint(&[ACTIVITIES_PATH, activity, PARTICIPANTS_SEGMENT], Some(email))
    }

    fn endpoint(&self, segments: &[&str], email: Option<&str>) -> Result<Url, ApiFailure> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            // Pushed segments are percent-encoded, so names containing '/' or spaces stay
            // a single segment.
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiFailure::InvalidServerUrl {
                    url: self.base_url.to_string(),
                    reason: "url cannot carry a path".into(),
                })?;
            path.pop_if_empty().extend(segments);
        }
        if let Some(email) = email {
            url.query_pairs_mut().append_pair(EMAIL_QUERY_KEY, email);
        }
        Ok(url)
    }

    async fn send_mutation(
        &self,
        kind: MutationKind,
        request: RequestBuilder,
    ) -> Result<MutationResponse, ApiFailure> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let parsed: MutationResponse = serde_json::from_slice(&body)?;
            debug!(mutation = kind.as_str(), status = status.as_u16(), "mutation accepted");
            return Ok(parsed);
        }

        // A rejection with an unreadable body still counts as a rejection; the caller falls
        // back to its generic message.
        let parsed = serde_json::from_slice::<MutationResponse>(&body).unwrap_or_default();
        let detail = parsed.detail_text().map(str::to_owned);
        warn!(
            mutation = kind.as_str(),
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "mutation rejected"
        );
        Err(ApiFailure::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl ActivityApi for HttpActivityClient {
    async fn load_activities(&self) -> Result<ActivitySet, ApiFailure> {
        let response = self.http.get(self.activities_url()?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure::Rejected {
                status: status.as_u16(),
                detail: None,
            });
        }
        let body = response.bytes().await?;
        let activities: ActivitySet = serde_json::from_slice(&body)?;
        debug!(count = activities.len(), "activities loaded");
        Ok(activities)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationResponse, ApiFailure> {
        let url = self.signup_url(activity, email)?;
        self.send_mutation(MutationKind::Signup, self.http.post(url))
            .await
    }

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MutationResponse, ApiFailure> {
        let url = self.unregister_url(activity, email)?;
        self.send_mutation(MutationKind::Unregister, self.http.delete(url))
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
