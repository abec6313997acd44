//! Async HTTP client for the Octobox REST API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Response;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::types::{BulkAction, NotificationsResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 200;
const NOTIFICATIONS_PATH: &str = "/notifications.json";

/// Client bound to one Octobox instance and API token.
///
/// Every request carries `Authorization: Bearer <token>` and
/// `X-Octobox-API: true`.
#[derive(Debug, Clone)]
pub struct OctoboxClient {
    base_url: String,
    http: reqwest::Client,
}

impl OctoboxClient {
    /// Build a client for `base_url` (a trailing `/` is ignored).
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidUrl`] for an empty URL, [`ClientError::InvalidToken`]
    /// when the token cannot be sent as a header, [`ClientError::Http`] if the
    /// underlying client fails to build.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl(base_url));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static("x-octobox-api"),
            HeaderValue::from_static("true"),
        );

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;
        Ok(Self { base_url, http })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /notifications.json`.
    pub async fn notifications(&self) -> Result<NotificationsResponse, ClientError> {
        let url = self.url(NOTIFICATIONS_PATH);
        debug!(%url, "fetching notifications");
        let resp = self.http.get(&url).send().await?;
        let body = check_status(NOTIFICATIONS_PATH, resp).await?.text().await?;
        let decoded: NotificationsResponse =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode {
                endpoint: NOTIFICATIONS_PATH.to_owned(),
                source,
            })?;
        debug!(count = decoded.notifications.len(), "notifications decoded");
        Ok(decoded)
    }

    pub async fn mark_read(&self, ids: &[u64]) -> Result<(), ClientError> {
        self.apply(BulkAction::MarkRead, ids).await
    }

    pub async fn mute(&self, ids: &[u64]) -> Result<(), ClientError> {
        self.apply(BulkAction::Mute, ids).await
    }

    pub async fn archive(&self, ids: &[u64]) -> Result<(), ClientError> {
        self.apply(BulkAction::Archive, ids).await
    }

    /// POST one `id[]` form pair per id to the action's endpoint.
    ///
    /// An empty `ids` slice sends nothing.
    pub async fn apply(&self, action: BulkAction, ids: &[u64]) -> Result<(), ClientError> {
        if ids.is_empty() {
            debug!(action = action.label(), "no ids, skipping request");
            return Ok(());
        }
        let url = self.url(action.path());
        let form: Vec<(&str, String)> = ids.iter().map(|id| ("id[]", id.to_string())).collect();
        debug!(%url, ?ids, action = action.label(), "posting bulk action");
        let resp = self.http.post(&url).form(&form).send().await?;
        check_status(action.path(), resp).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn check_status(endpoint: &str, resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let body: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
    warn!(endpoint, status = status.as_u16(), "request rejected");
    Err(ClientError::Status {
        endpoint: endpoint.to_owned(),
        status: status.as_u16(),
        body,
    })
}
