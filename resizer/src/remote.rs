//! Remote store seam and its HTTP implementation.
//!
//! The core only knows the three operations of [`RemoteStore`]. Transport,
//! timeouts, and wire format belong to the implementation. [`HttpRemote`]
//! speaks the JSON API served by the reference server:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `fetch_initial` | `GET {base}/rectangle` |
//! | `validate` | `POST {base}/rectangle/validate` |
//! | `update` | `POST {base}/rectangle/update` |
//!
//! A non-2xx answer becomes [`RemoteError::Rejected`], carrying the body as
//! the human-readable message when there is one.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use std::time::Duration;

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::geometry::Dimensions;

/// The remote collaborator that owns the persisted rectangle.
///
/// Implementations run on the UI thread and need not be `Send`.
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Load the persisted dimensions. Called once at mount.
    async fn fetch_initial(&self) -> Result<Dimensions, RemoteError>;

    /// Check business rules for `dimensions` without persisting anything.
    async fn validate(&self, dimensions: Dimensions) -> Result<(), RemoteError>;

    /// Persist `dimensions`. Only called after `validate` succeeded.
    async fn update(&self, dimensions: Dimensions) -> Result<(), RemoteError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpRemote {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Build a client for the API rooted at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| RemoteError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_dimensions(&self, path: &str, dimensions: Dimensions) -> Result<(), RemoteError> {
        let response = self
            .http
            .post(self.url(path))
            .json(&dimensions)
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        Err(RemoteError::Rejected { status: status.as_u16(), message: rejection_message(&text) })
    }
}

#[async_trait(?Send)]
impl RemoteStore for HttpRemote {
    async fn fetch_initial(&self) -> Result<Dimensions, RemoteError> {
        let response = self
            .http
            .get(self.url("/rectangle"))
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(RemoteError::Rejected { status: status.as_u16(), message: rejection_message(&text) });
        }
        parse_dimensions(&text)
    }

    async fn validate(&self, dimensions: Dimensions) -> Result<(), RemoteError> {
        self.post_dimensions("/rectangle/validate", dimensions).await
    }

    async fn update(&self, dimensions: Dimensions) -> Result<(), RemoteError> {
        self.post_dimensions("/rectangle/update", dimensions).await
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Turn a failure body into a display message.
///
/// Accepts a JSON string (`"Width cannot exceed height."`), a JSON object
/// with a `message` or `error` field, or plain text. Blank bodies carry no
/// message.
fn rejection_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let message = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => match map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(serde_json::Value::as_str)
        {
            Some(s) => s.to_owned(),
            None => trimmed.to_owned(),
        },
        _ => trimmed.to_owned(),
    };
    (!message.trim().is_empty()).then_some(message)
}

fn parse_dimensions(body: &str) -> Result<Dimensions, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))
}

// =============================================================================
// TEST HELPERS
// =============================================================================
