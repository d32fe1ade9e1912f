//! Payment service REST client.
//!
//! One client per process. Every call is a single request; retries are left to
//! the caller's polling cadence.

mod announcements;
mod request;

pub mod models;

pub use announcements::decode_pending;

use std::time::Duration;

use crate::ApiError;

/// Client bound to one payment service base URL.
#[derive(Debug, Clone)]
pub struct PaymentApiClient {
    pub(super) http: reqwest::Client,
    pub(super) base_url: String,
}

impl PaymentApiClient {
    /// Create a client using the transport's default request timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let parsed = url::Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a fixed API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
