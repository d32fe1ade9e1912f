//! Payment announcement API client library.
//!
//! Provides a typed client for the remote payment service: polling for
//! announcements that have not been surfaced to the user yet, and marking
//! them as announced once they have.

pub mod api;

pub use api::PaymentApiClient;
pub use api::models::{Announcement, CheckNewSmsResponse, MarkAnnouncedRequest};

/// Unified error type for the payment-api crate.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payment API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Unsupported base URL: {0}")]
    BaseUrl(String),
}

/// Path polled for announcements that are still pending.
pub const CHECK_NEW_SMS_PATH: &str = "/api/check-new-sms";

/// Path used to acknowledge a delivered announcement.
pub const MARK_ANNOUNCED_PATH: &str = "/api/mark-announced";
