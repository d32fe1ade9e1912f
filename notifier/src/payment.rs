//! Payment events surfaced to the user, and credit/debit classification.

use chrono::{DateTime, Utc};
use payment_api::Announcement;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

/// A payment announcement ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEvent {
    pub id: String,
    pub amount: Decimal,
    pub sender: String,
    pub direction: Direction,
    pub raw_text: String,
    pub timestamp: DateTime<Utc>,
}

/// Keyword classifier over the raw message text.
#[derive(Debug, Clone)]
pub struct Classifier {
    credit_keywords: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(["credited", "received"])
    }
}

impl Classifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            credit_keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Credit if any keyword occurs in the text, ignoring case; debit otherwise.
    pub fn classify(&self, raw_text: &str) -> Direction {
        let text = raw_text.to_lowercase();
        if self.credit_keywords.iter().any(|k| text.contains(k.as_str())) {
            Direction::Credit
        } else {
            Direction::Debit
        }
    }

    /// Build an event from a wire announcement, stamping it now if it has no usable time.
    pub fn event_from(&self, announcement: Announcement) -> PaymentEvent {
        let timestamp = announcement
            .timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        PaymentEvent {
            direction: self.classify(&announcement.original_sms),
            id: announcement.id,
            amount: announcement.amount,
            sender: announcement.sender,
            raw_text: announcement.original_sms,
            timestamp,
        }
    }
}
