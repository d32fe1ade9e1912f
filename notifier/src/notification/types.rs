//! Notification type definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vibration pattern in milliseconds: buzz, pause, buzz.
pub const VIBRATION_PATTERN: [u32; 3] = [200, 100, 200];

/// A platform alert for one payment event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    /// Collapse key: a newer alert with the same tag replaces the older one.
    pub tag: String,
    pub renotify: bool,
    pub data: NotificationData,
}

/// Payload carried by an alert so the open action can navigate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub url: String,
    pub payment_id: String,
    pub amount: Decimal,
    pub sender: String,
}

/// Collapse tag for a payment id.
pub fn tag_for(payment_id: &str) -> String {
    format!("payment-{payment_id}")
}

/// Static presentation settings shared by every alert.
#[derive(Debug, Clone)]
pub struct AlertStyle {
    pub icon: String,
    pub badge: String,
    pub landing_url: String,
}

impl Default for AlertStyle {
    fn default() -> Self {
        Self {
            icon: "/icon-192x192.png".into(),
            badge: "/icon-72x72.png".into(),
            landing_url: "/".into(),
        }
    }
}
