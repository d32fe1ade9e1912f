//! Notification surfaces.
//!
//! The tray sink keeps the currently displayed alerts, collapsing by tag, and
//! broadcasts every change to connected host clients.

use std::sync::Mutex;

use tokio::sync::broadcast;

use super::NotificationError;
use super::types::PaymentNotification;
use crate::events::{self, NavigatePayload};

const MAX_TRAY_ENTRIES: usize = 100;

/// Somewhere an alert can be raised.
pub trait NotificationSink: Send + Sync {
    fn show(&self, notification: PaymentNotification) -> Result<(), NotificationError>;
}

/// In-process notification tray mirrored to broadcast subscribers.
pub struct TraySink {
    tx: broadcast::Sender<String>,
    tray: Mutex<Vec<PaymentNotification>>,
}

impl TraySink {
    pub fn new(tx: broadcast::Sender<String>) -> Self {
        Self {
            tx,
            tray: Mutex::new(Vec::new()),
        }
    }

    /// Alerts currently displayed, oldest first.
    pub fn snapshot(&self) -> Vec<PaymentNotification> {
        self.tray.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Handle the open action for a tag: dismiss the alert and navigate to its url.
    pub fn open(&self, tag: &str) -> Option<PaymentNotification> {
        let opened = {
            let mut tray = self.tray.lock().ok()?;
            let index = tray.iter().position(|n| n.tag == tag)?;
            tray.remove(index)
        };

        let payload = NavigatePayload {
            url: opened.data.url.clone(),
            payment_id: opened.data.payment_id.clone(),
        };
        if self.tx.send(events::envelope(events::NAVIGATE, payload)).is_err() {
            tracing::debug!(tag, "No client connected to follow navigation");
        }
        tracing::info!(tag, url = %opened.data.url, "Notification opened");
        Some(opened)
    }
}

impl NotificationSink for TraySink {
    fn show(&self, notification: PaymentNotification) -> Result<(), NotificationError> {
        let message = events::envelope(events::PAYMENT_NOTIFICATION, &notification);
        {
            let mut tray = self
                .tray
                .lock()
                .map_err(|_| NotificationError::Unavailable("tray lock poisoned".into()))?;

            // Renotify: the replacement moves to the end as the newest alert.
            tray.retain(|n| n.tag != notification.tag);
            if tray.len() >= MAX_TRAY_ENTRIES {
                tray.remove(0);
            }
            tray.push(notification);
        }

        if self.tx.send(message).is_err() {
            tracing::debug!("No client connected; alert kept in tray only");
        }
        Ok(())
    }
}
