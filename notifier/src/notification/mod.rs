//! Payment alerts: copy, collapse tags, and per-process dedup.
//!
//! An event id is alerted at most once per process. A repeat sighting (an
//! announcement whose acknowledgement never reached the server) is reported as
//! already shown and nothing reaches the sink.

pub mod sink;
pub mod templates;
pub mod types;

pub use sink::{NotificationSink, TraySink};
pub use templates::Locale;
pub use types::{AlertStyle, NotificationData, PaymentNotification};

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::payment::PaymentEvent;
use types::{VIBRATION_PATTERN, tag_for};

/// The alert surface refused or failed to display a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification surface unavailable: {0}")]
    Unavailable(String),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// What `notify` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// First alert for this event in this process.
    Shown,
    /// The event was alerted earlier in this process; no new alert.
    AlreadyShown,
}

pub struct Notifier {
    locale: Locale,
    style: AlertStyle,
    sink: Arc<dyn NotificationSink>,
    seen: Mutex<HashSet<String>>,
}

impl Notifier {
    pub fn new(locale: Locale, style: AlertStyle, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            locale,
            style,
            sink,
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Build the alert for an event without raising it.
    pub fn build(&self, event: &PaymentEvent) -> PaymentNotification {
        let (title, body) =
            templates::render(self.locale, event.direction, event.amount, &event.sender);

        PaymentNotification {
            title,
            body,
            icon: self.style.icon.clone(),
            badge: self.style.badge.clone(),
            vibrate: VIBRATION_PATTERN.to_vec(),
            tag: tag_for(&event.id),
            renotify: true,
            data: NotificationData {
                url: self.style.landing_url.clone(),
                payment_id: event.id.clone(),
                amount: event.amount,
                sender: event.sender.clone(),
            },
        }
    }

    /// Raise an alert for the event unless one was already raised.
    ///
    /// The id is reserved before the sink is called so overlapping cycles
    /// cannot both alert it, and released again if the sink refuses.
    pub fn notify(&self, event: &PaymentEvent) -> Result<Delivery, NotificationError> {
        if !self.reserve(&event.id) {
            tracing::debug!(payment_id = %event.id, "Payment already alerted, skipping");
            return Ok(Delivery::AlreadyShown);
        }

        if let Err(e) = self.sink.show(self.build(event)) {
            self.release(&event.id);
            return Err(e);
        }

        tracing::info!(
            payment_id = %event.id,
            direction = ?event.direction,
            "Payment notification raised"
        );
        Ok(Delivery::Shown)
    }

    fn reserve(&self, payment_id: &str) -> bool {
        self.seen
            .lock()
            .map(|mut seen| seen.insert(payment_id.to_string()))
            .unwrap_or(true)
    }

    fn release(&self, payment_id: &str) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.remove(payment_id);
        }
    }

    /// Whether an alert for this id was raised in this process.
    pub fn has_seen(&self, payment_id: &str) -> bool {
        self.seen
            .lock()
            .map(|seen| seen.contains(payment_id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests;
