//! One fetch → notify → acknowledge pass over the pending announcements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use payment_api::{ApiError, PaymentApiClient};
use serde::Serialize;

use crate::notification::{Delivery, Notifier};
use crate::payment::{Classifier, PaymentEvent};

/// Announcements could not be retrieved this cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("payment API: {0}")]
    Api(#[from] ApiError),

    #[error("announcement source unavailable: {0}")]
    Unavailable(String),
}

/// An announcement could not be marked as delivered.
#[derive(Debug, thiserror::Error)]
pub enum AckError {
    #[error("payment API: {0}")]
    Api(#[from] ApiError),

    #[error("acknowledger unavailable: {0}")]
    Unavailable(String),
}

/// Where pending payment events come from.
#[async_trait]
pub trait AnnouncementSource: Send + Sync {
    async fn fetch_pending(&self) -> Result<Vec<PaymentEvent>, FetchError>;
}

/// Reports delivered events back to the source of truth.
#[async_trait]
pub trait Acknowledger: Send + Sync {
    async fn acknowledge(&self, event_id: &str) -> Result<(), AckError>;
}

/// The remote payment service, acting as both source and acknowledger.
pub struct PaymentService {
    client: PaymentApiClient,
    classifier: Classifier,
}

impl PaymentService {
    pub fn new(client: PaymentApiClient, classifier: Classifier) -> Self {
        Self { client, classifier }
    }
}

#[async_trait]
impl AnnouncementSource for PaymentService {
    async fn fetch_pending(&self) -> Result<Vec<PaymentEvent>, FetchError> {
        let announcements = self.client.check_new_sms().await?;
        Ok(announcements
            .into_iter()
            .map(|a| self.classifier.event_from(a))
            .collect())
    }
}

#[async_trait]
impl Acknowledger for PaymentService {
    async fn acknowledge(&self, event_id: &str) -> Result<(), AckError> {
        self.client.mark_announced(event_id).await?;
        Ok(())
    }
}

/// Counters for one cycle, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutcome {
    pub fetched: usize,
    /// New alerts raised; events already alerted earlier are not counted.
    pub notified: usize,
    pub acknowledged: usize,
    pub failures: usize,
    pub fetch_failed: bool,
    pub finished_at: DateTime<Utc>,
}

/// Run one cycle. Never fails: every error is logged and isolated to its event.
pub async fn run_cycle(
    source: &dyn AnnouncementSource,
    acker: &dyn Acknowledger,
    notifier: &Notifier,
) -> CycleOutcome {
    let (events, fetch_failed) = match source.fetch_pending().await {
        Ok(events) => (events, false),
        Err(e) => {
            tracing::warn!("Payment check failed, treating as no new payments: {e}");
            (Vec::new(), true)
        }
    };

    let mut outcome = CycleOutcome {
        fetched: events.len(),
        notified: 0,
        acknowledged: 0,
        failures: 0,
        fetch_failed,
        finished_at: Utc::now(),
    };

    for event in &events {
        match notifier.notify(event) {
            Ok(Delivery::Shown) => outcome.notified += 1,
            Ok(Delivery::AlreadyShown) => {}
            Err(e) => {
                tracing::warn!(payment_id = %event.id, "Notification not shown: {e}");
                outcome.failures += 1;
                continue;
            }
        }

        match acker.acknowledge(&event.id).await {
            Ok(()) => outcome.acknowledged += 1,
            Err(e) => {
                tracing::warn!(
                    payment_id = %event.id,
                    "Acknowledge failed, will reappear next cycle: {e}"
                );
                outcome.failures += 1;
            }
        }
    }

    outcome.finished_at = Utc::now();
    if outcome.fetched > 0 {
        tracing::info!(
            fetched = outcome.fetched,
            notified = outcome.notified,
            acknowledged = outcome.acknowledged,
            failures = outcome.failures,
            "Payment check completed"
        );
    } else {
        tracing::debug!(fetch_failed, "Payment check completed, nothing new");
    }
    outcome
}
