use super::models::{Announcement, CheckNewSmsResponse, MarkAnnouncedRequest};
use super::*;
use crate::{CHECK_NEW_SMS_PATH, MARK_ANNOUNCED_PATH};

impl PaymentApiClient {
    /// Poll for announcements that are still pending.
    ///
    /// Transport failures and non-2xx statuses are errors. A body that cannot
    /// be decoded is not: it yields an empty batch.
    pub async fn check_new_sms(&self) -> Result<Vec<Announcement>, ApiError> {
        let url = self.endpoint(CHECK_NEW_SMS_PATH);
        let body = self.get_text(&url).await?;
        Ok(decode_pending(&body))
    }

    /// Mark one announcement as delivered.
    pub async fn mark_announced(&self, announcement_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(MARK_ANNOUNCED_PATH);
        let body = MarkAnnouncedRequest {
            announcement_id: announcement_id.to_string(),
        };
        self.post_json(&url, &body).await?;
        tracing::debug!(announcement_id, "Announcement marked as announced");
        Ok(())
    }
}

/// Decode a check-new-sms body, dropping whatever cannot be understood.
pub fn decode_pending(body: &str) -> Vec<Announcement> {
    let envelope: CheckNewSmsResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed check-new-sms response");
            return Vec::new();
        }
    };

    if !envelope.success {
        return Vec::new();
    }

    envelope
        .announcements
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Announcement>(raw) {
            Ok(announcement) => Some(announcement),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed announcement");
                None
            }
        })
        .collect()
}
