use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Envelope returned by GET /api/check-new-sms.
///
/// Entries are kept as raw JSON so one malformed announcement does not
/// discard the rest of the batch.
#[derive(Debug, Deserialize)]
pub struct CheckNewSmsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub announcements: Vec<serde_json::Value>,
}

/// A payment announcement that the service has not marked as announced yet.
///
/// Decoding goes through [`RawAnnouncement`] so that backends sending both
/// `id` and `_id` (or both `timestamp` and `createdAt`) still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnnouncement")]
pub struct Announcement {
    pub id: String,
    pub amount: Decimal,
    pub sender: String,
    #[serde(rename = "originalSMS")]
    pub original_sms: String,
    pub timestamp: Option<String>,
}

#[derive(Deserialize)]
struct RawAnnouncement {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(rename = "_id", default)]
    document_id: Option<RawId>,
    #[serde(default)]
    amount: Decimal,
    #[serde(default)]
    sender: String,
    #[serde(rename = "originalSMS", default)]
    original_sms: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

impl TryFrom<RawAnnouncement> for Announcement {
    type Error = String;

    fn try_from(raw: RawAnnouncement) -> Result<Self, Self::Error> {
        // `id` wins over `_id` when both are present.
        let id: String = raw
            .id
            .or(raw.document_id)
            .map(String::from)
            .ok_or("announcement has no id")?;
        if id.is_empty() {
            return Err("announcement id is empty".into());
        }

        Ok(Self {
            id,
            amount: raw.amount,
            sender: raw.sender,
            original_sms: raw.original_sms,
            timestamp: raw.timestamp.or(raw.created_at),
        })
    }
}

/// Request body for POST /api/mark-announced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAnnouncedRequest {
    pub announcement_id: String,
}
