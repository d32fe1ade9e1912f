//! Broadcast message names and payloads sent to connected host clients.
//!
//! Every message is a JSON object `{ "type": <name>, "data": <payload> }`.

use serde::Serialize;
use serde_json::json;

pub const PAYMENT_NOTIFICATION: &str = "payment_notification";
pub const NAVIGATE: &str = "navigate";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatePayload {
    pub url: String,
    pub payment_id: String,
}

/// Wrap a payload in the `{type, data}` envelope.
pub fn envelope(kind: &str, data: impl Serialize) -> String {
    json!({
        "type": kind,
        "data": data,
    })
    .to_string()
}
