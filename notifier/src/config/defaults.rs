//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, bool, &'static str);

const DEFS: &[DefTuple] = &[
    ("PAYMENT_API_BASE_URL", "http://localhost:3000", true, "Base URL of the payment announcement API"),
    ("POLL_INTERVAL_SECS", "30", false, "Seconds between scheduled checks"),
    ("PERIODIC_WAKE_ENABLED", "true", false, "Register the coarse periodic wake-up"),
    ("PERIODIC_WAKE_SECS", "120", false, "Seconds between periodic wake-ups"),
    ("HTTP_TIMEOUT_SECS", "0", false, "Request timeout in seconds (0 = transport default)"),
    ("NOTIFICATION_LOCALE", "hi", false, "Notification copy language (hi or en)"),
    ("CREDIT_KEYWORDS", "credited,received", false, "Comma-separated words that mark a credit"),
    ("NOTIFICATION_ICON", "/icon-192x192.png", false, "Notification icon path"),
    ("NOTIFICATION_BADGE", "/icon-72x72.png", false, "Notification badge path"),
    ("NOTIFICATION_LANDING_URL", "/", false, "Route opened when a notification is clicked"),
    ("SERVER_PORT", "8787", false, "HTTP/WebSocket port"),
    ("AUTO_START", "true", false, "Start background monitoring on launch"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, required, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    required,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
