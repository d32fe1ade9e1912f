//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

use crate::notification::Locale;

static RE_HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+(/\S*)?$").expect("valid URL regex"));
static RE_KEYWORD_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[^,\s][^,]*(,\s*[^,\s][^,]*)*$").expect("valid list regex"));

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "PAYMENT_API_BASE_URL" => {
            if !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        "POLL_INTERVAL_SECS" => validate_int_range(value, 5, 3600)?,
        "PERIODIC_WAKE_SECS" => validate_int_range(value, 30, 86_400)?,
        "HTTP_TIMEOUT_SECS" => validate_int_range(value, 0, 600)?,
        "SERVER_PORT" => validate_int_range(value, 1, 65_535)?,
        "NOTIFICATION_LOCALE" => {
            if Locale::from_code(value).is_none() {
                return Err("must be 'hi' or 'en'".into());
            }
        }
        "CREDIT_KEYWORDS" => {
            if !RE_KEYWORD_LIST.is_match(value) {
                return Err("must be a comma-separated list of words".into());
            }
        }
        "NOTIFICATION_LANDING_URL" => {
            if !value.starts_with('/') && !RE_HTTP_URL.is_match(value) {
                return Err("must be an absolute path or http(s) URL".into());
            }
        }
        "NOTIFICATION_ICON" | "NOTIFICATION_BADGE" => {
            if value.is_empty() || value.len() > 512 {
                return Err("must be 1-512 characters".into());
            }
        }
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "PERIODIC_WAKE_ENABLED" | "AUTO_START")
}
