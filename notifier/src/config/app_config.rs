//! Runtime application configuration loaded from the environment.

use std::time::Duration;

use anyhow::anyhow;

use super::defaults::get_default;
use super::validation::validate_setting;
use crate::notification::Locale;

/// Runtime configuration populated from environment variables and defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub periodic_wake_enabled: bool,
    pub periodic_wake_interval: Duration,
    pub http_timeout: Option<Duration>,
    pub locale: Locale,
    pub credit_keywords: Vec<String>,
    pub icon: String,
    pub badge: String,
    pub landing_url: String,
    pub server_port: u16,
    pub auto_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".into(),
            poll_interval: Duration::from_secs(30),
            periodic_wake_enabled: true,
            periodic_wake_interval: Duration::from_secs(120),
            http_timeout: None,
            locale: Locale::Hindi,
            credit_keywords: vec!["credited".into(), "received".into()],
            icon: "/icon-192x192.png".into(),
            badge: "/icon-72x72.png".into(),
            landing_url: "/".into(),
            server_port: 8787,
            auto_start: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults.
    ///
    /// Every value, provided or defaulted, is validated before it is parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let value = lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| get_default(key).map(str::to_string))
                .ok_or_else(|| anyhow!("no value or default for setting {key}"))?;
            validate_setting(key, &value).map_err(|e| anyhow!("invalid {key}: {e}"))?;
            Ok(value)
        };

        let timeout_secs: u64 = g("HTTP_TIMEOUT_SECS")?.parse()?;

        Ok(Self {
            api_base_url: g("PAYMENT_API_BASE_URL")?,
            poll_interval: Duration::from_secs(g("POLL_INTERVAL_SECS")?.parse()?),
            periodic_wake_enabled: g("PERIODIC_WAKE_ENABLED")? == "true",
            periodic_wake_interval: Duration::from_secs(g("PERIODIC_WAKE_SECS")?.parse()?),
            http_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            locale: Locale::from_code(&g("NOTIFICATION_LOCALE")?).unwrap_or_default(),
            credit_keywords: split_keywords(&g("CREDIT_KEYWORDS")?),
            icon: g("NOTIFICATION_ICON")?,
            badge: g("NOTIFICATION_BADGE")?,
            landing_url: g("NOTIFICATION_LANDING_URL")?,
            server_port: g("SERVER_PORT")?.parse()?,
            auto_start: g("AUTO_START")? == "true",
        })
    }
}

fn split_keywords(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load_with(pairs: &[(&str, &str)]) -> Result<AppConfig, anyhow::Error> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let config = load_with(&[]).unwrap();
        let default = AppConfig::default();
        assert_eq!(config.api_base_url, default.api_base_url);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.periodic_wake_interval, Duration::from_secs(120));
        assert!(config.periodic_wake_enabled);
        assert_eq!(config.http_timeout, None);
        assert_eq!(config.locale, Locale::Hindi);
        assert_eq!(config.credit_keywords, vec!["credited", "received"]);
        assert_eq!(config.landing_url, "/");
        assert_eq!(config.server_port, 8787);
        assert!(config.auto_start);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load_with(&[
            ("PAYMENT_API_BASE_URL", "https://api.test"),
            ("POLL_INTERVAL_SECS", "10"),
            ("HTTP_TIMEOUT_SECS", "15"),
            ("NOTIFICATION_LOCALE", "en"),
            ("CREDIT_KEYWORDS", " Credited , जमा "),
            ("AUTO_START", "false"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.test");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.credit_keywords, vec!["credited", "जमा"]);
        assert!(!config.auto_start);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load_with(&[("POLL_INTERVAL_SECS", "   ")]).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = load_with(&[("POLL_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("POLL_INTERVAL_SECS"));
        assert!(load_with(&[("PAYMENT_API_BASE_URL", "api.test")]).is_err());
        assert!(load_with(&[("NOTIFICATION_LOCALE", "de")]).is_err());
        assert!(load_with(&[("NOTIFICATION_LOCALE", "English")]).is_err());
    }
}
