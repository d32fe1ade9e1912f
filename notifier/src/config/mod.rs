//! Configuration management: defaults, validation, loading from environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::AppConfig;

use defaults::{DEFAULT_SETTINGS, SettingDef};

/// Required settings that fell back to their built-in default.
pub fn missing_required(lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static SettingDef> {
    let mut missing: Vec<&'static SettingDef> = DEFAULT_SETTINGS
        .values()
        .filter(|def| def.required)
        .filter(|def| lookup(def.key).is_none_or(|v| v.trim().is_empty()))
        .collect();
    missing.sort_unstable_by_key(|def| def.key);
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_reports_unset_base_url() {
        let keys = |defs: Vec<&SettingDef>| defs.iter().map(|d| d.key).collect::<Vec<_>>();
        assert_eq!(keys(missing_required(|_| None)), vec!["PAYMENT_API_BASE_URL"]);
        assert_eq!(
            keys(missing_required(|_| Some("  ".into()))),
            vec!["PAYMENT_API_BASE_URL"]
        );
        assert!(missing_required(|_| Some("https://api.test".into())).is_empty());
    }
}
