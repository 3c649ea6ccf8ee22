// Settings module
// Application configuration loaded from config.toml

use serde::{Deserialize, Serialize};

pub const DEFAULT_WEEK_MAX_DAYS: f64 = 7.0;
pub const DEFAULT_MONTH_MAX_DAYS: f64 = 31.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub view: ViewSettings,
    pub modals: ModalSettings,
    pub provider: ProviderSettings,
    pub participants: ParticipantSettings,
}

/// Inclusive day-count thresholds for view resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub week_max_days: f64,
    pub month_max_days: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            week_max_days: DEFAULT_WEEK_MAX_DAYS,
            month_max_days: DEFAULT_MONTH_MAX_DAYS,
        }
    }
}

/// What a modal manager does with names it was not constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeclaredPolicy {
    /// Fail the operation with an error.
    #[default]
    Reject,
    /// Append the name to the state map, after the declared names.
    AutoRegister,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSettings {
    pub undeclared: UndeclaredPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Built-in sample data, no network.
    #[default]
    Fixture,
    /// REST backend at `base_url`.
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Fixture,
            base_url: None,
            timeout_secs: 20,
            max_retries: 2,
            retry_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantSettings {
    pub max_participants: usize,
}

impl Default for ParticipantSettings {
    fn default() -> Self {
        Self {
            max_participants: 50,
        }
    }
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        let ViewSettings {
            week_max_days,
            month_max_days,
        } = self.view;

        if !week_max_days.is_finite() || !month_max_days.is_finite() {
            return Err("View thresholds must be finite numbers".to_string());
        }
        if week_max_days < 0.0 || month_max_days < 0.0 {
            return Err("View thresholds cannot be negative".to_string());
        }
        if week_max_days > month_max_days {
            return Err(format!(
                "week_max_days ({}) cannot exceed month_max_days ({})",
                week_max_days, month_max_days
            ));
        }

        if self.provider.kind == ProviderKind::Http {
            match self.provider.base_url.as_deref() {
                Some(url) if url.starts_with("https://") || url.starts_with("http://") => {}
                Some(url) => {
                    return Err(format!("Provider base_url must be an http(s) URL, got '{}'", url))
                }
                None => return Err("HTTP provider requires base_url".to_string()),
            }
        }

        if self.participants.max_participants == 0 {
            return Err("max_participants must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.view.week_max_days, 7.0);
        assert_eq!(settings.view.month_max_days, 31.0);
        assert_eq!(settings.modals.undeclared, UndeclaredPolicy::Reject);
        assert_eq!(settings.provider.kind, ProviderKind::Fixture);
    }

    #[test]
    fn test_rejects_week_above_month() {
        let mut settings = Settings::default();
        settings.view.week_max_days = 40.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let mut settings = Settings::default();
        settings.view.month_max_days = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_http_requires_url() {
        let mut settings = Settings::default();
        settings.provider.kind = ProviderKind::Http;
        assert!(settings.validate().is_err());

        settings.provider.base_url = Some("ftp://example.com".to_string());
        assert!(settings.validate().is_err());

        settings.provider.base_url = Some("https://example.com/api".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_field_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [view]
            month_max_days = 45.0

            [modals]
            undeclared = "auto_register"
            "#,
        )
        .unwrap();

        assert_eq!(settings.view.week_max_days, 7.0);
        assert_eq!(settings.view.month_max_days, 45.0);
        assert_eq!(settings.modals.undeclared, UndeclaredPolicy::AutoRegister);
        assert_eq!(settings.provider, ProviderSettings::default());
    }
}
