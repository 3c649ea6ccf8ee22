use crate::models::settings::{ProviderKind, Settings};

/// Overrides `provider.base_url` and selects the HTTP provider.
pub const API_URL_ENV: &str = "GROUP_SCHEDULER_API_URL";

/// Apply environment overrides on top of file settings.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        log::debug!("{} set, using HTTP scheduling provider", API_URL_ENV);
        settings.provider.kind = ProviderKind::Http;
        settings.provider.base_url = Some(url.trim().to_string());
    }
}
