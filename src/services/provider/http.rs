use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;

use super::SchedulingDataProvider;
use crate::models::availability::BusyInterval;
use crate::models::date_range::{DateRange, SchedulingWindow};
use crate::models::event::ScheduledEvent;
use crate::models::participant::Participant;
use crate::models::settings::ProviderSettings;

const QUERY_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct HttpProvider {
    client: Client,
    base_url: String,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_settings(&ProviderSettings {
            base_url: Some(base_url.to_string()),
            ..ProviderSettings::default()
        })
    }

    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        let base_url = settings
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow!("Scheduling service base_url is not configured"))?;

        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(anyhow!("Scheduling service URL must use http or https"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build scheduling service HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        let redacted = Self::redact_url(&url, !query.is_empty());
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.max_retries {
            match self.get_once(&url, query) {
                Ok(body) => return Ok(body),
                Err(err) => {
                    let is_last_attempt = attempt == self.max_retries;
                    if is_last_attempt {
                        last_error = Some(err.context(format!(
                            "Failed to fetch {} after {} attempts",
                            redacted,
                            attempt + 1
                        )));
                    } else {
                        log::warn!(
                            "Scheduling service attempt {} failed for {}: {}",
                            attempt + 1,
                            redacted,
                            err
                        );
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Unknown scheduling service error")))
    }

    fn get_once<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(reqwest::Error::without_url)
            .context("Network error during scheduling service request")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Scheduling service responded with HTTP status {}", status));
        }

        let body = response
            .text()
            .map_err(reqwest::Error::without_url)
            .context("Failed to read scheduling service response")?;
        serde_json::from_str(&body).context("Scheduling service returned an unexpected body")
    }

    fn range_query(range: &DateRange) -> Vec<(&'static str, String)> {
        vec![
            ("start", Self::format_param(range.start())),
            ("end", Self::format_param(range.end())),
        ]
    }

    fn format_param(moment: NaiveDateTime) -> String {
        moment.format(QUERY_DATETIME_FORMAT).to_string()
    }

    /// Drop the query string, which carries participant addresses.
    ///
    /// `has_query` marks a URL whose parameters reqwest appends later.
    fn redact_url(url: &str, has_query: bool) -> String {
        match url.split_once('?') {
            Some((path, _)) => format!("{}?***redacted***", path),
            None if has_query => format!("{}?***redacted***", url),
            None => url.to_string(),
        }
    }
}

impl SchedulingDataProvider for HttpProvider {
    fn fetch_events_for_range(&self, range: &DateRange) -> Result<Vec<ScheduledEvent>> {
        let mut events: Vec<ScheduledEvent> = self.get_json("events", &Self::range_query(range))?;
        events.retain(|event| match event.validate() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Dropping invalid event {}: {}", event.id, err);
                false
            }
        });
        events.sort_by_key(|event| event.start);
        Ok(events)
    }

    fn fetch_scheduling_window(&self) -> Result<SchedulingWindow> {
        self.get_json("scheduling-window", &[])
    }

    fn fetch_busy_times(
        &self,
        participants: &[Participant],
        range: &DateRange,
    ) -> Result<Vec<BusyInterval>> {
        let emails = participants
            .iter()
            .map(Participant::email)
            .collect::<Vec<_>>()
            .join(",");
        let mut query = Self::range_query(range);
        query.push(("emails", emails));
        self.get_json("busy-times", &query)
    }
}
