// Event module
// Scheduled event records supplied by the scheduling backend

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::date_range::DateRange;
use crate::utils::date::flexible_datetime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event id cannot be empty")]
    EmptyId,
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("event end time must not be before its start time")]
    EndBeforeStart,
    #[error("event {0} is required")]
    MissingField(&'static str),
}

/// A scheduled event as shown on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: String,
    pub title: String,
    #[serde(with = "flexible_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "flexible_datetime")]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
}

impl ScheduledEvent {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `id` - Backend identifier (non-empty)
    /// * `title` - Event title (non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time (may equal `start`)
    ///
    /// # Examples
    /// ```
    /// use group_scheduler::models::event::ScheduledEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = ScheduledEvent::new("evt-1", "Team Meeting", start, end).unwrap();
    /// assert!(!event.all_day);
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            all_day: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }
        if self.end < self.start {
            return Err(EventError::EndBeforeStart);
        }
        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps(self.start, self.end)
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set as all-day event
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Build the event
    pub fn build(self) -> Result<ScheduledEvent, EventError> {
        let event = ScheduledEvent {
            id: self.id.ok_or(EventError::MissingField("id"))?,
            title: self.title.ok_or(EventError::MissingField("title"))?,
            start: self.start.ok_or(EventError::MissingField("start"))?,
            end: self.end.ok_or(EventError::MissingField("end"))?,
            all_day: self.all_day,
        };

        event.validate()?;
        Ok(event)
    }
}
