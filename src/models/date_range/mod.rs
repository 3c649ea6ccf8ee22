// Date range module
// Validated start/end pairs and scheduling windows

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::{self, flexible_datetime};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("range end {end} is before start {start}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("earliest time {earliest} is after latest time {latest}")]
    InvertedTimeBounds { earliest: NaiveTime, latest: NaiveTime },
}

/// Closed date-time range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange", into = "RawDateRange")]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range from midnight of `start` to midnight of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        Self::new(date::start_of_day(start), date::start_of_day(end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the range in (possibly fractional) days.
    pub fn days(&self) -> f64 {
        date::days_between(self.start, self.end)
    }

    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment <= self.end
    }

    /// Whether `[start, end]` shares at least one instant with this range.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.end && end >= self.start
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDateRange {
    #[serde(with = "flexible_datetime")]
    start_date: NaiveDateTime,
    #[serde(with = "flexible_datetime")]
    end_date: NaiveDateTime,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start_date, raw.end_date)
    }
}

impl From<DateRange> for RawDateRange {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start,
            end_date: range.end,
        }
    }
}

/// When an event may be scheduled: a date range plus optional daily bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingWindow {
    #[serde(flatten)]
    range: DateRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    earliest_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latest_time: Option<NaiveTime>,
}

impl SchedulingWindow {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            earliest_time: None,
            latest_time: None,
        }
    }

    /// Restrict the window to a daily time span.
    pub fn with_time_bounds(
        mut self,
        earliest: Option<NaiveTime>,
        latest: Option<NaiveTime>,
    ) -> Result<Self, DateRangeError> {
        if let (Some(earliest), Some(latest)) = (earliest, latest) {
            if earliest > latest {
                return Err(DateRangeError::InvertedTimeBounds { earliest, latest });
            }
        }
        self.earliest_time = earliest;
        self.latest_time = latest;
        Ok(self)
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn earliest_time(&self) -> Option<NaiveTime> {
        self.earliest_time
    }

    pub fn latest_time(&self) -> Option<NaiveTime> {
        self.latest_time
    }

    /// Whether a moment falls inside both the range and the daily bounds.
    pub fn permits(&self, moment: NaiveDateTime) -> bool {
        if !self.range.contains(moment) {
            return false;
        }
        let time = moment.time();
        self.earliest_time.map_or(true, |earliest| time >= earliest)
            && self.latest_time.map_or(true, |latest| time <= latest)
    }
}
