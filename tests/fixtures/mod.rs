// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use group_scheduler::models::date_range::{DateRange, SchedulingWindow};
use group_scheduler::models::event::ScheduledEvent;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns the given day of January 2025 at midnight
    pub fn jan(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Returns a date at midnight
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Returns Feb 29, 2024 at noon (leap year)
    pub fn leap_day_2024() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }
}

/// Sample ranges and windows
pub mod ranges {
    use super::*;

    pub fn days_from(start: NaiveDateTime, days: i64) -> DateRange {
        DateRange::new(start, start + Duration::days(days)).unwrap()
    }

    /// Jan 13-27, 2025: two weeks, a month view
    pub fn two_weeks() -> DateRange {
        days_from(dates::jan(13), 14)
    }

    pub fn window(range: DateRange) -> SchedulingWindow {
        SchedulingWindow::new(range)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn meeting(id: &str, start: NaiveDateTime, hours: i64) -> ScheduledEvent {
        ScheduledEvent::new(id, format!("Meeting {}", id), start, start + Duration::hours(hours))
            .unwrap()
    }
}
