//! Date range to calendar granularity resolution.
//!
//! The decision is a pure function of the day count between two endpoints:
//! up to `week_max_days` (inclusive) renders a week, up to `month_max_days`
//! (inclusive) renders a month, anything longer renders several months.

use chrono::NaiveDateTime;

use crate::models::date_range::DateRange;
use crate::models::settings::{ViewSettings, DEFAULT_MONTH_MAX_DAYS, DEFAULT_WEEK_MAX_DAYS};
use crate::models::ui::ViewGranularity;
use crate::utils::date::{days_between, parse_date_input};

/// View used when either endpoint is missing.
pub const MISSING_INPUT_VIEW: ViewGranularity = ViewGranularity::WeekView;

/// View used when an endpoint cannot be interpreted as a date, or the day
/// count is NaN. Callers have historically received the widest view here.
pub const INVALID_INPUT_VIEW: ViewGranularity = ViewGranularity::MultiMonthView;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewResolver {
    week_max_days: f64,
    month_max_days: f64,
}

impl Default for ViewResolver {
    fn default() -> Self {
        Self {
            week_max_days: DEFAULT_WEEK_MAX_DAYS,
            month_max_days: DEFAULT_MONTH_MAX_DAYS,
        }
    }
}

impl From<ViewSettings> for ViewResolver {
    fn from(settings: ViewSettings) -> Self {
        Self {
            week_max_days: settings.week_max_days,
            month_max_days: settings.month_max_days,
        }
    }
}

impl ViewResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the granularity for a pair of optional endpoints.
    ///
    /// A missing endpoint yields [`MISSING_INPUT_VIEW`]. An inverted range
    /// has a negative day count and therefore resolves to a week.
    pub fn resolve(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> ViewGranularity {
        let (Some(start), Some(end)) = (start, end) else {
            return MISSING_INPUT_VIEW;
        };

        let days = days_between(start, end);
        if days < 0.0 {
            log::debug!("Inverted range {} -> {} ({} days)", start, end, days);
        }
        self.resolve_days(days)
    }

    pub fn resolve_range(&self, range: &DateRange) -> ViewGranularity {
        self.resolve_days(range.days())
    }

    /// Bucket a raw day count.
    pub fn resolve_days(&self, days: f64) -> ViewGranularity {
        if days.is_nan() {
            return INVALID_INPUT_VIEW;
        }

        if days <= self.week_max_days {
            ViewGranularity::WeekView
        } else if days <= self.month_max_days {
            ViewGranularity::MonthView
        } else {
            ViewGranularity::MultiMonthView
        }
    }

    /// Resolve from raw strings as delivered by a data source.
    ///
    /// Absent or blank values count as missing. A value that does not parse
    /// resolves to [`INVALID_INPUT_VIEW`] and is logged.
    pub fn resolve_raw(&self, start: Option<&str>, end: Option<&str>) -> ViewGranularity {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());
        let (Some(start_raw), Some(end_raw)) = (start, end) else {
            return MISSING_INPUT_VIEW;
        };

        match (parse_date_input(start_raw), parse_date_input(end_raw)) {
            (Some(start), Some(end)) => self.resolve(Some(start), Some(end)),
            _ => {
                log::warn!(
                    "Unparsable date range '{}' -> '{}', falling back to {}",
                    start_raw,
                    end_raw,
                    INVALID_INPUT_VIEW
                );
                INVALID_INPUT_VIEW
            }
        }
    }
}

/// Resolve with the default thresholds.
pub fn resolve(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> ViewGranularity {
    ViewResolver::default().resolve(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_missing_inputs_default_to_week() {
        let resolver = ViewResolver::new();
        assert_eq!(resolver.resolve(None, Some(day(2025, 1, 1))), ViewGranularity::WeekView);
        assert_eq!(resolver.resolve(Some(day(2025, 1, 1)), None), ViewGranularity::WeekView);
        assert_eq!(resolver.resolve(None, None), ViewGranularity::WeekView);
    }

    #[test]
    fn test_documented_examples() {
        assert_eq!(
            resolve(Some(day(2025, 1, 11)), Some(day(2025, 1, 12))),
            ViewGranularity::WeekView
        );
        assert_eq!(
            resolve(Some(day(2025, 1, 10)), Some(day(2025, 1, 20))),
            ViewGranularity::MonthView
        );
        assert_eq!(
            resolve(Some(day(2025, 1, 1)), Some(day(2025, 3, 15))),
            ViewGranularity::MultiMonthView
        );
    }

    #[test]
    fn test_inclusive_boundaries() {
        let start = day(2025, 1, 1);
        let one_ms = Duration::milliseconds(1);

        assert_eq!(resolve(Some(start), Some(start)), ViewGranularity::WeekView);
        assert_eq!(
            resolve(Some(start), Some(start + Duration::days(7))),
            ViewGranularity::WeekView
        );
        assert_eq!(
            resolve(Some(start), Some(start + Duration::days(7) + one_ms)),
            ViewGranularity::MonthView
        );
        assert_eq!(
            resolve(Some(start), Some(start + Duration::days(31))),
            ViewGranularity::MonthView
        );
        assert_eq!(
            resolve(Some(start), Some(start + Duration::days(31) + one_ms)),
            ViewGranularity::MultiMonthView
        );
    }

    #[test]
    fn test_inverted_range_is_week() {
        assert_eq!(
            resolve(Some(day(2025, 6, 1)), Some(day(2025, 1, 1))),
            ViewGranularity::WeekView
        );
    }

    #[test]
    fn test_nan_days_is_multi_month() {
        assert_eq!(
            ViewResolver::new().resolve_days(f64::NAN),
            ViewGranularity::MultiMonthView
        );
    }

    #[test]
    fn test_raw_inputs() {
        let resolver = ViewResolver::new();
        assert_eq!(resolver.resolve_raw(None, Some("2025-01-01")), ViewGranularity::WeekView);
        assert_eq!(resolver.resolve_raw(Some(""), Some("2025-01-01")), ViewGranularity::WeekView);
        assert_eq!(
            resolver.resolve_raw(Some("2025-01-10"), Some("2025-01-20")),
            ViewGranularity::MonthView
        );
        assert_eq!(
            resolver.resolve_raw(Some("yesterday"), Some("2025-01-02")),
            ViewGranularity::MultiMonthView
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let resolver = ViewResolver::from(ViewSettings {
            week_max_days: 3.0,
            month_max_days: 14.0,
        });
        assert_eq!(resolver.resolve_days(3.0), ViewGranularity::WeekView);
        assert_eq!(resolver.resolve_days(5.0), ViewGranularity::MonthView);
        assert_eq!(resolver.resolve_days(15.0), ViewGranularity::MultiMonthView);
    }
}
