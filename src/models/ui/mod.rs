// UI models module
// Calendar view granularity shared by the resolver and the toolbar

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calendar zoom level used to lay out a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ViewGranularity {
    #[default]
    #[serde(rename = "week")]
    WeekView,
    #[serde(rename = "month")]
    MonthView,
    #[serde(rename = "multi_month")]
    MultiMonthView,
}

impl ViewGranularity {
    pub const ALL: [ViewGranularity; 3] = [
        ViewGranularity::WeekView,
        ViewGranularity::MonthView,
        ViewGranularity::MultiMonthView,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewGranularity::WeekView => "week",
            ViewGranularity::MonthView => "month",
            ViewGranularity::MultiMonthView => "multi_month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewGranularity::WeekView => "Week",
            ViewGranularity::MonthView => "Month",
            ViewGranularity::MultiMonthView => "Multi-month",
        }
    }
}

impl fmt::Display for ViewGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view granularity '{0}'")]
pub struct UnknownViewError(pub String);

impl FromStr for ViewGranularity {
    type Err = UnknownViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewGranularity::WeekView),
            "month" => Ok(ViewGranularity::MonthView),
            "multi_month" | "multi-month" | "multimonth" => Ok(ViewGranularity::MultiMonthView),
            _ => Err(UnknownViewError(s.to_string())),
        }
    }
}
