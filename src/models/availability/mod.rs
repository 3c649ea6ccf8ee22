// Availability module
// Busy intervals reported for participants

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::date_range::DateRange;
use crate::utils::date::flexible_datetime;

/// A span during which one participant is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    pub email: String,
    #[serde(with = "flexible_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "flexible_datetime")]
    pub end: NaiveDateTime,
}

impl BusyInterval {
    pub fn belongs_to(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_belongs_to_ignores_case() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 11)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let busy = BusyInterval {
            email: "Ada@Example.com".to_string(),
            start: at,
            end: at,
        };
        assert!(busy.belongs_to(" ada@example.com"));
        assert!(!busy.belongs_to("grace@example.com"));
    }
}
