// In-memory scheduling data
// Serves the sample window, events and busy times used before a backend exists

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::SchedulingDataProvider;
use crate::models::availability::BusyInterval;
use crate::models::date_range::{DateRange, SchedulingWindow};
use crate::models::event::ScheduledEvent;
use crate::models::participant::Participant;

#[derive(Debug, Clone)]
pub struct FixtureProvider {
    window: SchedulingWindow,
    events: Vec<ScheduledEvent>,
    busy: Vec<BusyInterval>,
}

impl FixtureProvider {
    pub fn new(window: SchedulingWindow) -> Self {
        Self {
            window,
            events: Vec::new(),
            busy: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = ScheduledEvent>) -> Self {
        self.events.extend(events);
        self.events.sort_by_key(|event| event.start);
        self
    }

    pub fn with_busy_times(mut self, busy: impl IntoIterator<Item = BusyInterval>) -> Self {
        self.busy.extend(busy);
        self.busy.sort_by_key(|interval| interval.start);
        self
    }

    /// The sample data: a one-day window on 2025-01-11, 09:00 to 17:00.
    pub fn sample() -> Self {
        let range = DateRange::new(at(11, 0, 0), at(12, 0, 0)).expect("sample range is ordered");
        let window = SchedulingWindow::new(range)
            .with_time_bounds(NaiveTime::from_hms_opt(9, 0, 0), NaiveTime::from_hms_opt(17, 0, 0))
            .expect("sample time bounds are ordered");

        let events = [
            ("1", "Project kickoff", at(11, 9, 0), at(11, 10, 0), false),
            ("2", "Design review", at(11, 13, 30), at(11, 15, 0), false),
            ("3", "Team offsite", at(12, 0, 0), at(13, 0, 0), true),
            ("4", "Quarterly planning", at(20, 10, 0), at(20, 12, 0), false),
        ]
        .into_iter()
        .map(|(id, title, start, end, all_day)| ScheduledEvent {
            id: id.to_string(),
            title: title.to_string(),
            start,
            end,
            all_day,
        });

        let busy = [
            ("alice@example.com", at(11, 9, 0), at(11, 11, 0)),
            ("bob@example.com", at(11, 14, 0), at(11, 16, 0)),
            ("alice@example.com", at(12, 13, 0), at(12, 14, 0)),
        ]
        .into_iter()
        .map(|(email, start, end)| BusyInterval {
            email: email.to_string(),
            start,
            end,
        });

        Self::new(window).with_events(events).with_busy_times(busy)
    }
}

impl SchedulingDataProvider for FixtureProvider {
    fn fetch_events_for_range(&self, range: &DateRange) -> Result<Vec<ScheduledEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.overlaps(range))
            .cloned()
            .collect())
    }

    fn fetch_scheduling_window(&self) -> Result<SchedulingWindow> {
        Ok(self.window.clone())
    }

    fn fetch_busy_times(
        &self,
        participants: &[Participant],
        range: &DateRange,
    ) -> Result<Vec<BusyInterval>> {
        Ok(self
            .busy
            .iter()
            .filter(|interval| participants.iter().any(|p| interval.belongs_to(p.email())))
            .filter(|interval| interval.overlaps(range))
            .cloned()
            .collect())
    }
}

/// A moment in January 2025.
fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("sample date is valid")
}
