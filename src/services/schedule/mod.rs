//! Scheduling session: what the calendar screen shows and for whom.
//!
//! A session loads the scheduling window from its provider, resolves the
//! view granularity for the visible range, loads the events in that range
//! and keeps the participant list used for busy-time lookups.

use anyhow::{anyhow, Context, Result};

use crate::models::availability::BusyInterval;
use crate::models::date_range::{DateRange, SchedulingWindow};
use crate::models::event::ScheduledEvent;
use crate::models::participant::Participant;
use crate::models::settings::Settings;
use crate::models::ui::ViewGranularity;
use crate::services::participants::{AddOutcome, ParticipantError, ParticipantList};
use crate::services::provider::SchedulingDataProvider;
use crate::services::view_resolver::ViewResolver;
use crate::ui::toolbar::ToolbarOptions;

/// Everything needed to render the calendar for one range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSnapshot {
    pub range: DateRange,
    pub view: ViewGranularity,
    pub toolbar: ToolbarOptions,
    pub events: Vec<ScheduledEvent>,
}

pub struct ScheduleSession<P> {
    provider: P,
    resolver: ViewResolver,
    participants: ParticipantList,
    window: Option<SchedulingWindow>,
    current: Option<CalendarSnapshot>,
}

impl<P: SchedulingDataProvider> ScheduleSession<P> {
    pub fn new(provider: P, settings: &Settings) -> Self {
        Self::with_parts(
            provider,
            ViewResolver::from(settings.view),
            ParticipantList::new(settings.participants.max_participants),
        )
    }

    pub fn with_parts(provider: P, resolver: ViewResolver, participants: ParticipantList) -> Self {
        Self {
            provider,
            resolver,
            participants,
            window: None,
            current: None,
        }
    }

    /// Reload the scheduling window and show its full range.
    pub fn refresh(&mut self) -> Result<CalendarSnapshot> {
        let window = self
            .provider
            .fetch_scheduling_window()
            .context("Failed to load scheduling window")?;
        let range = *window.range();
        log::info!(
            "Scheduling window {} -> {}",
            range.start(),
            range.end()
        );
        self.window = Some(window);
        self.show_range(range)
    }

    /// Show an explicit range; the scheduling window is kept.
    pub fn show_range(&mut self, range: DateRange) -> Result<CalendarSnapshot> {
        let view = self.resolver.resolve_range(&range);
        let events = self
            .provider
            .fetch_events_for_range(&range)
            .context("Failed to load events")?;
        log::debug!("{} events in {} view", events.len(), view);

        let snapshot = CalendarSnapshot {
            range,
            view,
            toolbar: ToolbarOptions::for_view(view),
            events,
        };
        self.current = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Page the visible range one toolbar step forward or back.
    ///
    /// Returns `None` when the current view does not page.
    pub fn navigate(&mut self, forward: bool) -> Result<Option<CalendarSnapshot>> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| anyhow!("Nothing loaded yet; refresh the session first"))?;

        let step = current.toolbar.navigation;
        let (Some(start), Some(end)) = (
            step.apply(current.range.start(), forward),
            step.apply(current.range.end(), forward),
        ) else {
            return Ok(None);
        };

        let range = DateRange::new(start, end)?;
        self.show_range(range).map(Some)
    }

    pub fn window(&self) -> Option<&SchedulingWindow> {
        self.window.as_ref()
    }

    pub fn current(&self) -> Option<&CalendarSnapshot> {
        self.current.as_ref()
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.participants
    }

    pub fn add_participant(&mut self, raw: &str) -> Result<AddOutcome, ParticipantError> {
        let outcome = self.participants.add(raw)?;
        if let AddOutcome::Added(participant) = &outcome {
            log::info!("Added participant {}", participant);
        }
        Ok(outcome)
    }

    pub fn remove_participant(&mut self, email: &str) -> Option<Participant> {
        self.participants.remove(email)
    }

    /// Busy intervals of the current participants over the visible range.
    pub fn busy_times(&self) -> Result<Vec<BusyInterval>> {
        if self.participants.is_empty() {
            return Ok(Vec::new());
        }

        let range = self
            .current
            .as_ref()
            .map(|snapshot| snapshot.range)
            .or_else(|| self.window.as_ref().map(|window| *window.range()))
            .ok_or_else(|| anyhow!("Nothing loaded yet; refresh the session first"))?;

        self.provider
            .fetch_busy_times(self.participants.participants(), &range)
            .context("Failed to load busy times")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::provider::FixtureProvider;
    use chrono::NaiveDate;

    fn day(d: u32) -> DateRange {
        let start = NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        DateRange::new(start, start + chrono::Duration::days(1)).unwrap()
    }

    #[test]
    fn test_refresh_loads_window_view_and_events() {
        let mut session = ScheduleSession::new(FixtureProvider::sample(), &Settings::default());
        let snapshot = session.refresh().unwrap();

        assert_eq!(snapshot.view, ViewGranularity::WeekView);
        assert_eq!(snapshot.toolbar.render_mode, "timeGridWeek");
        assert_eq!(snapshot.events.len(), 3);
        assert!(session.window().is_some());
        assert_eq!(session.current(), Some(&snapshot));
    }

    #[test]
    fn test_navigate_before_refresh_fails() {
        let mut session = ScheduleSession::new(FixtureProvider::sample(), &Settings::default());
        assert!(session.navigate(true).is_err());
    }

    #[test]
    fn test_navigate_moves_one_week() {
        let mut session = ScheduleSession::new(FixtureProvider::sample(), &Settings::default());
        session.show_range(day(13)).unwrap();
        let next = session.navigate(true).unwrap().unwrap();
        assert_eq!(next.range, day(20));
        assert_eq!(next.events.len(), 1);
        assert_eq!(next.events[0].title, "Quarterly planning");
    }

    #[test]
    fn test_busy_times_without_participants_is_empty() {
        let mut session = ScheduleSession::new(FixtureProvider::sample(), &Settings::default());
        assert!(session.busy_times().unwrap().is_empty());

        session.add_participant("bob@example.com").unwrap();
        assert!(session.busy_times().is_err());

        session.refresh().unwrap();
        let busy = session.busy_times().unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].email, "bob@example.com");
    }
}
