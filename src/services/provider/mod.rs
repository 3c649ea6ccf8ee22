//! Scheduling data provider capability.
//!
//! The calendar screen never fetches on its own; it asks a provider for the
//! scheduling window, the events inside a range and the participants' busy
//! times. [`FixtureProvider`] serves built-in sample data, [`HttpProvider`]
//! talks to the scheduling REST service.

pub mod fixture;
pub mod http;

use anyhow::Result;

use crate::models::availability::BusyInterval;
use crate::models::date_range::{DateRange, SchedulingWindow};
use crate::models::event::ScheduledEvent;
use crate::models::participant::Participant;
use crate::models::settings::{ProviderKind, ProviderSettings};

pub use fixture::FixtureProvider;
pub use http::HttpProvider;

pub trait SchedulingDataProvider {
    /// Events overlapping `range`, ordered by start.
    fn fetch_events_for_range(&self, range: &DateRange) -> Result<Vec<ScheduledEvent>>;

    /// The window in which the group event may be scheduled.
    fn fetch_scheduling_window(&self) -> Result<SchedulingWindow>;

    /// Busy intervals of `participants` overlapping `range`.
    fn fetch_busy_times(
        &self,
        participants: &[Participant],
        range: &DateRange,
    ) -> Result<Vec<BusyInterval>>;
}

impl<P: SchedulingDataProvider + ?Sized> SchedulingDataProvider for Box<P> {
    fn fetch_events_for_range(&self, range: &DateRange) -> Result<Vec<ScheduledEvent>> {
        (**self).fetch_events_for_range(range)
    }

    fn fetch_scheduling_window(&self) -> Result<SchedulingWindow> {
        (**self).fetch_scheduling_window()
    }

    fn fetch_busy_times(
        &self,
        participants: &[Participant],
        range: &DateRange,
    ) -> Result<Vec<BusyInterval>> {
        (**self).fetch_busy_times(participants, range)
    }
}

impl<P: SchedulingDataProvider + ?Sized> SchedulingDataProvider for &P {
    fn fetch_events_for_range(&self, range: &DateRange) -> Result<Vec<ScheduledEvent>> {
        (**self).fetch_events_for_range(range)
    }

    fn fetch_scheduling_window(&self) -> Result<SchedulingWindow> {
        (**self).fetch_scheduling_window()
    }

    fn fetch_busy_times(
        &self,
        participants: &[Participant],
        range: &DateRange,
    ) -> Result<Vec<BusyInterval>> {
        (**self).fetch_busy_times(participants, range)
    }
}

/// Build the provider selected in the settings.
pub fn from_settings(settings: &ProviderSettings) -> Result<Box<dyn SchedulingDataProvider>> {
    match settings.kind {
        ProviderKind::Fixture => {
            log::info!("Using built-in sample scheduling data");
            Ok(Box::new(FixtureProvider::sample()))
        }
        ProviderKind::Http => {
            let provider = HttpProvider::from_settings(settings)?;
            log::info!("Using scheduling service at {}", provider.base_url());
            Ok(Box::new(provider))
        }
    }
}
