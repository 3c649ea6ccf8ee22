// Integration tests for the scheduling session, providers and settings

mod fixtures;

use anyhow::anyhow;
use chrono::Duration;
use fixtures::{dates, events, ranges};
use group_scheduler::models::availability::BusyInterval;
use group_scheduler::models::date_range::{DateRange, SchedulingWindow};
use group_scheduler::models::event::ScheduledEvent;
use group_scheduler::models::participant::Participant;
use group_scheduler::models::settings::{ProviderKind, Settings};
use group_scheduler::models::ui::ViewGranularity;
use group_scheduler::services::participants::AddOutcome;
use group_scheduler::services::provider::{self, SchedulingDataProvider};
use group_scheduler::services::schedule::ScheduleSession;
use group_scheduler::services::settings::{SettingsService, API_URL_ENV};
use mockall::mock;
use pretty_assertions::assert_eq;
use serial_test::serial;

mock! {
    pub Provider {}

    impl SchedulingDataProvider for Provider {
        fn fetch_events_for_range(&self, range: &DateRange) -> anyhow::Result<Vec<ScheduledEvent>>;
        fn fetch_scheduling_window(&self) -> anyhow::Result<SchedulingWindow>;
        fn fetch_busy_times(
            &self,
            participants: &[Participant],
            range: &DateRange,
        ) -> anyhow::Result<Vec<BusyInterval>>;
    }
}

#[test]
fn test_refresh_resolves_view_from_window() {
    let window_range = ranges::two_weeks();
    let window = ranges::window(window_range);
    let meeting = events::meeting("1", dates::jan(14), 1);

    let mut mock = MockProvider::new();
    mock.expect_fetch_scheduling_window()
        .times(1)
        .returning(move || Ok(window.clone()));
    let returned = meeting.clone();
    mock.expect_fetch_events_for_range()
        .withf(move |range| *range == window_range)
        .times(1)
        .returning(move |_| Ok(vec![returned.clone()]));

    let mut session = ScheduleSession::new(mock, &Settings::default());
    let snapshot = session.refresh().unwrap();

    assert_eq!(snapshot.view, ViewGranularity::MonthView);
    assert_eq!(snapshot.toolbar.render_mode, "dayGridMonth");
    assert_eq!(
        snapshot.toolbar.available_views,
        vec![ViewGranularity::WeekView, ViewGranularity::MonthView]
    );
    assert_eq!(snapshot.events, vec![meeting]);
}

#[test]
fn test_provider_failure_is_reported() {
    let mut mock = MockProvider::new();
    mock.expect_fetch_scheduling_window()
        .returning(|| Err(anyhow!("service unavailable")));

    let mut session = ScheduleSession::new(mock, &Settings::default());
    let err = session.refresh().unwrap_err();
    assert!(format!("{err:#}").contains("service unavailable"));
    assert!(session.current().is_none());
}

#[test]
fn test_busy_times_uses_current_participants_and_range() {
    let range = ranges::days_from(dates::jan(11), 1);

    let mut mock = MockProvider::new();
    mock.expect_fetch_events_for_range()
        .returning(|_| Ok(Vec::new()));
    mock.expect_fetch_busy_times()
        .withf(move |participants, requested| {
            participants.iter().map(Participant::email).collect::<Vec<_>>()
                == vec!["ada@example.com", "grace@example.com"]
                && *requested == range
        })
        .times(1)
        .returning(|participants, requested| {
            Ok(vec![BusyInterval {
                email: participants[0].email().to_string(),
                start: requested.start(),
                end: requested.start() + Duration::hours(2),
            }])
        });

    let mut session = ScheduleSession::new(mock, &Settings::default());
    session.show_range(range).unwrap();

    assert!(matches!(session.add_participant("ada@example.com"), Ok(AddOutcome::Added(_))));
    assert!(matches!(session.add_participant("grace@example.com"), Ok(AddOutcome::Added(_))));
    assert_eq!(session.add_participant("ADA@example.com "), Ok(AddOutcome::Duplicate));

    let busy = session.busy_times().unwrap();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].email, "ada@example.com");
}

#[test]
fn test_no_busy_lookup_without_participants() {
    let mut mock = MockProvider::new();
    mock.expect_fetch_busy_times().never();

    let session = ScheduleSession::new(mock, &Settings::default());
    assert!(session.busy_times().unwrap().is_empty());
}

#[test]
fn test_month_navigation_pages_by_calendar_month() {
    let mut mock = MockProvider::new();
    mock.expect_fetch_events_for_range()
        .returning(|_| Ok(Vec::new()));

    let mut session = ScheduleSession::new(mock, &Settings::default());
    session
        .show_range(DateRange::new(dates::jan(1), dates::jan(31)).unwrap())
        .unwrap();

    let next = session.navigate(true).unwrap().unwrap();
    assert_eq!(next.range.start(), dates::ymd(2025, 2, 1));
    assert_eq!(next.range.end(), dates::ymd(2025, 2, 28));
    assert_eq!(next.view, ViewGranularity::MonthView);
}

#[test]
fn test_fixture_provider_session_end_to_end() {
    let settings = Settings::default();
    let provider = provider::from_settings(&settings.provider).unwrap();
    let mut session = ScheduleSession::new(provider, &settings);

    let snapshot = session.refresh().unwrap();
    assert_eq!(snapshot.view, ViewGranularity::WeekView);

    let titles: Vec<&str> = snapshot.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Project kickoff", "Design review", "Team offsite"]);

    let wide = session
        .show_range(DateRange::new(dates::jan(1), dates::ymd(2025, 3, 15)).unwrap())
        .unwrap();
    assert_eq!(wide.view, ViewGranularity::MultiMonthView);
    assert_eq!(wide.events.len(), 4);
    assert!(session.navigate(true).unwrap().is_none());
}

#[test]
#[serial]
fn test_env_override_selects_http_provider() {
    let dir = tempfile::tempdir().unwrap();
    let service = SettingsService::new(dir.path().join("config.toml"));

    std::env::set_var(API_URL_ENV, "https://scheduler.example.com/api");
    let loaded = service.load();
    std::env::remove_var(API_URL_ENV);

    let settings = loaded.unwrap();
    assert_eq!(settings.provider.kind, ProviderKind::Http);
    assert_eq!(
        settings.provider.base_url.as_deref(),
        Some("https://scheduler.example.com/api")
    );
    assert!(provider::from_settings(&settings.provider).is_ok());
}

#[test]
#[serial]
fn test_settings_file_thresholds_drive_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[view]\nweek_max_days = 14.0\nmonth_max_days = 60.0\n").unwrap();

    let settings = SettingsService::new(path).load().unwrap();
    let mut mock = MockProvider::new();
    mock.expect_fetch_events_for_range()
        .returning(|_| Ok(Vec::new()));

    let mut session = ScheduleSession::new(mock, &settings);
    let snapshot = session.show_range(ranges::two_weeks()).unwrap();
    assert_eq!(snapshot.view, ViewGranularity::WeekView);
}

#[test]
#[serial]
fn test_preview_reports_participant_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_group-scheduler"))
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["preview", "--participant", "bob@example.com"])
        .env_remove(API_URL_ENV)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    let opened = lines.iter().position(|line| *line == "[add-participant]").unwrap();
    let added = lines.iter().position(|line| *line == "+ bob@example.com").unwrap();
    let closed = lines.iter().position(|line| *line == "[no dialog open]").unwrap();
    assert!(opened < added && added < closed, "{stdout}");
}
