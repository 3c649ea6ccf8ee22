// Group Scheduler
// Headless preview of the calendar screen state

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use group_scheduler::models::date_range::DateRange;
use group_scheduler::services::participants::AddOutcome;
use group_scheduler::services::provider;
use group_scheduler::services::schedule::{CalendarSnapshot, ScheduleSession};
use group_scheduler::services::settings::SettingsService;
use group_scheduler::services::view_resolver::ViewResolver;
use group_scheduler::ui::{ModalSetManager, SchedulerModal};
use group_scheduler::utils::date::parse_date_input;

#[derive(Parser)]
#[command(name = "group-scheduler", version, about = "Preview group scheduling calendar state")]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the calendar view for a date range
    Resolve { start: String, end: String },

    /// Load the scheduling window and print what the calendar would show
    Preview {
        #[arg(long, requires = "end")]
        start: Option<String>,
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// Participant email (repeatable)
        #[arg(long = "participant")]
        participants: Vec<String>,
    },
}

fn main() {
    // Initialize logging
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        log::error!("{err:?}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings_service = match cli.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::with_default_path()?,
    };
    let settings = settings_service.load()?;

    match cli.command {
        Command::Resolve { start, end } => {
            let resolver = ViewResolver::from(settings.view);
            let view = resolver.resolve_raw(Some(start.as_str()), Some(end.as_str()));
            println!("{view}");
            Ok(())
        }
        Command::Preview {
            start,
            end,
            participants,
        } => {
            let provider = provider::from_settings(&settings.provider)?;
            let mut session = ScheduleSession::new(provider, &settings);
            let mut modals = ModalSetManager::for_scheduler(settings.modals.undeclared);

            let mut snapshot = session.refresh()?;
            if let (Some(start), Some(end)) = (start, end) {
                snapshot = session.show_range(parse_range(&start, &end)?)?;
            }
            print_snapshot(&snapshot);

            if !participants.is_empty() {
                modals.open(SchedulerModal::AddParticipant)?;
                print_active_modal(&modals);
                for email in &participants {
                    match session.add_participant(email) {
                        Ok(AddOutcome::Added(participant)) => println!("+ {participant}"),
                        Ok(AddOutcome::Duplicate) => println!("= {} (already added)", email.trim()),
                        Err(err) => println!("! {err}"),
                    }
                }
                modals.close(SchedulerModal::AddParticipant)?;
                print_active_modal(&modals);

                for busy in session.busy_times()? {
                    println!("busy {} {} -> {}", busy.email, busy.start, busy.end);
                }
            }

            Ok(())
        }
    }
}

fn parse_range(start: &str, end: &str) -> Result<DateRange> {
    let start = parse_date_input(start).with_context(|| format!("Invalid start date '{start}'"))?;
    let end = parse_date_input(end).with_context(|| format!("Invalid end date '{end}'"))?;
    Ok(DateRange::new(start, end)?)
}

fn print_active_modal(modals: &ModalSetManager<SchedulerModal>) {
    match modals.active_modal() {
        Some(modal) => println!("[{modal}]"),
        None => println!("[no dialog open]"),
    }
}

fn print_snapshot(snapshot: &CalendarSnapshot) {
    println!(
        "{} -> {}: {} view ({})",
        snapshot.range.start(),
        snapshot.range.end(),
        snapshot.view.label(),
        snapshot.toolbar.render_mode
    );
    let views: Vec<&str> = snapshot
        .toolbar
        .available_views
        .iter()
        .map(|view| view.label())
        .collect();
    println!("views: {}", views.join(" | "));

    for event in &snapshot.events {
        let marker = if event.all_day { " (all day)" } else { "" };
        println!("  {} -> {}  {}{}", event.start, event.end, event.title, marker);
    }
}
