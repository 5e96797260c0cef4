use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use match_cli::{commands, load_criteria, logging, CliError, Dataset};
use match_core::{AnnouncementId, CancellationFlag, RouteId, SweepConfig};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "match-cli",
    about = "Route/announcement matching over a JSON dataset",
    long_about = "Scores route/announcement pairs, searches candidates around one\n\
                  announcement or route, and runs the automatic matching sweep\n\
                  over a JSON dataset of routes and announcements."
)]
struct Cli {
    /// Dataset file: {"routes": [...], "announcements": [...]}
    #[arg(long, env = "MATCH_DATASET", global = true, default_value = "dataset.json")]
    dataset: PathBuf,
    /// Partial matching criteria (JSON); unset fields keep their defaults
    #[arg(long, env = "MATCH_CRITERIA", global = true)]
    criteria: Option<PathBuf>,
    /// Emit logs as JSON lines
    #[arg(long, env = "MATCH_LOG_JSON", global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single route against a single announcement
    Score {
        #[arg(long)]
        route: String,
        #[arg(long)]
        announcement: String,
    },
    /// Rank routes that could carry an announcement
    FindForAnnouncement {
        #[arg(long)]
        announcement: String,
    },
    /// Rank open announcements along a route
    FindForRoute {
        #[arg(long)]
        route: String,
    },
    /// Match every open announcement and persist strong matches
    Sweep {
        /// Announcements processed in parallel
        #[arg(long, env = "MATCH_CONCURRENCY", default_value_t = 1)]
        concurrency: usize,
        /// Stop starting new announcements after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
        /// Reference time (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

fn run(cli: Cli) -> Result<String, CliError> {
    let criteria = load_criteria(cli.criteria.as_deref())?;
    let store = Dataset::load(&cli.dataset)?.into_store();

    match cli.command {
        Commands::Score {
            route,
            announcement,
        } => commands::render(&commands::score(
            &store,
            &RouteId::new(route),
            &AnnouncementId::new(announcement),
            &criteria,
        )?),
        Commands::FindForAnnouncement { announcement } => commands::render(
            &commands::find_for_announcement(&store, &AnnouncementId::new(announcement), &criteria)?,
        ),
        Commands::FindForRoute { route } => commands::render(&commands::find_for_route(
            &store,
            &RouteId::new(route),
            &criteria,
        )?),
        Commands::Sweep {
            concurrency,
            deadline_secs,
            now,
        } => {
            let config = SweepConfig::default()
                .with_concurrency(concurrency)
                .with_deadline(deadline_secs.map(Duration::from_secs));
            let report = commands::sweep(
                &store,
                criteria,
                config,
                CancellationFlag::new(),
                now.unwrap_or_else(Utc::now),
            )?;
            commands::render(&report)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!(component = "match_cli", error = %err, "command failed");
            eprintln!("error: {err}");
            exit(1);
        }
    }
}
