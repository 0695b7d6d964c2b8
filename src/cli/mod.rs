pub mod dashboard;
pub mod display;
pub mod history;
pub mod insights;
pub mod record;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use dashboard::{process_dashboard_command, process_recent_command, DashboardCommand, RecentCommand};
use history::{process_history_command, HistoryCommand};
use insights::process_insights_command;
use record::{process_record_command, RecordCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    movement::{recorder::MovementRecorder, store::JsonLinesStore, store::MovementStore},
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, create_application_path},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "lunomove", version, long_about = None)]
#[command(about = "Mindful movement log: record small activities and see your streaks", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Record a movement")]
    Log {
        #[command(flatten)]
        command: RecordCommand,
    },
    #[command(about = "Show today's and this week's summary with the latest movements")]
    Dashboard {
        #[command(flatten)]
        command: DashboardCommand,
    },
    #[command(about = "Show the latest movements")]
    Recent {
        #[command(flatten)]
        command: RecentCommand,
    },
    #[command(about = "Browse past movements grouped by day")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
    #[command(about = "Streaks, favourite activity and time patterns")]
    Insights {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, create_application_path)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;
    debug!("Using application directory {app_dir:?}");

    let store = JsonLinesStore::new(&app_dir)?;
    let recorder = MovementRecorder::new(store, Box::new(DefaultClock));

    match args.commands {
        Commands::Log { command } => process_record_command(&recorder, command).await,
        Commands::Dashboard { command } => process_dashboard_command(&recorder, command).await,
        Commands::Recent { command } => process_recent_command(&recorder, command).await,
        Commands::History { command } => process_history_command(&recorder, command).await,
        Commands::Insights {} => process_insights_command(&recorder).await,
    }
}

/// Current time in the user's zone. All calendar days shown by the command line are local.
fn local_now<S: MovementStore>(recorder: &MovementRecorder<S>) -> DateTime<Local> {
    recorder.clock().time().with_timezone(&Local)
}
