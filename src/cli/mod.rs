pub mod output;
pub mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use report::{process_projects_command, process_report_command, ReportCommand};
use tracing::level_filters::LevelFilter;

use crate::utils::{
    dir::{create_application_default_path, create_dir},
    logging::{enable_logging, CLI_PREFIX},
};

#[derive(Parser, Debug)]
#[command(name = "Hourbook", version, long_about = None)]
#[command(about = "Summaries of tracked time by project and by day", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        env = "HOURBOOK_DIR",
        global = true,
        help = "Directory with entries.jsonl and projects.json. By default $XDG_STATE_HOME/hourbook or $HOME/.local/state/hourbook"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Display tracked time grouped by day and by project")]
    Report {
        #[command(flatten)]
        command: ReportCommand,
    },
    #[command(about = "List known projects")]
    Projects {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let data_dir = match args.dir {
        Some(dir) => create_dir(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &data_dir, logging_level, args.log)?;

    match args.commands {
        Commands::Report { command } => process_report_command(command, data_dir).await,
        Commands::Projects {} => process_projects_command(data_dir).await,
    }
}
