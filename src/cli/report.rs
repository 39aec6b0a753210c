use std::{fmt::Display, io, path::PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use now::DateTimeNow;
use tracing::info;

use crate::{
    source::{json_file::JsonFileSource, load_report, EntrySource},
    utils::time::{date_to_string, Calendar},
};

use super::{
    output::{print_projects, print_report, Format, View},
    Args,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct ReportCommand {
    #[arg(
        long = "start",
        short,
        help = "First day of the report. Examples are \"yesterday\", \"last monday\", \"15/03/2025\". Defaults to the start of the current week"
    )]
    start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = "Last day of the report, inclusive. Defaults to the end of the week the report starts in"
    )]
    end_date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, default_value_t = View::Both, help = "Which views of the report to display")]
    view: View,
    #[arg(long, default_value_t = Format::Text, help = "Output format")]
    format: Format,
}

/// Command to process `report` command. Report shows time tracked from `start_date` to
/// `end_date` by day and by project.
pub async fn process_report_command(
    ReportCommand {
        start_date,
        end_date,
        date_style,
        view,
        format,
    }: ReportCommand,
    data_dir: PathBuf,
) -> Result<()> {
    let calendar = parse_range(start_date, end_date, date_style, Local::now())?;
    info!(
        "Building report for {:?} - {:?}",
        calendar.start().map(date_to_string),
        calendar.end().map(date_to_string)
    );

    let source = JsonFileSource::new(data_dir)?;
    let report = load_report(&source, calendar).await?;

    print_report(&report, view, format, &mut io::stdout().lock())
}

pub async fn process_projects_command(data_dir: PathBuf) -> Result<()> {
    let source = JsonFileSource::new(data_dir)?;
    let projects = source.get_projects().await?;
    print_projects(projects.into_values().collect(), &mut io::stdout().lock())
}

fn parse_date(
    value: Option<String>,
    now: DateTime<Local>,
    dialect: chrono_english::Dialect,
    name: &str,
) -> Result<Option<DateTime<Local>>> {
    match value.map(|s| parse_date_string(&s, now, dialect)) {
        Some(Ok(v)) => Ok(Some(v.with_timezone(&Local))),
        Some(Err(e)) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate {name} date {e}"),
            )
            .into()),
        None => Ok(None),
    }
}

/// Resolves the dates of a report. Also provides sensible defaults for `report` command.
fn parse_range(
    start_date: Option<String>,
    end_date: Option<String>,
    date_style: DateStyle,
    now: DateTime<Local>,
) -> Result<Calendar> {
    let dialect: chrono_english::Dialect = date_style.into();
    let start = parse_date(start_date, now, dialect, "start")?
        .unwrap_or_else(|| now.beginning_of_week());
    let end = parse_date(end_date, now, dialect, "end")?
        .unwrap_or_else(|| start.end_of_week())
        .date_naive();
    let start = start.date_naive();

    if end < start {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!(
                    "End of the report {} comes before its start {}",
                    date_to_string(end),
                    date_to_string(start)
                ),
            )
            .into());
    }

    Ok(Calendar::new(start, end))
}
