//! Sources supply the raw [TimeEntry] values and the project lookup a report is built from.
//! [json_file::JsonFileSource] reads them from an exported data directory:
//!   - `entries.jsonl` holds one entry per line.
//!   - `projects.json` holds an array of all projects.

pub mod json_file;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, TimeZone};
use tracing::{debug, instrument};

use crate::{
    report::{
        Report,
        entities::{Project, ProjectId, TimeEntry},
    },
    utils::time::{Calendar, date_of},
};

/// Interface for abstracting where entries come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Retrieves entries that started during the calendar, using local dates.
    async fn get_entries(&self, calendar: &Calendar) -> Result<Vec<TimeEntry>>;

    /// Retrieves every known project by its id.
    async fn get_projects(&self) -> Result<HashMap<ProjectId, Project>>;
}

/// Returns true if an entry started on one of the dates of the calendar, as seen in `timezone`.
pub fn started_during<Tz: TimeZone>(
    entry: &TimeEntry,
    calendar: &Calendar,
    timezone: &Tz,
) -> bool {
    match (calendar.start(), calendar.end()) {
        (Some(start), Some(end)) => {
            let date = date_of(entry.start, timezone);
            start <= date && date <= end
        }
        _ => false,
    }
}

/// Fetches entries and projects at the same time and builds a report in the local timezone.
#[instrument(skip_all)]
pub async fn load_report(source: &impl EntrySource, calendar: Calendar) -> Result<Report> {
    let (entries, projects) =
        futures::try_join!(source.get_entries(&calendar), source.get_projects())?;
    debug!(
        "Loaded {} entries and {} projects",
        entries.len(),
        projects.len()
    );
    Ok(Report::build(entries, &projects, calendar, &Local))
}
