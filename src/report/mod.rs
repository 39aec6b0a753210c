//! Turns raw time entries into the two views of a report.
//!
//! Entries are first reduced into one [entities::ProjectDaySummary] per project and date by
//! [grouping::summarize_entries]. That flat list is then organized by date in
//! [pivot::organize_by_day] and by project in [pivot::organize_by_project].

pub mod entities;
pub mod grouping;
pub mod pivot;

use std::collections::HashMap;

use chrono::TimeZone;
use serde::Serialize;

use crate::utils::{hours::Hours, time::Calendar};

use entities::{DaySummary, Project, ProjectId, ProjectSummary, TimeEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub calendar: Calendar,
    pub days: Vec<DaySummary>,
    pub projects: Vec<ProjectSummary>,
    pub total_hours: Hours,
}

impl Report {
    /// Runs the whole pipeline. Dates of entries are taken in `timezone`.
    pub fn build<Tz: TimeZone>(
        entries: Vec<TimeEntry>,
        projects: &HashMap<ProjectId, Project>,
        calendar: Calendar,
        timezone: &Tz,
    ) -> Self {
        let summaries = grouping::summarize_entries(entries, projects, timezone);
        let days = pivot::organize_by_day(&summaries, &calendar);
        let projects = pivot::organize_by_project(&summaries, &calendar);
        let total_hours = projects.iter().map(|v| v.total_hours).sum();
        Self {
            calendar,
            days,
            projects,
            total_hours,
        }
    }
}
