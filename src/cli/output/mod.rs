use std::{fmt::Display, io::Write};

use ansi_term::Style;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::{
    report::{
        entities::{DaySummary, Project, ProjectSummary},
        grouping::DESCRIPTION_SEPARATOR,
        Report,
    },
    utils::{hours::Hours, names::NameCollator, time::date_to_string},
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum View {
    Days,
    Projects,
    Both,
}

impl View {
    fn days(&self) -> bool {
        matches!(self, View::Days | View::Both)
    }

    fn projects(&self) -> bool {
        matches!(self, View::Projects | View::Both)
    }
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Days => write!(f, "days"),
            View::Projects => write!(f, "projects"),
            View::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<&'a [DaySummary]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<&'a [ProjectSummary]>,
    total_hours: Hours,
}

pub fn print_report(
    report: &Report,
    view: View,
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        Format::Text => print_text(report, view, out),
        Format::Json => print_json(report, view, out),
    }
}

fn print_json(report: &Report, view: View, out: &mut impl Write) -> Result<()> {
    let value = JsonReport {
        days: view.days().then_some(report.days.as_slice()),
        projects: view.projects().then_some(report.projects.as_slice()),
        total_hours: report.total_hours,
    };
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}

/// Descriptions are kept on a single line in text output.
fn single_line(descriptions: &str) -> String {
    descriptions.replace(DESCRIPTION_SEPARATOR, " / ")
}

fn print_text(report: &Report, view: View, out: &mut impl Write) -> Result<()> {
    let header = Style::new().bold();

    if view.days() {
        for day in &report.days {
            writeln!(
                out,
                "{}",
                header.paint(format!("{} {}", day.day_name, date_to_string(day.date)))
            )?;
            if day.projects.is_empty() {
                writeln!(out, "-")?;
            }
            for project in &day.projects {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    project.total_hours,
                    project.project_name,
                    single_line(&project.descriptions)
                )?;
            }
            writeln!(out)?;
        }
    }

    if view.projects() {
        for project in &report.projects {
            writeln!(
                out,
                "{}",
                header.paint(format!("{} ({}h)", project.project_name, project.total_hours))
            )?;
            for day in &project.days {
                writeln!(
                    out,
                    "{}\t{} {}\t{}",
                    day.total_hours,
                    day.day_name,
                    date_to_string(day.date),
                    single_line(&day.descriptions)
                )?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "{}\t{}", header.paint("Total"), report.total_hours)?;
    Ok(())
}

/// Prints projects sorted by name.
pub fn print_projects(mut projects: Vec<Project>, out: &mut impl Write) -> Result<()> {
    let collator = NameCollator::new();
    projects.sort_by(|a, b| {
        collator
            .compare(&a.name, &b.name)
            .then_with(|| a.id.cmp(&b.id))
    });
    for project in projects {
        writeln!(out, "{}\t{}", project.id, project.name)?;
    }
    Ok(())
}
