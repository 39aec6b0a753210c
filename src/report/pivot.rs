use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};

use tracing::instrument;

use crate::utils::{hours::Hours, names::NameCollator, time::Calendar};

use super::entities::{DaySummary, ProjectDay, ProjectDaySummary, ProjectId, ProjectSummary};

/// Orders by name first. Ids only matter for different projects sharing a name, which keeps the
/// output independent of the input order.
fn by_project(
    collator: &NameCollator,
    (a_id, a_name): (Option<ProjectId>, &str),
    (b_id, b_name): (Option<ProjectId>, &str),
) -> Ordering {
    collator
        .compare(a_name, b_name)
        .then_with(|| a_id.cmp(&b_id))
}

/// Creates a [DaySummary] for every date of the calendar, in calendar order. Dates nobody worked
/// on are still present with no projects.
#[instrument(skip_all, fields(summaries = summaries.len()))]
pub fn organize_by_day(summaries: &[ProjectDaySummary], calendar: &Calendar) -> Vec<DaySummary> {
    let collator = NameCollator::new();
    calendar
        .dates()
        .iter()
        .map(|date| {
            let mut projects = summaries
                .iter()
                .filter(|v| v.date == *date)
                .cloned()
                .collect::<Vec<_>>();
            projects.sort_by(|a, b| {
                by_project(
                    &collator,
                    (a.project_id, &*a.project_name),
                    (b.project_id, &*b.project_name),
                )
            });
            DaySummary {
                date: *date,
                day_name: calendar.day_name(*date),
                projects,
            }
        })
        .collect()
}

/// Creates a [ProjectSummary] for every project present in `summaries`, sorted by name. Unlike
/// [organize_by_day] nothing is created for projects without tracked time, and a project only
/// lists the days it was worked on.
#[instrument(skip_all, fields(summaries = summaries.len()))]
pub fn organize_by_project(
    summaries: &[ProjectDaySummary],
    calendar: &Calendar,
) -> Vec<ProjectSummary> {
    let mut map = BTreeMap::<(Option<ProjectId>, Arc<str>), Vec<ProjectDay>>::new();

    for summary in summaries {
        map.entry((summary.project_id, summary.project_name.clone()))
            .or_default()
            .push(ProjectDay {
                date: summary.date,
                day_name: calendar.day_name(summary.date),
                total_hours: summary.total_hours,
                descriptions: summary.descriptions.clone(),
            });
    }

    let mut projects = map
        .into_iter()
        .map(|((project_id, project_name), mut days)| {
            days.sort_by(|a, b| a.date.cmp(&b.date));
            let total_hours = days.iter().map(|v| v.total_hours).sum::<Hours>();
            ProjectSummary {
                project_id,
                project_name,
                days,
                total_hours,
            }
        })
        .collect::<Vec<_>>();
    let collator = NameCollator::new();
    projects.sort_by(|a, b| {
        by_project(
            &collator,
            (a.project_id, &*a.project_name),
            (b.project_id, &*b.project_name),
        )
    });
    projects
}
