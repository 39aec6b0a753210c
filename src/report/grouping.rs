use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use chrono::{Duration, NaiveDate, TimeZone};
use tracing::{instrument, trace};

use crate::utils::{hours::Hours, time::date_of};

use super::entities::{
    NO_PROJECT_NAME, Project, ProjectDaySummary, ProjectId, TimeEntry,
};

/// Separator placed between distinct descriptions of a group.
pub const DESCRIPTION_SEPARATOR: &str = " / \n";

/// A (project, date) pair entries are grouped by. [None] stands for entries without a project.
pub type GroupKey = (Option<ProjectId>, NaiveDate);

/// Drops entries whose timer is still running.
pub fn filter_finished(entries: Vec<TimeEntry>) -> impl Iterator<Item = TimeEntry> {
    entries.into_iter().filter(|v| {
        if v.is_running() {
            trace!("Skipping running entry started at {}", v.start);
            false
        } else {
            true
        }
    })
}

/// Buckets entries by project and by the date they started on in `timezone`. An ordered map is
/// used so the grouping doesn't depend on hashing.
pub fn group_entries<Tz: TimeZone>(
    entries: impl IntoIterator<Item = TimeEntry>,
    timezone: &Tz,
) -> BTreeMap<GroupKey, Vec<TimeEntry>> {
    let mut groups = BTreeMap::<GroupKey, Vec<TimeEntry>>::new();
    for entry in entries {
        groups
            .entry((entry.project_id, date_of(entry.start, timezone)))
            .or_default()
            .push(entry);
    }
    groups
}

/// Joins unique, non blank descriptions in the order they were first seen.
pub fn join_descriptions<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> String {
    let mut unique: Vec<&str> = vec![];
    for description in entries.into_iter().filter_map(|v| v.description.as_deref()) {
        let description = description.trim();
        if description.is_empty() || unique.contains(&description) {
            continue;
        }
        unique.push(description);
    }
    unique.join(DESCRIPTION_SEPARATOR)
}

/// Sums durations of all entries and only then rounds them.
pub fn total_hours<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Hours {
    let total = entries
        .into_iter()
        .fold(Duration::zero(), |ac, next| ac + next.duration);
    Hours::from_duration(total)
}

/// Resolves a project name, falling back to [NO_PROJECT_NAME].
pub fn project_name(
    project_id: Option<ProjectId>,
    projects: &HashMap<ProjectId, Project>,
) -> Arc<str> {
    project_id
        .and_then(|id| projects.get(&id))
        .map(|v| v.name.clone())
        .unwrap_or_else(|| NO_PROJECT_NAME.into())
}

/// Creates a summary for every (project, date) group. The result has no meaningful order.
pub fn flatten_groups(
    groups: BTreeMap<GroupKey, Vec<TimeEntry>>,
    projects: &HashMap<ProjectId, Project>,
) -> Vec<ProjectDaySummary> {
    groups
        .into_iter()
        .map(|((project_id, date), entries)| ProjectDaySummary {
            project_id,
            project_name: project_name(project_id, projects),
            date,
            total_hours: total_hours(&entries),
            descriptions: join_descriptions(&entries),
        })
        .collect()
}

/// Turns raw entries into one [ProjectDaySummary] per project and date. Dates are taken in
/// `timezone`.
#[instrument(skip_all, fields(entries = entries.len()))]
pub fn summarize_entries<Tz: TimeZone>(
    entries: Vec<TimeEntry>,
    projects: &HashMap<ProjectId, Project>,
    timezone: &Tz,
) -> Vec<ProjectDaySummary> {
    let groups = group_entries(filter_finished(entries), timezone);
    trace!("Created {} groups", groups.len());
    flatten_groups(groups, projects)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

    use crate::{
        report::entities::{NO_PROJECT_NAME, Project, ProjectDaySummary, ProjectId, TimeEntry},
        utils::{hours::Hours, logging::TEST_LOGGING},
    };

    use super::{group_entries, join_descriptions, summarize_entries, total_hours};

    pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    pub fn entry(
        project_id: Option<u64>,
        start: DateTime<Utc>,
        seconds: i64,
        description: Option<&str>,
    ) -> TimeEntry {
        TimeEntry {
            project_id: project_id.map(ProjectId),
            start,
            duration: Duration::seconds(seconds),
            description: description.map(Into::into),
        }
    }

    pub fn projects() -> HashMap<ProjectId, Project> {
        [(1, "Alpha"), (2, "beta"), (3, "Gamma")]
            .into_iter()
            .map(|(id, name)| {
                (
                    ProjectId(id),
                    Project {
                        id: ProjectId(id),
                        name: name.into(),
                    },
                )
            })
            .collect()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn sorted(mut summaries: Vec<ProjectDaySummary>) -> Vec<ProjectDaySummary> {
        summaries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.project_id.cmp(&b.project_id))
        });
        summaries
    }

    #[test]
    fn test_same_project_same_day_merges() {
        *TEST_LOGGING;
        let summaries = summarize_entries(
            vec![
                entry(Some(1), at(12, 9), 3600, Some("A")),
                entry(Some(1), at(12, 10), 1800, Some("A")),
            ],
            &projects(),
            &Utc,
        );

        assert_eq!(
            summaries,
            vec![ProjectDaySummary {
                project_id: Some(ProjectId(1)),
                project_name: "Alpha".into(),
                date: date(12),
                total_hours: Hours::from_hundredths(150),
                descriptions: "A".into(),
            }]
        );
    }

    #[test]
    fn test_running_entries_are_ignored() {
        let finished = vec![
            entry(Some(1), at(12, 9), 3600, Some("A")),
            entry(Some(2), at(13, 9), 900, Some("B")),
        ];
        let mut with_running = finished.clone();
        with_running.push(entry(Some(1), at(12, 11), -5, Some("running")));
        with_running.push(entry(Some(3), at(14, 11), -1_700_000_000, None));

        let expected = summarize_entries(finished, &projects(), &Utc);
        let actual = summarize_entries(with_running, &projects(), &Utc);

        assert_eq!(sorted(actual), sorted(expected));
    }

    #[test]
    fn test_only_running_entry_produces_nothing() {
        let summaries =
            summarize_entries(vec![entry(Some(1), at(12, 9), -5, None)], &projects(), &Utc);
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_no_project() {
        let summaries =
            summarize_entries(vec![entry(None, at(12, 9), 600, None)], &projects(), &Utc);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].project_id, None);
        assert_eq!(&*summaries[0].project_name, NO_PROJECT_NAME);
        assert_eq!(summaries[0].descriptions, "");
        assert_eq!(summaries[0].total_hours, Hours::from_hundredths(17));
    }

    #[test]
    fn test_unknown_project_uses_placeholder_name() {
        let summaries =
            summarize_entries(vec![entry(Some(42), at(12, 9), 600, None)], &projects(), &Utc);

        assert_eq!(summaries[0].project_id, Some(ProjectId(42)));
        assert_eq!(&*summaries[0].project_name, NO_PROJECT_NAME);
    }

    #[test]
    fn test_unknown_project_isnt_merged_with_no_project() {
        let summaries = summarize_entries(
            vec![
                entry(Some(42), at(12, 9), 600, None),
                entry(None, at(12, 10), 600, None),
            ],
            &projects(),
            &Utc,
        );
        assert_eq!(summaries.len(), 2);
    }

    #[test]
    fn test_one_summary_per_project_and_date() {
        let summaries = summarize_entries(
            vec![
                entry(Some(1), at(12, 9), 600, None),
                entry(Some(2), at(12, 9), 600, None),
                entry(Some(1), at(13, 9), 600, None),
                entry(Some(1), at(12, 15), 600, None),
                entry(None, at(12, 16), 600, None),
                entry(None, at(13, 16), 600, None),
            ],
            &projects(),
            &Utc,
        );
        let mut keys = summaries
            .iter()
            .map(|v| (v.project_id, v.date))
            .collect::<Vec<_>>();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), summaries.len());
        assert_eq!(summaries.len(), 5);
    }

    #[test]
    fn test_grouping_keeps_every_entry() {
        let entries = vec![
            entry(Some(1), at(12, 9), 600, None),
            entry(Some(2), at(12, 9), 600, None),
            entry(Some(1), at(13, 9), 600, None),
            entry(Some(1), at(12, 15), 600, None),
        ];
        let groups = group_entries(entries.clone(), &Utc);
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), entries.len());
        assert_eq!(groups[&(Some(ProjectId(1)), date(12))].len(), 2);
    }

    #[test]
    fn test_grouping_uses_local_date() {
        let kyiv = FixedOffset::east_opt(2 * 3600).unwrap();
        let evening = Utc.with_ymd_and_hms(2026, 1, 12, 20, 0, 0).unwrap();
        let late_night = Utc.with_ymd_and_hms(2026, 1, 12, 23, 30, 0).unwrap();
        let entries = vec![
            entry(Some(1), evening, 600, Some("evening")),
            entry(Some(1), late_night, 600, Some("after midnight")),
        ];

        let in_utc = group_entries(entries.clone(), &Utc);
        assert_eq!(in_utc.len(), 1);

        let local = group_entries(entries.clone(), &kyiv);
        assert_eq!(local.len(), 2);
        assert_eq!(local[&(Some(ProjectId(1)), date(12))].len(), 1);
        assert_eq!(local[&(Some(ProjectId(1)), date(13))].len(), 1);

        let summaries = summarize_entries(entries, &projects(), &kyiv);
        let mut dates = summaries
            .iter()
            .map(|v| (v.date, v.descriptions.as_str()))
            .collect::<Vec<_>>();
        dates.sort();
        assert_eq!(
            dates,
            vec![(date(12), "evening"), (date(13), "after midnight")]
        );
    }

    #[test]
    fn test_descriptions_are_deduplicated() {
        let repeated = vec![
            entry(Some(1), at(12, 9), 60, Some("review")),
            entry(Some(1), at(12, 9), 60, Some("review")),
            entry(Some(1), at(12, 9), 60, Some("review")),
        ];
        assert_eq!(join_descriptions(&repeated), join_descriptions(&repeated[..1]));
    }

    #[test]
    fn test_descriptions_keep_first_seen_order() {
        let entries = vec![
            entry(Some(1), at(12, 9), 60, Some("b")),
            entry(Some(1), at(12, 9), 60, None),
            entry(Some(1), at(12, 9), 60, Some("   ")),
            entry(Some(1), at(12, 9), 60, Some("a ")),
            entry(Some(1), at(12, 9), 60, Some("b")),
            entry(Some(1), at(12, 9), 60, Some("c")),
            entry(Some(1), at(12, 9), 60, Some("a")),
        ];
        assert_eq!(join_descriptions(&entries), "b / \na / \nc");
    }

    #[test]
    fn test_descriptions_are_case_sensitive() {
        let entries = vec![
            entry(Some(1), at(12, 9), 60, Some("Fix")),
            entry(Some(1), at(12, 9), 60, Some("fix")),
        ];
        assert_eq!(join_descriptions(&entries), "Fix / \nfix");
    }

    #[test]
    fn test_hours_are_rounded_once() {
        // Each entry alone would round to 0.00, together they are 0.03.
        let entries = (0..6)
            .map(|_| entry(Some(1), at(12, 9), 17, None))
            .collect::<Vec<_>>();
        assert_eq!(total_hours(&entries), Hours::from_hundredths(3));
    }

    #[test]
    fn test_total_of_summaries_matches_total_of_entries() {
        let entries = vec![
            entry(Some(1), at(12, 9), 1234, None),
            entry(Some(2), at(12, 9), 4321, None),
            entry(Some(1), at(13, 9), 999, None),
            entry(None, at(14, 15), 7, None),
            entry(Some(3), at(14, 15), -30, None),
        ];
        let expected = Hours::from_seconds(1234 + 4321 + 999 + 7);
        let summaries = summarize_entries(entries, &projects(), &Utc);
        let actual: Hours = summaries.iter().map(|v| v.total_hours).sum();
        // every group may be off by at most half a hundredth
        let tolerance = summaries.len() as i64;
        assert!((actual.hundredths() - expected.hundredths()).abs() <= tolerance);
    }
}
