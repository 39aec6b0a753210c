use chrono::DateTime;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;

use std::fmt::Display;
use std::sync::Arc;

use crate::utils::hours::Hours;

/// Name every entry without a known project is reported under.
pub const NO_PROJECT_NAME: &str = "No Project";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged interval of tracked time, as supplied by the entry source.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct TimeEntry {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub start: DateTime<Utc>,
    /// Negative while the timer is still running.
    #[serde(with = "duration_ser")]
    pub duration: Duration,
    #[serde(default)]
    pub description: Option<Arc<str>>,
}

impl TimeEntry {
    pub fn is_running(&self) -> bool {
        self.duration < Duration::zero()
    }
}

mod duration_ser {
    use chrono::Duration;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = i64::deserialize(deserializer)?;
        let duration = Duration::seconds(s);
        Ok(duration)
    }
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub name: Arc<str>,
}

/// Tracked time of one project on one date. `project_id` is [None] for entries that weren't
/// assigned to any project.
#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct ProjectDaySummary {
    pub project_id: Option<ProjectId>,
    pub project_name: Arc<str>,
    pub date: NaiveDate,
    pub total_hours: Hours,
    pub descriptions: String,
}

/// All projects worked on during a date, sorted by project name.
#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub day_name: String,
    pub projects: Vec<ProjectDaySummary>,
}

impl DaySummary {
    pub fn total_hours(&self) -> Hours {
        self.projects.iter().map(|v| v.total_hours).sum()
    }
}

#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct ProjectDay {
    pub date: NaiveDate,
    pub day_name: String,
    pub total_hours: Hours,
    pub descriptions: String,
}

/// Every day a project was worked on, sorted by date.
#[derive(PartialEq, Eq, Debug, Serialize, Clone)]
pub struct ProjectSummary {
    pub project_id: Option<ProjectId>,
    pub project_name: Arc<str>,
    pub days: Vec<ProjectDay>,
    pub total_hours: Hours,
}
