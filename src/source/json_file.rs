use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncReadExt, BufReader},
};
use tokio_stream::{StreamExt, wrappers::LinesStream};
use tracing::{debug, instrument, warn};

use crate::{
    report::entities::{Project, ProjectId, TimeEntry},
    utils::time::Calendar,
};

use super::{EntrySource, started_during};

pub const ENTRIES_FILE: &str = "entries.jsonl";
pub const PROJECTS_FILE: &str = "projects.json";

/// Reads entries and projects exported into a directory.
pub struct JsonFileSource {
    data_dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(data_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self { data_dir })
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join(ENTRIES_FILE)
    }

    pub fn projects_path(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_FILE)
    }

    async fn read_entries(path: &Path) -> std::result::Result<Vec<TimeEntry>, std::io::Error> {
        debug!("Extracting {path:?}");
        let file = File::open(path).await?;
        file.lock_shared()?;
        let mut lines = LinesStream::new(BufReader::new(file).lines());
        let mut entries = vec![];
        while let Some(line) = lines.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TimeEntry>(&line) {
                Ok(v) => entries.push(v),
                Err(e) => {
                    // ignore illegal values. Might happen if an export was interrupted
                    warn!(
                        "During parsing in path {:?} found illegal json string {}:  {e}",
                        path, &line
                    )
                }
            }
        }

        lines.into_inner().into_inner().into_inner().unlock_async().await?;

        Ok(entries)
    }

    async fn read_projects(path: &Path) -> Result<Vec<Project>> {
        let mut file = File::open(path).await?;
        file.lock_shared()?;
        let mut content = String::new();
        file.read_to_string(&mut content).await?;
        file.unlock_async().await?;
        serde_json::from_str(&content).with_context(|| format!("Couldn't parse {path:?}"))
    }
}

fn missing_as_empty<T: Default>(result: std::result::Result<T, std::io::Error>) -> Result<T> {
    match result {
        Ok(v) => Ok(v),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl EntrySource for JsonFileSource {
    #[instrument(skip_all)]
    async fn get_entries(&self, calendar: &Calendar) -> Result<Vec<TimeEntry>> {
        let entries = missing_as_empty(Self::read_entries(&self.entries_path()).await)?;
        Ok(entries
            .into_iter()
            .filter(|v| started_during(v, calendar, &Local))
            .collect())
    }

    #[instrument(skip_all)]
    async fn get_projects(&self) -> Result<HashMap<ProjectId, Project>> {
        let path = self.projects_path();
        let projects = match Self::read_projects(&path).await {
            Ok(v) => v,
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|v| v.kind() == ErrorKind::NotFound) =>
            {
                warn!("No projects found in {path:?}");
                vec![]
            }
            Err(e) => return Err(e),
        };
        Ok(projects.into_iter().map(|v| (v.id, v)).collect())
    }
}
