//! An immutable view of the user's entities at one point in time.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Goal, Project, Task, Theme};
use crate::error::{Result, SnapshotError};

/// The four collections the engine reads. Owned by the data layer; the engine
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = serde_json::from_str(&content).map_err(|source| SnapshotError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(snapshot)
    }

    /// ID sets of everything currently alive in this snapshot.
    pub fn live_ids(&self) -> LiveIds {
        LiveIds {
            subthemes: self
                .themes
                .iter()
                .flat_map(|theme| theme.subthemes.iter().map(|s| s.id.clone()))
                .collect(),
            tasks: self.tasks.iter().map(|t| t.id.clone()).collect(),
            goals: self.goals.iter().map(|g| g.id.clone()).collect(),
            projects: self.projects.iter().map(|p| p.id.clone()).collect(),
        }
    }
}

/// Entity IDs used to drop events whose entity has been deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveIds {
    pub subthemes: HashSet<String>,
    pub tasks: HashSet<String>,
    pub goals: HashSet<String>,
    pub projects: HashSet<String>,
}
