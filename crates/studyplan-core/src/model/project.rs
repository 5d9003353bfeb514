//! Projects with an optional start/deadline span and milestones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::day_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// May be absent in collaborator data; see [`Milestone::event_id`].
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Percent complete. Collaborators may send fractional values.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Milestone {
    /// The milestone's own id, or `<project>-milestone-<n>` (1-based) when it
    /// has none.
    pub fn event_id(&self, project_id: &str, index: usize) -> String {
        if self.id.is_empty() {
            format!("{project_id}-milestone-{}", index + 1)
        } else {
            self.id.clone()
        }
    }
}

impl Project {
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(day_key)
    }

    pub fn deadline_day(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(day_key)
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 100.0 || self.status == ProjectStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_milestones_and_fractional_progress_deserialize() {
        let project: Project = serde_json::from_str(
            r#"{"id":"p","deadline":"2024-06-30","progress":66.7,
                "milestones":[{"dueDate":"2024-06-02","completed":false},
                              {"id":"m","title":"Beta","dueDate":"2024-06-10"}]}"#,
        )
        .unwrap();
        assert!(project.title.is_empty());
        assert_eq!(project.progress, 66.7);
        assert!(!project.is_done());
        assert_eq!(project.milestones[0].event_id("p", 0), "p-milestone-1");
        assert_eq!(project.milestones[1].event_id("p", 1), "m");
    }

    #[test]
    fn done_by_progress_or_status() {
        let mut project: Project = serde_json::from_str(r#"{"id":"p","progress":100}"#).unwrap();
        assert!(project.is_done());
        project.progress = 99.5;
        assert!(!project.is_done());
        project.status = ProjectStatus::Completed;
        assert!(project.is_done());
    }
}
