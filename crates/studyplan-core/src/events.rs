//! Calendar event types.
//!
//! Every event category is a closed variant carrying only the fields that
//! matter to it. Serialized with a `kind` tag so consumers can dispatch
//! without probing optional fields.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ReviewStatus, TaskType};

/// Date-keyed index of events. Days without events are absent.
pub type DayMap = BTreeMap<NaiveDate, DayEvents>;

/// Position of a day inside a start..deadline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanLabel {
    #[serde(rename = "Início")]
    Start,
    #[serde(rename = "Em andamento")]
    InProgress,
    #[serde(rename = "Prazo")]
    Deadline,
}

impl SpanLabel {
    /// Label for `day` in `[start, end]`. The deadline wins on one-day spans.
    pub fn for_day(day: NaiveDate, start: NaiveDate, end: NaiveDate) -> Self {
        if day == end {
            SpanLabel::Deadline
        } else if day == start {
            SpanLabel::Start
        } else {
            SpanLabel::InProgress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpanLabel::Start => "Início",
            SpanLabel::InProgress => "Em andamento",
            SpanLabel::Deadline => "Prazo",
        }
    }
}

/// A concrete review of an active study subtheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    pub theme_id: String,
    pub theme_title: String,
    pub subtheme_id: String,
    pub subtheme_title: String,
    pub color: String,
    pub number: u8,
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// First contact with a study subtheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroEvent {
    pub theme_id: String,
    pub theme_title: String,
    pub subtheme_id: String,
    pub subtheme_title: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// Synthetic future review of a queued subtheme. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedReview {
    pub subtheme_id: String,
    pub subtheme_title: String,
    pub theme_title: String,
    pub date: NaiveDate,
    pub number: u8,
    pub description: String,
    pub color: String,
    pub is_projected: bool,
}

/// One occurrence of a task on a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOccurrence {
    pub task_id: String,
    pub title: String,
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SpanLabel>,
    pub completed: bool,
}

/// A subtheme of a project-category theme, placed on its introduction date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStepEvent {
    pub theme_id: String,
    pub theme_title: String,
    pub subtheme_id: String,
    pub title: String,
    pub color: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStage {
    ProjectStart,
    ProjectStep,
    ProjectDeadline,
}

impl From<SpanLabel> for ProjectStage {
    fn from(label: SpanLabel) -> Self {
        match label {
            SpanLabel::Start => ProjectStage::ProjectStart,
            SpanLabel::InProgress => ProjectStage::ProjectStep,
            SpanLabel::Deadline => ProjectStage::ProjectDeadline,
        }
    }
}

/// One day of a project's start..deadline span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOccurrence {
    pub project_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub stage: ProjectStage,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneEvent {
    pub project_id: String,
    pub project_title: String,
    pub milestone_id: String,
    pub title: String,
    pub completed: bool,
}

/// Entries of the `tasks` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AgendaEntry {
    Task(TaskOccurrence),
    /// A step of a project-category theme.
    #[serde(rename = "project-step")]
    ThemeStep(ThemeStepEvent),
    Project(ProjectOccurrence),
    ProjectMilestone(MilestoneEvent),
}

/// One day inside a checklist phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPhaseEvent {
    pub goal_id: String,
    pub goal_title: String,
    pub item_id: String,
    pub item_title: String,
    pub item_completed: bool,
    /// 1-based index among scheduled phases.
    pub phase: usize,
    /// 1-based position of the day inside the phase.
    pub current_day: u32,
    pub total_days: u32,
    /// Checked days over phase length, as a percentage capped at 100.
    pub phase_progress: u8,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEvent {
    pub goal_id: String,
    pub title: String,
    pub completed: bool,
}

/// One day of a deadline goal, either inside its span or the lone deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSpanEvent {
    pub goal_id: String,
    pub title: String,
    pub label: SpanLabel,
    pub completed: bool,
}

/// Entries of the `goals` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GoalOccurrence {
    GoalPhase(GoalPhaseEvent),
    Habit(HabitEvent),
    GoalSpan(GoalSpanEvent),
}

impl GoalOccurrence {
    pub fn goal_id(&self) -> &str {
        match self {
            GoalOccurrence::GoalPhase(e) => &e.goal_id,
            GoalOccurrence::Habit(e) => &e.goal_id,
            GoalOccurrence::GoalSpan(e) => &e.goal_id,
        }
    }
}

/// Everything happening on one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayEvents {
    pub reviews: Vec<ReviewEvent>,
    pub intros: Vec<IntroEvent>,
    pub projected: Vec<ProjectedReview>,
    pub tasks: Vec<AgendaEntry>,
    pub goals: Vec<GoalOccurrence>,
}

impl DayEvents {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
            + self.intros.len()
            + self.projected.len()
            + self.tasks.len()
            + self.goals.len()
    }
}
