//! Goals: simple deadlines, phased checklists, and habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::history_contains;
use crate::date::day_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Simple,
    /// Items with deadlines split the goal into sequential phases
    Checklist,
    /// Recurs on weekdays like a recurring task
    Habit,
}

/// One checklist entry; its deadline closes a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// May be absent in collaborator data; see [`ChecklistItem::event_id`].
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub goal_type: GoalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Weekdays, `0 = Sunday ... 6 = Saturday`. Empty means every day.
    #[serde(default)]
    pub recurrence: Vec<u8>,
    #[serde(default)]
    pub completion_history: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Percent complete, 0..=100. Collaborators may send fractional values.
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ChecklistItem {
    /// The item's own id, or `<goal>-item-<n>` (1-based position in the
    /// checklist) when it has none.
    pub fn event_id(&self, goal_id: &str, index: usize) -> String {
        if self.id.is_empty() {
            format!("{goal_id}-item-{}", index + 1)
        } else {
            self.id.clone()
        }
    }
}

impl Goal {
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        history_contains(&self.completion_history, day)
    }

    pub fn deadline_day(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(day_key)
    }

    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(day_key)
    }

    pub fn created_day(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(day_key)
    }

    /// Where the goal's timeline begins: `startDate`, else creation date.
    pub fn anchor_day(&self) -> Option<NaiveDate> {
        self.start_day().or_else(|| self.created_day())
    }

    /// Distinct days in `completion_history` that fall within `[start, end]`.
    pub fn distinct_completed_days(&self, start: NaiveDate, end: NaiveDate) -> usize {
        let mut days: Vec<NaiveDate> = self
            .completion_history
            .iter()
            .filter_map(|entry| day_key(entry))
            .filter(|day| *day >= start && *day <= end)
            .collect();
        days.sort_unstable();
        days.dedup();
        days.len()
    }
}
