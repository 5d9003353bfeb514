//! Tasks: single-day, date-ranged, or weekly recurring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::day_key;

/// Occurrence model of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Occurs once on `date`
    #[default]
    Day,
    /// Occurs on every day of `[startDate, endDate]`
    Period,
    /// Occurs on visible days whose weekday is in `recurrence`
    Recurring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Weekdays, `0 = Sunday ... 6 = Saturday`.
    #[serde(default)]
    pub recurrence: Vec<u8>,
    #[serde(default)]
    pub completion_history: Vec<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Task {
    /// Whether `completion_history` holds an entry for `day`.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        history_contains(&self.completion_history, day)
    }

    pub fn created_day(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(day_key)
    }
}

/// History entries may carry a time component; match on the day prefix.
pub(crate) fn history_contains(history: &[String], day: NaiveDate) -> bool {
    history.iter().any(|entry| day_key(entry) == Some(day))
}
