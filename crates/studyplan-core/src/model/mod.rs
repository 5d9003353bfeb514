//! Entity types supplied by the data layer.
//!
//! Field names serialize in camelCase to match the collaborators' JSON.

pub mod goal;
pub mod project;
pub mod snapshot;
pub mod task;
pub mod theme;

pub use goal::{ChecklistItem, Goal, GoalType};
pub use project::{Milestone, Project, ProjectStatus};
pub use snapshot::{LiveIds, Snapshot};
pub use task::{Task, TaskStatus, TaskType};
pub use theme::{
    Difficulty, Review, ReviewStatus, Subtheme, SubthemeStatus, SubthemeTransitionError, Theme,
    ThemeCategory,
};
