//! Day-map construction.
//!
//! Fuses four occurrence models into one date-keyed index:
//! - fixed dates (reviews, intros, day tasks, milestones)
//! - inclusive date spans (period tasks, deadline goals, projects, checklist phases)
//! - weekly recurrence over the visible range (recurring tasks, habits)
//! - the SRS chain (already expanded into projected reviews)
//!
//! Completion is never reported for a day after `today`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::date::{add_days, day_key, days_between, weekday_index};
use crate::events::{
    AgendaEntry, DayEvents, DayMap, GoalOccurrence, GoalPhaseEvent, GoalSpanEvent, HabitEvent,
    IntroEvent, MilestoneEvent, ProjectOccurrence, ProjectStage, ProjectedReview, ReviewEvent,
    SpanLabel, TaskOccurrence, ThemeStepEvent,
};
use crate::model::{
    Goal, GoalType, Project, Snapshot, SubthemeStatus, Task, TaskStatus, TaskType, Theme,
};

/// Inputs of one build.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams<'a> {
    pub snapshot: &'a Snapshot,
    pub projected: &'a [ProjectedReview],
    /// Days currently on screen; bounds recurring tasks and habits.
    pub visible_days: &'a [NaiveDate],
    /// As-of date for completion semantics.
    pub today: NaiveDate,
}

/// Build the day map for a snapshot.
pub fn build_events_map(params: &BuildParams<'_>) -> DayMap {
    let visible: BTreeSet<NaiveDate> = params.visible_days.iter().copied().collect();
    let mut builder = MapBuilder {
        map: DayMap::new(),
        today: params.today,
        visible,
    };

    for theme in &params.snapshot.themes {
        builder.add_theme(theme);
    }
    builder.add_projected(params.projected);
    for task in &params.snapshot.tasks {
        builder.add_task(task);
    }
    for goal in &params.snapshot.goals {
        builder.add_goal(goal);
    }
    for project in &params.snapshot.projects {
        builder.add_project(project);
    }

    debug!(days = builder.map.len(), today = %params.today, "built day map");
    builder.map
}

struct MapBuilder {
    map: DayMap,
    today: NaiveDate,
    visible: BTreeSet<NaiveDate>,
}

impl MapBuilder {
    fn day(&mut self, date: NaiveDate) -> &mut DayEvents {
        self.map.entry(date).or_default()
    }

    /// `done` only holds once the day has actually happened.
    fn settled(&self, day: NaiveDate, done: bool) -> bool {
        done && day <= self.today
    }

    /// Visible days within the optional `[lower, upper]` bounds.
    fn visible_within(&self, lower: Option<NaiveDate>, upper: Option<NaiveDate>) -> Vec<NaiveDate> {
        self.visible
            .iter()
            .copied()
            .filter(|day| lower.map_or(true, |l| *day >= l))
            .filter(|day| upper.map_or(true, |u| *day <= u))
            .collect()
    }

    fn add_theme(&mut self, theme: &Theme) {
        for subtheme in &theme.subthemes {
            if !theme.is_study() {
                if subtheme.is_module() {
                    continue;
                }
                if let Some(day) = subtheme.introduction_day() {
                    self.day(day).tasks.push(AgendaEntry::ThemeStep(ThemeStepEvent {
                        theme_id: theme.id.clone(),
                        theme_title: theme.title.clone(),
                        subtheme_id: subtheme.id.clone(),
                        title: subtheme.title.clone(),
                        color: theme.color.clone(),
                        completed: subtheme.status == SubthemeStatus::Completed,
                    }));
                }
                continue;
            }

            for review in &subtheme.reviews {
                let Some(day) = review.day() else {
                    trace!(subtheme = %subtheme.id, date = %review.date, "skipping review with bad date");
                    continue;
                };
                self.day(day).reviews.push(ReviewEvent {
                    theme_id: theme.id.clone(),
                    theme_title: theme.title.clone(),
                    subtheme_id: subtheme.id.clone(),
                    subtheme_title: subtheme.title.clone(),
                    color: theme.color.clone(),
                    number: review.number,
                    status: review.status,
                    priority: subtheme.priority.clone(),
                    duration_minutes: subtheme.duration_minutes,
                });
            }

            if let Some(day) = subtheme.introduction_day() {
                self.day(day).intros.push(IntroEvent {
                    theme_id: theme.id.clone(),
                    theme_title: theme.title.clone(),
                    subtheme_id: subtheme.id.clone(),
                    subtheme_title: subtheme.title.clone(),
                    color: theme.color.clone(),
                    priority: subtheme.priority.clone(),
                    duration_minutes: subtheme.duration_minutes,
                });
            }
        }
    }

    fn add_projected(&mut self, projected: &[ProjectedReview]) {
        for review in projected {
            self.day(review.date).projected.push(review.clone());
        }
    }

    fn add_task(&mut self, task: &Task) {
        match task.task_type {
            TaskType::Day => {
                let Some(day) = task.date.as_deref().and_then(day_key) else {
                    trace!(task = %task.id, "day task without a date");
                    return;
                };
                let done = task.status == TaskStatus::Completed || task.completed_on(day);
                let completed = self.settled(day, done);
                self.push_task(day, task, None, completed);
            }
            TaskType::Period => {
                let start = task.start_date.as_deref().and_then(day_key);
                let end = task.end_date.as_deref().and_then(day_key);
                let (Some(start), Some(end)) = (start, end) else {
                    trace!(task = %task.id, "period task without a full range");
                    return;
                };
                for day in days_between(start, end) {
                    let completed = self.settled(day, task.completed_on(day));
                    self.push_task(day, task, Some(SpanLabel::for_day(day, start, end)), completed);
                }
            }
            TaskType::Recurring => {
                let lower = [task.created_day(), task.start_date.as_deref().and_then(day_key)]
                    .into_iter()
                    .flatten()
                    .max();
                let upper = task.end_date.as_deref().and_then(day_key);
                for day in self.visible_within(lower, upper) {
                    if !task.recurrence.contains(&weekday_index(day)) {
                        continue;
                    }
                    let completed = self.settled(day, task.completed_on(day));
                    self.push_task(day, task, None, completed);
                }
            }
        }
    }

    fn push_task(&mut self, day: NaiveDate, task: &Task, label: Option<SpanLabel>, completed: bool) {
        self.day(day).tasks.push(AgendaEntry::Task(TaskOccurrence {
            task_id: task.id.clone(),
            title: task.title.clone(),
            task_type: task.task_type,
            label,
            completed,
        }));
    }

    fn add_goal(&mut self, goal: &Goal) {
        match goal.goal_type {
            GoalType::Checklist => self.add_checklist_phases(goal),
            GoalType::Habit => self.add_habit(goal),
            GoalType::Simple => self.add_deadline_goal(goal),
        }
    }

    fn add_checklist_phases(&mut self, goal: &Goal) {
        let Some(mut phase_start) = goal.anchor_day() else {
            trace!(goal = %goal.id, "checklist goal without a start");
            return;
        };
        let mut phase = 0;

        for (index, item) in goal.checklist.iter().enumerate() {
            let item_id = item.event_id(&goal.id, index);
            let Some(phase_end) = item.deadline.as_deref().and_then(day_key) else {
                trace!(goal = %goal.id, item = %item_id, "checklist item without deadline");
                continue;
            };
            if phase_end < phase_start {
                trace!(goal = %goal.id, item = %item_id, "checklist deadline before phase start");
                continue;
            }
            phase += 1;

            let days = days_between(phase_start, phase_end);
            let total_days = days.len() as u32;
            let checked = goal.distinct_completed_days(phase_start, phase_end) as f64;
            let phase_progress = (checked / f64::from(total_days) * 100.0).round().min(100.0) as u8;

            for (offset, day) in days.into_iter().enumerate() {
                let completed = self.settled(day, goal.completed_on(day));
                self.day(day).goals.push(GoalOccurrence::GoalPhase(GoalPhaseEvent {
                    goal_id: goal.id.clone(),
                    goal_title: goal.title.clone(),
                    item_id: item_id.clone(),
                    item_title: item.title.clone(),
                    item_completed: item.completed,
                    phase,
                    current_day: offset as u32 + 1,
                    total_days,
                    phase_progress,
                    completed,
                }));
            }

            phase_start = add_days(phase_end, 1);
        }
    }

    fn add_habit(&mut self, goal: &Goal) {
        for day in self.visible_within(goal.anchor_day(), goal.deadline_day()) {
            if !goal.recurrence.is_empty() && !goal.recurrence.contains(&weekday_index(day)) {
                continue;
            }
            let completed = self.settled(day, goal.completed_on(day));
            self.day(day).goals.push(GoalOccurrence::Habit(HabitEvent {
                goal_id: goal.id.clone(),
                title: goal.title.clone(),
                completed,
            }));
        }
    }

    fn add_deadline_goal(&mut self, goal: &Goal) {
        let Some(deadline) = goal.deadline_day() else {
            return;
        };
        let start = goal.start_day().filter(|start| *start <= deadline).unwrap_or(deadline);

        for day in days_between(start, deadline) {
            let done = if day == deadline {
                goal.progress >= 100.0
            } else {
                goal.completed_on(day)
            };
            let completed = self.settled(day, done);
            self.day(day).goals.push(GoalOccurrence::GoalSpan(GoalSpanEvent {
                goal_id: goal.id.clone(),
                title: goal.title.clone(),
                label: SpanLabel::for_day(day, start, deadline),
                completed,
            }));
        }
    }

    fn add_project(&mut self, project: &Project) {
        if let Some(deadline) = project.deadline_day() {
            let start = project
                .start_day()
                .filter(|start| *start <= deadline)
                .unwrap_or(deadline);
            for day in days_between(start, deadline) {
                let stage = ProjectStage::from(SpanLabel::for_day(day, start, deadline));
                let completed = day == deadline && self.settled(day, project.is_done());
                self.day(day).tasks.push(AgendaEntry::Project(ProjectOccurrence {
                    project_id: project.id.clone(),
                    title: project.title.clone(),
                    color: project.color.clone(),
                    stage,
                    completed,
                }));
            }
        }

        for (index, milestone) in project.milestones.iter().enumerate() {
            let Some(due) = milestone.due_date.as_deref().and_then(day_key) else {
                continue;
            };
            self.day(due).tasks.push(AgendaEntry::ProjectMilestone(MilestoneEvent {
                project_id: project.id.clone(),
                project_title: project.title.clone(),
                milestone_id: milestone.event_id(&project.id, index),
                title: milestone.title.clone(),
                completed: milestone.completed,
            }));
        }
    }
}
