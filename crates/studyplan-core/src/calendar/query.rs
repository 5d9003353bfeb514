//! Point queries over a built day map.
//!
//! The map may be one build behind the live data. Every answer is filtered
//! against the live entity IDs, so a deletion shows up on the next query
//! without waiting for a rebuild.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::events::{AgendaEntry, DayEvents, DayMap};
use crate::model::{LiveIds, Snapshot};

/// A day map paired with the entity IDs that are alive right now.
pub struct DayQuery {
    map: Arc<DayMap>,
    live: LiveIds,
}

impl DayQuery {
    /// `live` is the current snapshot, not necessarily the one `map` was
    /// built from.
    pub fn new(map: Arc<DayMap>, live: &Snapshot) -> Self {
        Self {
            map,
            live: live.live_ids(),
        }
    }

    /// Events on `date`, minus anything whose entity no longer exists.
    pub fn events_for_day(&self, date: NaiveDate) -> DayEvents {
        let mut events = self.map.get(&date).cloned().unwrap_or_default();
        retain_live(&mut events, &self.live);
        events
    }
}

/// Drop every event whose backing subtheme, task, goal, or project is gone.
pub fn retain_live(events: &mut DayEvents, live: &LiveIds) {
    events.reviews.retain(|e| live.subthemes.contains(&e.subtheme_id));
    events.intros.retain(|e| live.subthemes.contains(&e.subtheme_id));
    events.projected.retain(|e| live.subthemes.contains(&e.subtheme_id));
    events.tasks.retain(|entry| match entry {
        AgendaEntry::Task(t) => live.tasks.contains(&t.task_id),
        AgendaEntry::ThemeStep(s) => live.subthemes.contains(&s.subtheme_id),
        AgendaEntry::Project(p) => live.projects.contains(&p.project_id),
        AgendaEntry::ProjectMilestone(m) => live.projects.contains(&m.project_id),
    });
    events.goals.retain(|g| live.goals.contains(g.goal_id()));
}
