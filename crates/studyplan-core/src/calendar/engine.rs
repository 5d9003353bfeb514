//! Composition root for the calendar: projection, cached build, and queries.

use std::sync::Arc;

use chrono::NaiveDate;

use super::builder::BuildParams;
use super::cache::EventMapCache;
use super::projection::project_reviews;
use super::query::DayQuery;
use crate::events::{DayEvents, DayMap, ProjectedReview};
use crate::model::Snapshot;

/// Owns one cache and the outputs of the last refresh.
///
/// Independent engines never share cached state.
#[derive(Default)]
pub struct CalendarEngine {
    cache: EventMapCache,
    map: Arc<DayMap>,
    projected: Vec<ProjectedReview>,
}

impl CalendarEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project queued reviews and (re)build the day map as of `today`.
    ///
    /// Rebuilds only when the snapshot, the visible range, or `today` changed
    /// since the last call.
    pub fn refresh(
        &mut self,
        snapshot: &Snapshot,
        visible_days: &[NaiveDate],
        today: NaiveDate,
    ) -> Arc<DayMap> {
        self.projected = project_reviews(&snapshot.themes, today);
        self.map = self.cache.get_or_build(&BuildParams {
            snapshot,
            projected: &self.projected,
            visible_days,
            today,
        });
        Arc::clone(&self.map)
    }

    /// Events on `date` from the last refreshed map, filtered against `live`.
    pub fn events_for_day(&self, live: &Snapshot, date: NaiveDate) -> DayEvents {
        DayQuery::new(Arc::clone(&self.map), live).events_for_day(date)
    }

    /// Projected reviews from the last refresh, in insertion order.
    pub fn projected_reviews(&self) -> &[ProjectedReview] {
        &self.projected
    }

    pub fn day_map(&self) -> Arc<DayMap> {
        Arc::clone(&self.map)
    }

    pub fn builds(&self) -> u64 {
        self.cache.builds()
    }
}
