//! Single-slot, content-addressed cache for the day map.
//!
//! The key is a SHA-256 digest over the serialized inputs plus the visible
//! range bounds and the as-of date. The as-of date in the key forces at least
//! one rebuild per calendar day even when no entity changed.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::builder::{build_events_map, BuildParams};
use crate::events::{DayMap, ProjectedReview};
use crate::model::{Goal, Project, Task, Theme};

#[derive(Serialize)]
struct HashInput<'a> {
    themes: &'a [Theme],
    tasks: &'a [Task],
    goals: &'a [Goal],
    projects: &'a [Project],
    projected: &'a [ProjectedReview],
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    today: NaiveDate,
}

/// Digest of everything a build depends on, hex encoded.
///
/// Returns `None` if the inputs cannot be serialized; such builds are not
/// cached.
pub fn content_hash(params: &BuildParams<'_>) -> Option<String> {
    let input = HashInput {
        themes: &params.snapshot.themes,
        tasks: &params.snapshot.tasks,
        goals: &params.snapshot.goals,
        projects: &params.snapshot.projects,
        projected: params.projected,
        range_start: params.visible_days.iter().min().copied(),
        range_end: params.visible_days.iter().max().copied(),
        today: params.today,
    };
    let bytes = match serde_json::to_vec(&input) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "could not serialize build inputs for hashing");
            return None;
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Some(hex::encode(hasher.finalize()))
}

struct CachedBuild {
    key: String,
    map: Arc<DayMap>,
}

/// Memoizes the most recent build. A different key evicts it.
///
/// Owned by the caller's composition root; share it across threads behind a
/// `Mutex` if needed.
#[derive(Default)]
pub struct EventMapCache {
    slot: Option<CachedBuild>,
    builds: u64,
}

impl EventMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached map when the inputs hash to the stored key,
    /// otherwise build, store, and return a fresh one.
    pub fn get_or_build(&mut self, params: &BuildParams<'_>) -> Arc<DayMap> {
        let key = content_hash(params);

        if let (Some(key), Some(slot)) = (key.as_deref(), self.slot.as_ref()) {
            if slot.key == key {
                debug!(key = &key[..12], "day map cache hit");
                return Arc::clone(&slot.map);
            }
        }

        let map = Arc::new(build_events_map(params));
        self.builds += 1;
        debug!(builds = self.builds, days = map.len(), "day map cache miss; rebuilt");

        self.slot = key.map(|key| CachedBuild {
            key,
            map: Arc::clone(&map),
        });
        map
    }

    /// How many times the builder has run through this cache.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    /// Key of the stored build, if any.
    pub fn current_key(&self) -> Option<&str> {
        self.slot.as_ref().map(|slot| slot.key.as_str())
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::day_key;
    use crate::model::{Snapshot, TaskType};

    fn d(s: &str) -> NaiveDate {
        day_key(s).unwrap()
    }

    fn snapshot(title: &str) -> Snapshot {
        let json = format!(
            r#"{{"tasks":[{{"id":"t1","title":"{title}","type":"day","date":"2024-06-03"}}]}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn params<'a>(snapshot: &'a Snapshot, visible: &'a [NaiveDate], today: &str) -> BuildParams<'a> {
        BuildParams {
            snapshot,
            projected: &[],
            visible_days: visible,
            today: d(today),
        }
    }

    #[test]
    fn deep_equal_inputs_hit() {
        let mut cache = EventMapCache::new();
        let a = snapshot("Read");
        let b = snapshot("Read");
        let visible = [d("2024-06-01"), d("2024-06-30")];

        let first = cache.get_or_build(&params(&a, &visible, "2024-06-01"));
        let second = cache.get_or_build(&params(&b, &visible, "2024-06-01"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn any_field_change_rebuilds() {
        let mut cache = EventMapCache::new();
        let visible = [d("2024-06-01")];
        let a = snapshot("Read");
        let mut b = snapshot("Read");
        b.tasks[0].task_type = TaskType::Period;

        let first = cache.get_or_build(&params(&a, &visible, "2024-06-01"));
        let second = cache.get_or_build(&params(&b, &visible, "2024-06-01"));

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.builds(), 2);
    }

    #[test]
    fn new_day_invalidates() {
        let mut cache = EventMapCache::new();
        let s = snapshot("Read");
        let visible = [d("2024-06-01")];

        cache.get_or_build(&params(&s, &visible, "2024-06-01"));
        let key_one = cache.current_key().map(str::to_owned);
        cache.get_or_build(&params(&s, &visible, "2024-06-02"));

        assert_ne!(cache.current_key().map(str::to_owned), key_one);
        assert_eq!(cache.builds(), 2);
    }

    #[test]
    fn visible_range_is_part_of_the_key() {
        let s = snapshot("Read");
        let june = [d("2024-06-01"), d("2024-06-30")];
        let july = [d("2024-07-01"), d("2024-07-31")];
        assert_ne!(
            content_hash(&params(&s, &june, "2024-06-01")),
            content_hash(&params(&s, &july, "2024-06-01"))
        );
        // Only the bounds matter, not the order of the days.
        let reversed = [d("2024-06-30"), d("2024-06-01")];
        assert_eq!(
            content_hash(&params(&s, &june, "2024-06-01")),
            content_hash(&params(&s, &reversed, "2024-06-01"))
        );
    }

    #[test]
    fn single_slot_evicts_previous_entry() {
        let mut cache = EventMapCache::new();
        let visible = [d("2024-06-01")];
        let a = snapshot("A");
        let b = snapshot("B");

        cache.get_or_build(&params(&a, &visible, "2024-06-01"));
        cache.get_or_build(&params(&b, &visible, "2024-06-01"));
        cache.get_or_build(&params(&a, &visible, "2024-06-01"));
        assert_eq!(cache.builds(), 3);

        cache.clear();
        assert!(cache.current_key().is_none());
    }
}
