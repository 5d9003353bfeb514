//! Calendar aggregation: projected reviews, day-map building, caching, and
//! per-day queries.

pub mod builder;
pub mod cache;
pub mod engine;
pub mod projection;
pub mod query;

pub use builder::{build_events_map, BuildParams};
pub use cache::{content_hash, EventMapCache};
pub use engine::CalendarEngine;
pub use projection::project_reviews;
pub use query::{retain_live, DayQuery};
