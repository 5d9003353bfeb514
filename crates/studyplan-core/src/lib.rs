//! # Studyplan Core Library
//!
//! Calendar engine for a personal study planner. Given themes (study topics
//! whose subthemes are reviewed on a spaced-repetition chain), tasks, goals,
//! and projects, it answers "what happens on this day?" and previews review
//! dates for material that has not been started yet.
//!
//! ## Architecture
//!
//! - **Dates**: local calendar-day parsing; `yyyy-MM-dd` never shifts through UTC
//! - **SRS**: fixed +1/+2/+7/+15/+30 day review chain
//! - **Projection**: queued subthemes staggered one start per day
//! - **Calendar**: day-map builder, single-slot content-addressed cache, and
//!   a query façade that filters out deleted entities
//!
//! The engine is a pure projection over caller-supplied data. The as-of date
//! is always a parameter; nothing inside reads the clock.
//!
//! ## Key Components
//!
//! - [`CalendarEngine`]: projection + cached build + day queries
//! - [`EventMapCache`]: injectable memoization of the day map
//! - [`Snapshot`]: the four entity collections
//! - [`Config`]: application configuration

pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod events;
pub mod model;
pub mod srs;

pub use calendar::{
    build_events_map, content_hash, project_reviews, BuildParams, CalendarEngine, DayQuery,
    EventMapCache,
};
pub use config::Config;
pub use date::{day_key, format_day_key, month_view_days, parse_local_date, today_local, WeekStart};
pub use error::{ConfigError, CoreError, SnapshotError};
pub use events::{AgendaEntry, DayEvents, DayMap, GoalOccurrence, ProjectedReview, SpanLabel};
pub use model::{Goal, LiveIds, Project, Snapshot, Subtheme, Task, Theme};
pub use srs::{generate_review_chain, REVIEW_OFFSETS_DAYS};
