//! Fixed spaced-repetition review chain.
//!
//! Offsets are constants, not a function of recall quality: short early gaps
//! for consolidation, then widening gaps for retention.

use chrono::NaiveDate;

use crate::date::{add_days, format_day_key};
use crate::model::{Review, ReviewStatus};

/// Day offsets from the start date for reviews #1..#5.
pub const REVIEW_OFFSETS_DAYS: [i64; 5] = [1, 2, 7, 15, 30];

/// Number of reviews in a chain.
pub const CHAIN_LENGTH: usize = REVIEW_OFFSETS_DAYS.len();

/// Build the pending review chain for material started on `start`.
pub fn generate_review_chain(start: NaiveDate) -> [Review; CHAIN_LENGTH] {
    std::array::from_fn(|i| Review {
        number: (i + 1) as u8,
        date: format_day_key(add_days(start, REVIEW_OFFSETS_DAYS[i])),
        status: ReviewStatus::Pending,
    })
}
