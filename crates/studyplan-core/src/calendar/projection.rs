//! Projected reviews for queued subthemes.
//!
//! Queued material across the whole dataset is serialized one start per day
//! in encounter order (theme order, then subtheme order), starting tomorrow.

use chrono::NaiveDate;

use crate::date::{add_days, day_key};
use crate::events::ProjectedReview;
use crate::model::Theme;
use crate::srs::generate_review_chain;

/// Project the review chains of every queued subtheme as of `today`.
///
/// Output keeps insertion order (theme, subtheme, review number); it is not
/// sorted by date.
pub fn project_reviews(themes: &[Theme], today: NaiveDate) -> Vec<ProjectedReview> {
    let mut projected = Vec::new();
    let mut queued_seen: i64 = 0;

    for theme in themes {
        for subtheme in theme.subthemes.iter().filter(|s| s.is_queued()) {
            queued_seen += 1;
            let start = add_days(today, queued_seen);

            for review in generate_review_chain(start) {
                let Some(date) = day_key(&review.date) else {
                    continue;
                };
                projected.push(ProjectedReview {
                    subtheme_id: subtheme.id.clone(),
                    subtheme_title: subtheme.title.clone(),
                    theme_title: theme.title.clone(),
                    date,
                    number: review.number,
                    description: format!("Revisão #{} (Prevista)", review.number),
                    color: theme.color.clone(),
                    is_projected: true,
                });
            }
        }
    }

    tracing::debug!(
        queued = queued_seen,
        projected = projected.len(),
        %today,
        "projected queued reviews"
    );
    projected
}
