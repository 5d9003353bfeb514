//! Study themes, their subthemes, and review records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{day_key, format_day_key};
use crate::srs::generate_review_chain;

/// What kind of timeline a theme lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    /// Study material reviewed on the SRS chain
    #[default]
    Study,
    /// Subthemes are project steps placed on their introduction date
    Project,
}

/// A study topic grouping subthemes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: ThemeCategory,
    #[serde(default)]
    pub subthemes: Vec<Subtheme>,
}

impl Theme {
    pub fn is_study(&self) -> bool {
        self.category != ThemeCategory::Project
    }
}

/// Lifecycle of a subtheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubthemeStatus {
    #[default]
    Active,
    Completed,
    /// Not started yet; has no reviews until activated
    Queue,
}

/// Difficulty tag. `Module` marks a grouping parent inside project themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Module,
}

/// A sub-item of a theme under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtheme {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: SubthemeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction_date: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// Error returned by subtheme lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubthemeTransitionError {
    #[error("subtheme is {0:?}; only queued subthemes can be activated")]
    NotQueued(SubthemeStatus),
    #[error("subtheme has no review #{0}")]
    UnknownReview(u8),
}

impl Subtheme {
    pub fn is_queued(&self) -> bool {
        self.status == SubthemeStatus::Queue
    }

    pub fn is_module(&self) -> bool {
        self.difficulty == Some(Difficulty::Module)
    }

    /// Start a queued subtheme on `on`: it becomes active, is introduced that
    /// day, and receives the full review chain.
    pub fn activate(&mut self, on: NaiveDate) -> Result<(), SubthemeTransitionError> {
        if !self.is_queued() {
            return Err(SubthemeTransitionError::NotQueued(self.status));
        }
        self.status = SubthemeStatus::Active;
        self.introduction_date = Some(format_day_key(on));
        self.reviews = generate_review_chain(on).to_vec();
        Ok(())
    }

    /// Mark review `number` completed. The subtheme itself completes once no
    /// pending review is left.
    pub fn complete_review(&mut self, number: u8) -> Result<(), SubthemeTransitionError> {
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.number == number)
            .ok_or(SubthemeTransitionError::UnknownReview(number))?;
        review.status = ReviewStatus::Completed;

        if self.reviews.iter().all(|r| r.status == ReviewStatus::Completed) {
            self.status = SubthemeStatus::Completed;
        }
        Ok(())
    }

    /// The earliest review still pending, if any.
    pub fn next_pending_review(&self) -> Option<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Pending)
            .min_by_key(|r| r.number)
    }

    pub fn introduction_day(&self) -> Option<NaiveDate> {
        self.introduction_date.as_deref().and_then(day_key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Completed,
}

/// One step of a subtheme's review chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub number: u8,
    pub date: String,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl Review {
    pub fn day(&self) -> Option<NaiveDate> {
        day_key(&self.date)
    }
}
