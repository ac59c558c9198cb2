//! Hospital reviews left by authenticated callers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating.
pub const RATING_MAX: u8 = 5;

/// Validation errors for review fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// The rating fell outside 1 to 5.
    RatingOutOfRange { value: i64 },
    /// The reviewer name was blank.
    EmptyReviewer,
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RatingOutOfRange { value } => write!(
                f,
                "rating must be between {RATING_MIN} and {RATING_MAX} (got {value})"
            ),
            Self::EmptyReviewer => write!(f, "reviewer name must not be empty"),
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Accept ratings from [`RATING_MIN`] to [`RATING_MAX`].
    pub fn new(value: i64) -> Result<Self, ReviewValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (RATING_MIN..=RATING_MAX).contains(v))
            .map(Self)
            .ok_or(ReviewValidationError::RatingOutOfRange { value })
    }

    /// Numeric rating.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// A single review. The reviewer name always comes from the caller's token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    user_name: String,
    rating: Rating,
    comment: String,
    date: DateTime<Utc>,
}

impl Review {
    /// Build a review; the reviewer name must not be blank.
    pub fn new(
        user_name: impl Into<String>,
        rating: Rating,
        comment: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Result<Self, ReviewValidationError> {
        let user_name = user_name.into();
        if user_name.trim().is_empty() {
            return Err(ReviewValidationError::EmptyReviewer);
        }
        Ok(Self {
            user_name,
            rating,
            comment: comment.into(),
            date,
        })
    }

    /// Reviewer name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Star rating.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Free-text comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// When the review was posted.
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
