//! Review entity.

use crate::{ProductId, ProductSummary, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A product review. Only its author may change or remove it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Returns the authoring user.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.user_id
    }
}

/// A review row joined with the product it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithProduct {
    #[serde(flatten)]
    pub review: Review,
    pub product: ProductSummary,
}

/// Data for inserting a review.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: String,
}

/// Review fields an author may edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewChanges {
    pub rating: u8,
    pub comment: String,
}
