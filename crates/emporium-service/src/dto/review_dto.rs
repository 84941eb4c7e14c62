//! Review DTOs.

use chrono::{DateTime, Utc};
use emporium_core::{
    CategoryId, ProductId, ProductSummary, Review, ReviewChanges, ReviewId, ReviewWithProduct,
    UserId,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to review a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: ProductId,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[validate(length(max = 2000))]
    pub comment: String,
}

/// Request to change a review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[validate(length(max = 2000))]
    pub comment: String,
}

impl From<UpdateReviewRequest> for ReviewChanges {
    fn from(request: UpdateReviewRequest) -> Self {
        Self {
            rating: request.rating,
            comment: request.comment,
        }
    }
}

/// Product fields embedded in a review listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedProduct {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category_id: CategoryId,
}

impl From<ProductSummary> for ReviewedProduct {
    fn from(product: ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            category_id: product.category_id,
        }
    }
}

/// Review response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product: Option<ReviewedProduct>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            product_id: review.product_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
            product: None,
        }
    }
}

impl From<ReviewWithProduct> for ReviewResponse {
    fn from(row: ReviewWithProduct) -> Self {
        Self {
            product: Some(row.product.into()),
            ..Self::from(row.review)
        }
    }
}
