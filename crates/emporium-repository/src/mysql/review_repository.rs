//! MySQL review repository implementation.

use super::{inserted_id, missing_after_insert};
use crate::listing::{review_count_query, review_page_query};
use crate::{traits::ReviewRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emporium_core::{
    CategoryId, EmporiumResult, NewReview, Page, ProductId, ProductSummary, Review, ReviewChanges,
    ReviewId, ReviewQuery, ReviewWithProduct, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL review repository implementation.
#[derive(Clone)]
pub struct MySqlReviewRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlReviewRepository {
    /// Creates a new MySQL review repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: i64,
    product_id: i64,
    user_id: i64,
    rating: u8,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId(row.id),
            product_id: ProductId(row.product_id),
            user_id: UserId(row.user_id),
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A review joined with the product columns the listing exposes.
#[derive(Debug, FromRow)]
struct ReviewProductRow {
    #[sqlx(flatten)]
    review: ReviewRow,
    product_name: String,
    product_price: f64,
    product_category_id: i64,
}

impl From<ReviewProductRow> for ReviewWithProduct {
    fn from(row: ReviewProductRow) -> Self {
        let product = ProductSummary {
            id: ProductId(row.review.product_id),
            name: row.product_name,
            price: row.product_price,
            category_id: CategoryId(row.product_category_id),
        };
        Self {
            review: Review::from(row.review),
            product,
        }
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> EmporiumResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, product_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Review::from))
    }

    async fn find_page(&self, query: &ReviewQuery) -> EmporiumResult<Page<ReviewWithProduct>> {
        debug!(
            "Listing reviews of product: {}, page: {}, size: {}",
            query.product_id, query.page.page, query.page.size
        );

        let total: i64 = review_count_query(query)
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let rows: Vec<ReviewProductRow> = review_page_query(query)
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        let reviews = rows.into_iter().map(ReviewWithProduct::from).collect();
        Ok(Page::new(reviews, query.page, total as u64))
    }

    async fn save(&self, review: &NewReview) -> EmporiumResult<Review> {
        debug!("Saving review of product: {}", review.product_id);

        let result = sqlx::query(
            "INSERT INTO reviews (product_id, user_id, rating, comment) VALUES (?, ?, ?, ?)",
        )
        .bind(review.product_id.get())
        .bind(review.user_id.get())
        .bind(review.rating)
        .bind(&review.comment)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(ReviewId(inserted_id(&result)?))
            .await?
            .ok_or_else(|| missing_after_insert("review"))
    }

    async fn update(&self, id: ReviewId, changes: &ReviewChanges) -> EmporiumResult<bool> {
        debug!("Updating review: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET rating = ?, comment = ?, updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ?
            "#,
        )
        .bind(changes.rating)
        .bind(&changes.comment)
        .bind(id.get())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ReviewId) -> EmporiumResult<bool> {
        debug!("Deleting review: {}", id);

        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.get())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
