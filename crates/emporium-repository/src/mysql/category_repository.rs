//! MySQL category repository implementation.

use super::{inserted_id, missing_after_insert};
use crate::{traits::CategoryRepository, DatabasePoolInterface};
use async_trait::async_trait;
use emporium_core::{Category, CategoryId, EmporiumResult};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL category repository implementation.
#[derive(Clone)]
pub struct MySqlCategoryRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCategoryRepository {
    /// Creates a new MySQL category repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    title: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId(row.id),
            title: row.title,
        }
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> EmporiumResult<Option<Category>> {
        debug!("Finding category by id: {}", id);

        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, title FROM categories WHERE id = ?")
            .bind(id.get())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Category::from))
    }

    async fn exists(&self, id: CategoryId) -> EmporiumResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM categories WHERE id = ? LIMIT 1")
            .bind(id.get())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn find_all(&self) -> EmporiumResult<Vec<Category>> {
        debug!("Listing categories");

        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, title FROM categories ORDER BY id ASC")
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn save(&self, title: &str) -> EmporiumResult<Category> {
        debug!("Saving new category: {}", title);

        let result = sqlx::query("INSERT INTO categories (title) VALUES (?)")
            .bind(title)
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(CategoryId(inserted_id(&result)?))
            .await?
            .ok_or_else(|| missing_after_insert("category"))
    }

    async fn update(&self, id: CategoryId, title: &str) -> EmporiumResult<bool> {
        debug!("Updating category: {}", id);

        let result = sqlx::query(
            "UPDATE categories SET title = ?, updated_at = CURRENT_TIMESTAMP(6) WHERE id = ?",
        )
        .bind(title)
        .bind(id.get())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CategoryId) -> EmporiumResult<bool> {
        debug!("Deleting category: {}", id);

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.get())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
