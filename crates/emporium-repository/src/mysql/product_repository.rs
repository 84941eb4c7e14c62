//! MySQL product repository implementation.

use super::{inserted_id, missing_after_insert};
use crate::listing::{product_count_query, product_page_query, PRODUCT_COLUMNS};
use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emporium_core::{
    CategoryId, CompanyId, EmporiumResult, NewProduct, Page, PageRequest, Product, ProductId,
    ProductQuery,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL product repository implementation.
#[derive(Clone)]
pub struct MySqlProductRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlProductRepository {
    /// Creates a new MySQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    stock: i32,
    category_id: i64,
    company_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            category_id: CategoryId(row.category_id),
            company_id: CompanyId(row.company_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products p WHERE p.id = ?",
            PRODUCT_COLUMNS
        ))
        .bind(id.get())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn exists(&self, id: ProductId) -> EmporiumResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ? LIMIT 1")
            .bind(id.get())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn find_page(&self, query: &ProductQuery) -> EmporiumResult<Page<Product>> {
        debug!(
            "Listing products, ordering: {:?}, page: {}, size: {}",
            query.ordering(),
            query.page.page,
            query.page.size
        );

        let total: i64 = product_count_query(query)
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let rows: Vec<ProductRow> = product_page_query(query)
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        let products = rows.into_iter().map(Product::from).collect();
        Ok(Page::new(products, query.page, total as u64))
    }

    async fn find_by_company(
        &self,
        company_id: CompanyId,
        page: PageRequest,
    ) -> EmporiumResult<Page<Product>> {
        debug!("Listing products of company: {}", company_id);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE company_id = ?")
            .bind(company_id.get())
            .fetch_one(self.pool.inner())
            .await?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products p WHERE p.company_id = ? ORDER BY p.id ASC LIMIT ? OFFSET ?",
            PRODUCT_COLUMNS
        ))
        .bind(company_id.get())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let products = rows.into_iter().map(Product::from).collect();
        Ok(Page::new(products, page, total as u64))
    }

    async fn save(&self, product: &NewProduct) -> EmporiumResult<Product> {
        debug!("Saving new product: {}", product.name);

        // MySQL doesn't support RETURNING, so insert then select
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, stock, category_id, company_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id.get())
        .bind(product.company_id.get())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(ProductId(inserted_id(&result)?))
            .await?
            .ok_or_else(|| missing_after_insert("product"))
    }

    async fn update(&self, id: ProductId, product: &NewProduct) -> EmporiumResult<bool> {
        debug!("Updating product: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, stock = ?, category_id = ?,
                company_id = ?, updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id.get())
        .bind(product.company_id.get())
        .bind(id.get())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.get())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
