//! MySQL company repository implementation.

use super::{inserted_id, missing_after_insert};
use crate::{traits::CompanyRepository, DatabasePoolInterface};
use async_trait::async_trait;
use emporium_core::{Company, CompanyId, EmporiumResult, NewCompany, Page, PageRequest, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL company repository implementation.
#[derive(Clone)]
pub struct MySqlCompanyRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCompanyRepository {
    /// Creates a new MySQL company repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompanyRow {
    id: i64,
    name: String,
    user_id: i64,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId(row.id),
            name: row.name,
            user_id: UserId(row.user_id),
        }
    }
}

#[async_trait]
impl CompanyRepository for MySqlCompanyRepository {
    async fn find_by_id(&self, id: CompanyId) -> EmporiumResult<Option<Company>> {
        debug!("Finding company by id: {}", id);

        let row = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, user_id FROM companies WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Company::from))
    }

    async fn find_all(&self, page: PageRequest) -> EmporiumResult<Page<Company>> {
        debug!("Finding all companies, page: {}, size: {}", page.page, page.size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(self.pool.inner())
            .await?;

        let rows = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, name, user_id FROM companies ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let companies = rows.into_iter().map(Company::from).collect();
        Ok(Page::new(companies, page, total as u64))
    }

    async fn save(&self, company: &NewCompany) -> EmporiumResult<Company> {
        debug!("Saving new company: {}", company.name);

        let result = sqlx::query("INSERT INTO companies (name, user_id) VALUES (?, ?)")
            .bind(&company.name)
            .bind(company.user_id.get())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(CompanyId(inserted_id(&result)?))
            .await?
            .ok_or_else(|| missing_after_insert("company"))
    }

    async fn update(&self, id: CompanyId, name: &str) -> EmporiumResult<bool> {
        debug!("Updating company: {}", id);

        let result = sqlx::query(
            "UPDATE companies SET name = ?, updated_at = CURRENT_TIMESTAMP(6) WHERE id = ?",
        )
        .bind(name)
        .bind(id.get())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CompanyId) -> EmporiumResult<bool> {
        debug!("Deleting company: {}", id);

        let result = sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(id.get())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
