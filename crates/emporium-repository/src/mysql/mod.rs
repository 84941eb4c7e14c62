//! MySQL repository implementations.

mod category_repository;
mod company_repository;
mod product_repository;
mod review_repository;
mod user_repository;

pub use category_repository::MySqlCategoryRepository;
pub use company_repository::MySqlCompanyRepository;
pub use product_repository::MySqlProductRepository;
pub use review_repository::MySqlReviewRepository;
pub use user_repository::MySqlUserRepository;

use emporium_core::{EmporiumError, MessageKey};

/// Error for an insert whose row cannot be read back.
fn missing_after_insert(entity: &str) -> EmporiumError {
    EmporiumError::internal(
        MessageKey::InternalError,
        format!("Failed to fetch inserted {}", entity),
    )
}

/// `LAST_INSERT_ID()` as a signed id.
fn inserted_id(result: &sqlx::mysql::MySqlQueryResult) -> Result<i64, EmporiumError> {
    i64::try_from(result.last_insert_id()).map_err(|_| {
        EmporiumError::internal(MessageKey::InternalError, "Inserted id out of range")
    })
}
