//! # Emporium Repository
//!
//! Data access for the storefront:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>   (domain interface, traits.rs)
//! MySqlProductRepository            (mysql/)
//!   ↓  listing::product_page_query  (dynamic SQL for listings)
//! MySQL
//! ```
//!
//! Listing statements are assembled with [`sqlx::QueryBuilder`] in
//! [`listing`]; every other statement is static SQL.

pub mod listing;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
