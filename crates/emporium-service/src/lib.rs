//! # Emporium Service
//!
//! Business logic service layer for Emporium. Each service combines a cache
//! lookup, repository calls, and the ownership gate, and resolves error
//! messages for the caller's locale.

pub mod auth_service;
pub mod cache;
pub mod category_service;
pub mod company_service;
pub mod dto;
pub mod i18n;
pub mod product_service;
pub mod review_service;
pub mod user_service;

#[cfg(test)]
mod testing;

pub use auth_service::*;
pub use cache::*;
pub use category_service::*;
pub use company_service::*;
pub use dto::*;
pub use i18n::*;
pub use product_service::*;
pub use review_service::*;
pub use user_service::*;
