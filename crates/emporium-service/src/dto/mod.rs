//! Data Transfer Objects for the service layer.

mod auth_dto;
mod catalog_dto;
mod product_dto;
mod review_dto;
mod user_dto;

pub use auth_dto::*;
pub use catalog_dto::*;
pub use product_dto::*;
pub use review_dto::*;
pub use user_dto::*;
