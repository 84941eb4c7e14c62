//! Domain entities for the storefront: catalog, reviews, companies, accounts.

pub mod category;
pub mod company;
pub mod product;
pub mod review;
pub mod role;
pub mod user;

pub use category::*;
pub use company::*;
pub use product::*;
pub use review::*;
pub use role::*;
pub use user::*;
