//! Custom Axum extractors.

mod caller;
mod pagination;
mod query;

pub use caller::*;
pub use pagination::*;
pub use query::*;
