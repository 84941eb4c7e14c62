//! # Emporium Core
//!
//! Core types, domain entities, and error definitions for the Emporium
//! storefront backend. Every other crate in the workspace builds on these.

pub mod context;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod id;
pub mod listing;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use context::*;
pub use domain::*;
pub use error::*;
pub use i18n::*;
pub use id::*;
pub use listing::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
