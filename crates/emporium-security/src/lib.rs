//! # Emporium Security
//!
//! JWT authentication, password hashing, and the ownership gate that
//! guards product, company, review, and account mutations.

pub mod access;
pub mod jwt;
pub mod password;

pub use access::*;
pub use jwt::*;
pub use password::*;
