//! # Emporium REST
//!
//! HTTP surface for Emporium built on Axum: versioned JSON endpoints for
//! the catalog, reviews, companies, and accounts, plus health checks,
//! Prometheus metrics, and Swagger UI.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
