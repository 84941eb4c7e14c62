//! # Emporium Server Library
//!
//! Wiring and startup for the Emporium HTTP server: telemetry, the service
//! graph, and the application lifecycle.

pub mod app;
pub mod di;
pub mod startup;
pub mod telemetry;
