//! HTTP middleware.

mod context;
mod logging;

pub use context::*;
pub use logging::*;
