//! Ownership and role checks.

mod gate;

pub use gate::*;
