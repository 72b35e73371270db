//! Error module orchestrator.
//!
//! The crate-wide error enum lives in `types`; subsystem errors that it wraps
//! stay next to the code that raises them.

mod types;

pub use types::{ArrangeError, Result};
