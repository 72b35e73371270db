//! Spacing module orchestrator.
//!
//! Callers import the engine and request types from here; the arithmetic
//! lives in the private `core` module.

mod core;
pub mod policy;

pub use core::{DegeneratePolicy, SpacingEngine, sort_along, span_of};
pub use policy::{SpacingMode, SpacingPolicy, SpacingRequest, UnknownPolicy, parse_gap};
