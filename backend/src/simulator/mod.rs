//! Simulator - growth/decay step loop
//!
//! See `engine.rs` for the implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{simulate, SimulationError};
