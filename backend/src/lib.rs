//! Population Simulator Core - Rust Engine
//!
//! Discrete-time population growth with periodic decay, plus persistence of
//! named runs.
//!
//! # Architecture
//!
//! - **core**: Step clock driving the simulation loop
//! - **models**: Domain types (SimulationParameters, TimeSeries, RunRecord)
//! - **simulator**: The growth/decay loop
//! - **store**: File-backed run storage and save-name resolution
//!
//! # Critical Invariants
//!
//! 1. A series has exactly `time_steps` points, steps `1..=time_steps`
//! 2. Simulation is deterministic (no randomness, no hidden state)
//! 3. A stored run reloads to the same parameters and bit-identical series

// Module declarations
pub mod core;
pub mod models;
pub mod simulator;
pub mod store;

// Re-exports for convenience
pub use crate::core::time::StepClock;
pub use models::{
    parameters::SimulationParameters,
    record::RunRecord,
    series::{SeriesPoint, TimeSeries},
};
pub use simulator::{simulate, SimulationError};
pub use store::{
    record_file_name, resolve_save_name, NamePrompt, RunStore, SaveName, SaveNameState,
    StoreConfig, StoreError, DEFAULT_STORAGE_ROOT, RECORD_EXTENSION,
};
