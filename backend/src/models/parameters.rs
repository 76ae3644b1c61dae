//! Simulation parameters
//!
//! The five user-supplied inputs of a run. Parameters are plain values and
//! are never modified once a simulation has started.

use crate::simulator::SimulationError;
use serde::{Deserialize, Serialize};

/// Inputs to a growth-decay simulation
///
/// # Example
/// ```
/// use population_simulator_core_rs::SimulationParameters;
///
/// let params = SimulationParameters {
///     initial_population: 100,
///     growth_rate: 0.2,
///     time_steps: 3,
///     decay_interval: 2,
///     decay_percent: 0.3,
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Population before the first step
    pub initial_population: i64,

    /// Fractional growth applied every step (0.2 = +20%)
    pub growth_rate: f64,

    /// Number of steps to simulate
    pub time_steps: usize,

    /// Decay is applied on every step divisible by this value
    pub decay_interval: usize,

    /// Fractional reduction applied on decay steps (0.3 = -30%)
    pub decay_percent: f64,
}

impl SimulationParameters {
    /// Check the preconditions `simulate` relies on
    ///
    /// Only structural preconditions are checked: a run needs at least one
    /// step and a non-zero decay interval. Rates and populations are not
    /// range-checked; negative or fractional populations are legal results.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.time_steps == 0 {
            return Err(SimulationError::InvalidParameters(
                "time_steps must be positive".to_string(),
            ));
        }
        if self.decay_interval == 0 {
            return Err(SimulationError::InvalidParameters(
                "decay_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
