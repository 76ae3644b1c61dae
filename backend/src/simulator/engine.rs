//! Simulation engine
//!
//! Runs the discrete growth/decay loop over a [`StepClock`].
//!
//! # Step Order
//!
//! Each step:
//! 1. Growth: `population *= 1 + growth_rate` (every step)
//! 2. Decay: `population *= 1 - decay_percent` (only when the step is a
//!    multiple of `decay_interval`)
//! 3. Record `(step, population)`
//!
//! # Critical Invariants
//!
//! 1. Output length equals `time_steps`, steps are `1..=time_steps`
//! 2. No hidden state or randomness: equal parameters give bit-identical series

use crate::core::time::StepClock;
use crate::models::{SimulationParameters, TimeSeries};
use thiserror::Error;

/// Errors raised by simulation callers' precondition checks
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Run a simulation and return its time series
///
/// Parameters are not validated here; callers are expected to run
/// [`SimulationParameters::validate`] first.
///
/// # Panics
/// Panics if `decay_interval` is zero.
///
/// # Example
/// ```
/// use population_simulator_core_rs::{simulate, SimulationParameters};
///
/// let series = simulate(&SimulationParameters {
///     initial_population: 100,
///     growth_rate: 0.2,
///     time_steps: 3,
///     decay_interval: 2,
///     decay_percent: 0.3,
/// });
/// assert_eq!(series.len(), 3);
/// assert!((series.points()[1].population - 100.8).abs() < 1e-9);
/// ```
pub fn simulate(params: &SimulationParameters) -> TimeSeries {
    let mut clock = StepClock::new(params.decay_interval);
    let mut series = TimeSeries::with_capacity(params.time_steps);
    let mut population = params.initial_population as f64;

    for _ in 0..params.time_steps {
        let step = clock.advance_step();

        population *= 1.0 + params.growth_rate;

        if clock.is_decay_step() {
            population *= 1.0 - params.decay_percent;
        }

        series.push(step, population);
    }

    tracing::debug!(
        initial_population = params.initial_population,
        growth_rate = params.growth_rate,
        time_steps = params.time_steps,
        decay_interval = params.decay_interval,
        decay_percent = params.decay_percent,
        final_population = ?series.final_population(),
        "simulation complete"
    );

    series
}
