//! Step management for the simulation
//!
//! The simulation operates in discrete, 1-indexed steps. Every
//! `decay_interval` steps form a decay period, and the last step of each
//! period is a decay step. This module provides deterministic step advancement.

use serde::{Deserialize, Serialize};

/// Tracks the current simulation step and the decay period
///
/// # Example
/// ```
/// use population_simulator_core_rs::StepClock;
///
/// let mut clock = StepClock::new(2); // decay every 2 steps
/// assert_eq!(clock.current_step(), 0);
///
/// clock.advance_step();
/// assert_eq!(clock.current_step(), 1);
/// assert!(!clock.is_decay_step());
///
/// clock.advance_step();
/// assert!(clock.is_decay_step());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepClock {
    /// Steps elapsed since simulation start (0 before the first step)
    current_step: usize,
    /// Number of steps between decay events
    decay_interval: usize,
}

impl StepClock {
    /// Create a new StepClock positioned before the first step
    ///
    /// # Arguments
    /// * `decay_interval` - Number of steps between decay events
    ///
    /// # Panics
    /// Panics if `decay_interval` is zero.
    pub fn new(decay_interval: usize) -> Self {
        assert!(decay_interval > 0, "decay_interval must be positive");
        Self {
            current_step: 0,
            decay_interval,
        }
    }

    /// Advance to the next step and return it
    ///
    /// # Example
    /// ```
    /// use population_simulator_core_rs::StepClock;
    ///
    /// let mut clock = StepClock::new(10);
    /// assert_eq!(clock.advance_step(), 1);
    /// assert_eq!(clock.advance_step(), 2);
    /// ```
    pub fn advance_step(&mut self) -> usize {
        self.current_step += 1;
        self.current_step
    }

    /// Get the current step (1-indexed once the first step has begun)
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Position of the current step within its decay period (0-indexed)
    ///
    /// # Example
    /// ```
    /// use population_simulator_core_rs::StepClock;
    ///
    /// let mut clock = StepClock::new(3);
    /// for _ in 0..4 {
    ///     clock.advance_step();
    /// }
    /// assert_eq!(clock.step_within_period(), 1);
    /// ```
    pub fn step_within_period(&self) -> usize {
        self.current_step % self.decay_interval
    }

    /// Check if the current step closes a decay period
    ///
    /// Step 0 (before the first advance) is never a decay step.
    pub fn is_decay_step(&self) -> bool {
        self.current_step > 0 && self.step_within_period() == 0
    }

    /// Get the decay interval
    pub fn decay_interval(&self) -> usize {
        self.decay_interval
    }
}
