//! CLI error types

use population_simulator_core_rs::{SimulationError, StoreError};
use thiserror::Error;

/// Errors surfaced to the user by the menu loop
///
/// None of these end the session; the loop reports them and shows the menu
/// again.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not parse {field} from '{value}'")]
    InputParse { field: &'static str, value: String },

    #[error(transparent)]
    InvalidParameters(#[from] SimulationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Could not render chart: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
