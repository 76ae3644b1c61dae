//! Domain models for the population simulator

pub mod parameters;
pub mod record;
pub mod series;

// Re-exports
pub use parameters::SimulationParameters;
pub use record::RunRecord;
pub use series::{SeriesPoint, TimeSeries};
