//! Named run records
//!
//! A record pairs the parameters of a run with the series it produced, under
//! a user-chosen name. Records are immutable snapshots: they are created once
//! and only ever read back.

use crate::models::parameters::SimulationParameters;
use crate::models::series::TimeSeries;

/// One persisted simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    name: String,
    parameters: SimulationParameters,
    series: TimeSeries,
}

impl RunRecord {
    pub fn new(name: impl Into<String>, parameters: SimulationParameters, series: TimeSeries) -> Self {
        Self {
            name: name.into(),
            parameters,
            series,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }
}
