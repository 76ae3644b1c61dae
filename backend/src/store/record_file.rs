//! Record File - On-disk layout of a run
//!
//! One JSON object per run, flat, with the parameters inlined next to the
//! step and population columns:
//!
//! ```json
//! {
//!     "name": "baseline",
//!     "initial_population": 100,
//!     "growth_rate": 0.2,
//!     "time_steps": 3,
//!     "decay_interval": 2,
//!     "decay_percent": 0.3,
//!     "time_data": [1, 2, 3],
//!     "population_data": [120.0, 100.8, 120.96]
//! }
//! ```
//!
//! # Critical Invariants
//!
//! - **Column Alignment**: `time_data` and `population_data` have equal length
//! - **Step Coverage**: `time_data` is exactly `1..=time_steps`
//! - **Exact Floats**: populations survive a write/read cycle bit-for-bit

use crate::models::{RunRecord, SimulationParameters, TimeSeries};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// Indentation used for written records
const INDENT: &[u8] = b"    ";

// ============================================================================
// File Structure
// ============================================================================

/// Serialized form of a [`RunRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFile {
    pub name: String,
    pub initial_population: i64,
    pub growth_rate: f64,
    pub time_steps: usize,
    pub decay_interval: usize,
    pub decay_percent: f64,
    pub time_data: Vec<usize>,
    pub population_data: Vec<f64>,
}

impl RunFile {
    /// Build the file form without first assembling a [`RunRecord`]
    pub fn from_parts(name: &str, params: &SimulationParameters, series: &TimeSeries) -> Self {
        RunFile {
            name: name.to_string(),
            initial_population: params.initial_population,
            growth_rate: params.growth_rate,
            time_steps: params.time_steps,
            decay_interval: params.decay_interval,
            decay_percent: params.decay_percent,
            time_data: series.steps(),
            population_data: series.populations(),
        }
    }

    fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            initial_population: self.initial_population,
            growth_rate: self.growth_rate,
            time_steps: self.time_steps,
            decay_interval: self.decay_interval,
            decay_percent: self.decay_percent,
        }
    }

    /// Render as indented JSON
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)?;
        out.push(b'\n');
        Ok(out)
    }

    /// Parse raw file contents
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, String> {
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }
}

impl From<&RunRecord> for RunFile {
    fn from(record: &RunRecord) -> Self {
        RunFile::from_parts(record.name(), record.parameters(), record.series())
    }
}

impl TryFrom<RunFile> for RunRecord {
    type Error = String;

    fn try_from(file: RunFile) -> Result<Self, Self::Error> {
        validate_run_file(&file)?;
        let series = TimeSeries::from_columns(&file.time_data, &file.population_data);
        let parameters = file.parameters();
        Ok(RunRecord::new(file.name, parameters, series))
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate a parsed file before turning it into a record
///
/// Checks:
/// - Column alignment
/// - Series length matches `time_steps`
/// - Steps are contiguous from 1
pub fn validate_run_file(file: &RunFile) -> Result<(), String> {
    // 1. Column alignment
    if file.time_data.len() != file.population_data.len() {
        return Err(format!(
            "time_data has {} entries but population_data has {}",
            file.time_data.len(),
            file.population_data.len()
        ));
    }

    // 2. Length matches parameters
    if file.time_data.len() != file.time_steps {
        return Err(format!(
            "time_steps is {} but the series has {} entries",
            file.time_steps,
            file.time_data.len()
        ));
    }

    // 3. Steps run 1..=time_steps
    for (index, &step) in file.time_data.iter().enumerate() {
        if step != index + 1 {
            return Err(format!(
                "time_data[{}] is {}, expected {}",
                index,
                step,
                index + 1
            ));
        }
    }

    Ok(())
}

impl RunFile {
    /// First population that JSON cannot represent, as `(step, value)`
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.time_data
            .iter()
            .zip(&self.population_data)
            .find(|(_, value)| !value.is_finite())
            .map(|(&step, &value)| (step, value))
    }
}
