//! Time series produced by a simulation

use serde::{Deserialize, Serialize};

/// Upper bound on points reserved up front; longer runs grow as they go
const MAX_PREALLOCATED_POINTS: usize = 1 << 16;

/// One sampled point of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 1-indexed step number
    pub step: usize,
    /// Population at the end of the step
    pub population: f64,
}

/// Chronologically ordered population samples
///
/// Steps are `1..=len` in insertion order. A series is built once by the
/// simulator (or rebuilt from a validated record) and exposes no mutating API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Reserve room for `capacity` points, capped so that a huge requested
    /// run length never allocates before a step has run
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_POINTS)),
        }
    }

    pub(crate) fn push(&mut self, step: usize, population: f64) {
        debug_assert_eq!(step, self.points.len() + 1, "steps must be contiguous");
        self.points.push(SeriesPoint { step, population });
    }

    /// Rebuild a series from parallel step/population columns
    ///
    /// Callers must have checked that the columns have equal length and that
    /// steps run `1..=len`.
    pub(crate) fn from_columns(steps: &[usize], populations: &[f64]) -> Self {
        Self {
            points: steps
                .iter()
                .zip(populations)
                .map(|(&step, &population)| SeriesPoint { step, population })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> + '_ {
        self.points.iter()
    }

    /// Step column, in order
    pub fn steps(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.step).collect()
    }

    /// Population column, in order
    pub fn populations(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.population).collect()
    }

    /// Population after the last step, if any step ran
    pub fn final_population(&self) -> Option<f64> {
        self.points.last().map(|p| p.population)
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
