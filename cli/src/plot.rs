//! Chart presentation
//!
//! Renders a series as a step-vs-population line chart with point markers.

use crate::error::CliError;
use plotters::prelude::*;
use population_simulator_core_rs::TimeSeries;
use std::error::Error;
use std::path::{Path, PathBuf};

pub const CHART_TITLE: &str = "Simulated Cell Population Growth";
pub const X_LABEL: &str = "Time Steps";
pub const Y_LABEL: &str = "Population";

const CHART_SIZE: (u32, u32) = (1024, 640);

/// Something that can show a series to the user
pub trait Presenter {
    /// Render `series`. Returns the rendered file, if one was produced.
    fn present(&mut self, series: &TimeSeries) -> Result<Option<PathBuf>, CliError>;
}

/// Writes each chart to the same SVG file, replacing the previous one
pub struct SvgPresenter {
    output: PathBuf,
}

impl SvgPresenter {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl Presenter for SvgPresenter {
    fn present(&mut self, series: &TimeSeries) -> Result<Option<PathBuf>, CliError> {
        render_svg(series, &self.output).map_err(|e| CliError::Plot(e.to_string()))?;
        tracing::debug!(path = %self.output.display(), points = series.len(), "chart rendered");
        Ok(Some(self.output.clone()))
    }
}

/// Presenter for `--no-plot`
pub struct DisabledPresenter;

impl Presenter for DisabledPresenter {
    fn present(&mut self, _series: &TimeSeries) -> Result<Option<PathBuf>, CliError> {
        Ok(None)
    }
}

/// Plot bounds as `(x_min, x_max, y_min, y_max)`, padded so that single
/// points and flat lines still get a visible range
fn chart_bounds(points: &[(f64, f64)]) -> Option<(f64, f64, f64, f64)> {
    let (first_x, first_y) = *points.first()?;
    let (mut x_max, mut y_min, mut y_max) = (first_x, first_y, first_y);
    for &(x, y) in points {
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let y_pad = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        y_max.abs().max(1.0) * 0.1
    };
    Some((0.0, x_max + 1.0, y_min - y_pad, y_max + y_pad))
}

pub fn render_svg(series: &TimeSeries, path: &Path) -> Result<(), Box<dyn Error>> {
    // Non-finite samples cannot be placed on the axes
    let points: Vec<(f64, f64)> = series
        .iter()
        .filter(|p| p.population.is_finite())
        .map(|p| (p.step as f64, p.population))
        .collect();
    let (x_min, x_max, y_min, y_max) =
        chart_bounds(&points).ok_or("no finite population values to plot")?;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}
