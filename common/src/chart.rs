use std::{fmt::Display, ops::Range, path::Path};

use eyre::{Report, Result, eyre};
use plotters::prelude::*;
use tracing::{debug, warn};

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;

const MARKER_SIZE: u32 = 5;
const MARGIN_FRACTION: f64 = 0.05;

/// A single-series line chart with point markers
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    pub size: (u32, u32),
}

impl LineChart {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points,
            size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Points that can be placed on the canvas, order kept
    pub fn drawable_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }
}

fn draw_err<E: Display>(err: E) -> Report {
    eyre!("Drawing chart: {err}")
}

/// Axis range covering `values` with a small margin. A single distinct value gets a range
/// centered on it.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }

    // halved so that the span of finite extremes stays finite
    let half_span = max / 2.0 - min / 2.0;
    let pad = if half_span > 0.0 {
        half_span * (2.0 * MARGIN_FRACTION)
    } else if min != 0.0 {
        min.abs() * MARGIN_FRACTION
    } else {
        MARGIN_FRACTION
    };
    (min - pad).max(f64::MIN)..(max + pad).min(f64::MAX)
}

/// Renders `chart` to `path`, image format picked from the extension
pub fn render_line_chart(path: &Path, chart: &LineChart) -> Result<()> {
    let points = chart.drawable_points();
    if points.len() != chart.points.len() {
        warn!(
            "Dropping {} non-finite points from {:?}",
            chart.points.len() - points.len(),
            chart.title
        );
    }

    let x_range = padded_range(points.iter().map(|(x, _)| *x));
    let y_range = padded_range(points.iter().map(|(_, y)| *y));
    debug!(
        "Rendering {} points to {} (x: {x_range:?}, y: {y_range:?})",
        points.len(),
        path.display()
    );

    let root = BitMapBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(draw_err)?;

    ctx.draw_series(LineSeries::new(points.clone(), BLUE.stroke_width(2)))
        .map_err(draw_err)?;
    ctx.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, MARKER_SIZE, BLUE.filled())),
    )
    .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
