//! Drawing a chart onto a surface.
//!
//! The chart is turned into a list of [`ChartShape`]s which draw themselves
//! through the [`Canvas`] trait. [`SvgCanvas`] is the surface used by
//! [`crate::gantt`]; tests record the calls instead.

pub mod defaults;
pub mod shapes;
pub mod svg;

use glam::DVec2;

use crate::chart::Chart;
use crate::errors::ConfigError;
use crate::route::{Arrowhead, Path};
use crate::types::{Scaler, non_negative};

pub use shapes::{BarShape, ChartShape, ConnectorShape, Shape};
pub use svg::SvgCanvas;

/// Paint for one drawing call. Colours are CSS colour names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<&'static str>,
    pub stroke: Option<&'static str>,
    /// Stroke width in pixels
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Style {
    pub fn filled(color: &'static str) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }

    pub fn stroked(color: &'static str, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            opacity: 1.0,
        }
    }

    pub fn with_stroke(mut self, color: &'static str, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// A drawing backend. Positions and sizes are in chart units.
pub trait Canvas {
    /// Rectangle with corner radius `radius` (chart units on both axes).
    fn rounded_rect(&mut self, min: DVec2, size: DVec2, radius: f64, style: &Style);

    /// Stroke a path of line and cubic segments.
    fn path(&mut self, path: &Path, style: &Style);

    /// Arrowhead at `head.tip` pointing along `head.direction`.
    fn arrowhead(&mut self, head: &Arrowhead, style: &Style);
}

/// Options for SVG output
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub scaler: Scaler,
    /// Border around the view, in pixels
    pub margin: f64,
    /// Use CSS variables for colors (enables light/dark mode support)
    pub css_variables: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scaler: Scaler {
                px_per_day: defaults::PX_PER_DAY,
                px_per_row: defaults::PX_PER_ROW,
            },
            margin: defaults::MARGIN,
            css_variables: false,
        }
    }
}

impl RenderOptions {
    pub fn try_new(px_per_day: f64, px_per_row: f64, margin: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            scaler: Scaler::try_new(px_per_day, px_per_row)
                .map_err(|e| ConfigError::invalid("scale", e))?,
            margin: non_negative(margin).map_err(|e| ConfigError::invalid("margin", e))?,
            css_variables: false,
        })
    }

    pub fn with_css_variables(mut self, on: bool) -> Self {
        self.css_variables = on;
        self
    }
}

/// Bars in insertion order, then every routed connector on top.
pub fn chart_shapes(chart: &Chart) -> Vec<ChartShape> {
    let half = chart.config().bar_half_height();
    let mut shapes: Vec<ChartShape> = chart
        .tasks()
        .iter()
        .map(|task| BarShape::new(task.to_bar(), task.state, half).into())
        .collect();
    shapes.extend(
        chart
            .routes()
            .into_iter()
            .map(|routed| ConnectorShape::new(routed.route, routed.state).into()),
    );
    shapes
}

/// Draw `chart` onto any canvas.
pub fn render_chart(chart: &Chart, canvas: &mut dyn Canvas) {
    for shape in chart_shapes(chart) {
        shape.draw(canvas);
    }
}

/// Render `chart`'s current view to an SVG document.
///
/// Shapes lying wholly outside the view are left out.
pub fn render_svg(chart: &Chart, options: &RenderOptions) -> Result<String, miette::Report> {
    let mut canvas = SvgCanvas::new(chart.viewport().bounds(), options);
    let view = canvas.view();
    for shape in chart_shapes(chart) {
        if shape.bounds().intersects(&view) {
            shape.draw(&mut canvas);
        }
    }
    crate::log::debug!(elements = canvas.element_count(), "rendered chart");
    canvas.finish()
}

#[cfg(test)]
pub(crate) mod recorder {
    use super::*;

    /// One recorded drawing call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Rect { min: DVec2, size: DVec2, radius: f64, style: Style },
        Path { path: Path, style: Style },
        Arrow { head: Arrowhead, style: Style },
    }

    /// Canvas that records calls for inspection.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    impl Canvas for Recorder {
        fn rounded_rect(&mut self, min: DVec2, size: DVec2, radius: f64, style: &Style) {
            self.calls.push(Call::Rect {
                min,
                size,
                radius,
                style: *style,
            });
        }

        fn path(&mut self, path: &Path, style: &Style) {
            self.calls.push(Call::Path {
                path: path.clone(),
                style: *style,
            });
        }

        fn arrowhead(&mut self, head: &Arrowhead, style: &Style) {
            self.calls.push(Call::Arrow {
                head: *head,
                style: *style,
            });
        }
    }
}
