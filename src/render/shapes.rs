//! Shape types for chart rendering
//!
//! Each shape knows its bounding box and how to draw itself on a [`Canvas`].

use enum_dispatch::enum_dispatch;
use glam::dvec2;

use super::defaults;
use super::{Canvas, Style};
use crate::chart::{BarState, ConnectorState};
use crate::route::{Bar, Route};
use crate::types::BBox;

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Extent in chart units, padding included
    fn bounds(&self) -> BBox;

    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Everything that ends up on a chart.
#[enum_dispatch(Shape)]
#[derive(Debug, Clone)]
pub enum ChartShape {
    BarShape,
    ConnectorShape,
}

/// A task bar with its progress fill
#[derive(Debug, Clone)]
pub struct BarShape {
    pub bar: Bar,
    pub state: BarState,
    pub half_height: f64,
}

impl BarShape {
    pub fn new(bar: Bar, state: BarState, half_height: f64) -> Self {
        Self {
            bar,
            state,
            half_height,
        }
    }

    fn body_style(&self) -> Style {
        let style = Style::filled(self.state.fill());
        if self.state.outlined() {
            style.with_stroke(defaults::OUTLINE, defaults::OUTLINE_WIDTH)
        } else {
            style
        }
    }
}

impl Shape for BarShape {
    fn bounds(&self) -> BBox {
        let pad = defaults::BAR_PAD;
        self.bar.bounds(self.half_height).padded(pad, pad)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let pad = defaults::BAR_PAD;
        let min = dvec2(
            self.bar.x_start - pad,
            self.bar.y_mid() - self.half_height - pad,
        );
        let height = 2.0 * self.half_height + 2.0 * pad;

        canvas.rounded_rect(
            min,
            dvec2(self.bar.width() + 2.0 * pad, height),
            pad,
            &self.body_style(),
        );

        if self.bar.progress > 0.0 {
            let style = Style::filled(defaults::PROGRESS_FILL).with_opacity(defaults::PROGRESS_OPACITY);
            canvas.rounded_rect(
                min,
                dvec2(self.bar.width() * self.bar.progress + 2.0 * pad, height),
                pad,
                &style,
            );
        }
    }
}

/// A routed dependency arrow
#[derive(Debug, Clone)]
pub struct ConnectorShape {
    pub route: Route,
    pub state: ConnectorState,
}

impl ConnectorShape {
    pub fn new(route: Route, state: ConnectorState) -> Self {
        Self { route, state }
    }
}

impl Shape for ConnectorShape {
    fn bounds(&self) -> BBox {
        let mut bounds = BBox::new();
        for p in self.route.path.points() {
            bounds.expand_point(p);
        }
        bounds.expand_point(self.route.arrowhead.tail);
        bounds
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let style = Style::stroked(defaults::CONNECTOR_STROKE, self.state.stroke_width());
        canvas.path(&self.route.path, &style);
        canvas.arrowhead(&self.route.arrowhead, &style);
    }
}
