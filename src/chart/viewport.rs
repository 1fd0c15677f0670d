//! The visible part of the chart.
//!
//! Mirrors the two scrollbars of an interactive chart: a horizontal one that
//! shows a window of N days starting at the slider value, and a vertical one
//! that shifts the row range by whole rows. Both sliders clamp to the span
//! the tasks cover.

use glam::dvec2;

use super::task::{Task, date_to_x};
use crate::errors::ConfigError;
use crate::types::{BBox, positive};

/// Days shown by the horizontal scrollbar.
pub const DEFAULT_WINDOW: f64 = 10.0;
/// Extra days on each side of the task span.
const X_PAD: f64 = 1.0;
/// Half a row above the highest bar and below the lowest.
const Y_PAD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    window: f64,
    row_offset: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: DEFAULT_WINDOW,
            y_min: -Y_PAD,
            y_max: Y_PAD,
            window: DEFAULT_WINDOW,
            row_offset: 0,
        }
    }
}

/// Number of rows the tasks occupy, counting gaps below the highest row.
pub fn row_count(tasks: &[Task]) -> u32 {
    tasks.iter().map(|t| t.row() + 1).max().unwrap_or(0)
}

/// Slider range of the horizontal scrollbar.
pub fn scroll_x_range(tasks: &[Task]) -> Option<(f64, f64)> {
    let start = tasks.iter().map(|t| date_to_x(t.start())).reduce(f64::min)?;
    let end = tasks.iter().map(|t| date_to_x(t.end())).reduce(f64::max)?;
    Some((start - X_PAD, end + X_PAD))
}

impl Viewport {
    /// Visible area in chart units.
    pub fn bounds(&self) -> BBox {
        BBox::from_corners(dvec2(self.x_min, self.y_min), dvec2(self.x_max, self.y_max))
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn row_offset(&self) -> u32 {
        self.row_offset
    }

    /// Change the number of days the horizontal scrollbar shows.
    pub fn set_window(&mut self, days: f64) -> Result<(), ConfigError> {
        self.window = positive(days).map_err(|e| ConfigError::invalid("window", e))?;
        Ok(())
    }

    /// Show every task with a day of margin and half a row above and below.
    pub fn fit(&mut self, tasks: &[Task]) {
        let Some((x_min, x_max)) = scroll_x_range(tasks) else {
            return;
        };
        self.x_min = x_min;
        self.x_max = x_max;
        self.row_offset = 0;
        self.y_min = -Y_PAD;
        self.y_max = f64::from(row_count(tasks)) - Y_PAD;
    }

    /// Move the horizontal window to start at `x`, clamped to the slider
    /// range. Returns the position actually used.
    pub fn scroll_x(&mut self, tasks: &[Task], x: f64) -> f64 {
        let x = match scroll_x_range(tasks) {
            Some((lo, hi)) => x.clamp(lo, hi),
            None => x,
        };
        self.x_min = x;
        self.x_max = x + self.window;
        crate::log::trace!(x_min = self.x_min, x_max = self.x_max, "scrolled horizontally");
        x
    }

    /// Shift the rows so `offset` is the lowest visible one, clamped to the
    /// last row. Returns the offset actually used.
    pub fn scroll_y(&mut self, tasks: &[Task], offset: u32) -> u32 {
        let rows = row_count(tasks);
        let clamped = offset.min(rows.saturating_sub(1));
        if clamped != offset {
            crate::log::warn!(offset, clamped, "row offset past the last row");
        }
        self.row_offset = clamped;
        self.y_min = f64::from(clamped) - Y_PAD;
        self.y_max = f64::from(clamped) + f64::from(rows) - Y_PAD;
        clamped
    }
}
