//! Default sizes and colours of the SVG surface

/// Pixels per day on the time axis.
pub const PX_PER_DAY: f64 = 40.0;
/// Pixels per row.
pub const PX_PER_ROW: f64 = 60.0;
/// Blank border around the view, in pixels.
pub const MARGIN: f64 = 10.0;

/// Bars are drawn grown by this much on every side, with corners of the
/// same radius (chart units).
pub const BAR_PAD: f64 = 0.1;
pub const PROGRESS_FILL: &str = "darkblue";
pub const PROGRESS_OPACITY: f64 = 0.7;
pub const OUTLINE: &str = "black";
pub const OUTLINE_WIDTH: f64 = 1.5;

pub const CONNECTOR_STROKE: &str = "gray";
/// Arrowhead length and half width, as fractions of the arrow scale.
pub const HEAD_LENGTH: f64 = 0.4;
pub const HEAD_HALF_WIDTH: f64 = 0.2;
