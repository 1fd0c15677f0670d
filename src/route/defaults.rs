//! Default routing settings (chart units: days horizontally, rows vertically)

/// Clearance between a connector and the bar edge it leaves or hugs.
pub const CLEARANCE: f64 = 0.25;
/// Corner radius; half the clearance so two corners fit in one clearance.
pub const CORNER_RADIUS: f64 = CLEARANCE * 0.5;
/// Cubic control offset as a fraction of the radius (a true circle uses 0.5523).
pub const CURVE_FACTOR: f64 = 0.75;
/// Half the visual height of a bar.
pub const BAR_HALF_HEIGHT: f64 = 0.25;
/// Corridor width used when fewer than two bars exist to measure one.
pub const FALLBACK_CORRIDOR: f64 = 1.0 - 2.0 * BAR_HALF_HEIGHT;
/// Visual scale of the arrowhead glyph.
pub const ARROW_SCALE: f64 = 20.0;
/// Tolerance for coordinate equality in topology selection.
pub const EPSILON: f64 = 1e-9;
