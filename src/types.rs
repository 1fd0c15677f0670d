//! Numeric primitives shared by the router and the rendering surface.
//!
//! Chart space uses `glam::DVec2` with x in days since 1970-01-01 and y in
//! rows (growing upward). Pixel conversion only happens through [`Scaler`].

use glam::{DVec2, dvec2};
use std::fmt;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a value that must be finite and strictly positive.
pub fn positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Validate a value that must be finite and not negative.
pub fn non_negative(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Converts chart units (days, rows) to pixels.
///
/// The two axes scale independently: a day and a row rarely want the same
/// pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    pub px_per_day: f64,
    pub px_per_row: f64,
}

impl Scaler {
    /// Create a Scaler with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(px_per_day: f64, px_per_row: f64) -> Result<Self, NumericError> {
        Ok(Scaler {
            px_per_day: positive(px_per_day)?,
            px_per_row: positive(px_per_row)?,
        })
    }

    /// Horizontal chart length to pixels.
    #[inline]
    pub fn dx(&self, days: f64) -> f64 {
        days * self.px_per_day
    }

    /// Vertical chart length to pixels.
    #[inline]
    pub fn dy(&self, rows: f64) -> f64 {
        rows * self.px_per_row
    }

    /// Convert a chart point to SVG pixels, flipping y so larger rows sit higher.
    pub fn to_svg(&self, p: DVec2, view: &BBox) -> DVec2 {
        dvec2(self.dx(p.x - view.min.x), self.dy(view.max.y - p.y))
    }
}

/// Axis-aligned bounding box in chart space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        BBox {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Whether the boxes share any point, borders included.
    pub fn intersects(&self, other: &BBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Grow on every side by the given margins.
    pub fn padded(&self, x: f64, y: f64) -> BBox {
        BBox {
            min: self.min - dvec2(x, y),
            max: self.max + dvec2(x, y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict interior test; points on the border are outside.
    pub fn contains_strict(&self, p: DVec2) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }
}
