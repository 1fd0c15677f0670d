//! Rounded corners: quarter circles approximated by one cubic segment.
//!
//! Quadrants follow clock positions around the arc's center:
//! 0 = 12-3, 1 = 3-6, 2 = 6-9, 3 = 9-12. Chart y grows upward.

use glam::{DVec2, dvec2};

use super::path::Path;

/// Sense in which a corner sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// One of the four 90° sectors of a circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// 12 to 3 o'clock
    UpperRight,
    /// 3 to 6 o'clock
    LowerRight,
    /// 6 to 9 o'clock
    LowerLeft,
    /// 9 to 12 o'clock
    UpperLeft,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperRight,
        Quadrant::LowerRight,
        Quadrant::LowerLeft,
        Quadrant::UpperLeft,
    ];
}

/// Axis-aligned travel direction of a path leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn unit(self) -> DVec2 {
        match self {
            Heading::Up => dvec2(0.0, 1.0),
            Heading::Down => dvec2(0.0, -1.0),
            Heading::Left => dvec2(-1.0, 0.0),
            Heading::Right => dvec2(1.0, 0.0),
        }
    }

    /// Vertical heading for a signed direction (positive is up).
    pub fn vertical(sign: f64) -> Heading {
        if sign >= 0.0 { Heading::Up } else { Heading::Down }
    }
}

/// A corner to be drawn starting at `anchor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub radius: f64,
    pub anchor: DVec2,
    pub rotation: Rotation,
    pub quadrant: Quadrant,
}

impl Corner {
    /// The corner that turns a leg travelling `from` into one travelling `to`.
    ///
    /// Returns `None` for a pair that is not a right-angle turn.
    pub fn turning(from: Heading, to: Heading) -> Option<(Rotation, Quadrant)> {
        use Heading::*;
        use Quadrant::*;
        use Rotation::*;
        let pair = match (from, to) {
            (Right, Down) => (Clockwise, UpperRight),
            (Down, Left) => (Clockwise, LowerRight),
            (Left, Up) => (Clockwise, LowerLeft),
            (Up, Right) => (Clockwise, UpperLeft),
            (Up, Left) => (CounterClockwise, UpperRight),
            (Right, Up) => (CounterClockwise, LowerRight),
            (Down, Right) => (CounterClockwise, LowerLeft),
            (Left, Down) => (CounterClockwise, UpperLeft),
            _ => return None,
        };
        Some(pair)
    }

    /// Control points and end point relative to the anchor, for control offset `k`.
    ///
    /// Clockwise/upper-right and counter-clockwise/upper-left place the second
    /// control point `r - k` from the end rather than `k`; existing charts
    /// depend on that shape.
    fn offsets(&self, k: f64) -> [DVec2; 3] {
        let r = self.radius;
        match (self.rotation, self.quadrant) {
            (Rotation::Clockwise, Quadrant::UpperRight) => {
                [dvec2(k, 0.0), dvec2(r, -k), dvec2(r, -r)]
            }
            (Rotation::Clockwise, Quadrant::LowerRight) => {
                [dvec2(0.0, -k), dvec2(-r + k, -r), dvec2(-r, -r)]
            }
            (Rotation::Clockwise, Quadrant::LowerLeft) => {
                [dvec2(-k, 0.0), dvec2(-r, r - k), dvec2(-r, r)]
            }
            (Rotation::Clockwise, Quadrant::UpperLeft) => {
                [dvec2(0.0, k), dvec2(r - k, r), dvec2(r, r)]
            }
            (Rotation::CounterClockwise, Quadrant::UpperRight) => {
                [dvec2(0.0, k), dvec2(-r + k, r), dvec2(-r, r)]
            }
            (Rotation::CounterClockwise, Quadrant::LowerRight) => {
                [dvec2(k, 0.0), dvec2(r, r - k), dvec2(r, r)]
            }
            (Rotation::CounterClockwise, Quadrant::LowerLeft) => {
                [dvec2(0.0, -k), dvec2(r - k, -r), dvec2(r, -r)]
            }
            (Rotation::CounterClockwise, Quadrant::UpperLeft) => {
                [dvec2(-k, 0.0), dvec2(-r, -k), dvec2(-r, -r)]
            }
        }
    }

    /// Center of the circle the arc belongs to.
    pub fn center(&self) -> DVec2 {
        let [_, _, end] = self.offsets(0.0);
        // Horizontal tangent at the anchor puts the center straight above or below it.
        let first = self.offsets(1.0)[0];
        if first.x != 0.0 {
            self.anchor + dvec2(0.0, end.y)
        } else {
            self.anchor + dvec2(end.x, 0.0)
        }
    }

    /// Where the corner leaves the pen.
    pub fn end(&self) -> DVec2 {
        self.anchor + self.offsets(0.0)[2]
    }

    /// Append a line to the anchor followed by the corner's cubic segment.
    pub fn append_to(&self, path: &mut Path, curve_factor: f64) {
        let k = self.radius * curve_factor;
        let [c1, c2, end] = self.offsets(k);
        path.line_to(self.anchor);
        path.cubic_to(self.anchor + c1, self.anchor + c2, self.anchor + end);
    }
}

/// Append a corner of `radius` at `anchor` to `path`.
pub fn append_corner(
    path: &mut Path,
    radius: f64,
    anchor: DVec2,
    rotation: Rotation,
    quadrant: Quadrant,
    curve_factor: f64,
) {
    Corner {
        radius,
        anchor,
        rotation,
        quadrant,
    }
    .append_to(path, curve_factor);
}
