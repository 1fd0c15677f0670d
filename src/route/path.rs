//! Connector paths: a start point followed by line and cubic segments.

use glam::DVec2;

/// One drawing operation in a connector path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Cubic Bézier to `to` through two control points
    CubicTo { ctrl1: DVec2, ctrl2: DVec2, to: DVec2 },
}

impl PathOp {
    /// The on-curve point this operation ends at.
    pub fn end(&self) -> DVec2 {
        match *self {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => p,
            PathOp::CubicTo { to, .. } => to,
        }
    }
}

/// A connector path, always starting with a single `MoveTo`.
///
/// Routing passes consume one path and produce a new one instead of
/// splicing in place; the only edit is taking back the last segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    /// Create a new path starting at the given point.
    pub fn new(start: DVec2) -> Self {
        Self {
            ops: vec![PathOp::MoveTo(start)],
        }
    }

    pub fn line_to(&mut self, p: DVec2) {
        self.ops.push(PathOp::LineTo(p));
    }

    pub fn cubic_to(&mut self, ctrl1: DVec2, ctrl2: DVec2, to: DVec2) {
        self.ops.push(PathOp::CubicTo { ctrl1, ctrl2, to });
    }

    pub(crate) fn push(&mut self, op: PathOp) {
        self.ops.push(op);
    }

    /// Remove the last segment. The initial move is never removed.
    pub(crate) fn pop(&mut self) -> Option<PathOp> {
        if self.ops.len() > 1 { self.ops.pop() } else { None }
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<PathOp> {
        self.ops
    }

    /// Get the start point of the path.
    pub fn start(&self) -> DVec2 {
        self.ops[0].end()
    }

    /// The point the pen currently rests on.
    pub fn current_point(&self) -> DVec2 {
        // `new` guarantees at least the MoveTo
        self.ops[self.ops.len() - 1].end()
    }

    /// Number of cubic corners in the path.
    pub fn corner_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PathOp::CubicTo { .. }))
            .count()
    }

    /// Every straight segment as `(from, to)`, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.ops.windows(2).filter_map(|w| match w[1] {
            PathOp::LineTo(to) => Some((w[0].end(), to)),
            _ => None,
        })
    }

    /// Straight segments with equal x and distinct y.
    pub fn vertical_lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.lines().filter(|(a, b)| a.x == b.x && a.y != b.y)
    }

    /// All points in order, control points included.
    pub fn points(&self) -> Vec<DVec2> {
        let mut out = Vec::with_capacity(self.ops.len() * 2);
        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => out.push(p),
                PathOp::CubicTo { ctrl1, ctrl2, to } => out.extend([ctrl1, ctrl2, to]),
            }
        }
        out
    }

    /// Incoming direction at the final point, from the last distinct point before it.
    pub fn end_direction(&self) -> Option<DVec2> {
        let points = self.points();
        let (&tip, rest) = points.split_last()?;
        rest.iter()
            .rev()
            .find(|p| **p != tip)
            .and_then(|p| (tip - *p).try_normalize())
    }
}
