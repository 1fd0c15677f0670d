//! Bar rectangles and their anchor points

use glam::{DVec2, dvec2};

use crate::types::BBox;

/// A task bar as the router sees it: a time span on one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: String,
    /// Left edge on the time axis (days)
    pub x_start: f64,
    /// Right edge on the time axis (days)
    pub x_end: f64,
    pub row: u32,
    /// Completed fraction in [0, 1]
    pub progress: f64,
}

/// The four attachment points of a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    /// Left middle
    pub start: DVec2,
    /// Right middle
    pub end: DVec2,
    /// Top middle
    pub top: DVec2,
    /// Bottom middle
    pub bottom: DVec2,
}

impl Bar {
    pub fn new(name: impl Into<String>, x_start: f64, x_end: f64, row: u32) -> Self {
        Self {
            name: name.into(),
            x_start,
            x_end,
            row,
            progress: 0.0,
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    /// Vertical center of the bar's row.
    pub fn y_mid(&self) -> f64 {
        f64::from(self.row)
    }

    pub fn anchors(&self, half_height: f64) -> Anchors {
        let y = self.y_mid();
        let x_mid = (self.x_start + self.x_end) * 0.5;
        Anchors {
            start: dvec2(self.x_start, y),
            end: dvec2(self.x_end, y),
            top: dvec2(x_mid, y + half_height),
            bottom: dvec2(x_mid, y - half_height),
        }
    }

    pub fn bounds(&self, half_height: f64) -> BBox {
        let y = self.y_mid();
        BBox::from_corners(
            dvec2(self.x_start, y - half_height),
            dvec2(self.x_end, y + half_height),
        )
    }

    /// Whether `x` lies strictly inside the bar's time span.
    pub fn spans_x(&self, x: f64) -> bool {
        self.x_start < x && x < self.x_end
    }

    /// Whether the open vertical interval `lo..hi` overlaps the bar's extent.
    pub fn overlaps_y(&self, lo: f64, hi: f64, half_height: f64) -> bool {
        let y = self.y_mid();
        y - half_height < hi && lo < y + half_height
    }
}

/// Smallest vertical distance between one bar's top and another bar's bottom.
///
/// Returns `None` with fewer than two bars, where no gap can be measured.
pub fn measure_corridor(bars: &[Bar], half_height: f64) -> Option<f64> {
    let mut gap: Option<f64> = None;
    for (i, a) in bars.iter().enumerate() {
        let top = a.anchors(half_height).top.y;
        for (j, b) in bars.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = (top - b.anchors(half_height).bottom.y).abs();
            gap = Some(gap.map_or(d, |g: f64| g.min(d)));
        }
    }
    gap
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f64 = 0.25;

    #[test]
    fn anchors_of_positive_duration_bar() {
        let bar = Bar::new("A", 2.0, 6.0, 3);
        let a = bar.anchors(H);
        assert_eq!(a.start, dvec2(2.0, 3.0));
        assert_eq!(a.end, dvec2(6.0, 3.0));
        assert_eq!(a.top, dvec2(4.0, 3.25));
        assert_eq!(a.bottom, dvec2(4.0, 2.75));
        assert!(a.start.x < a.end.x);
        assert!(a.top.y > a.bottom.y);
    }

    #[test]
    fn anchors_are_pure() {
        let bar = Bar::new("A", 1.5, 4.0, 1);
        let first = bar.anchors(H);
        let _ = bar.anchors(H).bottom;
        assert_eq!(first, bar.anchors(H));
    }

    #[test]
    fn zero_width_bar_collapses_horizontally() {
        let bar = Bar::new("milestone", 5.0, 5.0, 0);
        let a = bar.anchors(H);
        assert_eq!(a.start, a.end);
        assert_eq!(a.top.x, 5.0);
        assert_eq!(bar.width(), 0.0);
        assert!(!bar.spans_x(5.0));
    }

    #[test]
    fn overlap_is_open_interval() {
        let bar = Bar::new("A", 0.0, 1.0, 2);
        assert!(bar.overlaps_y(1.0, 3.0, H));
        assert!(!bar.overlaps_y(2.25, 3.0, H));
        assert!(!bar.overlaps_y(0.0, 1.75, H));
    }

    #[test]
    fn corridor_between_adjacent_rows() {
        let bars = [
            Bar::new("A", 0.0, 1.0, 0),
            Bar::new("B", 0.0, 1.0, 1),
            Bar::new("C", 0.0, 1.0, 2),
        ];
        assert_eq!(measure_corridor(&bars, H), Some(0.5));
    }

    #[test]
    fn corridor_with_sparse_rows() {
        let bars = [Bar::new("A", 0.0, 1.0, 0), Bar::new("B", 0.0, 1.0, 4)];
        assert_eq!(measure_corridor(&bars, H), Some(3.5));
    }

    #[test]
    fn corridor_needs_two_bars() {
        assert_eq!(measure_corridor(&[], H), None);
        assert_eq!(measure_corridor(&[Bar::new("A", 0.0, 1.0, 0)], H), None);
    }
}
