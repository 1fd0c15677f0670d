//! Pointer interaction: bar highlight states and connector hover.
//!
//! Bars react to pointer motion, presses and releases through a small state
//! machine. The renderer reads the resulting state to pick fill colours and
//! outlines; connectors only thicken while hovered.

use glam::DVec2;

use crate::route::{Path, PathOp};

/// A pointer button, numbered 1 to 3 the way windowing toolkits report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Map a toolkit button number; other buttons are ignored.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(MouseButton::Left),
            2 => Some(MouseButton::Middle),
            3 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Move,
    Press(MouseButton),
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarState {
    #[default]
    Normal,
    Hovered,
    Pressed(MouseButton),
}

impl BarState {
    /// Next state for `action`, given whether the pointer is over the bar.
    pub fn on_pointer(self, action: PointerAction, inside: bool) -> BarState {
        match (action, inside) {
            (PointerAction::Move, true) => match self {
                BarState::Normal => BarState::Hovered,
                other => other,
            },
            (PointerAction::Move, false) => BarState::Normal,
            (PointerAction::Press(button), true) => BarState::Pressed(button),
            (PointerAction::Press(_), false) => self,
            (PointerAction::Release, true) => BarState::Hovered,
            (PointerAction::Release, false) => BarState::Normal,
        }
    }

    /// Fill colour name for the bar body.
    pub fn fill(self) -> &'static str {
        match self {
            BarState::Normal => "skyblue",
            BarState::Hovered => "lightgreen",
            BarState::Pressed(MouseButton::Left) => "yellow",
            BarState::Pressed(MouseButton::Middle) => "red",
            BarState::Pressed(MouseButton::Right) => "orange",
        }
    }

    /// Whether the bar gets an outline (while the pointer is over it).
    pub fn outlined(self) -> bool {
        !matches!(self, BarState::Normal)
    }
}

/// Hover flag of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectorState {
    pub hovered: bool,
}

impl ConnectorState {
    pub fn on_move(&mut self, inside: bool) {
        self.hovered = inside;
    }

    /// Stroke width in pixels.
    pub fn stroke_width(self) -> f64 {
        if self.hovered { 3.0 } else { 1.5 }
    }
}

/// Whether `p` lies within `tolerance` of the path.
///
/// Curves are approximated by their control polygon, which is close enough
/// for quarter circles a fraction of a row across.
pub fn near_path(path: &Path, p: DVec2, tolerance: f64) -> bool {
    let mut pen = path.start();
    for op in path.ops() {
        let hit = match *op {
            PathOp::MoveTo(to) => {
                pen = to;
                continue;
            }
            PathOp::LineTo(to) => segment_distance(p, pen, to) <= tolerance,
            PathOp::CubicTo { ctrl1, ctrl2, to } => [(pen, ctrl1), (ctrl1, ctrl2), (ctrl2, to)]
                .iter()
                .any(|&(a, b)| segment_distance(p, a, b) <= tolerance),
        };
        if hit {
            return true;
        }
        pen = op.end();
    }
    false
}

fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn hover_then_leave() {
        let s = BarState::Normal.on_pointer(PointerAction::Move, true);
        assert_eq!(s, BarState::Hovered);
        assert_eq!(s.fill(), "lightgreen");
        assert!(s.outlined());
        let s = s.on_pointer(PointerAction::Move, false);
        assert_eq!(s, BarState::Normal);
        assert_eq!(s.fill(), "skyblue");
        assert!(!s.outlined());
    }

    #[test]
    fn each_button_has_its_colour() {
        for (code, colour) in [(1, "yellow"), (2, "red"), (3, "orange")] {
            let button = MouseButton::from_code(code).unwrap();
            let s = BarState::Hovered.on_pointer(PointerAction::Press(button), true);
            assert_eq!(s, BarState::Pressed(button));
            assert_eq!(s.fill(), colour);
        }
        assert_eq!(MouseButton::from_code(4), None);
    }

    #[test]
    fn press_outside_is_ignored() {
        let s = BarState::Hovered.on_pointer(PointerAction::Press(MouseButton::Left), false);
        assert_eq!(s, BarState::Hovered);
    }

    #[test]
    fn pressed_survives_motion_inside() {
        let pressed = BarState::Pressed(MouseButton::Right);
        assert_eq!(pressed.on_pointer(PointerAction::Move, true), pressed);
        assert_eq!(pressed.on_pointer(PointerAction::Move, false), BarState::Normal);
    }

    #[test]
    fn release_depends_on_position() {
        let pressed = BarState::Pressed(MouseButton::Left);
        assert_eq!(pressed.on_pointer(PointerAction::Release, true), BarState::Hovered);
        assert_eq!(pressed.on_pointer(PointerAction::Release, false), BarState::Normal);
    }

    #[test]
    fn connector_thickens_on_hover() {
        let mut state = ConnectorState::default();
        assert_eq!(state.stroke_width(), 1.5);
        state.on_move(true);
        assert_eq!(state.stroke_width(), 3.0);
        state.on_move(false);
        assert_eq!(state.stroke_width(), 1.5);
    }

    #[test]
    fn near_path_checks_lines_and_curves() {
        let mut path = Path::new(dvec2(0.0, 0.0));
        path.line_to(dvec2(4.0, 0.0));
        path.cubic_to(dvec2(4.5, 0.0), dvec2(5.0, -0.5), dvec2(5.0, -1.0));
        assert!(near_path(&path, dvec2(2.0, 0.05), 0.1));
        assert!(near_path(&path, dvec2(5.0, -0.9), 0.1));
        assert!(!near_path(&path, dvec2(2.0, 1.0), 0.1));
    }
}
