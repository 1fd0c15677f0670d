//! Base connector shapes, chosen from the relative position of the two bars.

use glam::{DVec2, dvec2};

use super::RouteConfig;
use super::corner::{Corner, Heading};
use super::defaults::EPSILON;
use super::path::Path;

/// Route shape between a source's end and a target's start.
///
/// "Above" means a larger row, y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Source runs past the target's start and sits above it: drop into the
    /// corridor under the source, run left, then drop into the target.
    DetourBelow,
    /// Mirror of [`Topology::DetourBelow`] for a source below its target.
    DetourAbove,
    /// Target starts after the source ends, lower row: right, down, right.
    Descend,
    /// Target starts after the source ends, higher row: right, up, right.
    Ascend,
    /// Exit and entry lanes coincide, target lower or on the same row.
    AlignedDescend,
    /// Exit and entry lanes coincide, target higher.
    AlignedAscend,
}

impl Topology {
    /// Classify the connector from `start` (source end) to `end` (target start).
    ///
    /// Total over all inputs: near-equal lanes and same-row pairs resolve to
    /// the aligned cases.
    pub fn classify(start: DVec2, end: DVec2, clearance: f64) -> Topology {
        let dx = (start.x + clearance) - (end.x - clearance);
        let dy = start.y - end.y;
        let level = dy.abs() <= EPSILON;

        if level || dx.abs() <= EPSILON {
            if dy < 0.0 && !level {
                Topology::AlignedAscend
            } else {
                Topology::AlignedDescend
            }
        } else if dx > 0.0 {
            if dy > 0.0 {
                Topology::DetourBelow
            } else {
                Topology::DetourAbove
            }
        } else if dy > 0.0 {
            Topology::Descend
        } else {
            Topology::Ascend
        }
    }

    /// Whether the path travels down towards the target.
    pub fn descends(self) -> bool {
        matches!(
            self,
            Topology::DetourBelow | Topology::Descend | Topology::AlignedDescend
        )
    }
}

/// Endpoints and the source's vertical extent, everything a base shape needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Endpoints {
    pub start: DVec2,
    pub end: DVec2,
    /// Source bar's top edge
    pub source_top: f64,
    /// Source bar's bottom edge
    pub source_bottom: f64,
}

/// Emit the base path for `topology`, before obstacle avoidance.
pub(crate) fn base_path(
    topology: Topology,
    ends: Endpoints,
    corridor: f64,
    config: &RouteConfig,
) -> Path {
    let Endpoints { start, end, .. } = ends;
    let r = config.corner_radius;
    let sign = if topology.descends() { -1.0 } else { 1.0 };
    let vertical = Heading::vertical(sign);
    let exit_x = start.x + config.clearance;

    let mut path = Path::new(start);

    // The bars share a row.
    if (end.y - start.y).abs() <= EPSILON {
        path.line_to(end);
        return path;
    }

    let mut turn = |from: Heading, to: Heading, anchor: DVec2| {
        if let Some((rotation, quadrant)) = Corner::turning(from, to) {
            Corner {
                radius: r,
                anchor,
                rotation,
                quadrant,
            }
            .append_to(&mut path, config.curve_factor);
        }
    };

    match topology {
        Topology::Descend | Topology::Ascend | Topology::AlignedDescend | Topology::AlignedAscend => {
            turn(Heading::Right, vertical, dvec2(exit_x - r, start.y));
            turn(vertical, Heading::Right, dvec2(exit_x, end.y - sign * r));
        }
        Topology::DetourBelow | Topology::DetourAbove => {
            let lane_y = corridor_y(topology, ends, corridor);
            // Both corridor corners must fit between the exit and entry lanes.
            let entry_x = (end.x - config.clearance).min(exit_x - 2.0 * r);
            turn(Heading::Right, vertical, dvec2(exit_x - r, start.y));
            turn(vertical, Heading::Left, dvec2(exit_x, lane_y - sign * r));
            turn(Heading::Left, vertical, dvec2(entry_x + r, lane_y));
            turn(vertical, Heading::Right, dvec2(entry_x, end.y - sign * r));
        }
    }

    path.line_to(end);
    path
}

/// The horizontal lane a detour runs along: half a corridor beyond the
/// source's edge, never past the midpoint between the two rows.
fn corridor_y(topology: Topology, ends: Endpoints, corridor: f64) -> f64 {
    let midpoint = (ends.start.y + ends.end.y) * 0.5;
    if topology.descends() {
        (ends.source_bottom - corridor * 0.5).max(midpoint)
    } else {
        (ends.source_top + corridor * 0.5).min(midpoint)
    }
}
