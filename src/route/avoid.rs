//! Obstacle avoidance: re-route vertical legs around bars they would cross.
//!
//! Each vertical line segment is tested against every bar whose time span
//! strictly contains its x. Clashing bars are visited in row order along the
//! direction of travel, and each one gets a pair of corners taking the line
//! into the corridor before it and over to its left edge (minus the
//! clearance), plus a pair bringing it back once past. Adjacent clashing bars
//! share the offset lane instead of returning to the original x in between.
//!
//! A leg that starts below the corridor line of its first bar (a detour's
//! entry leg dropping out of a low lane) cannot turn back up to reach it.
//! Instead the left turn that started the leg is taken back and the lane
//! it ran along is carried on to the bar's offset lane.

use glam::{DVec2, dvec2};

use super::RouteConfig;
use super::corner::{Corner, Heading};
use super::defaults::EPSILON;
use super::geometry::Bar;
use super::path::{Path, PathOp};

/// Rewrite `path` so that no vertical leg passes through a bar.
pub fn avoid_obstacles(path: Path, bars: &[Bar], config: &RouteConfig) -> Path {
    let mut rows: Vec<&Bar> = bars.iter().collect();
    rows.sort_by_key(|bar| bar.row);

    let mut ops = path.into_ops().into_iter();
    let Some(first) = ops.next() else {
        return Path::new(DVec2::ZERO);
    };
    let mut out = Path::new(first.end());
    let mut pen = first.end();

    for op in ops {
        if let PathOp::LineTo(to) = op {
            if (to.x - pen.x).abs() <= EPSILON && (to.y - pen.y).abs() > EPSILON {
                let clash = clashes(&rows, pen.x, pen.y, to.y, config.bar_half_height);
                if clash.iter().any(|c| *c) {
                    crate::log::debug!(
                        x = pen.x,
                        from_y = pen.y,
                        to_y = to.y,
                        bars = clash.iter().filter(|c| **c).count(),
                        "vertical leg clashes with bars"
                    );
                    detour(&mut out, pen, to.y > pen.y, &rows, &clash, config);
                }
            }
        }
        out.push(op);
        pen = op.end();
    }
    out
}

/// Flags, parallel to `rows`, marking bars the vertical segment would cross.
fn clashes(rows: &[&Bar], x: f64, y0: f64, y1: f64, half_height: f64) -> Vec<bool> {
    let (lo, hi) = (y0.min(y1), y0.max(y1));
    rows.iter()
        .map(|bar| bar.spans_x(x) && bar.overlaps_y(lo, hi, half_height))
        .collect()
}

/// Append the corners that carry a vertical line from `pen` around every
/// clashing bar.
fn detour(out: &mut Path, pen: DVec2, upward: bool, rows: &[&Bar], clash: &[bool], config: &RouteConfig) {
    let x = pen.x;
    let r = config.corner_radius;
    let clearance = config.clearance;
    let half = config.bar_half_height;
    let sign = if upward { 1.0 } else { -1.0 };
    let vertical = Heading::vertical(sign);

    let order: Vec<usize> = if upward {
        (0..rows.len()).collect()
    } else {
        (0..rows.len()).rev().collect()
    };
    let turn = |out: &mut Path, from: Heading, to: Heading, anchor: DVec2| {
        if let Some((rotation, quadrant)) = Corner::turning(from, to) {
            Corner {
                radius: r,
                anchor,
                rotation,
                quadrant,
            }
            .append_to(out, config.curve_factor);
        }
    };

    for (pos, &idx) in order.iter().enumerate() {
        if !clash[idx] {
            continue;
        }
        let bar = rows[idx];
        let prev = pos
            .checked_sub(1)
            .and_then(|p| clashing_at(rows, clash, &order, p));
        let next = clashing_at(rows, clash, &order, pos + 1);

        let y = bar.y_mid();
        // Corridor lines just before and just after the bar, in travel order.
        let y_in = y - sign * (half + clearance);
        let y_out = y + sign * (half + clearance);
        let lane = bar.x_start - clearance;

        let move_left = prev.is_none_or(|p| p.x_start > bar.x_start);
        let move_right = next.is_none_or(|n| n.x_start > bar.x_start);

        crate::log::trace!(
            bar = %bar.name,
            move_left,
            move_right,
            "detour around bar"
        );

        if move_left {
            let lead_in = y_in - sign * r;
            let behind = prev.is_none() && (lead_in - pen.y) * sign < -EPSILON;
            match behind
                .then(|| retract_left_turn(out, sign, y - sign * half, lane + r))
                .flatten()
            {
                Some(lane_y) => {
                    crate::log::trace!(bar = %bar.name, lane_y, "entry lane carried on");
                    turn(out, Heading::Left, vertical, dvec2(lane + r, lane_y));
                }
                None => {
                    let from_x = prev.map_or(x, |p| p.x_start - clearance);
                    turn(out, vertical, Heading::Left, dvec2(from_x, lead_in));
                    turn(out, Heading::Left, vertical, dvec2(lane + r, y_in));
                }
            }
        }
        if move_right {
            let to_x = next.map_or(x, |n| n.x_start - clearance);
            turn(out, vertical, Heading::Right, dvec2(lane, y_out - sign * r));
            turn(out, Heading::Right, vertical, dvec2(to_x - r, y_out));
        }
    }
}

/// Take back a trailing corner that turned from heading left into the
/// direction of travel, returning the y of the lane it left.
///
/// Only done when that lane lies before the bar's near edge `edge_y` and
/// reaches `anchor_x`, so carrying it on stays clear of the bar.
fn retract_left_turn(out: &mut Path, sign: f64, edge_y: f64, anchor_x: f64) -> Option<f64> {
    let (anchor, to) = match out.ops() {
        [.., PathOp::LineTo(anchor), PathOp::CubicTo { to, .. }] => (*anchor, *to),
        _ => return None,
    };
    let turned_left = to.x < anchor.x - EPSILON && (to.y - anchor.y) * sign > EPSILON;
    let clear = (edge_y - anchor.y) * sign > EPSILON;
    if !turned_left || !clear || anchor_x > anchor.x + EPSILON {
        return None;
    }
    out.pop();
    out.pop();
    Some(anchor.y)
}

/// The bar at travel position `pos`, if it exists and clashes.
fn clashing_at<'a>(rows: &[&'a Bar], clash: &[bool], order: &[usize], pos: usize) -> Option<&'a Bar> {
    let idx = *order.get(pos)?;
    clash[idx].then(|| rows[idx])
}
