//! End-to-end routing scenarios through the public API.

use ganttline::route::{Bar, PathOp, RouteConfig, Topology, measure_corridor, route};
use ganttline::{Path, Route};
use glam::DVec2;

const HALF: f64 = 0.25;

fn route_between(bars: &[Bar], source: usize, target: usize) -> Route {
    let corridor = measure_corridor(bars, HALF);
    route(
        &bars[source],
        &bars[target],
        bars,
        corridor,
        &RouteConfig::default(),
    )
}

fn fmt_point(p: DVec2) -> String {
    format!("{},{}", p.x, p.y)
}

/// One op per line, for snapshots.
fn describe(path: &Path) -> String {
    path.ops()
        .iter()
        .map(|op| match *op {
            PathOp::MoveTo(p) => format!("M {}", fmt_point(p)),
            PathOp::LineTo(p) => format!("L {}", fmt_point(p)),
            PathOp::CubicTo { ctrl1, ctrl2, to } => format!(
                "C {} {} {}",
                fmt_point(ctrl1),
                fmt_point(ctrl2),
                fmt_point(to)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether any vertical leg passes through a bar other than the endpoints.
fn crossing(route: &Route, bars: &[Bar]) -> Option<String> {
    for (a, b) in route.path.vertical_lines() {
        let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
        for bar in bars {
            if bar.spans_x(a.x) && bar.overlaps_y(lo, hi, HALF) {
                return Some(format!("x={} crosses {}", a.x, bar.name));
            }
        }
    }
    None
}

/// Whether every vertical leg moves the same way as the first one.
fn verticals_keep_direction(route: &Route) -> bool {
    let mut legs = route.path.vertical_lines().map(|(a, b)| b.y > a.y);
    match legs.next() {
        Some(up) => legs.all(|leg| leg == up),
        None => true,
    }
}

#[test]
fn detours_around_bar_in_between() {
    let bars = vec![
        Bar::new("source", 1.0, 5.0, 0),
        Bar::new("obstacle", 3.0, 10.0, 1),
        Bar::new("target", 8.0, 12.0, 2),
    ];
    let route = route_between(&bars, 0, 2);

    assert_eq!(route.topology, Topology::Ascend);
    assert_eq!(crossing(&route, &bars), None);
    assert_eq!(
        route.path.current_point(),
        bars[2].anchors(HALF).start,
        "path must land exactly on the target's start anchor"
    );
    insta::assert_snapshot!(describe(&route.path), @r"
    M 5,0
    L 5.125,0
    C 5.21875,0 5.25,0.03125 5.25,0.125
    L 5.25,0.375
    C 5.25,0.46875 5.21875,0.5 5.125,0.5
    L 2.875,0.5
    C 2.78125,0.5 2.75,0.53125 2.75,0.625
    L 2.75,1.375
    C 2.75,1.46875 2.78125,1.5 2.875,1.5
    L 5.125,1.5
    C 5.21875,1.5 5.25,1.53125 5.25,1.625
    L 5.25,1.875
    C 5.25,1.96875 5.28125,2 5.375,2
    L 8,2
    ");
}

#[test]
fn same_row_needs_no_detour() {
    let bars = vec![Bar::new("A", 1.0, 5.0, 0), Bar::new("B", 8.0, 12.0, 0)];
    let route = route_between(&bars, 0, 1);

    assert!(route.path.corner_count() <= 2);
    assert_eq!(route.path.vertical_lines().count(), 0);
    insta::assert_snapshot!(describe(&route.path), @r"
    M 5,0
    L 8,0
    ");
}

#[test]
fn descend_turns_twice() {
    let bars = vec![Bar::new("A", 0.0, 2.0, 3), Bar::new("B", 5.0, 8.0, 0)];
    let route = route_between(&bars, 0, 1);

    assert_eq!(route.topology, Topology::Descend);
    insta::assert_snapshot!(describe(&route.path), @r"
    M 2,3
    L 2.125,3
    C 2.21875,3 2.25,2.90625 2.25,2.875
    L 2.25,0.125
    C 2.25,0.03125 2.28125,0 2.375,0
    L 5,0
    ");
}

#[test]
fn overlapping_bars_detour_through_corridor() {
    let bars = vec![Bar::new("A", 2.0, 10.0, 3), Bar::new("B", 8.0, 12.0, 1)];
    let route = route_between(&bars, 0, 1);

    assert_eq!(route.topology, Topology::DetourBelow);
    assert_eq!(route.path.corner_count(), 4);
    insta::assert_snapshot!(describe(&route.path), @r"
    M 10,3
    L 10.125,3
    C 10.21875,3 10.25,2.90625 10.25,2.875
    L 10.25,2.125
    C 10.25,2.03125 10.21875,2 10.125,2
    L 7.875,2
    C 7.78125,2 7.75,1.90625 7.75,1.875
    L 7.75,1.125
    C 7.75,1.03125 7.78125,1 7.875,1
    L 8,1
    ");
}

#[test]
fn obstacle_under_the_corridor_lane_is_passed_without_climbing() {
    let bars = vec![
        Bar::new("A", 0.0, 10.0, 3),
        Bar::new("O", 5.0, 9.0, 2),
        Bar::new("B", 8.0, 12.0, 1),
    ];
    let route = route_between(&bars, 0, 2);

    assert_eq!(route.topology, Topology::DetourBelow);
    assert_eq!(crossing(&route, &bars[1..2]), None);
    assert!(verticals_keep_direction(&route));
    insta::assert_snapshot!(describe(&route.path), @r"
    M 10,3
    L 10.125,3
    C 10.21875,3 10.25,2.90625 10.25,2.875
    L 10.25,2.625
    C 10.25,2.53125 10.21875,2.5 10.125,2.5
    L 4.875,2.5
    C 4.78125,2.5 4.75,2.40625 4.75,2.375
    L 4.75,1.625
    C 4.75,1.53125 4.78125,1.5 4.875,1.5
    L 7.625,1.5
    C 7.71875,1.5 7.75,1.40625 7.75,1.375
    L 7.75,1.125
    C 7.75,1.03125 7.78125,1 7.875,1
    L 8,1
    ");
}

#[test]
fn routing_twice_is_identical() {
    let bars = vec![
        Bar::new("C", 14.0, 18.0, 0),
        Bar::new("A", 7.0, 12.0, 1),
        Bar::new("D", 6.0, 14.0, 2),
        Bar::new("E", 7.0, 14.0, 3),
        Bar::new("B", 3.0, 10.0, 4),
    ];
    let first = route_between(&bars, 4, 0);
    let second = route_between(&bars, 4, 0);
    assert_eq!(first.path.points(), second.path.points());
    assert_eq!(first, second);
}

#[test]
fn never_crosses_a_bar_on_a_grid_of_layouts() {
    // A source above and a target below, with one obstacle in each row
    // between them at a range of horizontal offsets.
    for source_end in [4.0, 6.0, 9.0] {
        for obstacle_start in [1.0, 3.0, 5.0, 7.0] {
            for target_start in [7.0, 11.0, 14.0] {
                let bars = vec![
                    Bar::new("source", 0.0, source_end, 4),
                    Bar::new("mid1", obstacle_start, obstacle_start + 8.0, 3),
                    Bar::new("mid2", obstacle_start + 1.0, obstacle_start + 6.0, 2),
                    Bar::new("mid3", obstacle_start - 0.5, obstacle_start + 7.0, 1),
                    Bar::new("target", target_start, target_start + 3.0, 0),
                ];
                let route = route_between(&bars, 0, 4);
                let others = &bars[1..4];
                assert_eq!(
                    crossing(&route, others),
                    None,
                    "source_end={source_end} obstacle_start={obstacle_start} target_start={target_start}"
                );
                assert!(
                    verticals_keep_direction(&route),
                    "source_end={source_end} obstacle_start={obstacle_start} target_start={target_start}"
                );
                assert_eq!(route.path.current_point(), bars[4].anchors(HALF).start);
            }
        }
    }
}

#[test]
fn overlap_layouts_never_climb_back() {
    // Source above the target and running past its start, with one bar in
    // the row between at every offset.
    for obstacle_start in [2.0, 3.5, 5.0, 6.5, 7.5] {
        for width in [1.5, 3.0, 4.0, 6.0] {
            let bars = vec![
                Bar::new("A", 0.0, 10.0, 3),
                Bar::new("O", obstacle_start, obstacle_start + width, 2),
                Bar::new("B", 8.0, 12.0, 1),
            ];
            let route = route_between(&bars, 0, 2);
            let label = format!("obstacle {obstacle_start}..{}", obstacle_start + width);
            assert_eq!(crossing(&route, &bars[1..2]), None, "{label}");
            assert!(verticals_keep_direction(&route), "{label}");
            assert_eq!(route.path.current_point(), bars[2].anchors(HALF).start);
        }
    }
}

#[test]
fn every_route_ends_with_arrowhead_on_target() {
    let bars = vec![
        Bar::new("A", 0.0, 4.0, 2),
        Bar::new("B", 6.0, 9.0, 0),
        Bar::new("C", 1.0, 3.0, 4),
    ];
    for (s, t) in [(0, 1), (1, 0), (0, 2), (2, 0), (1, 2)] {
        let route = route_between(&bars, s, t);
        assert_eq!(route.arrowhead.tip, bars[t].anchors(HALF).start);
        assert!((route.arrowhead.direction.length() - 1.0).abs() < 1e-12);
    }
}
