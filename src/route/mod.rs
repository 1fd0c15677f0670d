//! Dependency connector routing.
//!
//! A route is a pure function of the two endpoint bars, an immutable snapshot
//! of every bar on the chart, the cached corridor gap and a [`RouteConfig`]:
//!
//! 1. pick a [`Topology`] from the relative position of the bars,
//! 2. emit the base path with rounded corners,
//! 3. re-route vertical legs around bars they would cross,
//! 4. finish with an [`Arrowhead`] at the target.

pub mod avoid;
pub mod connector;
pub mod corner;
pub mod defaults;
pub mod geometry;
pub mod path;
pub mod topology;

use glam::{DVec2, dvec2};

use crate::errors::ConfigError;
use crate::types::{non_negative, positive};

pub use avoid::avoid_obstacles;
pub use connector::Connector;
pub use corner::{Corner, Heading, Quadrant, Rotation, append_corner};
pub use geometry::{Anchors, Bar, measure_corridor};
pub use path::{Path, PathOp};
pub use topology::Topology;

use topology::{Endpoints, base_path};

/// Tunable routing geometry, in chart units.
///
/// Fields are private so every instance has passed validation; build one
/// with [`RouteConfig::default`] and the `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteConfig {
    clearance: f64,
    corner_radius: f64,
    curve_factor: f64,
    bar_half_height: f64,
    fallback_corridor: f64,
    arrow_scale: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            clearance: defaults::CLEARANCE,
            corner_radius: defaults::CORNER_RADIUS,
            curve_factor: defaults::CURVE_FACTOR,
            bar_half_height: defaults::BAR_HALF_HEIGHT,
            fallback_corridor: defaults::FALLBACK_CORRIDOR,
            arrow_scale: defaults::ARROW_SCALE,
        }
    }
}

impl RouteConfig {
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn curve_factor(&self) -> f64 {
        self.curve_factor
    }

    pub fn bar_half_height(&self) -> f64 {
        self.bar_half_height
    }

    pub fn fallback_corridor(&self) -> f64 {
        self.fallback_corridor
    }

    pub fn arrow_scale(&self) -> f64 {
        self.arrow_scale
    }

    /// Set the clearance. The corner radius must still fit twice into it.
    pub fn with_clearance(mut self, clearance: f64) -> Result<Self, ConfigError> {
        self.clearance = positive(clearance).map_err(|e| ConfigError::invalid("clearance", e))?;
        self.check_radius()
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Result<Self, ConfigError> {
        self.corner_radius = positive(radius).map_err(|e| ConfigError::invalid("radius", e))?;
        self.check_radius()
    }

    /// Set the cubic control offset as a fraction of the radius, in `(0, 1]`.
    pub fn with_curve_factor(mut self, factor: f64) -> Result<Self, ConfigError> {
        let factor = positive(factor).map_err(|e| ConfigError::invalid("curve", e))?;
        if factor > 1.0 {
            return Err(ConfigError::CurveFactor { factor });
        }
        self.curve_factor = factor;
        Ok(self)
    }

    /// Set the bar half height; bars on adjacent rows must not touch and
    /// two corners must still fit between them.
    pub fn with_bar_half_height(mut self, half: f64) -> Result<Self, ConfigError> {
        let half = positive(half).map_err(|e| ConfigError::invalid("bar height", e))?;
        if half >= 0.5 {
            return Err(ConfigError::BarTooTall { half_height: half });
        }
        self.bar_half_height = half;
        self.check_radius()
    }

    pub fn with_fallback_corridor(mut self, corridor: f64) -> Result<Self, ConfigError> {
        self.fallback_corridor =
            non_negative(corridor).map_err(|e| ConfigError::invalid("corridor", e))?;
        Ok(self)
    }

    pub fn with_arrow_scale(mut self, scale: f64) -> Result<Self, ConfigError> {
        self.arrow_scale = positive(scale).map_err(|e| ConfigError::invalid("arrow scale", e))?;
        Ok(self)
    }

    fn check_radius(self) -> Result<Self, ConfigError> {
        if self.corner_radius > self.clearance * 0.5 {
            return Err(ConfigError::RadiusTooLarge {
                radius: self.corner_radius,
                clearance: self.clearance,
            });
        }
        if 2.0 * self.corner_radius > 1.0 - 2.0 * self.bar_half_height {
            return Err(ConfigError::RadiusExceedsRowGap {
                radius: self.corner_radius,
                half_height: self.bar_half_height,
            });
        }
        Ok(self)
    }
}

/// Arrowhead at the end of a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    /// Point the arrow touches (the target's start anchor)
    pub tip: DVec2,
    /// Unit vector of travel at the tip
    pub direction: DVec2,
    /// Start of the terminal shaft, one clearance behind the tip
    pub tail: DVec2,
    /// Visual size of the head, in pixels
    pub scale: f64,
}

impl Arrowhead {
    fn at_end(path: &Path, config: &RouteConfig) -> Self {
        let tip = path.current_point();
        // Identical endpoints leave no incoming segment; point into the target.
        let direction = path.end_direction().unwrap_or(dvec2(1.0, 0.0));
        Self {
            tip,
            direction,
            tail: tip - direction * config.clearance,
            scale: config.arrow_scale,
        }
    }
}

/// A fully routed connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: Path,
    pub arrowhead: Arrowhead,
    pub topology: Topology,
}

/// Route a connector from the end of `source` to the start of `target`.
///
/// `bars` is the chart's bar snapshot (the endpoints included). `corridor`
/// is the gap measured when the connector was attached; `None` falls back to
/// the configured corridor.
pub fn route(
    source: &Bar,
    target: &Bar,
    bars: &[Bar],
    corridor: Option<f64>,
    config: &RouteConfig,
) -> Route {
    let half = config.bar_half_height;
    let from = source.anchors(half);
    let to = target.anchors(half);

    let topology = Topology::classify(from.end, to.start, config.clearance);
    crate::log::debug!(
        source = %source.name,
        target = %target.name,
        ?topology,
        "routing connector"
    );

    let corridor = corridor.unwrap_or_else(|| {
        crate::log::debug!(
            fallback = config.fallback_corridor,
            "no corridor measured, using fallback"
        );
        config.fallback_corridor
    });

    let ends = Endpoints {
        start: from.end,
        end: to.start,
        source_top: from.top.y,
        source_bottom: from.bottom.y,
    };
    let path = avoid_obstacles(base_path(topology, ends, corridor, config), bars, config);
    let arrowhead = Arrowhead::at_end(&path, config);

    Route {
        path,
        arrowhead,
        topology,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    fn obstacle_scene() -> Vec<Bar> {
        vec![
            Bar::new("source", 1.0, 5.0, 0),
            Bar::new("obstacle", 3.0, 10.0, 1),
            Bar::new("target", 8.0, 12.0, 2),
        ]
    }

    #[test]
    fn default_config_is_consistent() {
        let config = RouteConfig::default();
        assert_eq!(config.corner_radius(), config.clearance() * 0.5);
        assert_eq!(config.fallback_corridor(), 0.5);
        assert_eq!(config.curve_factor(), 0.75);
    }

    #[test]
    fn config_rejects_bad_values() {
        let config = RouteConfig::default();
        assert!(matches!(
            config.with_clearance(f64::NAN),
            Err(ConfigError::InvalidValue {
                source: NumericError::NaN,
                ..
            })
        ));
        assert!(matches!(
            config.with_corner_radius(0.2),
            Err(ConfigError::RadiusTooLarge { .. })
        ));
        assert!(matches!(
            config.with_clearance(0.2),
            Err(ConfigError::RadiusTooLarge { .. })
        ));
        assert!(matches!(
            config.with_curve_factor(1.5),
            Err(ConfigError::CurveFactor { .. })
        ));
        assert!(matches!(
            config.with_bar_half_height(0.5),
            Err(ConfigError::BarTooTall { .. })
        ));
        assert!(config.with_clearance(0.5).is_ok());
    }

    #[test]
    fn radius_must_fit_between_adjacent_bars() {
        let wide = RouteConfig::default().with_clearance(2.0).unwrap();
        assert!(matches!(
            wide.with_corner_radius(1.0),
            Err(ConfigError::RadiusExceedsRowGap { .. })
        ));
        assert!(wide.with_corner_radius(0.25).is_ok());
        assert!(matches!(
            wide.with_corner_radius(0.25)
                .and_then(|c| c.with_bar_half_height(0.3)),
            Err(ConfigError::RadiusExceedsRowGap { .. })
        ));
        assert!(RouteConfig::default().with_bar_half_height(0.375).is_ok());
    }

    #[test]
    fn routes_around_intervening_bar() {
        let bars = obstacle_scene();
        let corridor = measure_corridor(&bars, 0.25);
        let route = route(&bars[0], &bars[2], &bars, corridor, &RouteConfig::default());

        assert_eq!(route.topology, Topology::Ascend);
        assert_eq!(route.path.start(), dvec2(5.0, 0.0));
        assert_eq!(route.path.current_point(), dvec2(8.0, 2.0));
        assert_eq!(route.path.corner_count(), 6);
        for (a, b) in route.path.vertical_lines() {
            assert!(
                !bars[1].spans_x(a.x) || !bars[1].overlaps_y(a.y.min(b.y), a.y.max(b.y), 0.25),
                "vertical leg at x={} crosses the obstacle",
                a.x
            );
        }
        // Detour hugs the obstacle's left edge.
        assert!(route.path.vertical_lines().any(|(a, _)| a.x == 2.75));
    }

    #[test]
    fn arrowhead_points_into_target() {
        let bars = obstacle_scene();
        let route = route(&bars[0], &bars[2], &bars, None, &RouteConfig::default());
        assert_eq!(
            route.arrowhead,
            Arrowhead {
                tip: dvec2(8.0, 2.0),
                direction: dvec2(1.0, 0.0),
                tail: dvec2(7.75, 2.0),
                scale: 20.0,
            }
        );
    }

    #[test]
    fn identical_endpoints_give_straight_path() {
        let bar = Bar::new("solo", 2.0, 6.0, 3);
        let route = route(&bar, &bar, std::slice::from_ref(&bar), None, &RouteConfig::default());
        assert_eq!(route.topology, Topology::AlignedDescend);
        assert_eq!(
            route.path.ops(),
            &[
                PathOp::MoveTo(dvec2(6.0, 3.0)),
                PathOp::LineTo(dvec2(2.0, 3.0))
            ]
        );
        assert_eq!(route.arrowhead.direction, dvec2(-1.0, 0.0));
    }

    #[test]
    fn routing_is_deterministic() {
        let bars = obstacle_scene();
        let config = RouteConfig::default();
        let first = route(&bars[0], &bars[2], &bars, Some(0.5), &config);
        let second = route(&bars[0], &bars[2], &bars, Some(0.5), &config);
        assert_eq!(first, second);
    }
}
