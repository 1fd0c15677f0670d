//! Connectors: a source/target pair that remembers its corridor gap.

use super::geometry::{Bar, measure_corridor};
use super::{Route, RouteConfig, route};

/// A dependency arrow between two bars, referenced by name.
///
/// The corridor gap is measured once, when the connector is attached to a
/// bar snapshot, and reused for every route until it is attached again.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub source: String,
    pub target: String,
    corridor: Option<f64>,
}

impl Connector {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            corridor: None,
        }
    }

    /// Measure and cache the corridor gap over `bars`.
    pub fn attach(&mut self, bars: &[Bar], config: &RouteConfig) {
        self.corridor = measure_corridor(bars, config.bar_half_height());
        crate::log::trace!(
            source = %self.source,
            target = %self.target,
            corridor = ?self.corridor,
            "connector attached"
        );
    }

    /// The cached gap, `None` until attached to at least two bars.
    pub fn corridor(&self) -> Option<f64> {
        self.corridor
    }

    /// Whether the connector runs between `a` and `b`, in that direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        self.source == a && self.target == b
    }

    /// Whether either end is the bar called `name`.
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }

    /// Route against `bars`. Returns `None` if either endpoint is missing.
    pub fn route(&self, bars: &[Bar], config: &RouteConfig) -> Option<Route> {
        let source = bars.iter().find(|b| b.name == self.source)?;
        let target = bars.iter().find(|b| b.name == self.target)?;
        Some(route(source, target, bars, self.corridor, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Topology;
    use glam::dvec2;

    #[test]
    fn attach_caches_gap_once() {
        let mut bars = vec![Bar::new("A", 0.0, 4.0, 0), Bar::new("B", 6.0, 9.0, 3)];
        let mut conn = Connector::new("A", "B");
        assert_eq!(conn.corridor(), None);

        conn.attach(&bars, &RouteConfig::default());
        assert_eq!(conn.corridor(), Some(2.5));

        // Later snapshots do not change the cached value.
        bars.push(Bar::new("C", 0.0, 1.0, 1));
        assert!(conn.route(&bars, &RouteConfig::default()).is_some());
        assert_eq!(conn.corridor(), Some(2.5));
    }

    #[test]
    fn attach_to_single_bar_leaves_gap_unset() {
        let bars = [Bar::new("A", 0.0, 4.0, 0)];
        let mut conn = Connector::new("A", "A");
        conn.attach(&bars, &RouteConfig::default());
        assert_eq!(conn.corridor(), None);
    }

    #[test]
    fn route_needs_both_endpoints() {
        let bars = [Bar::new("A", 0.0, 4.0, 0)];
        let conn = Connector::new("A", "missing");
        assert!(conn.route(&bars, &RouteConfig::default()).is_none());
    }

    #[test]
    fn detour_uses_cached_corridor() {
        // Source above and past the target: the path runs through the corridor.
        let bars = vec![Bar::new("A", 0.0, 10.0, 3), Bar::new("B", 8.0, 12.0, 1)];
        let mut conn = Connector::new("A", "B");
        conn.attach(&bars, &RouteConfig::default());
        assert_eq!(conn.corridor(), Some(1.5));

        let route = conn.route(&bars, &RouteConfig::default()).unwrap();
        assert_eq!(route.topology, Topology::DetourBelow);
        let corridor_leg = route
            .path
            .lines()
            .find(|(a, b)| a.y == b.y && b.x < a.x)
            .unwrap();
        // Half the gap below the source's bottom edge.
        assert_eq!(corridor_leg.0.y, 2.0);
        assert_eq!(route.path.current_point(), dvec2(8.0, 1.0));
        assert!(conn.joins("A", "B"));
        assert!(conn.touches("B"));
        assert!(!conn.joins("B", "A"));
    }
}
