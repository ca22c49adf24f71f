//! Hazard-dependent cost of traversing a passage.
//!
//! Each active zone contributes to the penalty of a passage segment:
//! - crossing a hard zone blocks the passage outright,
//! - crossing a soft zone adds a fixed large penalty,
//! - passing near a zone (measured from the segment midpoint) adds a penalty
//!   that fades linearly to zero at the proximity radius.
//!
//! Penalties never go negative and do not depend on the direction the
//! passage is walked in.

use std::collections::BTreeSet;

use geo::{Coord, Rect};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::{midpoint, point_to_rect_distance, segment_intersects_rect};
use crate::{
    Cost, DEFAULT_INTERSECT_PENALTY, DEFAULT_PROXIMITY_PENALTY, DEFAULT_PROXIMITY_RADIUS,
    Error, FloorGraph, HazardZone,
};

/// Tuning of the hazard penalties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Added when a passage crosses a soft zone
    pub intersect_penalty: Cost,
    /// Distance from a zone at which the proximity penalty reaches zero
    pub proximity_radius: f64,
    /// Proximity penalty for a passage whose midpoint touches a zone
    pub proximity_penalty: Cost,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            intersect_penalty: DEFAULT_INTERSECT_PENALTY,
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
            proximity_penalty: DEFAULT_PROXIMITY_PENALTY,
        }
    }
}

impl HazardConfig {
    /// Checks that every value is finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] naming the first offending field
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("intersect_penalty", self.intersect_penalty),
            ("proximity_radius", self.proximity_radius),
            ("proximity_penalty", self.proximity_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "hazard {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Raises the intersection penalty to at least ten times the heaviest
    /// passage of `graph`, so that any detour avoiding a soft zone is cheaper
    /// than crossing it.
    #[must_use]
    pub fn calibrated_for(mut self, graph: &FloorGraph) -> Self {
        let floor = 10.0 * graph.max_base_weight();
        if self.intersect_penalty.is_nan() || self.intersect_penalty < floor {
            debug!(
                "Raising soft zone penalty from {} to {floor}",
                self.intersect_penalty
            );
            self.intersect_penalty = floor;
        }
        self
    }
}

/// Which hazard zones are live for a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardState {
    /// Master switch; when off no zone has any effect
    pub active: bool,
    /// Zones switched off individually, by id
    pub suppressed: BTreeSet<String>,
}

impl Default for HazardState {
    fn default() -> Self {
        Self::active()
    }
}

impl HazardState {
    pub fn active() -> Self {
        Self {
            active: true,
            suppressed: BTreeSet::new(),
        }
    }

    pub fn inactive() -> Self {
        Self {
            active: false,
            suppressed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn suppress(mut self, zone_id: impl Into<String>) -> Self {
        self.suppressed.insert(zone_id.into());
        self
    }

    pub fn is_live(&self, zone: &HazardZone) -> bool {
        self.active && !self.suppressed.contains(&zone.id)
    }
}

/// Hazard evaluation of one passage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePenalty {
    /// Extra cost on top of the base weight
    Penalty(Cost),
    /// The passage crosses a hard zone and cannot be used
    Blocked,
}

impl EdgePenalty {
    pub fn is_blocked(self) -> bool {
        matches!(self, EdgePenalty::Blocked)
    }

    /// Additional cost, `None` when blocked
    pub fn cost(self) -> Option<Cost> {
        match self {
            EdgePenalty::Penalty(cost) => Some(cost),
            EdgePenalty::Blocked => None,
        }
    }
}

/// Snapshot of the live zones of a request, ready for per-passage evaluation
#[derive(Debug, Clone)]
pub struct HazardField<'a> {
    zones: Vec<(&'a HazardZone, Rect<f64>)>,
    config: HazardConfig,
}

impl<'a> HazardField<'a> {
    pub fn new(zones: &'a [HazardZone], state: &HazardState, config: HazardConfig) -> Self {
        let zones = zones
            .iter()
            .filter(|zone| state.is_live(zone))
            .map(|zone| (zone, zone.rect()))
            .collect();
        Self { zones, config }
    }

    /// A field without live zones; every passage costs its base weight
    pub fn clear() -> Self {
        Self {
            zones: Vec::new(),
            config: HazardConfig::default(),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn live_zones(&self) -> impl Iterator<Item = &HazardZone> {
        self.zones.iter().map(|(zone, _)| *zone)
    }

    /// Penalty for walking the straight segment between `a` and `b`
    pub fn penalty(&self, a: Coord<f64>, b: Coord<f64>) -> EdgePenalty {
        let middle = midpoint(a, b);
        let mut total = 0.0;

        for (zone, rect) in &self.zones {
            if segment_intersects_rect(a, b, rect) {
                if zone.hard {
                    return EdgePenalty::Blocked;
                }
                total += self.config.intersect_penalty.max(0.0);
            } else {
                total += self.proximity_penalty(point_to_rect_distance(middle, rect));
            }
        }

        EdgePenalty::Penalty(total)
    }

    fn proximity_penalty(&self, distance: f64) -> Cost {
        let radius = self.config.proximity_radius;
        if !radius.is_finite() || radius <= 0.0 || distance >= radius {
            return 0.0;
        }
        self.config.proximity_penalty.max(0.0) * (1.0 - distance / radius)
    }
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;

    fn config() -> HazardConfig {
        HazardConfig {
            intersect_penalty: 1_000.0,
            proximity_radius: 10.0,
            proximity_penalty: 20.0,
        }
    }

    fn zones() -> Vec<HazardZone> {
        vec![
            HazardZone::new("smoke", 40.0, 0.0, 20.0, 20.0, false),
            HazardZone::new("fire", 140.0, 0.0, 20.0, 20.0, true),
        ]
    }

    #[test]
    fn crossing_soft_zone_adds_fixed_penalty() {
        let zones = zones();
        let field = HazardField::new(&zones, &HazardState::active(), config());
        let penalty = field.penalty(coord! { x: 30.0, y: 10.0 }, coord! { x: 70.0, y: 10.0 });
        assert_eq!(penalty, EdgePenalty::Penalty(1_000.0));
    }

    #[test]
    fn crossing_hard_zone_blocks() {
        let zones = zones();
        let field = HazardField::new(&zones, &HazardState::active(), config());
        // crosses both zones, hard wins
        let penalty = field.penalty(coord! { x: 30.0, y: 10.0 }, coord! { x: 170.0, y: 10.0 });
        assert!(penalty.is_blocked());
        assert_eq!(penalty.cost(), None);
    }

    #[test]
    fn proximity_penalty_fades_linearly() {
        let zones = vec![HazardZone::new("smoke", 0.0, 0.0, 10.0, 10.0, false)];
        let field = HazardField::new(&zones, &HazardState::active(), config());

        let close = field.penalty(coord! { x: 11.0, y: 0.0 }, coord! { x: 11.0, y: 10.0 });
        assert!((close.cost().unwrap() - 18.0).abs() < 1e-9);

        // midpoint 5 units right of the zone: half the maximum
        let half = field.penalty(coord! { x: 15.0, y: 0.0 }, coord! { x: 15.0, y: 10.0 });
        assert!((half.cost().unwrap() - 10.0).abs() < 1e-9);

        let far = field.penalty(coord! { x: 25.0, y: 0.0 }, coord! { x: 25.0, y: 10.0 });
        assert_eq!(far.cost(), Some(0.0));
    }

    #[test]
    fn closer_is_never_cheaper() {
        let zones = vec![HazardZone::new("smoke", 0.0, 0.0, 10.0, 10.0, false)];
        let field = HazardField::new(&zones, &HazardState::active(), config());

        let costs: Vec<_> = (11..25)
            .map(|x| {
                let x = f64::from(x);
                field
                    .penalty(coord! { x: x, y: 0.0 }, coord! { x: x, y: 10.0 })
                    .cost()
                    .unwrap()
            })
            .collect();
        assert!(costs.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn penalty_is_symmetric() {
        let zones = zones();
        let field = HazardField::new(&zones, &HazardState::active(), config());
        let segments = [
            (coord! { x: 0.0, y: 0.0 }, coord! { x: 45.0, y: 35.0 }),
            (coord! { x: 30.0, y: 25.0 }, coord! { x: 65.0, y: 25.0 }),
            (coord! { x: 100.0, y: -5.0 }, coord! { x: 150.0, y: 30.0 }),
            (coord! { x: 62.0, y: 5.0 }, coord! { x: 70.0, y: 15.0 }),
        ];
        for (a, b) in segments {
            assert_eq!(field.penalty(a, b), field.penalty(b, a));
        }
    }

    #[test]
    fn inactive_state_ignores_every_zone() {
        let zones = zones();
        let field = HazardField::new(&zones, &HazardState::inactive(), config());
        assert!(field.is_clear());
        let penalty = field.penalty(coord! { x: 30.0, y: 10.0 }, coord! { x: 170.0, y: 10.0 });
        assert_eq!(penalty, EdgePenalty::Penalty(0.0));
    }

    #[test]
    fn suppressed_zone_is_ignored() {
        let zones = zones();
        let state = HazardState::active().suppress("fire");
        let field = HazardField::new(&zones, &state, config());

        let live: Vec<_> = field.live_zones().map(|zone| zone.id.as_str()).collect();
        assert_eq!(live, ["smoke"]);
        let penalty = field.penalty(coord! { x: 130.0, y: 10.0 }, coord! { x: 170.0, y: 10.0 });
        assert_eq!(penalty, EdgePenalty::Penalty(0.0));
    }

    #[test]
    fn penalties_from_several_zones_add_up() {
        let zones = vec![
            HazardZone::new("a", 0.0, 0.0, 10.0, 10.0, false),
            HazardZone::new("b", 20.0, 0.0, 10.0, 10.0, false),
        ];
        let field = HazardField::new(&zones, &HazardState::active(), config());
        let penalty = field.penalty(coord! { x: -5.0, y: 5.0 }, coord! { x: 35.0, y: 5.0 });
        assert_eq!(penalty, EdgePenalty::Penalty(2_000.0));
    }

    #[test]
    fn negative_tuning_never_rewards_hazards() {
        let zones = vec![HazardZone::new("smoke", 0.0, 0.0, 10.0, 10.0, false)];
        let tuning = HazardConfig {
            intersect_penalty: -50.0,
            proximity_radius: 10.0,
            proximity_penalty: -5.0,
        };
        let field = HazardField::new(&zones, &HazardState::active(), tuning);
        let crossing = field.penalty(coord! { x: -5.0, y: 5.0 }, coord! { x: 15.0, y: 5.0 });
        let near = field.penalty(coord! { x: 12.0, y: 0.0 }, coord! { x: 12.0, y: 10.0 });
        assert_eq!(crossing, EdgePenalty::Penalty(0.0));
        assert_eq!(near, EdgePenalty::Penalty(0.0));
    }

    #[test]
    fn non_finite_or_negative_tuning_is_rejected() {
        assert!(HazardConfig::default().validate().is_ok());

        for tuning in [
            HazardConfig {
                proximity_radius: f64::NAN,
                ..HazardConfig::default()
            },
            HazardConfig {
                intersect_penalty: f64::INFINITY,
                ..HazardConfig::default()
            },
            HazardConfig {
                proximity_penalty: -1.0,
                ..HazardConfig::default()
            },
        ] {
            assert!(matches!(tuning.validate(), Err(Error::InvalidData(_))));
        }
    }

    #[test]
    fn nan_tuning_neither_poisons_nor_frees_zones() {
        use crate::create_floor_graph;
        use crate::loading::{FloorPlan, RawEdge, RawNode};
        use crate::NodeRole;

        let graph = create_floor_graph(&FloorPlan {
            nodes: vec![
                RawNode::new("a", 0.0, 0.0, NodeRole::Room),
                RawNode::new("b", 100.0, 0.0, NodeRole::Exit),
            ],
            edges: vec![RawEdge::new("a", "b", None)],
            corridors: Vec::new(),
            danger_zones: Vec::new(),
        })
        .unwrap();
        let tuning = HazardConfig {
            intersect_penalty: f64::NAN,
            proximity_radius: f64::NAN,
            proximity_penalty: 20.0,
        }
        .calibrated_for(&graph);
        assert_eq!(tuning.intersect_penalty, 1_000.0);

        let zones = zones();
        let field = HazardField::new(&zones, &HazardState::active(), tuning);
        let crossing = field.penalty(coord! { x: 30.0, y: 10.0 }, coord! { x: 70.0, y: 10.0 });
        let near = field.penalty(coord! { x: 30.0, y: 30.0 }, coord! { x: 70.0, y: 30.0 });
        assert_eq!(crossing, EdgePenalty::Penalty(1_000.0));
        assert_eq!(near, EdgePenalty::Penalty(0.0));
    }
}
