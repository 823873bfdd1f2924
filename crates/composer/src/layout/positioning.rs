//! Position resolution for diagram nodes.
//!
//! [`PriorPositions`] holds positions recovered from a saved layout, keyed by
//! node type and external id. [`PositionResolver`] returns the saved position
//! when one exists and otherwise nudges the default grid position until it
//! no longer collides with any node placed earlier in the same pass.

use indexmap::IndexMap;
use log::{trace, warn};

use composer_core::geometry::Point;

use crate::{
    config::LayoutConfig,
    diagram::{NodeId, NodeKind},
};

/// Positions saved by a previous editing session.
///
/// Positions are looked up by node id first, then by node type and external
/// id. Layouts written by older editors only carry the latter, which cannot
/// tell apart two vias showing the same entity at different orders.
///
/// # Examples
///
/// ```
/// # use composer::{NodeKind, layout::PriorPositions};
/// # use composer_core::geometry::Point;
/// let mut prior = PriorPositions::new();
/// prior.insert(NodeKind::Origin, "7", Point::new(500.0, 500.0));
/// assert_eq!(prior.get(NodeKind::Origin, "7"), Some(Point::new(500.0, 500.0)));
/// assert_eq!(prior.get(NodeKind::Via, "7"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriorPositions {
    by_kind: IndexMap<NodeKind, IndexMap<String, Point>>,
    by_node: IndexMap<String, Point>,
}

impl PriorPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position. A later insert for the same key replaces the
    /// earlier one.
    pub fn insert(&mut self, kind: NodeKind, external_id: impl Into<String>, position: Point) {
        self.by_kind
            .entry(kind)
            .or_default()
            .insert(external_id.into(), position);
    }

    /// Records the position of a model under its own id.
    pub fn insert_node(&mut self, node_id: impl Into<String>, position: Point) {
        self.by_node.insert(node_id.into(), position);
    }

    pub fn get(&self, kind: NodeKind, external_id: &str) -> Option<Point> {
        self.by_kind.get(&kind)?.get(external_id).copied()
    }

    /// Looks up the saved position of a node.
    pub fn get_node(&self, id: NodeId) -> Option<Point> {
        self.by_node
            .get(&id.to_string())
            .copied()
            .or_else(|| self.get(id.kind(), &id.entity().to_string()))
    }

    /// Number of positions keyed by node type and external id.
    pub fn len(&self) -> usize {
        self.by_kind.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Running x-coordinate of one row of the default grid.
#[derive(Debug, Clone, Copy)]
pub struct RowCursor {
    next: Point,
    spacing: f64,
}

impl RowCursor {
    pub fn new(start: Point, spacing: f64) -> Self {
        Self {
            next: start,
            spacing,
        }
    }

    /// Returns the current default position and advances one column.
    pub fn advance(&mut self) -> Point {
        let current = self.next;
        self.next = current.offset(self.spacing, 0.0);
        current
    }
}

/// Resolves the final position of each node.
#[derive(Debug, Clone, Copy)]
pub struct PositionResolver<'a> {
    layout: &'a LayoutConfig,
    prior: &'a PriorPositions,
}

impl<'a> PositionResolver<'a> {
    pub fn new(layout: &'a LayoutConfig, prior: &'a PriorPositions) -> Self {
        Self { layout, prior }
    }

    /// Returns the saved position for the node, or a collision-free position
    /// derived from `default`.
    ///
    /// Saved positions are returned verbatim, even if they overlap other
    /// nodes. A default position is shifted diagonally by the collision step
    /// while any node in `placed` lies closer than the collision threshold on
    /// both axes.
    pub fn resolve(&self, id: NodeId, default: Point, placed: &[Point]) -> Point {
        if let Some(saved) = self.prior.get_node(id) {
            trace!(node_id:% = id, x = saved.x(), y = saved.y(); "Using saved position");
            return saved;
        }
        self.avoid_collisions(default, placed)
    }

    fn avoid_collisions(&self, default: Point, placed: &[Point]) -> Point {
        let threshold = self.layout.collision_threshold();
        let step = self.layout.collision_step();
        if !(step.is_finite() && step > 0.0) {
            warn!(step; "Collision step is not positive, skipping collision avoidance");
            return default;
        }

        if !threshold.is_finite() {
            warn!(threshold; "Collision threshold is not finite, skipping collision avoidance");
            return default;
        }

        // Jumping straight past a blocking node clears it for good, so the
        // search takes at most one jump per placed node.
        let mut steps = 0.0_f64;
        let mut candidate = default;
        while let Some(other) = placed.iter().find(|other| other.is_near(candidate, threshold)) {
            let lead = (candidate.x() - other.x()).max(candidate.y() - other.y());
            steps += ((threshold - lead) / step).ceil().max(1.0);
            let next = default.offset(steps * step, steps * step);
            if next == candidate {
                warn!(threshold, step; "Collision search stalled, keeping last candidate");
                break;
            }
            candidate = next;
        }
        candidate
    }
}


#[cfg(test)]
mod proptest_tests {
    use composer_core::identifier::EntityId;
    use proptest::prelude::*;

    use super::*;

    fn point() -> impl Strategy<Value = Point> {
        (0i32..2_000, 0i32..2_000).prop_map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
    }

    proptest! {
        #[test]
        fn resolved_default_never_collides(
            placed in prop::collection::vec(point(), 0..40),
            default in point(),
        ) {
            let layout = LayoutConfig::default();
            let prior = PriorPositions::new();
            let resolver = PositionResolver::new(&layout, &prior);

            let position = resolver.resolve(NodeId::via(0, EntityId::new(1)), default, &placed);
            prop_assert!(placed.iter().all(|p| !p.is_near(position, 50.0)));
            prop_assert!(position.x() >= default.x());
            prop_assert!((position.x() - default.x() - (position.y() - default.y())).abs() < 1e-9);
        }
    }
}
