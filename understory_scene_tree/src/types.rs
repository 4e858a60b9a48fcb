// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, hit areas, and local geometry.

use kurbo::{Affine, Circle, Ellipse, Point, Rect, RoundedRect, Shape};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Newer
///
/// A `NodeId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This total order is used only for deterministic tie-breaks in
/// [hit testing](crate::Tree::hit_test_point).
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }

    #[inline]
    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and hit eligibility.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Invisible nodes and their descendants never receive hits.
        const VISIBLE = 0b0000_0001;
        /// Node accepts hits. Clearing this excludes the node and its descendants.
        const HITABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::HITABLE
    }
}

/// Explicit hit shape in a node's local coordinate space.
///
/// When present, it replaces [`LocalNode::local_bounds`] for point containment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HitArea {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rounded rectangle.
    RoundedRect(RoundedRect),
    /// Circle.
    Circle(Circle),
    /// Ellipse.
    Ellipse(Ellipse),
}

impl HitArea {
    /// Returns true if the local-space point lies inside the area.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.contains(pt),
            Self::RoundedRect(r) => r.contains(pt),
            Self::Circle(c) => c.contains(pt),
            Self::Ellipse(e) => e.contains(pt),
        }
    }

    /// Axis-aligned bounds of the area in local space.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::RoundedRect(r) => r.rect(),
            Self::Circle(c) => c.bounding_box(),
            Self::Ellipse(e) => e.bounding_box(),
        }
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Local (untransformed) bounds used for containment when no hit area is set.
    pub local_bounds: Rect,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Optional explicit hit area, in local space.
    pub hit_area: Option<HitArea>,
    /// Dispatch priority. Higher values are checked first by gesture routers.
    pub priority: Option<i32>,
    /// Visibility and hit flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            hit_area: None,
            priority: None,
            flags: NodeFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_area_shapes() {
        let r = HitArea::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(10.0, 5.0)), "rect max edge is exclusive");

        let c = HitArea::Circle(Circle::new((0.0, 0.0), 5.0));
        assert!(c.contains(Point::new(3.0, 3.0)));
        assert!(!c.contains(Point::new(4.0, 4.0)));
        assert_eq!(c.bounding_box(), Rect::new(-5.0, -5.0, 5.0, 5.0));

        let rr = HitArea::RoundedRect(RoundedRect::new(0.0, 0.0, 20.0, 20.0, 8.0));
        assert!(rr.contains(Point::new(10.0, 10.0)));
        assert!(!rr.contains(Point::new(0.5, 0.5)), "rounded corner excludes the tip");
    }

    #[test]
    fn newer_than_semantics() {
        let old = NodeId::new(10, 1);
        let newer_same_slot = NodeId::new(10, 2);
        let same_gen_higher_slot = NodeId::new(11, 2);
        let same_gen_lower_slot = NodeId::new(9, 2);

        assert!(newer_same_slot.is_newer_than(old));
        assert!(same_gen_higher_slot.is_newer_than(newer_same_slot));
        assert!(!same_gen_lower_slot.is_newer_than(newer_same_slot));
    }
}
