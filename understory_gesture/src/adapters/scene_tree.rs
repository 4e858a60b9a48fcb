// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`SceneGraph`] for the Understory scene tree.
//!
//! ## Feature
//!
//! Enable with `scene_tree_adapter`.
//!
//! ## Notes
//!
//! - Dead node ids are invisible and have no parent, so stale bindings never resolve.
//! - A node without [`NodeFlags::HITABLE`] reports `hitable() == Some(false)`.
//! - Explicit [`HitArea`](understory_scene_tree::HitArea)s are tested in node space;
//!   other nodes fall back to [`Tree::contains_point`].

use kurbo::{Affine, Point};
use understory_scene_tree::{NodeFlags, NodeId, Tree};

use crate::types::SceneGraph;

impl SceneGraph<NodeId> for Tree {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }

    fn is_visible(&self, node: &NodeId) -> bool {
        self.flags(*node)
            .is_some_and(|f| f.contains(NodeFlags::VISIBLE))
    }

    fn is_stage(&self, node: &NodeId) -> bool {
        self.stage() == Some(*node)
    }

    fn hitable(&self, node: &NodeId) -> Option<bool> {
        let flags = self.flags(*node)?;
        (!flags.contains(NodeFlags::HITABLE)).then_some(false)
    }

    fn priority_of(&self, node: &NodeId) -> Option<i32> {
        self.local(*node)?.priority
    }

    fn world_transform(&self, node: &NodeId) -> Affine {
        Self::world_transform(self, *node)
    }

    fn hit_area_contains(&self, node: &NodeId, local: Point) -> Option<bool> {
        self.local(*node)?
            .hit_area
            .as_ref()
            .map(|area| area.contains(local))
    }

    fn contains_point(&self, node: &NodeId, pt: Point) -> bool {
        Self::contains_point(self, *node, pt)
    }
}
