// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eligibility and containment checks used by the dispatcher.

use kurbo::Point;

use crate::types::SceneGraph;

/// Maximum number of ancestors visited by [`is_hitable`].
pub const MAX_DEPTH: usize = 1024;

/// Returns true if `node` may receive gestures.
///
/// A node is hitable when it is visible, not explicitly excluded, and either is the stage or
/// has a parent that is itself hitable. Detached nodes other than the stage never are.
///
/// Chains deeper than [`MAX_DEPTH`] count as not hitable.
pub fn is_hitable<K: Copy + core::fmt::Debug, S: SceneGraph<K>>(scene: &S, node: &K) -> bool {
    let mut cur = *node;
    for _ in 0..MAX_DEPTH {
        if !scene.is_visible(&cur) || scene.hitable(&cur) == Some(false) {
            return false;
        }
        match scene.parent_of(&cur) {
            Some(parent) => cur = parent,
            None => return scene.is_stage(&cur),
        }
    }
    log::warn!("ancestor chain of {node:?} exceeds {MAX_DEPTH} levels; treating as not hitable");
    false
}

/// Returns true if the scene-space point `pt` lies inside `node`.
///
/// An explicit hit shape is tested in node space through the inverse world transform;
/// otherwise the node's own containment test decides.
pub fn contains<K, S: SceneGraph<K>>(scene: &S, node: &K, pt: Point) -> bool {
    let local = scene.world_transform(node).inverse() * pt;
    scene
        .hit_area_contains(node, local)
        .unwrap_or_else(|| scene.contains_point(node, pt))
}
