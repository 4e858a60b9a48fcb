// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{HitArea, LocalNode, NodeFlags, NodeId};

/// Upper bound on ancestor walks; deeper chains are treated as malformed.
const MAX_DEPTH: usize = 1024;

/// Retained scene tree.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    stage: Option<NodeId>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl Tree {
    /// Create a new empty tree without a stage.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            stage: None,
        }
    }

    /// Insert a new node as a child of `parent` (or detached if `None`).
    ///
    /// A stale `parent` leaves the new node detached.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Insert a root node and designate it as the stage.
    pub fn insert_stage(&mut self, local: LocalNode) -> NodeId {
        let id = self.insert(None, local);
        self.stage = Some(id);
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        if self.stage == Some(id) {
            self.stage = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`, or detach it when `None`.
    ///
    /// Requests that would make a node its own ancestor are ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.is_ancestor_or_self(id, p))
        {
            return;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Designate the stage node (the root that is hitable without a parent).
    pub fn set_stage(&mut self, id: Option<NodeId>) {
        self.stage = id.filter(|id| self.is_alive(*id));
    }

    /// The designated stage node, if any.
    pub fn stage(&self) -> Option<NodeId> {
        self.stage
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_mut(id) {
            n.local.local_bounds = bounds;
        }
    }

    /// Update the explicit hit area.
    pub fn set_hit_area(&mut self, id: NodeId, area: Option<HitArea>) {
        if let Some(n) = self.node_mut(id) {
            n.local.hit_area = area;
        }
    }

    /// Update the dispatch priority.
    pub fn set_priority(&mut self, id: NodeId, priority: Option<i32>) {
        if let Some(n) = self.node_mut(id) {
            n.local.priority = priority;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Toggle [`NodeFlags::VISIBLE`].
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_mut(id) {
            n.local.flags.set(NodeFlags::VISIBLE, visible);
        }
    }

    /// Toggle [`NodeFlags::HITABLE`].
    pub fn set_hitable(&mut self, id: NodeId, hitable: bool) {
        if let Some(n) = self.node_mut(id) {
            n.local.flags.set(NodeFlags::HITABLE, hitable);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Local data of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node(id).map(|n| &n.local)
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a live node, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|n| n.local.flags)
    }

    /// Composite local→world transform of a live node.
    ///
    /// Computed from the parent chain on demand, so it always reflects the latest setters.
    pub fn world_transform(&self, id: NodeId) -> Affine {
        let mut tf = Affine::IDENTITY;
        let mut cur = Some(id);
        let mut depth = 0;
        while let Some(c) = cur {
            let Some(n) = self.node(c) else { break };
            tf = n.local.local_transform * tf;
            cur = n.parent;
            depth += 1;
            if depth > MAX_DEPTH {
                break;
            }
        }
        tf
    }

    /// Returns true if a world-space point lies inside the node.
    ///
    /// The point is mapped into local space and tested against the hit area if one is set,
    /// or the local bounds otherwise.
    pub fn contains_point(&self, id: NodeId, pt: Point) -> bool {
        let Some(n) = self.node(id) else {
            return false;
        };
        let local = self.world_transform(id).inverse() * pt;
        match &n.local.hit_area {
            Some(area) => area.contains(local),
            None => n.local.local_bounds.contains(local),
        }
    }

    /// Returns true if the node and all of its ancestors are visible and hitable,
    /// and the chain ends at the stage.
    pub fn is_hitable(&self, id: NodeId) -> bool {
        let mut cur = id;
        for _ in 0..MAX_DEPTH {
            let Some(n) = self.node(cur) else {
                return false;
            };
            if !n.local.flags.contains(NodeFlags::VISIBLE | NodeFlags::HITABLE) {
                return false;
            }
            match n.parent {
                Some(p) => cur = p,
                None => return self.stage == Some(cur),
            }
        }
        false
    }

    /// Hit test a world-space point. Returns the topmost hitable node.
    ///
    /// Nodes are ranked by priority (absent counts as `0`). If several nodes share the
    /// highest priority, the newer [`NodeId`] wins.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let mut best: Option<(NodeId, i32)> = None;
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot.as_ref() else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(i as u32, node.generation);
            if !self.is_hitable(id) || !self.contains_point(id, pt) {
                continue;
            }
            let p = node.local.priority.unwrap_or(0);
            match best {
                None => best = Some((id, p)),
                Some((best_id, p_best)) => {
                    if p > p_best || (p == p_best && id.is_newer_than(best_id)) {
                        best = Some((id, p));
                    }
                }
            }
        }
        best.map(|(node, _)| Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.generation())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        for _ in 0..MAX_DEPTH {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
        true
    }

    fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for _ in 0..MAX_DEPTH {
            out.push(id);
            match self.parent(id) {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }
}
