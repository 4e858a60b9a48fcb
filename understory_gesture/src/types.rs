// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: the scene-graph seam, dispatch policies, and the callback context.

use alloc::boxed::Box;
use kurbo::{Affine, Point};

use crate::event::GestureEvent;

/// Scene-graph queries the router needs to pick a target.
///
/// Nodes are addressed by a cheap key `K` (an id, an index, a handle). Queries on keys the
/// scene no longer knows should answer conservatively: not visible, no parent.
pub trait SceneGraph<K> {
    /// Returns the parent of `node`, or `None` if it is detached or a root.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Returns true if `node` is marked visible.
    fn is_visible(&self, node: &K) -> bool;

    /// Returns true if `node` is the designated root of the scene.
    fn is_stage(&self, node: &K) -> bool;

    /// Explicit hitable override. `Some(false)` excludes the node and its subtree.
    fn hitable(&self, _node: &K) -> Option<bool> {
        None
    }

    /// Dispatch priority of `node`; bindings default to `0` when this is `None`.
    fn priority_of(&self, _node: &K) -> Option<i32> {
        None
    }

    /// Local → scene transform of `node`.
    fn world_transform(&self, node: &K) -> Affine;

    /// Containment test against an explicit hit shape, with `local` in node space.
    ///
    /// Returns `None` when the node has no explicit hit shape.
    fn hit_area_contains(&self, _node: &K, _local: Point) -> Option<bool> {
        None
    }

    /// The node's own containment test, with `pt` in scene space.
    fn contains_point(&self, node: &K, pt: Point) -> bool;
}

/// When the dispatcher hit tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitPolicy {
    /// Hit test every event.
    #[default]
    PerPhase,
    /// Hit test the first sample of a gesture and reuse that target for later phases
    /// (`panstart`, `panmove`, `panend`) until the final sample.
    PerGesture,
}

/// Lifecycle state of a [`Router`](crate::router::Router).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RouterState {
    /// Accepting registrations; no recognizers, no dispatch.
    #[default]
    Idle,
    /// Recognizers exist for every registered event name and dispatch is active.
    Running,
    /// Torn down. Terminal.
    Destroyed,
}

/// What a gesture callback sees.
///
/// `node` is the resolved target. `scene` is mutable so callbacks can move, hide, or
/// restyle nodes in response to the gesture.
pub struct GestureCtx<'a, K, S> {
    /// Target node.
    pub node: K,
    /// Event with its center in scene space.
    pub event: &'a GestureEvent,
    /// The scene the target lives in.
    pub scene: &'a mut S,
    pub(crate) ended: bool,
}

impl<K: core::fmt::Debug, S> core::fmt::Debug for GestureCtx<'_, K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureCtx")
            .field("node", &self.node)
            .field("event", &self.event.name)
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}

impl<K, S> GestureCtx<'_, K, S> {
    /// Ask the gesture engine to abort recognition for the current input sequence.
    ///
    /// Takes effect once the callback returns.
    pub fn end(&mut self) {
        self.ended = true;
    }

    /// Returns true if [`end`](Self::end) was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

/// A registered gesture callback.
pub type Callback<K, S> = Box<dyn FnMut(&mut GestureCtx<'_, K, S>)>;
