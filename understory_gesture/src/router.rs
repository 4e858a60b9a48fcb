// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Connects a [`GestureEngine`] to a [`SceneGraph`]. Callers bind callbacks to scene nodes
//! per event name; the router creates the recognizers those names need, relates them, and
//! delivers every engine event to exactly one binding.
//!
//! ## Lifecycle
//!
//! - [`Router::listen`] registers bindings. Before [`Router::start`] nothing is created.
//! - [`Router::start`] creates one recognizer per distinct recognizer name, applies queued
//!   dependencies, and subscribes every event name. Calling it again does nothing.
//! - After start, `listen` with a new event name creates and subscribes it immediately.
//! - [`Router::destroy`] unsubscribes, tears down the engine, and makes the router inert.
//!
//! ## Target Selection
//!
//! - Bindings are stored in ascending priority; they are checked highest first.
//! - Equal priorities keep registration order; the earliest registration is checked first.
//! - A binding is skipped unless its node is [hitable](crate::hit::is_hitable) and
//!   [contains](crate::hit::contains) the event center.
//! - The first binding that passes wins; later ones are not evaluated.
//! - With [`HitPolicy::PerGesture`] the winner of a gesture's first sample is reused until
//!   its final sample, or until a callback ends the input sequence.
//!
//! ## Silent drops
//!
//! Unknown gesture names, dependencies on missing recognizers, and events without a target
//! are not errors. They are logged at `debug` and dropped.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::Rect;

use crate::dependency::Dependencies;
use crate::engine::{GestureEngine, Relation};
use crate::error::Error;
use crate::event::{GestureEvent, Normalizer};
use crate::hit;
use crate::kind::{options_key, recognizer_name, recognizer_name_for, resolve};
use crate::manager::Manager;
use crate::options::{Factories, RecognizerOptions};
use crate::registry::{Binding, Listeners};
use crate::types::{GestureCtx, HitPolicy, RouterState, SceneGraph};

/// Gesture-to-scene event router.
///
/// ## Usage
///
/// - Construct with [`Router::new`], or [`Router::with_surface`] when the engine reports
///   points relative to a viewport in which the scene surface is offset.
/// - Optionally configure:
///   - [`Router::set_factories`] to replace how recognizer configurations are built.
///   - [`Router::set_hit_policy`] to hit test once per gesture instead of once per event.
/// - Register callbacks with [`Router::listen`], declare relations with
///   [`Router::set_dependency`], then call [`Router::start`].
/// - Feed every engine event to [`Router::handle`].
pub struct Router<K, S, E = Manager> {
    scene: S,
    engine: E,
    factories: Factories,
    normalizer: Normalizer,
    hit_policy: HitPolicy,
    state: RouterState,
    listeners: Listeners<K, S>,
    options: HashMap<String, RecognizerOptions>,
    dependencies: Dependencies,
    // Keyed by recognizer name.
    gesture_targets: HashMap<String, K>,
}

impl<K: core::fmt::Debug, S, E> core::fmt::Debug for Router<K, S, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("state", &self.state)
            .field("hit_policy", &self.hit_policy)
            .field("normalizer", &self.normalizer)
            .field("events", &self.listeners.names())
            .field("pending_dependencies", &self.dependencies.len())
            .finish_non_exhaustive()
    }
}

impl<K, S, E> Router<K, S, E>
where
    K: Copy + Eq + core::fmt::Debug,
    S: SceneGraph<K>,
    E: GestureEngine,
{
    /// Create an idle router whose engine reports points in scene space.
    pub fn new(scene: S, engine: E) -> Self {
        Self {
            scene,
            engine,
            factories: Factories::default(),
            normalizer: Normalizer::default(),
            hit_policy: HitPolicy::default(),
            state: RouterState::Idle,
            listeners: Listeners::default(),
            options: HashMap::new(),
            dependencies: Dependencies::default(),
            gesture_targets: HashMap::new(),
        }
    }

    /// Create an idle router for a scene surface with the given viewport bounds.
    pub fn with_surface(scene: S, engine: E, surface_bounds: Rect) -> Self {
        let mut router = Self::new(scene, engine);
        router.normalizer = Normalizer::from_bounds(surface_bounds);
        router
    }

    /// Replace the recognizer factories. Affects recognizers created afterwards.
    pub fn set_factories(&mut self, factories: Factories) {
        self.factories = factories;
    }

    /// Set when hit testing happens.
    pub fn set_hit_policy(&mut self, policy: HitPolicy) {
        self.hit_policy = policy;
        self.gesture_targets.clear();
    }

    /// Current hit policy.
    pub fn hit_policy(&self) -> HitPolicy {
        self.hit_policy
    }

    /// Refresh the viewport offset after the surface moved or resized.
    pub fn recache_offset(&mut self, surface_bounds: Rect) {
        self.normalizer.recache(surface_bounds);
    }

    /// The coordinate normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Lifecycle state.
    pub fn state(&self) -> RouterState {
        self.state
    }

    /// The scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The gesture engine, for direct access.
    pub fn manager(&self) -> Result<&E, Error> {
        match self.state {
            RouterState::Destroyed => Err(Error::Destroyed),
            _ => Ok(&self.engine),
        }
    }

    /// The gesture engine, mutably.
    pub fn manager_mut(&mut self) -> Result<&mut E, Error> {
        match self.state {
            RouterState::Destroyed => Err(Error::Destroyed),
            _ => Ok(&mut self.engine),
        }
    }

    /// Number of dependency declarations not yet applied.
    pub fn pending_dependencies(&self) -> usize {
        self.dependencies.len()
    }

    /// Nodes bound to `event`, in the order they are checked (highest priority first).
    pub fn dispatch_order(&self, event: &str) -> Vec<K> {
        self.listeners
            .get(event)
            .map(|list| list.iter().rev().map(|b| b.node).collect())
            .unwrap_or_default()
    }

    /// Bind `callback` to `node` for events named `event`.
    ///
    /// The binding's priority is the node's [priority](SceneGraph::priority_of), or `0`.
    /// `options` are stored under the event's options key unless that key already has
    /// options; they configure the recognizer when it is created.
    ///
    /// Names that resolve to no recognizer kind are accepted and never receive events.
    pub fn listen<F>(
        &mut self,
        node: K,
        event: &str,
        options: Option<RecognizerOptions>,
        callback: F,
    ) where
        F: FnMut(&mut GestureCtx<'_, K, S>) + 'static,
    {
        if self.state == RouterState::Destroyed {
            log::warn!("listen({node:?}, {event}) on a destroyed router is ignored");
            return;
        }
        if let (Some(options), Some(key)) = (options, options_key(event)) {
            self.options.entry(key).or_insert(options);
        }
        let binding = Binding {
            priority: self.scene.priority_of(&node).unwrap_or(0),
            node,
            callback: Box::new(callback),
        };
        let is_new = self.listeners.insert(event, binding);
        if is_new && self.state == RouterState::Running && self.ensure_recognizer(event) {
            self.subscribe(event);
        }
    }

    /// Create every recognizer, apply queued dependencies, and subscribe every event name.
    pub fn start(&mut self) {
        match self.state {
            RouterState::Idle => {}
            RouterState::Running => {
                log::debug!("router already started");
                return;
            }
            RouterState::Destroyed => {
                log::warn!("start on a destroyed router is ignored");
                return;
            }
        }
        let mut names = self.listeners.names().to_vec();
        names.retain(|name| self.ensure_recognizer(name));
        self.dependencies.apply(&mut self.engine, None);
        for name in &names {
            self.subscribe(name);
        }
        self.state = RouterState::Running;
    }

    /// Declare that `target` relates to `base` (both event names).
    ///
    /// Applied immediately when the router is running and both recognizers exist; otherwise
    /// queued and applied as soon as they do. Declarations naming recognizers that never
    /// appear stay queued without error.
    pub fn set_dependency(
        &mut self,
        relation: Relation,
        target: &str,
        base: &str,
    ) -> Result<(), Error> {
        if self.state == RouterState::Destroyed {
            return Err(Error::Destroyed);
        }
        self.dependencies.push(relation, target, base);
        if self.state == RouterState::Running {
            self.dependencies.apply(&mut self.engine, None);
        }
        Ok(())
    }

    /// Deliver an engine event to its target and return that target.
    ///
    /// The center is normalized into scene space on a copy of `event`. Returns `None` when
    /// the router is not running or no binding resolves.
    pub fn handle(&mut self, event: &GestureEvent) -> Option<K> {
        match self.state {
            RouterState::Running => {}
            RouterState::Idle => {
                log::debug!("{} dropped: router not started", event.name);
                return None;
            }
            RouterState::Destroyed => {
                log::warn!("{} dropped: router destroyed", event.name);
                return None;
            }
        }
        let event = self.normalizer.normalize(event);
        let Some(index) = self.target_index(&event) else {
            log::debug!("{} at {:?} has no target", event.name, event.center);
            return None;
        };
        let list = self.listeners.get_mut(&event.name)?;
        let binding = &mut list[index];
        let node = binding.node;
        let mut ctx = GestureCtx {
            node,
            event: &event,
            scene: &mut self.scene,
            ended: false,
        };
        (binding.callback)(&mut ctx);
        let ended = ctx.ended;
        log::trace!("{} dispatched to {node:?}", event.name);
        if ended {
            self.engine.stop(true);
            // The aborted gestures will not deliver final samples.
            self.gesture_targets.clear();
        }
        Some(node)
    }

    /// Tear down: unsubscribe, destroy the engine, and clear every registry.
    pub fn destroy(&mut self) {
        if self.state == RouterState::Destroyed {
            return;
        }
        for name in self.listeners.names() {
            self.engine.off(name);
        }
        self.engine.destroy();
        self.listeners.clear();
        self.options.clear();
        self.dependencies.clear();
        self.gesture_targets.clear();
        self.state = RouterState::Destroyed;
    }

    // Returns false if `event` resolves to no recognizer kind.
    fn ensure_recognizer(&mut self, event: &str) -> bool {
        let Some(kind) = resolve(event) else {
            log::debug!("`{event}` names no recognizer kind; it will never fire");
            return false;
        };
        let name = recognizer_name_for(event, kind);
        if self.engine.contains(&name) {
            return true;
        }
        let options = options_key(event)
            .and_then(|key| self.options.get(&key).cloned())
            .unwrap_or_default();
        self.engine.add(self.factories.build(kind, name.clone(), &options));
        log::trace!("created {kind} recognizer `{name}` for `{event}`");
        if self.state == RouterState::Running {
            self.dependencies.apply(&mut self.engine, Some(&name));
        }
        true
    }

    fn subscribe(&mut self, event: &str) {
        if !self.engine.is_listening(event) {
            self.engine.on(event);
        }
    }

    fn target_index(&mut self, event: &GestureEvent) -> Option<usize> {
        match self.hit_policy {
            HitPolicy::PerPhase => self.hit_test(event),
            HitPolicy::PerGesture => {
                let key = recognizer_name(&event.name).unwrap_or_else(|| event.name.clone());
                if event.is_first {
                    self.gesture_targets.remove(&key);
                }
                let index = match self.gesture_targets.get(&key) {
                    Some(node) => {
                        log::trace!("{} reuses gesture target {node:?}", event.name);
                        self.listeners
                            .get(&event.name)
                            .and_then(|list| list.iter().rposition(|b| b.node == *node))
                    }
                    None => {
                        let index = self.hit_test(event);
                        if let (Some(i), false) = (index, event.is_final) {
                            let node = self.listeners.get(&event.name)?[i].node;
                            self.gesture_targets.insert(key.clone(), node);
                        }
                        index
                    }
                };
                if event.is_final {
                    self.gesture_targets.remove(&key);
                }
                index
            }
        }
    }

    fn hit_test(&self, event: &GestureEvent) -> Option<usize> {
        let list = self.listeners.get(&event.name)?;
        list.iter().rposition(|b| {
            hit::is_hitable(&self.scene, &b.node)
                && hit::contains(&self.scene, &b.node, event.center)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::{Affine, Point};

    #[derive(Clone, Debug)]
    struct Node {
        rect: Rect,
        parent: Option<usize>,
        visible: bool,
        hitable: Option<bool>,
        priority: Option<i32>,
    }

    // Node 0 is the stage; rectangles are in scene space.
    #[derive(Clone, Debug, Default)]
    struct Scene {
        nodes: Vec<Node>,
    }

    impl Scene {
        fn new() -> Self {
            let mut s = Self::default();
            s.nodes.push(Node {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                parent: None,
                visible: true,
                hitable: None,
                priority: None,
            });
            s
        }

        fn add(&mut self, rect: Rect, priority: Option<i32>) -> usize {
            self.nodes.push(Node {
                rect,
                parent: Some(0),
                visible: true,
                hitable: None,
                priority,
            });
            self.nodes.len() - 1
        }
    }

    impl SceneGraph<usize> for Scene {
        fn parent_of(&self, node: &usize) -> Option<usize> {
            self.nodes.get(*node).and_then(|n| n.parent)
        }
        fn is_visible(&self, node: &usize) -> bool {
            self.nodes.get(*node).is_some_and(|n| n.visible)
        }
        fn is_stage(&self, node: &usize) -> bool {
            *node == 0
        }
        fn hitable(&self, node: &usize) -> Option<bool> {
            self.nodes.get(*node).and_then(|n| n.hitable)
        }
        fn priority_of(&self, node: &usize) -> Option<i32> {
            self.nodes.get(*node).and_then(|n| n.priority)
        }
        fn world_transform(&self, _node: &usize) -> Affine {
            Affine::IDENTITY
        }
        fn contains_point(&self, node: &usize, pt: Point) -> bool {
            self.nodes.get(*node).is_some_and(|n| n.rect.contains(pt))
        }
    }

    type TestRouter = Router<usize, Scene, Manager>;

    fn tap(x: f64, y: f64) -> GestureEvent {
        GestureEvent::new("tap", Point::new(x, y))
    }

    // Overlapping A (priority 1) and B (priority 2).
    fn overlap_scene() -> (Scene, usize, usize) {
        let mut s = Scene::new();
        let a = s.add(Rect::new(100.0, 100.0, 200.0, 200.0), Some(1));
        let b = s.add(Rect::new(150.0, 50.0, 250.0, 150.0), Some(2));
        (s, a, b)
    }

    fn double_tap_options() -> RecognizerOptions {
        RecognizerOptions {
            taps: Some(2),
            ..Default::default()
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut GestureCtx<'_, usize, Scene>) + 'static) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        (hits, move |_: &mut GestureCtx<'_, usize, Scene>| h.set(h.get() + 1))
    }

    #[test]
    fn dispatch_order_is_highest_priority_first_with_stable_ties() {
        let mut s = Scene::new();
        let full = Rect::new(0.0, 0.0, 10.0, 10.0);
        let p2 = s.add(full, Some(2));
        let p3 = s.add(full, Some(3));
        let p1 = s.add(full, Some(1));
        let p2b = s.add(full, Some(2));
        let mut r = TestRouter::new(s, Manager::new());
        for n in [p2, p3, p1, p2b] {
            r.listen(n, "tap", None, |_| {});
        }
        assert_eq!(r.dispatch_order("tap"), vec![p3, p2, p2b, p1]);
        assert!(r.dispatch_order("pan").is_empty());
    }

    #[test]
    fn overlapping_nodes_resolve_by_priority() {
        let (s, a, b) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        r.listen(a, "tap", None, |_| {});
        r.listen(b, "tap", None, |_| {});
        r.start();
        assert_eq!(r.handle(&tap(175.0, 125.0)), Some(b));
        assert_eq!(r.handle(&tap(110.0, 110.0)), Some(a));
        assert_eq!(r.handle(&tap(5.0, 5.0)), None);
    }

    #[test]
    fn surface_offset_is_removed_before_hit_testing() {
        let (s, a, b) = overlap_scene();
        let surface = Rect::new(20.0, 30.0, 820.0, 630.0);
        let mut r = TestRouter::with_surface(s, Manager::new(), surface);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        r.listen(a, "tap", None, |_| {});
        r.listen(b, "tap", None, move |ctx| log.borrow_mut().push(ctx.event.center));
        r.start();
        let raw = tap(195.0, 155.0);
        assert_eq!(r.handle(&raw), Some(b));
        assert_eq!(raw.center, Point::new(195.0, 155.0), "caller's event is untouched");
        assert_eq!(seen.borrow().as_slice(), &[Point::new(175.0, 125.0)]);

        r.recache_offset(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(r.handle(&tap(110.0, 110.0)), Some(a));
    }

    #[test]
    fn ineligible_nodes_never_resolve() {
        let mut s = Scene::new();
        let r0 = Rect::new(0.0, 0.0, 50.0, 50.0);
        let hidden = s.add(r0, Some(4));
        s.nodes[hidden].visible = false;
        let excluded = s.add(r0, Some(3));
        s.nodes[excluded].hitable = Some(false);
        let detached = s.add(r0, Some(2));
        s.nodes[detached].parent = None;
        let group = s.add(r0, None);
        s.nodes[group].visible = false;
        let in_hidden_group = s.add(r0, Some(1));
        s.nodes[in_hidden_group].parent = Some(group);

        let mut r = TestRouter::new(s, Manager::new());
        for n in [hidden, excluded, detached, in_hidden_group] {
            r.listen(n, "tap", None, |_| {});
        }
        r.start();
        assert_eq!(r.handle(&tap(10.0, 10.0)), None);

        r.scene_mut().nodes[group].visible = true;
        assert_eq!(r.handle(&tap(10.0, 10.0)), Some(in_hidden_group));
    }

    #[test]
    fn composite_names_share_one_recognizer() {
        let (s, a, _) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        let two = RecognizerOptions {
            pointers: Some(2),
            ..Default::default()
        };
        let three = RecognizerOptions {
            pointers: Some(3),
            ..Default::default()
        };
        r.listen(a, "zoomPan-panstart", Some(two), |_| {});
        r.listen(a, "zoomPan-panmove", Some(three), |_| {});
        r.listen(a, "zoomPan-panend", None, |_| {});
        r.start();
        r.start();

        let mc = r.manager().unwrap();
        assert_eq!(mc.recognizers().len(), 1);
        let rec = &mc.recognizers()[0];
        assert_eq!(rec.name(), "zoomPan-pan");
        assert_eq!(rec.config().pointers, 2, "first options win");
        for e in ["zoomPan-panstart", "zoomPan-panmove", "zoomPan-panend"] {
            assert!(mc.is_listening(e));
        }
    }

    #[test]
    fn dependency_declared_early_applies_when_recognizers_appear() {
        let (s, a, b) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        r.set_dependency(Relation::RequireFailure, "tap", "double-tap").unwrap();
        r.set_dependency(Relation::RecognizeWith, "pan", "never-pinch").unwrap();
        r.listen(a, "tap", None, |_| {});
        r.start();
        assert_eq!(r.pending_dependencies(), 2);

        r.listen(b, "double-tap", Some(double_tap_options()), |_| {});
        assert_eq!(r.pending_dependencies(), 1, "the pinch relation never applies");
        let mc = r.manager().unwrap();
        assert_eq!(mc.get("tap").unwrap().require_failure(), &["double-tap"]);
        assert_eq!(mc.get("double-tap").unwrap().config().taps, 2);
    }

    #[test]
    fn listen_after_start_creates_only_what_is_missing() {
        let (s, a, b) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        r.listen(a, "pan", None, |_| {});
        r.start();
        assert_eq!(r.manager().unwrap().recognizers().len(), 1);

        r.listen(b, "tap", None, |_| {});
        r.listen(b, "panend", None, |_| {});
        r.listen(b, "pan", None, |_| {});
        let mc = r.manager().unwrap();
        let names: Vec<&str> = mc.recognizers().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["pan", "tap"]);
        assert!(mc.is_listening("tap"));
        assert!(mc.is_listening("panend"));
    }

    #[test]
    fn unknown_names_are_inert() {
        let (s, a, _) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        r.listen(a, "pointer.input", None, |_| {});
        r.listen(a, "rotation", None, |_| {});
        r.start();
        let mc = r.manager().unwrap();
        assert!(mc.recognizers().is_empty());
        assert!(!mc.is_listening("pointer.input"));
        assert!(!mc.is_listening("rotation"));

        r.listen(a, "doubletap", None, |_| {});
        assert!(r.manager().unwrap().recognizers().is_empty());
    }

    #[test]
    fn tap_waits_for_double_tap_to_fail() {
        let (s, a, _) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        let (taps, on_tap) = counter();
        let (doubles, on_double) = counter();
        r.listen(a, "tap", None, on_tap);
        r.listen(a, "double-tap", Some(double_tap_options()), on_double);
        r.set_dependency(Relation::RequireFailure, "tap", "double-tap").unwrap();
        r.start();

        let mc = r.manager_mut().unwrap();
        mc.begin_input();
        assert!(mc.emit(tap(110.0, 110.0)).is_empty());
        assert_eq!(taps.get(), 0);

        let released = r.manager_mut().unwrap().fail("double-tap");
        for e in &released {
            r.handle(e);
        }
        assert_eq!(taps.get(), 1);

        // A recognized double tap cancels the pending single tap.
        let mc = r.manager_mut().unwrap();
        mc.begin_input();
        assert!(mc.emit(tap(110.0, 110.0)).is_empty());
        let out = mc.emit(GestureEvent::new("double-tap", Point::new(110.0, 110.0)));
        for e in &out {
            r.handle(e);
        }
        assert_eq!((taps.get(), doubles.get()), (1, 1));
    }

    #[test]
    fn per_gesture_policy_reuses_first_target() {
        let mut s = Scene::new();
        let knob = s.add(Rect::new(0.0, 0.0, 20.0, 20.0), None);
        let mut r = TestRouter::new(s, Manager::new());
        r.set_hit_policy(HitPolicy::PerGesture);
        for e in ["panstart", "panmove", "panend"] {
            r.listen(knob, e, None, |_| {});
        }
        r.start();

        let at = |name: &str, x: f64, first: bool, last: bool| {
            GestureEvent::new(name, Point::new(x, 10.0)).with_phase(first, last)
        };
        assert_eq!(r.handle(&at("panstart", 10.0, true, false)), Some(knob));
        assert_eq!(r.handle(&at("panmove", 300.0, false, false)), Some(knob));
        assert_eq!(r.handle(&at("panend", 400.0, false, true)), Some(knob));
        // The cache ends with the gesture.
        assert_eq!(r.handle(&at("panmove", 300.0, false, false)), None);

        r.set_hit_policy(HitPolicy::PerPhase);
        assert_eq!(r.handle(&at("panstart", 10.0, true, false)), Some(knob));
        assert_eq!(r.handle(&at("panmove", 300.0, false, false)), None);
    }

    #[test]
    fn aborted_gesture_does_not_leak_its_target() {
        let mut s = Scene::new();
        let left = s.add(Rect::new(0.0, 0.0, 20.0, 20.0), None);
        let right = s.add(Rect::new(500.0, 0.0, 520.0, 20.0), None);
        let mut r = TestRouter::new(s, Manager::new());
        r.set_hit_policy(HitPolicy::PerGesture);
        for n in [left, right] {
            r.listen(n, "panstart", None, |ctx| ctx.end());
            r.listen(n, "panmove", None, |_| {});
        }
        r.start();

        let at = |name: &str, x: f64, first: bool| {
            GestureEvent::new(name, Point::new(x, 10.0)).with_phase(first, false)
        };
        // Ended by its callback; no final sample follows.
        assert_eq!(r.handle(&at("panstart", 10.0, true)), Some(left));
        assert_eq!(r.handle(&at("panmove", 510.0, false)), Some(right));

        // A new gesture always hit tests its first sample.
        r.set_hit_policy(HitPolicy::PerGesture);
        r.listen(left, "pan", None, |_| {});
        assert_eq!(r.handle(&at("pan", 10.0, true)), Some(left));
        assert_eq!(r.handle(&at("panstart", 510.0, true)), Some(right));
    }

    #[test]
    fn callbacks_can_edit_the_scene_and_end_the_sequence() {
        let (s, a, b) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        r.listen(b, "tap", None, |ctx| {
            let node = ctx.node;
            ctx.scene.nodes[node].visible = false;
            ctx.end();
            assert!(ctx.is_ended());
        });
        r.listen(a, "tap", None, |_| {});
        r.start();
        r.manager_mut().unwrap().begin_input();

        assert_eq!(r.handle(&tap(175.0, 125.0)), Some(b));
        assert!(r.manager().unwrap().is_stopped());
        assert_eq!(r.handle(&tap(175.0, 125.0)), Some(a), "b hid itself");
    }

    #[test]
    fn idle_router_dispatches_nothing() {
        let (s, a, _) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        r.listen(a, "tap", None, |_| {});
        assert_eq!(r.state(), RouterState::Idle);
        assert!(r.manager().unwrap().recognizers().is_empty());
        assert_eq!(r.handle(&tap(110.0, 110.0)), None);
    }

    #[test]
    fn destroyed_router_is_inert() {
        let (s, a, _) = overlap_scene();
        let mut r = TestRouter::new(s, Manager::new());
        let (hits, cb) = counter();
        r.listen(a, "tap", None, cb);
        r.start();
        r.destroy();
        assert_eq!(r.state(), RouterState::Destroyed);

        r.listen(a, "tap", None, |_| {});
        r.start();
        assert_eq!(r.handle(&tap(110.0, 110.0)), None);
        assert_eq!(hits.get(), 0);
        assert_eq!(r.manager().err(), Some(Error::Destroyed));
        assert!(r.manager_mut().is_err());
        assert_eq!(
            r.set_dependency(Relation::RecognizeWith, "pan", "pinch"),
            Err(Error::Destroyed)
        );
        assert!(r.dispatch_order("tap").is_empty());
    }
}
