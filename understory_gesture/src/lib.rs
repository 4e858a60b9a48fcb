// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: route recognized gestures to prioritized scene-graph targets.
//!
//! ## Overview
//!
//! A gesture engine reports abstract gestures (pan, pinch, press, rotate, swipe, tap).
//! A retained scene graph holds the nodes users touch. This crate sits between the two:
//! it decides which recognizers the engine needs, how they relate, and which node receives
//! each recognized event.
//!
//! Neither side knows about the other. The engine is reached through [`GestureEngine`]
//! and the scene through [`SceneGraph`].
//!
//! ## Event names
//!
//! Listeners name the events they want: plain names like `"tap"` or `"panstart"`, or composite
//! names like `"zoomPan-panmove"` that address a dedicated recognizer shared by every name with
//! the same prefix. See [`kind`] for the resolution rules.
//!
//! ## Dispatch
//!
//! For each event, [`Router::handle`]:
//! 1) moves the event center from viewport to scene space (on a copy),
//! 2) walks the bindings for that event name from highest to lowest priority,
//! 3) skips nodes that are hidden, excluded, or not attached to the stage,
//! 4) picks the first node containing the point, and calls its callback.
//!
//! Callbacks receive a [`GestureCtx`] with the target, the event, the scene (mutable), and
//! [`GestureCtx::end`] to abort the engine's current input sequence.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_gesture::{GestureEvent, Manager, Relation, Router, SceneGraph};
//! use kurbo::{Affine, Point, Rect};
//!
//! // Two overlapping rectangles hanging off a stage (index 0).
//! struct Boxes(Vec<(Rect, i32)>);
//!
//! impl SceneGraph<usize> for Boxes {
//!     fn parent_of(&self, n: &usize) -> Option<usize> { (*n != 0).then_some(0) }
//!     fn is_visible(&self, n: &usize) -> bool { *n < self.0.len() }
//!     fn is_stage(&self, n: &usize) -> bool { *n == 0 }
//!     fn priority_of(&self, n: &usize) -> Option<i32> { Some(self.0[*n].1) }
//!     fn world_transform(&self, _: &usize) -> Affine { Affine::IDENTITY }
//!     fn contains_point(&self, n: &usize, pt: Point) -> bool { self.0[*n].0.contains(pt) }
//! }
//!
//! let scene = Boxes(vec![
//!     (Rect::new(0.0, 0.0, 400.0, 300.0), 0),
//!     (Rect::new(100.0, 100.0, 200.0, 200.0), 1),
//!     (Rect::new(150.0, 50.0, 250.0, 150.0), 2),
//! ]);
//! let mut router: Router<usize, _> = Router::new(scene, Manager::new());
//! router.listen(1, "tap", None, |ctx| println!("A tapped at {:?}", ctx.event.center));
//! router.listen(2, "tap", None, |_| println!("B tapped"));
//! router.listen(2, "double-tap", None, |_| {});
//! router.set_dependency(Relation::RequireFailure, "tap", "double-tap").unwrap();
//! router.start();
//!
//! assert_eq!(router.handle(&GestureEvent::new("tap", Point::new(175.0, 125.0))), Some(2));
//! assert_eq!(router.handle(&GestureEvent::new("tap", Point::new(110.0, 110.0))), Some(1));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in dependencies.
//! - `libm`: `no_std` float math for kurbo.
//! - `scene_tree_adapter`: [`SceneGraph`] for `understory_scene_tree::Tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod engine;
pub mod error;
pub mod event;
pub mod hit;
pub mod kind;
pub mod manager;
pub mod options;
pub mod router;
pub mod types;

mod dependency;
mod registry;

pub use engine::{GestureEngine, Relation};
pub use error::Error;
pub use event::{GestureEvent, Normalizer};
pub use kind::RecognizerKind;
pub use manager::Manager;
pub use options::{Direction, Factories, RecognizerConfig, RecognizerOptions};
pub use router::Router;
pub use types::{GestureCtx, HitPolicy, RouterState, SceneGraph};
