// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene_tree --heading-base-level=0

//! Understory Scene Tree: a small, Kurbo-native retained scene graph.
//!
//! - Represents a hierarchy of nodes with local transforms, bounds, optional hit areas, priorities, and flags.
//! - Designates one detached root as the *stage*; only nodes attached (transitively) to the stage are hitable.
//! - Answers the questions a gesture router asks: parent links, visibility, world transforms, and point containment.
//!
//! ## Not a renderer, not a layout engine
//!
//! This crate neither draws nor measures.
//! Upstream code computes positions and sizes and writes them into the tree; downstream code
//! consumes containment tests and transforms.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, parent links, and the stage designation.
//! - [`LocalNode`]: per-node local data (bounds, transform, optional hit area, priority, flags).
//! - [`HitArea`]: explicit hit shapes in local space.
//! - [`NodeFlags`]: visibility and hit controls.
//! - [`NodeId`]: generational handle of a node.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_scene_tree::{LocalNode, Tree};
//! use kurbo::{Affine, Point, Rect, Vec2};
//!
//! let mut tree = Tree::new();
//! let stage = tree.insert_stage(LocalNode {
//!     local_bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
//!     ..Default::default()
//! });
//! let child = tree.insert(
//!     Some(stage),
//!     LocalNode {
//!         local_bounds: Rect::new(10.0, 10.0, 60.0, 60.0),
//!         priority: Some(1),
//!         ..Default::default()
//!     },
//! );
//!
//! tree.set_local_transform(child, Affine::translate(Vec2::new(10.0, 0.0)));
//! assert!(tree.contains_point(child, Point::new(65.0, 20.0)));
//!
//! let hit = tree.hit_test_point(Point::new(25.0, 25.0)).unwrap();
//! assert_eq!(hit.node, child);
//! assert_eq!(hit.path, vec![stage, child]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, Tree};
pub use types::{HitArea, LocalNode, NodeFlags, NodeId};
