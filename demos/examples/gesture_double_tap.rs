// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap / double-tap disambiguation with `requireFailure`.
//!
//! The single tap is held until the double-tap recognizer fails. When a double tap is
//! recognized instead, the held single tap is discarded.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_double_tap`

use kurbo::{Point, Rect};
use understory_gesture::{GestureEvent, Manager, RecognizerOptions, Relation, Router};
use understory_scene_tree::{LocalNode, Tree};

fn main() {
    let mut tree = Tree::new();
    let stage = tree.insert_stage(LocalNode {
        local_bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
        ..LocalNode::default()
    });
    let button = tree.insert(
        Some(stage),
        LocalNode {
            local_bounds: Rect::new(50.0, 50.0, 150.0, 100.0),
            ..LocalNode::default()
        },
    );

    let mut router = Router::new(tree, Manager::new());
    router.listen(button, "tap", None, |ctx| {
        println!("  single tap on {:?}", ctx.node);
    });
    router.listen(
        button,
        "double-tap",
        Some(RecognizerOptions {
            taps: Some(2),
            ..RecognizerOptions::default()
        }),
        |ctx| println!("  double tap on {:?}", ctx.node),
    );
    // Declared before the recognizers exist; applied by `start`.
    if let Err(e) = router.set_dependency(Relation::RequireFailure, "tap", "double-tap") {
        println!("dependency rejected: {e}");
        return;
    }
    router.start();

    let at = Point::new(100.0, 75.0);

    println!("one tap, then the double-tap window expires:");
    deliver(&mut router, |mc| {
        mc.begin_input();
        let held = mc.emit(GestureEvent::new("tap", at));
        println!("  delivered immediately: {}", held.len());
        mc.fail("double-tap")
    });

    println!("two quick taps:");
    deliver(&mut router, |mc| {
        mc.begin_input();
        let mut out = mc.emit(GestureEvent::new("tap", at));
        let mut second = GestureEvent::new("double-tap", at);
        second.tap_count = 2;
        out.extend(mc.emit(second));
        out
    });
}

fn deliver(
    router: &mut Router<understory_scene_tree::NodeId, Tree>,
    drive: impl FnOnce(&mut Manager) -> Vec<GestureEvent>,
) {
    let Ok(mc) = router.manager_mut() else {
        return;
    };
    for e in drive(mc) {
        let _ = router.handle(&e);
    }
}
