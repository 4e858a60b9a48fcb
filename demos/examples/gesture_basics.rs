// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlapping nodes on a scene tree: the higher priority wins.
//!
//! Node A (priority 1) spans (100,100)-(200,200); node B (priority 2) spans (150,50)-(250,150).
//! The surface sits at (20,30) in the viewport, so viewport points are shifted before hit testing.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_basics`

use kurbo::{Point, Rect};
use understory_gesture::{GestureEngine, GestureEvent, Manager, Router};
use understory_scene_tree::{LocalNode, NodeId, Tree};

fn node(rect: Rect, priority: i32) -> LocalNode {
    LocalNode {
        local_bounds: rect,
        priority: Some(priority),
        ..LocalNode::default()
    }
}

fn main() {
    let mut tree = Tree::new();
    let stage = tree.insert_stage(LocalNode {
        local_bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
        ..LocalNode::default()
    });
    let a = tree.insert(Some(stage), node(Rect::new(100.0, 100.0, 200.0, 200.0), 1));
    let b = tree.insert(Some(stage), node(Rect::new(150.0, 50.0, 250.0, 150.0), 2));
    let label = move |n: NodeId| if n == a { "A" } else { "B" };

    let surface = Rect::new(20.0, 30.0, 420.0, 330.0);
    let mut router = Router::with_surface(tree, Manager::new(), surface);
    for n in [a, b] {
        router.listen(n, "tap", None, move |ctx| {
            println!("  {} received tap at scene {:?}", label(ctx.node), ctx.event.center);
        });
    }
    router.start();

    let order: Vec<&str> = router.dispatch_order("tap").into_iter().map(label).collect();
    println!("check order for \"tap\": {order:?}");
    println!(
        "engine listens to \"tap\": {}",
        router.manager().is_ok_and(|mc| mc.is_listening("tap"))
    );

    for viewport in [Point::new(195.0, 155.0), Point::new(130.0, 140.0), Point::new(30.0, 40.0)] {
        println!("tap at viewport {viewport:?}");
        let Ok(mc) = router.manager_mut() else { return };
        mc.begin_input();
        let events = mc.emit(GestureEvent::new("tap", viewport));
        for e in &events {
            if router.handle(e).is_none() {
                println!("  no target");
            }
        }
    }

    // Hiding B lets A take the overlap.
    router.scene_mut().set_visible(b, false);
    println!("B hidden; tap at viewport (195, 155)");
    let _ = router.handle(&GestureEvent::new("tap", Point::new(195.0, 155.0)));
}
