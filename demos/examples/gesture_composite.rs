// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A composite pan recognizer driving a drag with per-gesture targeting.
//!
//! `zoomPan-panstart`, `zoomPan-panmove` and `zoomPan-panend` share one `zoomPan-pan`
//! recognizer configured for two pointers. With `HitPolicy::PerGesture` the node hit by the
//! first sample keeps receiving the gesture even when the pointer outruns it.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_composite`

use kurbo::{Affine, Point, Rect, Vec2};
use understory_gesture::{Direction, GestureEvent, HitPolicy, Manager, RecognizerOptions, Router};
use understory_scene_tree::{LocalNode, Tree};

fn main() {
    let mut tree = Tree::new();
    let stage = tree.insert_stage(LocalNode {
        local_bounds: Rect::new(0.0, 0.0, 640.0, 480.0),
        ..LocalNode::default()
    });
    let card = tree.insert(
        Some(stage),
        LocalNode {
            local_bounds: Rect::new(0.0, 0.0, 80.0, 60.0),
            ..LocalNode::default()
        },
    );

    let mut router = Router::new(tree, Manager::new());
    router.set_hit_policy(HitPolicy::PerGesture);

    let options = RecognizerOptions {
        pointers: Some(2),
        direction: Some(Direction::ALL),
        ..RecognizerOptions::default()
    };
    router.listen(card, "zoomPan-panstart", Some(options), |ctx| {
        println!("  grab {:?} at {:?}", ctx.node, ctx.event.center);
    });
    router.listen(card, "zoomPan-panmove", None, |ctx| {
        let delta = ctx.event.delta;
        ctx.scene.set_local_transform(ctx.node, Affine::translate(delta));
        println!("  move by {delta:?}");
    });
    router.listen(card, "zoomPan-panend", None, |ctx| {
        println!("  drop at {:?}", ctx.scene.world_transform(ctx.node) * Point::ZERO);
    });
    router.start();

    if let Ok(mc) = router.manager() {
        for r in mc.recognizers() {
            println!(
                "recognizer `{}` ({}), pointers = {}",
                r.name(),
                r.kind(),
                r.config().pointers
            );
        }
    }

    // The pointer moves faster than the card follows it; later samples land outside.
    let start = Point::new(10.0, 10.0);
    let samples = [
        ("zoomPan-panstart", Vec2::ZERO, true, false),
        ("zoomPan-panmove", Vec2::new(120.0, 40.0), false, false),
        ("zoomPan-panmove", Vec2::new(300.0, 90.0), false, false),
        ("zoomPan-panend", Vec2::new(300.0, 90.0), false, true),
    ];
    let Ok(mc) = router.manager_mut() else { return };
    mc.begin_input();
    let mut delivered = Vec::new();
    for (name, delta, first, last) in samples {
        let mut e = GestureEvent::new(name, start + delta * 1.5).with_phase(first, last);
        e.delta = delta;
        e.pointers = 2;
        delivered.extend(mc.emit(e));
    }
    for e in &delivered {
        if router.handle(e).is_none() {
            println!("  {} dropped", e.name);
        }
    }
}
