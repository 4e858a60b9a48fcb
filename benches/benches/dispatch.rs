// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_gesture::{GestureEvent, HitPolicy, Manager, Router};
use understory_scene_tree::{LocalNode, NodeId, Tree};

// `n` nested squares sharing a corner; node `i` has priority `i` and shrinks with it,
// so a point near the far corner is contained only by the lowest priorities.
fn nested(n: usize) -> (Router<NodeId, Tree>, Vec<NodeId>) {
    let mut tree = Tree::new();
    let stage = tree.insert_stage(LocalNode {
        local_bounds: Rect::new(0.0, 0.0, 4096.0, 4096.0),
        ..LocalNode::default()
    });
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let side = 4096.0 - i as f64 * (4000.0 / n as f64);
        ids.push(tree.insert(
            Some(stage),
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, side, side),
                priority: Some(i32::try_from(i).unwrap_or(i32::MAX)),
                ..LocalNode::default()
            },
        ));
    }
    let mut router = Router::new(tree, Manager::new());
    for &id in &ids {
        router.listen(id, "tap", None, |_| {});
    }
    router.start();
    (router, ids)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_tap");
    for &n in &[16_usize, 256, 1024] {
        let (mut router, _) = nested(n);
        group.throughput(Throughput::Elements(1));
        let top = GestureEvent::new("tap", Point::new(10.0, 10.0));
        group.bench_function(format!("top_hit_n{n}"), |b| {
            b.iter(|| black_box(router.handle(black_box(&top))));
        });
        let deep = GestureEvent::new("tap", Point::new(4090.0, 4090.0));
        group.bench_function(format!("bottom_hit_n{n}"), |b| {
            b.iter(|| black_box(router.handle(black_box(&deep))));
        });
        let miss = GestureEvent::new("tap", Point::new(5000.0, 5000.0));
        group.bench_function(format!("miss_n{n}"), |b| {
            b.iter(|| black_box(router.handle(black_box(&miss))));
        });
    }
    group.finish();
}

fn bench_per_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_pan");
    for &n in &[16_usize, 256, 1024] {
        let (mut router, ids) = nested(n);
        for &id in &ids {
            router.listen(id, "panmove", None, |_| {});
        }
        for policy in [HitPolicy::PerPhase, HitPolicy::PerGesture] {
            router.set_hit_policy(policy);
            let at = Point::new(4090.0, 4090.0);
            let first = GestureEvent::new("panmove", at).with_phase(true, false);
            let _ = router.handle(&first);
            let moving = GestureEvent::new("panmove", at).with_phase(false, false);
            group.bench_function(format!("{policy:?}_n{n}"), |b| {
                b.iter(|| black_box(router.handle(black_box(&moving))));
            });
        }
    }
    group.finish();
}

fn bench_native_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tree_hit_test");
    for &n in &[16_usize, 256, 1024] {
        let (router, _) = nested(n);
        let tree = router.scene();
        group.bench_function(format!("top_hit_n{n}"), |b| {
            b.iter(|| black_box(tree.hit_test_point(black_box(Point::new(4090.0, 4090.0)))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_per_gesture, bench_native_hit_test);
criterion_main!(benches);
