// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_tooltip::hover::HoverTarget;
use understory_tooltip::rewrite::rewrite;
use understory_tooltip::tooltip::{Measure, Tooltip};
use understory_tooltip::types::{Element, Node, PointerEvent, TriggerId};

/// `n` sibling paragraphs, every other one hinting.
fn gen_wide(n: usize) -> Vec<Node> {
    (0..n)
        .map(|i| {
            let el = Element::new("p").text(format!("paragraph {i}"));
            let el = if i % 2 == 0 {
                el.hint(format!("hint {i}"))
            } else {
                el
            };
            Node::from(el)
        })
        .collect()
}

/// A chain of `depth` nested divs with a single hinting leaf.
fn gen_deep(depth: usize) -> Vec<Node> {
    let mut el = Element::new("span").hint("leaf").text("leaf");
    for _ in 0..depth {
        el = Element::new("div").child(el);
    }
    vec![Node::from(el)]
}

struct Grid;

impl Measure for Grid {
    fn anchor_rect(&self, id: TriggerId) -> Option<Rect> {
        let y = f64::from(id.0) * 20.0;
        Some(Rect::new(0.0, y, 100.0, y + 20.0))
    }

    fn overlay_size(&self, _: TriggerId) -> Option<Size> {
        Some(Size::new(80.0, 24.0))
    }
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");
    for &n in &[64usize, 512, 4096] {
        let tree = gen_wide(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("wide_n{}", n), |b| {
            b.iter(|| black_box(rewrite(black_box(&tree)).unwrap()));
        });
    }
    for &d in &[16usize, 128] {
        let tree = gen_deep(d);
        group.bench_function(format!("deep_d{}", d), |b| {
            b.iter(|| black_box(rewrite(black_box(&tree)).unwrap()));
        });
    }
    group.finish();
}

fn bench_hover_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("hover");
    for &n in &[64usize, 512] {
        let tree = gen_wide(n);
        let targets = (n / 2) as u32;
        group.throughput(Throughput::Elements(u64::from(targets)));
        group.bench_function(format!("sweep_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut tt = Tooltip::new();
                    tt.render(&tree).unwrap();
                    tt
                },
                |mut tt| {
                    // Pointer slides over every anchor in turn, one frame each.
                    for i in 0..targets {
                        let t = u64::from(i) * 16;
                        let _ = tt.tick(t);
                        let path = [HoverTarget::Anchor(TriggerId(i))];
                        let _ = tt.pointer_move(&path, &PointerEvent::at(t), &Grid);
                        let _ = tt.layout(&Grid);
                    }
                    black_box(tt.portal().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rewrite, bench_hover_sweep);
criterion_main!(benches);
