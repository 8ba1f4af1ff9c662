// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_virtual_scroll::{
    Dimensions, LayoutProbe, ScrollEvents, ScrollHost, ScrollMetrics, ScrollParent, ScrollTarget,
    Subscription, VirtualScroll, VirtualScrollConfig, compute_window,
};

/// Host with a fixed grid of rendered children and a settable offset.
#[derive(Debug)]
struct BenchHost {
    client: Size,
    cell: Size,
    per_row: usize,
    rendered: usize,
    scroll_top: f64,
}

impl LayoutProbe for BenchHost {
    type Element = u32;

    fn client_size(&self, _target: &ScrollTarget<u32>) -> Size {
        self.client
    }

    fn scroll_top(&self, _target: &ScrollTarget<u32>) -> f64 {
        self.scroll_top
    }

    fn container_rect(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.client)
    }

    fn container_offset_top(&self) -> f64 {
        0.0
    }

    fn child_rect(&self, index: usize) -> Option<Rect> {
        (index < self.rendered).then(|| {
            let x = (index % self.per_row) as f64 * self.cell.width;
            let y = (index / self.per_row) as f64 * self.cell.height;
            Rect::from_origin_size((x, y), self.cell)
        })
    }
}

impl ScrollHost for BenchHost {
    fn set_scroll_top(&mut self, _target: &ScrollTarget<u32>, top: f64) {
        self.scroll_top = top.max(0.0);
    }

    fn subscribe(&mut self, _parent: &ScrollParent<u32>, _events: ScrollEvents) -> Subscription {
        Subscription::detached()
    }

    fn request_frame(&mut self) {}
}

fn controller(items: usize, configured: bool) -> VirtualScroll<usize, BenchHost> {
    let host = BenchHost {
        client: Size::new(800.0, 600.0),
        cell: Size::new(100.0, 24.0),
        per_row: 8,
        rendered: 8 * 26,
        scroll_top: 0.0,
    };
    let config = if configured {
        VirtualScrollConfig::new()
            .with_item_size(100.0, 24.0)
            .with_buffer_amount(16)
    } else {
        VirtualScrollConfig::new().with_buffer_amount(16)
    };
    let mut vs = VirtualScroll::new(host, config).expect("valid config");
    vs.set_items((0..items).collect());
    let mut now = 0.0;
    while vs.is_frame_pending() {
        vs.on_animation_frame(now);
        now += 16.0;
    }
    vs
}

fn bench_compute_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_virtual_scroll/compute_window");

    for &count in &[1_000_usize, 100_000, 10_000_000] {
        let d = Dimensions::from_sizes(
            count,
            Size::new(800.0, 600.0),
            Size::new(100.0, 24.0),
            0.0,
        );
        let step = (d.scroll_height / 997.0).max(1.0);
        group.bench_function(format!("sweep_1k_offsets(n={count})"), |b| {
            b.iter(|| {
                let mut top = 0.0;
                let mut acc = 0_usize;
                while top <= d.scroll_height {
                    let w = compute_window(black_box(&d), ScrollMetrics::new(top), 16);
                    acc = acc.wrapping_add(w.start ^ w.end);
                    top += step;
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_virtual_scroll/controller");

    for &(count, configured) in &[(10_000_usize, true), (10_000_usize, false), (1_000_000_usize, true)]
    {
        let label = if configured { "configured" } else { "measured" };
        group.bench_function(format!("scroll_frames({label},n={count})"), |b| {
            b.iter_batched(
                || controller(count, configured),
                |mut vs| {
                    let mut now = 0.0;
                    for step in 0..256 {
                        vs.host_mut().scroll_top = f64::from(step) * 97.0;
                        vs.on_scroll();
                        black_box(vs.on_animation_frame(now));
                        now += 16.0;
                    }
                    black_box(vs.viewport_items().len())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("smooth_scroll_to_bottom(n=100000)", |b| {
        b.iter_batched(
            || controller(100_000, true),
            |mut vs| {
                vs.scroll_to_bottom();
                vs.smooth_scroll_to_index(0);
                let mut now = 0.0;
                while vs.is_frame_pending() {
                    black_box(vs.on_animation_frame(now));
                    now += 16.0;
                }
                black_box(vs.window())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_compute_window, bench_controller);
criterion_main!(benches);
