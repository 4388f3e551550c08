// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for notice handling on the hot path.
//!
//! Measures the performance of:
//! - Rendering content to markup (plain text and lists)
//! - Queue churn (push a burst, drain it)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use humane::notifications::{Content, Notice, Queue, Severity};
use std::hint::black_box;

fn list_of(len: usize) -> Content {
    Content::List((0..len).map(|i| format!("file_{i}.txt saved")).collect())
}

/// Benchmark markup rendering for text and list content.
fn bench_to_markup(c: &mut Criterion) {
    let mut group = c.benchmark_group("content");

    let text = Content::from("Disk full: could not write settings");
    group.bench_function("text_to_markup", |b| {
        b.iter(|| black_box(black_box(&text).to_markup()));
    });

    for len in [2, 16, 128] {
        let list = list_of(len);
        group.bench_with_input(BenchmarkId::new("list_to_markup", len), &list, |b, list| {
            b.iter(|| black_box(list.to_markup()));
        });
    }

    group.finish();
}

/// Benchmark a burst of notices going through the queue.
fn bench_queue_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    for burst in [8, 256] {
        group.bench_with_input(BenchmarkId::new("push_drain", burst), &burst, |b, &burst| {
            b.iter(|| {
                let mut queue = Queue::new();
                for i in 0..burst {
                    queue.push(Notice::new(Severity::Info, format!("notice {i}")));
                }
                while let Some(notice) = queue.pop() {
                    black_box(notice);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_to_markup, bench_queue_churn);
criterion_main!(benches);
