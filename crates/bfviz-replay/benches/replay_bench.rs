//! Benchmarks for step replay
//!
//! Measures performance of:
//! - Full forward replay per projection
//! - Single step application

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use bfviz_engine::run;
use bfviz_graph::{Graph, NodeName};
use bfviz_replay::{DistanceTable, ParentTable, Projection, VisGraph};

fn ring(vertices: usize) -> Graph {
    let mut graph = Graph::new();
    for v in 0..vertices {
        graph.add_directed_edge(v, (v + 1) % vertices, (v % 7) as i64 + 1);
        graph.add_directed_edge(v, (v + 3) % vertices, (v % 4) as i64 + 2);
    }
    graph.set_source(0usize);
    graph
}

/// Benchmark replaying a whole log into each projection
fn bench_full_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_replay");

    for &vertices in &[8usize, 24, 64] {
        let graph = ring(vertices);
        let result = run(&graph, &NodeName::from(0usize));
        group.throughput(Throughput::Elements(result.steps.len() as u64));

        group.bench_with_input(BenchmarkId::new("visual", vertices), &result.steps, |b, steps| {
            b.iter(|| VisGraph::replay(black_box(&graph), steps))
        });
        group.bench_with_input(BenchmarkId::new("distances", vertices), &result.steps, |b, steps| {
            b.iter(|| DistanceTable::replay(black_box(&graph), steps))
        });
        group.bench_with_input(BenchmarkId::new("parents", vertices), &result.steps, |b, steps| {
            b.iter(|| ParentTable::replay(black_box(&graph), steps))
        });
    }
    group.finish();
}

/// Benchmark a single forward/backward pair at the end of the log
fn bench_single_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_step");

    for &vertices in &[8usize, 64] {
        let graph = ring(vertices);
        let result = run(&graph, &NodeName::from(0usize));
        let table = DistanceTable::replay(&graph, &result.steps);
        let Some(step) = result.steps.as_slice().last() else {
            continue;
        };

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(vertices), step, |b, step| {
            b.iter(|| table.apply_backward(black_box(step)).apply_forward(step))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_replay, bench_single_step);
criterion_main!(benches);
