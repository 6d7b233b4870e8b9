//! Benchmarks for the layout calculator.
//!
//! Covers the pure offset arithmetic over pre-built descriptors, the
//! reordering suggestion, and the full source-to-layout pipeline with
//! nested struct declarations.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use structty::layout::{compute_layout, suggest_packing, FieldDescriptor};
use structty::parser::parse::Parser;
use structty::types::StructRegistry;

fn mixed_fields(count: usize) -> Vec<FieldDescriptor> {
    let cycle = [(1usize, 1usize), (8, 8), (2, 2), (4, 4), (1, 1), (8, 8)];
    (0..count)
        .map(|i| {
            let (size, align) = cycle[i % cycle.len()];
            FieldDescriptor::new(size, align)
        })
        .collect()
}

fn nested_source(depth: usize) -> String {
    let mut out = String::from("struct L0 { char tag; double value; };\n");
    for i in 1..depth {
        out.push_str(&format!(
            "struct L{} {{ char tag; struct L{} inner[2]; long id; }};\n",
            i,
            i - 1
        ));
    }
    out
}

/// Benchmark laying out a wide struct of mixed primitive fields.
fn bench_compute_layout_wide(c: &mut Criterion) {
    let fields = mixed_fields(256);

    c.bench_function("layout_wide_256_fields", |b| {
        b.iter(|| {
            let layout = compute_layout(black_box(&fields)).unwrap();
            black_box(layout)
        });
    });
}

/// Benchmark the descending-alignment reorder suggestion.
fn bench_suggest_packing(c: &mut Criterion) {
    let fields = mixed_fields(256);

    c.bench_function("suggest_packing_256_fields", |b| {
        b.iter(|| {
            let order = suggest_packing(black_box(&fields));
            black_box(order)
        });
    });
}

/// Benchmark the full pipeline: parse, register, and resolve a chain of
/// structs nested eight levels deep.
fn bench_resolve_nested(c: &mut Criterion) {
    let source = nested_source(8);

    c.bench_function("resolve_nested_registry", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(&source)).unwrap();
            let program = parser.parse_program().unwrap();
            let mut registry = StructRegistry::from_program(program).unwrap();
            black_box(registry.resolve_all().unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_compute_layout_wide,
    bench_suggest_packing,
    bench_resolve_nested
);
criterion_main!(benches);
