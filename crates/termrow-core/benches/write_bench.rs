//! Benchmarks for glyph writes and column resolution.
//!
//! Run with: cargo bench -p termrow-core

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use termrow_core::Row;

fn bench_ascii_fill(c: &mut Criterion) {
    c.bench_function("write_glyph/ascii_exact_fit", |b| {
        let mut row = Row::new(120);
        b.iter(|| {
            for col in 0..120u16 {
                row.write_glyph_str(black_box(col), 1, "x");
            }
        });
    });
}

fn bench_wide_damage_repair(c: &mut Criterion) {
    c.bench_function("write_glyph/wide_damage_repair", |b| {
        let mut row = Row::new(120);
        b.iter(|| {
            // Each write lands one column into the previous wide glyph,
            // forcing the spillover path every time.
            for col in 0..118u16 {
                row.write_glyph_str(black_box(col), 2, "木");
            }
        });
    });
}

fn bench_lookup(c: &mut Criterion) {
    let mut row = Row::new(120);
    for col in (0..118u16).step_by(3) {
        row.write_glyph_str(col, 2, "木");
    }
    c.bench_function("lookup/fragmented_row", |b| {
        b.iter(|| {
            for col in 0..120u16 {
                black_box(row.lookup(black_box(col)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_ascii_fill,
    bench_wide_damage_repair,
    bench_lookup
);
criterion_main!(benches);
