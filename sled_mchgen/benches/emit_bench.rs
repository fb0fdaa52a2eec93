//! Emitter throughput benchmarks.
//!
//! Measures load and emission time for a small machine and for a large
//! synthetic one (256 events, 256 states, 32 callbacks).

use criterion::{Criterion, criterion_group, criterion_main};
use sled_mchgen::{EmitOptions, Schema, emit_implementation, emit_interface, loader, validate};
use std::hint::black_box;
use std::path::Path;

fn fixture_schema() -> Schema {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mch_net.xml");
    loader::load(&path).expect("load fixture")
}

fn large_schema() -> Schema {
    let mut schema = Schema::new("mch_large", "ST_LARGE_0")
        .with_events((0..256).map(|i| format!("EV_LARGE_{i}")))
        .with_states((0..256).map(|i| format!("ST_LARGE_{i}")))
        .with_callbacks((0..32).map(|i| format!("notify_{i}")));
    for i in 0..16 {
        schema = schema.with_field("void *", format!("peer_{i}"));
    }
    schema
}

fn bench_emit_fixture(c: &mut Criterion) {
    let schema = fixture_schema();
    let options = EmitOptions::default();

    c.bench_function("emit_mch_net", |b| {
        b.iter(|| {
            let _artifacts = black_box(sled_mchgen::emit::emit(black_box(&schema), &options));
        });
    });
}

fn bench_emit_large(c: &mut Criterion) {
    let schema = large_schema();

    c.bench_function("emit_interface_large", |b| {
        b.iter(|| black_box(emit_interface(black_box(&schema))));
    });
    c.bench_function("emit_implementation_large", |b| {
        b.iter(|| black_box(emit_implementation(black_box(&schema))));
    });
}

fn bench_load_validate(c: &mut Criterion) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mch_net.xml");
    let text = std::fs::read_to_string(&path).expect("read fixture");

    c.bench_function("parse_mch_net", |b| {
        b.iter(|| loader::parse(black_box(&text)).unwrap());
    });

    let schema = large_schema();
    c.bench_function("validate_large", |b| {
        b.iter(|| black_box(validate(black_box(&schema))));
    });
}

criterion_group!(
    benches,
    bench_emit_fixture,
    bench_emit_large,
    bench_load_validate
);
criterion_main!(benches);
