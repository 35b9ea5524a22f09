//! Criterion benchmarks for preset compilation
//!
//! Run with: cargo bench -p helaix-preset

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use helaix_catalog::Catalog;
use helaix_preset::{
    CompileOptions, ParamAliases, PresetCompiler, ResolvedBlock, RigDescription, Snapshot,
};
use helaix_variax::VariaxConfig;
use serde_json::json;

const CHAIN: &[(&str, &str)] = &[
    ("Comp", "Deluxe Comp"),
    ("Wah", "Teardrop 310"),
    ("Drive", "Scream 808"),
    ("Amp", "Brit Plexi Brt"),
    ("Cab", "4x12 Greenback25"),
    ("Chorus", "PlastiChorus"),
    ("Delay", "Transistor Tape"),
    ("Verb", "Hall"),
];

/// A chain of `len` blocks, alternating paths.
fn blocks(len: usize) -> Vec<ResolvedBlock> {
    (0..len)
        .map(|i| {
            let (name, model) = CHAIN[i % CHAIN.len()];
            ResolvedBlock::new(format!("{name} {i}"), model)
                .with_path((i % 2) as i64)
                .with_param("Mix", 4)
        })
        .collect()
}

/// Eight snapshots, each toggling half the chain and overriding one value.
fn rig(blocks: &[ResolvedBlock]) -> RigDescription {
    let snapshots = (0..8)
        .map(|s| {
            let active = blocks
                .iter()
                .enumerate()
                .filter(|(i, _)| (i + s) % 2 == 0)
                .map(|(_, b)| b.name.clone())
                .collect();
            let params = blocks
                .iter()
                .map(|b| (b.name.clone(), json!({ "Mix": s as f64 / 10.0 })))
                .collect();
            Snapshot {
                name: format!("Scene {s}"),
                active_blocks: active,
                params,
                ..Snapshot::default()
            }
        })
        .collect();
    RigDescription {
        guitar_model: "Stratocaster".into(),
        tuning: "Drop D".into(),
        snapshots,
        ..RigDescription::default()
    }
}

fn bench_compile(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let aliases = ParamAliases::default();
    let compiler = PresetCompiler::new(catalog, VariaxConfig::builtin(), &aliases);
    let options = CompileOptions::new("Bench");

    let mut group = c.benchmark_group("Compile");
    for len in [4, 8, 16] {
        let blocks = blocks(len);
        let plain = RigDescription::default();
        let full = rig(&blocks);

        group.bench_with_input(BenchmarkId::new("no_snapshots", len), &len, |b, _| {
            b.iter(|| compiler.compile(black_box(&plain), black_box(&blocks), &options))
        });
        group.bench_with_input(BenchmarkId::new("snapshots", len), &len, |b, _| {
            b.iter(|| compiler.compile(black_box(&full), black_box(&blocks), &options))
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let aliases = ParamAliases::default();
    let compiler = PresetCompiler::new(catalog, VariaxConfig::builtin(), &aliases);
    let blocks = blocks(8);
    let doc = compiler
        .compile(&rig(&blocks), &blocks, &CompileOptions::new("Bench"))
        .unwrap();

    c.bench_function("ToJsonPretty", |b| b.iter(|| black_box(&doc).to_json_pretty()));
}

criterion_group!(benches, bench_compile, bench_serialize);
criterion_main!(benches);
