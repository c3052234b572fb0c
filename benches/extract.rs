//! Benchmarks for import extraction and tree walking
//!
//! Measures extraction on large generated modules and a full usage scan
//! over a generated package tree.

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pyscope::analysis::{collect_usage, ImportExtractor};
use pyscope::walk::{walk, ExclusionSet};
use tempfile::TempDir;

/// Create a module with `functions` functions, each importing something locally
fn create_source(functions: usize) -> String {
    let mut source = String::from("import os\nimport sys\nfrom collections import OrderedDict\n\n");

    for i in 0..functions {
        source.push_str(&format!(
            "def handler_{i}(request):\n    import json\n    from pkg_{m}.sub import thing\n    return json.dumps(thing(request))\n\n",
            i = i,
            m = i % 10
        ));
    }

    source
}

/// Create `packages` packages of `files_per_package` modules, plus an excluded venv
fn create_tree(root: &Path, packages: usize, files_per_package: usize) {
    for p in 0..packages {
        let dir = root.join(format!("pkg_{}", p)).join("sub");
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_package {
            fs::write(dir.join(format!("mod_{}.py", f)), create_source(5)).unwrap();
        }
    }

    let venv = root.join("venv").join("lib");
    fs::create_dir_all(&venv).unwrap();
    fs::write(venv.join("site.py"), create_source(50)).unwrap();
}

/// Benchmark extraction from a single large module
fn bench_extract_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_source");
    let mut extractor = ImportExtractor::new().unwrap();

    for size in [10, 100, 1000].iter() {
        let source = create_source(*size);

        group.bench_with_input(BenchmarkId::new("functions", size), &source, |b, src| {
            b.iter(|| black_box(extractor.extract_source(src, Path::new("bench.py")).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark walking a tree with an excluded subtree
fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let exclusions = ExclusionSet::new(["venv"]).unwrap();

    for packages in [10, 50].iter() {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path(), *packages, 10);

        group.bench_with_input(BenchmarkId::new("packages", packages), dir.path(), |b, root| {
            b.iter(|| black_box(walk(root, &exclusions).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark a full usage scan (walk + extract every file)
fn bench_collect_usage(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_usage");
    let exclusions = ExclusionSet::new(["venv"]).unwrap();

    for packages in [10, 50].iter() {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path(), *packages, 10);

        group.bench_with_input(BenchmarkId::new("packages", packages), dir.path(), |b, root| {
            b.iter(|| black_box(collect_usage(root, &exclusions).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_source, bench_walk, bench_collect_usage);
criterion_main!(benches);
