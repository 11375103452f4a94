// ABOUTME: Criterion benchmarks for the label-to-nutrition hot path
// ABOUTME: Measures normalization, similarity resolution, image hashing, and full recognition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for label resolution.
//!
//! Covers each resolution tier (exact, approximate, arbitrary) separately
//! because the arbitrary tier scans the whole table before giving up.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use food_scan::nutrition::{normalize, ClassMapping, SimilarityResolver};
use food_scan::recognition::{
    image_hash, Classification, FoodRecognizer, ImageData, MockFoodClassifier, StandInRecognizer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for label in ["pizza", "Spaghetti Carbonara", "  Macaroni   and Cheese  "] {
        group.bench_with_input(BenchmarkId::from_parameter(label), label, |b, label| {
            b.iter(|| normalize(black_box(label)));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = SimilarityResolver::builtin();
    let mut rng = StdRng::seed_from_u64(1);
    let mut group = c.benchmark_group("resolve");

    for (tier, query) in [
        ("exact", "steak"),
        ("approximate", "spicy_tuna_sushi_roll"),
        ("arbitrary", "broccoli"),
    ] {
        group.bench_function(tier, |b| {
            b.iter(|| resolver.resolve_with_rng(black_box(query), &mut rng));
        });
    }
    group.finish();
}

fn bench_image_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_hash");
    for size in [64_usize, 4096, 1 << 20] {
        let image = ImageData::from_bytes("image/jpeg", &vec![0xAB; size]);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, image| {
            b.iter(|| image_hash(black_box(image.as_str())));
        });
    }
    group.finish();
}

fn bench_record_for_prediction(c: &mut Criterion) {
    let resolver = SimilarityResolver::builtin();
    let recognizer = FoodRecognizer::new(
        resolver.clone(),
        ClassMapping::builtin(),
        StandInRecognizer::new(resolver, Duration::ZERO),
    );
    let prediction = Classification::new("Beef Tartare", 0.8);

    c.bench_function("record_for_prediction", |b| {
        b.iter(|| recognizer.record_for_prediction(black_box(&prediction)));
    });
}

fn bench_recognize_async(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let resolver = SimilarityResolver::builtin();
    let recognizer = FoodRecognizer::new(
        resolver.clone(),
        ClassMapping::builtin(),
        StandInRecognizer::new(resolver, Duration::ZERO),
    )
    .with_classifier(Arc::new(MockFoodClassifier::with_label("Greek Salad", 0.7)));
    let image = ImageData::from_bytes("image/jpeg", b"salad");

    c.bench_function("recognize_mock_classifier", |b| {
        b.to_async(&runtime)
            .iter(|| async { recognizer.recognize(black_box(&image)).await });
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_resolve,
    bench_image_hash,
    bench_record_for_prediction,
    bench_recognize_async,
);
criterion_main!(benches);
