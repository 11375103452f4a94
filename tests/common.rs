// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, zero-delay recognizers, sample images, and table files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `food_scan`

use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use std::time::Duration;

use food_scan::config::{env_vars, FallbackPolicy};
use food_scan::nutrition::{ClassMapping, SimilarityResolver};
use food_scan::recognition::{
    FoodClassifier, FoodRecognizer, FoodScanner, ImageData, MockFoodClassifier, StandInRecognizer,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Stand-in over the built-in table with no simulated delay
pub fn instant_stand_in() -> StandInRecognizer {
    StandInRecognizer::new(SimilarityResolver::builtin(), Duration::ZERO)
}

/// Built-in recognizer with the given classifier and policy, no stand-in delay
pub fn recognizer_with(
    classifier: impl FoodClassifier + 'static,
    policy: FallbackPolicy,
) -> FoodRecognizer {
    init_test_logging();
    FoodRecognizer::new(
        SimilarityResolver::builtin(),
        ClassMapping::builtin(),
        instant_stand_in(),
    )
    .with_classifier(Arc::new(classifier))
    .with_fallback_policy(policy)
}

/// Built-in recognizer whose classifier always returns one label
pub fn recognizer_for_label(label: &str, score: f64) -> FoodRecognizer {
    recognizer_with(
        MockFoodClassifier::with_label(label, score),
        FallbackPolicy::ArbitraryRecord,
    )
}

/// Scanner around [`recognizer_with`]
pub fn scanner_with(
    classifier: impl FoodClassifier + 'static,
    policy: FallbackPolicy,
) -> FoodScanner {
    FoodScanner::new(recognizer_with(classifier, policy))
}

/// Small JPEG-looking data URI; the content only matters to the hash
pub fn sample_image(seed: &str) -> ImageData {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(seed.as_bytes());
    ImageData::from_bytes("image/jpeg", &bytes)
}

/// Remove every scanner variable so tests start from defaults
pub fn clear_scanner_env() {
    for var in env_vars::ALL {
        std::env::remove_var(var);
    }
}

/// Write `contents` to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Two-entry nutrition table in the JSON file layout
pub const SMALL_TABLE_JSON: &str = r#"[
    {
        "key": "takoyaki",
        "foodName": "Takoyaki",
        "calories": 280,
        "proteins": 9,
        "carbs": 30,
        "fats": 13,
        "confidence": 0.85
    },
    {
        "key": "miso_soup",
        "foodName": "Miso Soup",
        "calories": 84,
        "proteins": 6,
        "carbs": 8,
        "fats": 3,
        "minerals": [{"name": "Sodium", "amount": "900mg"}],
        "confidence": 0.9
    }
]"#;
