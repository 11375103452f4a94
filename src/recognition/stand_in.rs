// ABOUTME: Deterministic non-ML stand-in recognizer used when the classifier is unusable
// ABOUTME: Hashes the encoded image to pick a generic food and samples a demo confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use food_scan_core::constants::confidence::{STAND_IN_MAX, STAND_IN_MIN};
use food_scan_core::constants::stand_in::{DEFAULT_DELAY_MS, FOODS, HASH_PREFIX_LEN};
use food_scan_core::models::NutritionRecord;
use rand::Rng;
use tracing::debug;

use super::ImageData;
use crate::nutrition::SimilarityResolver;

/// 32-bit rolling hash over the first UTF-16 code units of an encoded image
///
/// Computes `hash * 31 + unit` with 32-bit wrapping, then takes the absolute
/// value. Identical input always produces the same hash.
#[must_use]
pub fn image_hash(encoded: &str) -> u32 {
    let hash = encoded
        .encode_utf16()
        .take(HASH_PREFIX_LEN)
        .fold(0_i32, |hash, unit| {
            (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
        });
    hash.unsigned_abs()
}

/// Placeholder recognizer that picks a food from a fixed list by image hash
#[derive(Debug, Clone)]
pub struct StandInRecognizer {
    resolver: SimilarityResolver,
    delay: Duration,
}

impl StandInRecognizer {
    /// Create a stand-in that waits `delay` before answering
    #[must_use]
    pub const fn new(resolver: SimilarityResolver, delay: Duration) -> Self {
        Self { resolver, delay }
    }

    /// Stand-in over the built-in table with the default simulated delay
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            SimilarityResolver::builtin(),
            Duration::from_millis(DEFAULT_DELAY_MS),
        )
    }

    /// Simulated processing delay
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Generic food name selected for `image`
    #[must_use]
    pub fn select_food(image: &ImageData) -> &'static str {
        // u32 -> usize is lossless on every supported target
        FOODS[image_hash(image.as_str()) as usize % FOODS.len()]
    }

    /// Recognize without a model: wait, resolve the hashed pick, randomize confidence
    pub async fn recognize(&self, image: &ImageData) -> NutritionRecord {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let selected = Self::select_food(image);
        let mut rng = rand::thread_rng();
        let record = self.resolver.resolve_with_rng(selected, &mut rng);
        let confidence = rng.gen_range(STAND_IN_MIN..=STAND_IN_MAX);
        debug!(
            selected,
            food_name = %record.food_name,
            confidence,
            "Stand-in recognizer picked food"
        );
        record.with_confidence(confidence)
    }
}
