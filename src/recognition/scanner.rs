// ABOUTME: Top-level food scanner wrapping the recognizer with a second fallback
// ABOUTME: Retries the stand-in when recognition yields no usable name and logs the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use food_scan_core::constants::labels::UNKNOWN_FOOD;
use food_scan_core::models::NutritionRecord;
use tracing::info;

use super::{FoodRecognizer, ImageData, Recognition, RecognitionSource};
use crate::logging::ScanLogger;

/// Entry point for scanning a food photo
#[derive(Debug, Clone)]
pub struct FoodScanner {
    recognizer: FoodRecognizer,
}

impl FoodScanner {
    /// Wrap a recognizer
    #[must_use]
    pub const fn new(recognizer: FoodRecognizer) -> Self {
        Self { recognizer }
    }

    /// The wrapped recognizer
    #[must_use]
    pub const fn recognizer(&self) -> &FoodRecognizer {
        &self.recognizer
    }

    /// Scan an image and return the record to display
    pub async fn scan(&self, image: &ImageData) -> NutritionRecord {
        self.scan_detailed(image).await.record
    }

    /// [`scan`](Self::scan) with the path that produced the record
    pub async fn scan_detailed(&self, image: &ImageData) -> Recognition {
        let started = Instant::now();
        let mut recognition = self.recognizer.recognize_detailed(image).await;

        if needs_retry(&recognition.record) {
            info!(
                food_name = %recognition.record.food_name,
                "Recognizer returned no usable food, retrying with stand-in recognizer"
            );
            recognition = Recognition {
                record: self.recognizer.stand_in().recognize(image).await,
                source: RecognitionSource::StandIn,
                prediction: None,
            };
        }

        ScanLogger::log_scan_outcome(&recognition, started.elapsed());
        recognition
    }
}

fn needs_retry(record: &NutritionRecord) -> bool {
    record.food_name.is_empty() || record.food_name == UNKNOWN_FOOD
}
