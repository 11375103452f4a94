// ABOUTME: Scanning commands for food-scan
// ABOUTME: Runs the full scanner on an image or resolves a single classifier label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::{Context, Result};
use food_scan::config::ScannerConfig;
use food_scan::formatters::{format_recognition, OutputFormat};
use food_scan::recognition::{Classification, FoodRecognizer, FoodScanner, ImageData};
use tracing::info;

/// Scan an image file or data URI
pub async fn scan(
    config: &ScannerConfig,
    input: &str,
    offline: bool,
    format: OutputFormat,
) -> Result<String> {
    let image = if input.starts_with("data:") {
        ImageData::from_data_uri(input)?
    } else {
        ImageData::from_file(Path::new(input))
            .await
            .with_context(|| format!("Cannot load image from {input}"))?
    };

    let recognizer = if offline {
        info!("Offline mode, classifier disabled");
        FoodRecognizer::offline_from_config(config)?
    } else {
        FoodRecognizer::from_config(config)?
    };

    let recognition = FoodScanner::new(recognizer).scan_detailed(&image).await;
    Ok(format_recognition(&recognition, format)?)
}

/// Resolve one label and score without calling a classifier
pub fn label(
    config: &ScannerConfig,
    label: &str,
    score: f64,
    format: OutputFormat,
) -> Result<String> {
    let prediction = Classification::checked(label, score)?;
    let recognizer = FoodRecognizer::offline_from_config(config)?;
    let recognition = recognizer.recognize_prediction(&prediction);
    Ok(format_recognition(&recognition, format)?)
}
