// ABOUTME: Main library entry point for the food photo scanner
// ABOUTME: Turns a food photo into a nutrition record via classifier, mapping, and table lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Food Scan
//!
//! Resolves a photo of a meal to nutrition facts.
//!
//! ## Pipeline
//!
//! 1. A [`FoodClassifier`](recognition::FoodClassifier) ranks Food-101 labels
//!    for the image (Hugging Face Inference API by default).
//! 2. The top label is normalized into a key and mapped onto a canonical food.
//! 3. The [`SimilarityResolver`](nutrition::SimilarityResolver) finds the best
//!    record in the nutrition table (exact, substring, then arbitrary).
//! 4. When the classifier is unusable, a deterministic stand-in recognizer
//!    picks a food from the image hash so the caller always gets a record.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use food_scan::config::ScannerConfig;
//! use food_scan::errors::AppResult;
//! use food_scan::recognition::{FoodRecognizer, FoodScanner, ImageData};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ScannerConfig::from_env()?;
//!     let scanner = FoodScanner::new(FoodRecognizer::from_config(&config)?);
//!
//!     let image = ImageData::from_file(std::path::Path::new("lunch.jpg")).await?;
//!     let record = scanner.scan(&image).await;
//!     println!("{}: {} kcal", record.food_name, record.calories);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────

/// Environment-based configuration
pub mod config;

/// Text and JSON rendering of nutrition records
pub mod formatters;

/// Logging configuration and structured scan logging
pub mod logging;

/// Label normalization, class mapping, nutrition table, and similarity resolver
pub mod nutrition;

/// Image input, classifiers, stand-in recognizer, orchestrator, and scanner
pub mod recognition;

/// Error types shared with the core crate
pub mod errors {
    pub use food_scan_core::errors::{AppError, AppResult, ErrorCode};
}

/// Domain models shared with the core crate
pub mod models {
    pub use food_scan_core::models::{percent, MacroSplit, NutrientAmount, NutritionRecord};
}

/// Constants shared with the core crate
pub use food_scan_core::constants;
