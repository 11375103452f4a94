// ABOUTME: Food recognition pipeline from encoded image to nutrition record
// ABOUTME: Image input, classifier backends, stand-in recognizer, orchestrator, and scanner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food Recognition
//!
//! - [`ImageData`]: encoded photo input
//! - [`FoodClassifier`]: ranked label predictions ([`HuggingFaceClassifier`],
//!   [`MockFoodClassifier`])
//! - [`StandInRecognizer`]: deterministic placeholder when no model is usable
//! - [`FoodRecognizer`]: classifier to nutrition record orchestration
//! - [`FoodScanner`]: recognizer plus the "Unknown Food" retry

/// Classifier trait and mock implementation
pub mod classifier;
/// Hugging Face Inference API classifier
pub mod huggingface;
/// Encoded image input
pub mod image;
/// Recognition orchestrator
pub mod recognizer;
/// Top-level scanner
pub mod scanner;
/// Hash-based stand-in recognizer
pub mod stand_in;

pub use classifier::{Classification, FoodClassifier, MockFoodClassifier};
pub use huggingface::{HuggingFaceClassifier, HuggingFaceConfig};
pub use image::{DecodedImage, ImageData};
pub use recognizer::{estimated_record, FoodRecognizer, Recognition, RecognitionSource};
pub use scanner::FoodScanner;
pub use stand_in::{image_hash, StandInRecognizer};
