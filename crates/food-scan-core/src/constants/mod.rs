// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Confidence penalties, sentinel labels, and classifier defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by the part of the pipeline that reads them.

/// Confidence adjustments applied by the similarity resolver
pub mod confidence {
    /// Multiplier applied to a substring (approximate) match
    pub const APPROXIMATE_MATCH_FACTOR: f64 = 0.9;
    /// Confidence forced onto an arbitrary fallback record
    pub const ARBITRARY_FALLBACK: f64 = 0.6;
    /// Lower bound of the stand-in recognizer's sampled confidence
    pub const STAND_IN_MIN: f64 = 0.70;
    /// Upper bound of the stand-in recognizer's sampled confidence
    pub const STAND_IN_MAX: f64 = 0.95;
}

/// Labels and suffixes with meaning to callers
pub mod labels {
    /// Sentinel food name that makes the scanner retry with the stand-in recognizer
    pub const UNKNOWN_FOOD: &str = "Unknown Food";
    /// Suffix appended to stand-in results produced after a classifier failure
    pub const DETECTED_SUFFIX: &str = " (detected)";
}

/// Placeholder macros for the estimated-values record
pub mod estimated {
    /// Estimated energy (kcal)
    pub const CALORIES: f64 = 200.0;
    /// Estimated protein (grams)
    pub const PROTEINS: f64 = 10.0;
    /// Estimated carbohydrates (grams)
    pub const CARBS: f64 = 25.0;
    /// Estimated fat (grams)
    pub const FATS: f64 = 8.0;
    /// Vitamin entry name marking the record as an estimate
    pub const NOTE_NAME: &str = "Estimated values";
    /// Vitamin entry amount marking the record as an estimate
    pub const NOTE_AMOUNT: &str = "Based on similar foods";
}

/// Stand-in recognizer parameters
pub mod stand_in {
    /// Maximum number of UTF-16 code units hashed from the encoded image
    pub const HASH_PREFIX_LEN: usize = 500;
    /// Default simulated processing delay (milliseconds)
    pub const DEFAULT_DELAY_MS: u64 = 2000;
    /// Generic foods the stand-in recognizer picks from, indexed by hash
    pub const FOODS: [&str; 10] = [
        "apple", "banana", "pizza", "salad", "burger", "rice", "pasta", "broccoli", "chicken",
        "salmon",
    ];
}

/// Remote classifier defaults
pub mod classifier {
    /// Hugging Face Inference API base URL
    pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";
    /// Food-101 fine-tuned ViT model
    pub const DEFAULT_MODEL: &str = "nateraw/vit-base-food101";
    /// HTTP request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Service name used in error messages and logs
    pub const SERVICE_NAME: &str = "Hugging Face Inference API";
}

/// Service identity for structured logging
pub mod service_names {
    /// Name reported by the logging setup
    pub const FOOD_SCAN: &str = "food-scan";
}
