// ABOUTME: Nutrition lookup pipeline from classifier label to nutrition record
// ABOUTME: Label normalization, class mapping, curated table, and similarity resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Lookup
//!
//! A raw classifier label flows through these pieces in order:
//!
//! ```text
//! "Beef Tartare" -> normalize -> "beef_tartare" -> ClassMapping -> "steak"
//!                -> SimilarityResolver -> NutritionRecord { calories: 271, .. }
//! ```
//!
//! All tables are immutable once built and are shared through `Arc`.

/// Many-to-one aliasing of classifier keys onto canonical keys
pub mod class_mapping;
/// Food-101 reference vocabulary
pub mod food101;
/// Label to key normalization
pub mod normalizer;
/// Exact / approximate / arbitrary resolution
pub mod resolver;
/// Curated nutrition table
pub mod table;

pub use class_mapping::ClassMapping;
pub use food101::{is_food101_class, FOOD101_CLASSES};
pub use normalizer::normalize;
pub use resolver::{FoodMatch, SimilarityResolver};
pub use table::{NutritionTable, TableEntry};
