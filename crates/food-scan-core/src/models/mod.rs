// ABOUTME: Core data models shared by the lookup and recognition pipeline
// ABOUTME: Re-exports nutrition record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Nutrition record and micronutrient amount types
pub mod nutrition;

pub use nutrition::{percent, MacroSplit, NutrientAmount, NutritionRecord};
