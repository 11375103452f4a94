// ABOUTME: Nutrition record model returned by every lookup and recognition path
// ABOUTME: NutritionRecord and NutrientAmount definitions with per-lookup confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A named micronutrient amount, e.g. `("Vitamin C", "2% DV")`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientAmount {
    /// Nutrient name
    pub name: String,
    /// Display amount (free-form, usually a daily-value percentage)
    pub amount: String,
}

impl NutrientAmount {
    /// Create a nutrient amount
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}

/// Nutrition facts for one food, plus how much to trust them for the current query
///
/// The table holds the curated baseline confidence. Every lookup hands out a
/// copy whose `confidence` may be scaled down or replaced, so the value is
/// only meaningful for the query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    /// Display name
    pub food_name: String,
    /// Energy per serving (kcal)
    pub calories: f64,
    /// Protein per serving (grams)
    pub proteins: f64,
    /// Carbohydrates per serving (grams)
    pub carbs: f64,
    /// Fat per serving (grams)
    pub fats: f64,
    /// Vitamins in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamins: Option<Vec<NutrientAmount>>,
    /// Minerals in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minerals: Option<Vec<NutrientAmount>>,
    /// Trust in this record for the current query, in `[0, 1]`
    pub confidence: f64,
}

impl NutritionRecord {
    /// Copy of this record with a different confidence
    #[must_use]
    pub fn with_confidence(&self, confidence: f64) -> Self {
        Self {
            confidence,
            ..self.clone()
        }
    }

    /// Check the numeric invariants: non-negative macros, confidence in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant
    pub fn check_invariants(&self) -> Result<(), String> {
        let macros = [
            ("calories", self.calories),
            ("proteins", self.proteins),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ];
        for (field, value) in macros {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{field} must be a non-negative number, got {value}"
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence must be between 0.0 and 1.0, got {}",
                self.confidence
            ));
        }
        Ok(())
    }

    /// Confidence as a rounded percentage (`0.925` becomes `93`)
    #[must_use]
    pub fn confidence_percent(&self) -> u32 {
        percent(self.confidence)
    }

    /// Share of each macronutrient in the total macro grams
    ///
    /// Returns `None` when the record carries no macros at all.
    #[must_use]
    pub fn macro_split(&self) -> Option<MacroSplit> {
        let total = self.proteins + self.carbs + self.fats;
        if total <= 0.0 {
            return None;
        }
        Some(MacroSplit {
            protein_pct: percent(self.proteins / total),
            carbs_pct: percent(self.carbs / total),
            fat_pct: percent(self.fats / total),
        })
    }
}

/// Macronutrient distribution by weight, each share rounded independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein share (0-100)
    pub protein_pct: u32,
    /// Carbohydrate share (0-100)
    pub carbs_pct: u32,
    /// Fat share (0-100)
    pub fat_pct: u32,
}

/// Round a `[0, 1]` score to a whole percentage, halves rounding up
#[must_use]
pub fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}
