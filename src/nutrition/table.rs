// ABOUTME: Curated nutrition table keyed by canonical food key
// ABOUTME: Built-in entries, JSON table loading, and insertion-ordered lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Table
//!
//! An immutable, insertion-ordered mapping from canonical food keys to
//! [`NutritionRecord`]s. Iteration order matters: the similarity resolver
//! scans keys in this order and the first substring hit wins.
//!
//! The built-in table is constructed once per process and shared through an
//! [`Arc`]. A replacement table can be loaded from a JSON array of entries:
//!
//! ```json
//! [
//!   { "key": "apple_pie", "foodName": "Apple Pie", "calories": 237, "proteins": 2.4,
//!     "carbs": 34, "fats": 11, "confidence": 0.93 }
//! ]
//! ```

use std::path::Path;
use std::sync::{Arc, OnceLock};

use food_scan_core::errors::{AppError, AppResult};
use food_scan_core::models::{NutrientAmount, NutritionRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Process-wide built-in table
static BUILTIN_TABLE: OnceLock<Arc<NutritionTable>> = OnceLock::new();

/// One row of a nutrition table file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    /// Canonical food key (lower-case, underscores)
    pub key: String,
    /// Nutrition facts for the key
    #[serde(flatten)]
    pub record: NutritionRecord,
}

/// Immutable, insertion-ordered nutrition table
///
/// Never empty: every constructor rejects or avoids an empty entry list, which
/// is what lets the resolver always return a record.
#[derive(Debug, Clone)]
pub struct NutritionTable {
    entries: Vec<TableEntry>,
}

impl NutritionTable {
    /// Build a table from entries, validating keys and record invariants
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `ErrorCode::ConfigInvalid` if the list is empty,
    /// a key is blank, not normalized, or duplicated, or a record has negative
    /// macros or a confidence outside `[0, 1]`
    pub fn new(entries: Vec<TableEntry>) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::config("nutrition table must contain at least one food"));
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.key.trim().is_empty() {
                return Err(AppError::config(format!(
                    "nutrition table entry {index} has an empty key"
                )));
            }
            if entry.key != super::normalize(&entry.key) {
                return Err(AppError::config(format!(
                    "nutrition table key '{}' is not normalized (lower-case, underscores)",
                    entry.key
                )));
            }
            if entries[..index].iter().any(|other| other.key == entry.key) {
                return Err(AppError::config(format!(
                    "nutrition table key '{}' appears more than once",
                    entry.key
                )));
            }
            entry.record.check_invariants().map_err(|reason| {
                AppError::config(format!("nutrition table entry '{}': {reason}", entry.key))
            })?;
        }

        Ok(Self { entries })
    }

    /// The built-in curated table, shared by every caller
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(BUILTIN_TABLE.get_or_init(|| {
            Arc::new(Self {
                entries: builtin_entries(),
            })
        }))
    }

    /// Parse a table from a JSON array of entries
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the entries fail validation
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let entries: Vec<TableEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "failed to read nutrition table {}: {e}",
                path.display()
            ))
            .with_source(e)
        })?;
        let table = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            foods = table.len(),
            "Loaded nutrition table"
        );
        Ok(table)
    }

    /// Record for an exact key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NutritionRecord> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.record)
    }

    /// Whether the table defines `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutritionRecord)> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.record))
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Entry at `index`, wrapping around the table size
    #[must_use]
    pub fn entry_at(&self, index: usize) -> (&str, &NutritionRecord) {
        // Constructors guarantee at least one entry
        let entry = &self.entries[index % self.entries.len()];
        (entry.key.as_str(), &entry.record)
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn nutrients(items: &[(&str, &str)]) -> Option<Vec<NutrientAmount>> {
    Some(
        items
            .iter()
            .map(|(name, amount)| NutrientAmount::new(*name, *amount))
            .collect(),
    )
}

fn entry(
    key: &str,
    food_name: &str,
    (calories, proteins, carbs, fats): (f64, f64, f64, f64),
    vitamins: &[(&str, &str)],
    minerals: &[(&str, &str)],
    confidence: f64,
) -> TableEntry {
    TableEntry {
        key: key.to_owned(),
        record: NutritionRecord {
            food_name: food_name.to_owned(),
            calories,
            proteins,
            carbs,
            fats,
            vitamins: if vitamins.is_empty() {
                None
            } else {
                nutrients(vitamins)
            },
            minerals: if minerals.is_empty() {
                None
            } else {
                nutrients(minerals)
            },
            confidence,
        },
    }
}

/// Curated per-serving values. The first five are whole Food-101 dishes; the
/// rest are the canonical groups the class mapping folds dishes into.
fn builtin_entries() -> Vec<TableEntry> {
    vec![
        entry(
            "apple_pie",
            "Apple Pie",
            (237.0, 2.4, 34.0, 11.0),
            &[("Vitamin A", "1% DV"), ("Vitamin C", "2% DV")],
            &[],
            0.93,
        ),
        entry(
            "pizza",
            "Pizza",
            (266.0, 11.0, 33.0, 10.0),
            &[("Vitamin A", "5% DV"), ("Vitamin C", "2% DV")],
            &[("Calcium", "20% DV"), ("Iron", "10% DV")],
            0.89,
        ),
        entry(
            "sushi",
            "Sushi",
            (200.0, 7.0, 38.0, 1.0),
            &[("Vitamin B12", "12% DV"), ("Vitamin D", "15% DV")],
            &[("Selenium", "10% DV"), ("Iodine", "12% DV")],
            0.92,
        ),
        entry(
            "ramen",
            "Ramen",
            (380.0, 14.0, 56.0, 7.0),
            &[("Vitamin B1", "15% DV"), ("Vitamin B3", "20% DV")],
            &[("Iron", "8% DV"), ("Zinc", "6% DV")],
            0.88,
        ),
        entry(
            "steak",
            "Steak",
            (271.0, 29.0, 0.0, 17.0),
            &[("Vitamin B12", "50% DV"), ("Vitamin B6", "25% DV")],
            &[("Iron", "15% DV"), ("Zinc", "30% DV")],
            0.91,
        ),
        entry(
            "salad",
            "Salad",
            (152.0, 5.0, 11.0, 10.0),
            &[("Vitamin A", "40% DV"), ("Vitamin K", "60% DV")],
            &[("Potassium", "8% DV"), ("Calcium", "6% DV")],
            0.90,
        ),
        entry(
            "burger",
            "Burger",
            (354.0, 20.0, 29.0, 17.0),
            &[("Vitamin B12", "35% DV"), ("Vitamin B3", "25% DV")],
            &[("Iron", "20% DV"), ("Zinc", "30% DV")],
            0.90,
        ),
        entry(
            "salmon",
            "Salmon",
            (208.0, 20.0, 0.0, 13.0),
            &[("Vitamin D", "66% DV"), ("Vitamin B12", "100% DV")],
            &[("Selenium", "75% DV"), ("Potassium", "10% DV")],
            0.92,
        ),
        entry(
            "pasta",
            "Pasta",
            (221.0, 8.0, 43.0, 1.3),
            &[("Vitamin B1", "26% DV"), ("Folate", "25% DV")],
            &[("Iron", "10% DV"), ("Selenium", "53% DV")],
            0.89,
        ),
        entry(
            "fries",
            "French Fries",
            (312.0, 3.4, 41.0, 15.0),
            &[("Vitamin C", "9% DV"), ("Vitamin B6", "20% DV")],
            &[("Potassium", "16% DV")],
            0.90,
        ),
        entry(
            "rice",
            "Rice",
            (206.0, 4.3, 45.0, 0.4),
            &[("Vitamin B1", "17% DV"), ("Vitamin B3", "15% DV")],
            &[("Manganese", "37% DV"), ("Selenium", "21% DV")],
            0.88,
        ),
        entry(
            "dessert",
            "Dessert",
            (350.0, 5.0, 45.0, 17.0),
            &[("Vitamin A", "6% DV")],
            &[("Calcium", "8% DV"), ("Iron", "10% DV")],
            0.88,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use food_scan_core::errors::ErrorCode;

    #[test]
    fn test_builtin_table_passes_validation() {
        let builtin = NutritionTable::builtin();
        let revalidated = NutritionTable::new(builtin.entries.clone()).unwrap();
        assert_eq!(revalidated.len(), builtin.len());
    }

    #[test]
    fn test_builtin_order_and_values() {
        let table = NutritionTable::builtin();
        let keys: Vec<&str> = table.keys().take(5).collect();
        assert_eq!(keys, ["apple_pie", "pizza", "sushi", "ramen", "steak"]);

        let steak = table.get("steak").unwrap();
        assert!((steak.calories - 271.0).abs() < f64::EPSILON);
        assert!((steak.confidence - 0.91).abs() < f64::EPSILON);
        assert!(table.get("apple_pie").unwrap().minerals.is_none());
    }

    #[test]
    fn test_builtin_confidences_are_curated_baseline() {
        for (key, record) in NutritionTable::builtin().iter() {
            assert!(
                (0.88..=0.93).contains(&record.confidence),
                "{key} has confidence {}",
                record.confidence
            );
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(Arc::ptr_eq(
            &NutritionTable::builtin(),
            &NutritionTable::builtin()
        ));
    }

    #[test]
    fn test_entry_at_wraps() {
        let table = NutritionTable::builtin();
        assert_eq!(table.entry_at(0).0, "apple_pie");
        assert_eq!(table.entry_at(table.len()).0, "apple_pie");
    }

    #[test]
    fn test_rejects_empty_table() {
        let error = NutritionTable::new(Vec::new()).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_rejects_duplicate_and_unnormalized_keys() {
        let pie = NutritionTable::builtin().entries[0].clone();
        let error = NutritionTable::new(vec![pie.clone(), pie.clone()]).unwrap_err();
        assert!(error.message.contains("more than once"));

        let mut shouting = pie;
        shouting.key = "Apple Pie".to_owned();
        let error = NutritionTable::new(vec![shouting]).unwrap_err();
        assert!(error.message.contains("not normalized"));
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"[
            {"key": "tofu", "foodName": "Tofu", "calories": 76, "proteins": 8,
             "carbs": 1.9, "fats": 4.8, "confidence": 0.9},
            {"key": "bagel", "foodName": "Bagel", "calories": 245, "proteins": 10,
             "carbs": 48, "fats": 1.5, "confidence": 0.88,
             "minerals": [{"name": "Iron", "amount": "18% DV"}]}
        ]"#;
        let table = NutritionTable::from_json_str(json).unwrap();
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, ["tofu", "bagel"]);
        assert_eq!(
            table.get("bagel").unwrap().minerals.as_deref(),
            Some(&[NutrientAmount::new("Iron", "18% DV")][..])
        );
    }

    #[test]
    fn test_from_json_rejects_bad_confidence() {
        let json = r#"[{"key": "tofu", "foodName": "Tofu", "calories": 76, "proteins": 8,
                        "carbs": 1.9, "fats": 4.8, "confidence": 1.2}]"#;
        let error = NutritionTable::from_json_str(json).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
        assert!(error.message.contains("confidence"));
    }
}
