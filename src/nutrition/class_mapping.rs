// ABOUTME: Many-to-one aliasing of classifier keys onto canonical nutrition keys
// ABOUTME: Built-in Food-101 aliases, JSON mapping files, and identity fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use food_scan_core::errors::{AppError, AppResult};
use tracing::info;

use super::normalize;

static BUILTIN_MAPPING: OnceLock<Arc<ClassMapping>> = OnceLock::new();

/// Classifier key to canonical key aliases for Food-101 dishes
const BUILTIN_ALIASES: [(&str, &str); 27] = [
    ("apple_pie", "apple_pie"),
    ("pizza", "pizza"),
    ("sushi", "sushi"),
    ("ramen", "ramen"),
    ("steak", "steak"),
    ("beef_carpaccio", "steak"),
    ("beef_tartare", "steak"),
    ("baby_back_ribs", "steak"),
    ("caesar_salad", "salad"),
    ("greek_salad", "salad"),
    ("seaweed_salad", "salad"),
    ("caprese_salad", "salad"),
    ("beet_salad", "salad"),
    ("hamburger", "burger"),
    ("grilled_salmon", "salmon"),
    ("spaghetti_carbonara", "pasta"),
    ("spaghetti_bolognese", "pasta"),
    ("pad_thai", "pasta"),
    ("macaroni_and_cheese", "pasta"),
    ("lasagna", "pasta"),
    ("french_fries", "fries"),
    ("fried_rice", "rice"),
    ("chocolate_cake", "dessert"),
    ("carrot_cake", "dessert"),
    ("cheesecake", "dessert"),
    ("ice_cream", "dessert"),
    ("tiramisu", "dessert"),
];

/// Immutable mapping from normalized classifier keys to canonical food keys
///
/// Several raw keys may share one canonical key. A key without an alias maps
/// to itself, so unmapped labels still get a nutrition lookup.
#[derive(Debug, Clone, Default)]
pub struct ClassMapping {
    aliases: HashMap<String, String>,
}

impl ClassMapping {
    /// Build a mapping, validating that both sides are normalized keys
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `ErrorCode::ConfigInvalid` if a key or target is
    /// blank or not normalized
    pub fn new(aliases: HashMap<String, String>) -> AppResult<Self> {
        for (raw, canonical) in &aliases {
            for key in [raw, canonical] {
                if key.is_empty() || *key != normalize(key) {
                    return Err(AppError::config(format!(
                        "class mapping '{raw}' -> '{canonical}' must use normalized, non-empty keys"
                    )));
                }
            }
        }
        Ok(Self { aliases })
    }

    /// The built-in Food-101 aliases, shared by every caller
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(BUILTIN_MAPPING.get_or_init(|| {
            Arc::new(Self {
                aliases: BUILTIN_ALIASES
                    .iter()
                    .map(|(raw, canonical)| ((*raw).to_owned(), (*canonical).to_owned()))
                    .collect(),
            })
        }))
    }

    /// Parse a mapping from a JSON object of `"raw_key": "canonical_key"` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a key fails validation
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let aliases: HashMap<String, String> = serde_json::from_str(json)?;
        Self::new(aliases)
    }

    /// Load a mapping from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("failed to read class mapping {}: {e}", path.display()))
                .with_source(e)
        })?;
        let mapping = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            aliases = mapping.len(),
            "Loaded class mapping"
        );
        Ok(mapping)
    }

    /// Canonical key for `key`, or `key` itself when no alias exists
    #[must_use]
    pub fn map_to_canonical<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.get(key).map_or(key, String::as_str)
    }

    /// Raw keys that alias onto `canonical`, sorted
    #[must_use]
    pub fn aliases_of(&self, canonical: &str) -> Vec<&str> {
        let mut raw: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(raw, _)| raw.as_str())
            .collect();
        raw.sort_unstable();
        raw
    }

    /// Distinct canonical keys, sorted
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = self.aliases.values().map(String::as_str).collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// Number of explicit aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether no aliases are defined (every key maps to itself)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
