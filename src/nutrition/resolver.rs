// ABOUTME: Similarity resolver mapping a food key onto the best available nutrition record
// ABOUTME: Exact match, first substring match with a confidence penalty, then arbitrary fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Similarity Resolver
//!
//! Resolution runs in priority order:
//!
//! 1. **Exact**: the lower-cased query equals a table key; the record is
//!    returned with its curated confidence.
//! 2. **Approximate**: the first key, in table order, that contains the query
//!    or is contained in it; confidence is multiplied by `0.9`.
//! 3. **Arbitrary**: a uniformly random table entry with confidence forced to
//!    `0.6`, so a caller always has something to display.
//!
//! [`SimilarityResolver::match_food`] stops after step 2 and reports
//! [`FoodMatch::NoMatch`] instead, leaving the fallback decision to the caller.

use std::sync::Arc;

use food_scan_core::constants::confidence::{APPROXIMATE_MATCH_FACTOR, ARBITRARY_FALLBACK};
use food_scan_core::models::NutritionRecord;
use rand::Rng;
use tracing::debug;

use super::NutritionTable;

/// Outcome of matching a query against the nutrition table
#[derive(Debug, Clone, PartialEq)]
pub enum FoodMatch {
    /// Query equals a table key; curated confidence kept
    Exact(NutritionRecord),
    /// A key and the query contain one another; confidence already penalised
    Approximate {
        /// Table key that matched
        key: String,
        /// Copy of the record with the reduced confidence
        record: NutritionRecord,
    },
    /// Nothing in the table resembles the query
    NoMatch,
}

impl FoodMatch {
    /// The matched record, if any
    #[must_use]
    pub fn into_record(self) -> Option<NutritionRecord> {
        match self {
            Self::Exact(record) | Self::Approximate { record, .. } => Some(record),
            Self::NoMatch => None,
        }
    }

    /// Short name of the match kind for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::Approximate { .. } => "approximate",
            Self::NoMatch => "none",
        }
    }
}

/// Resolves food keys against a shared nutrition table
#[derive(Debug, Clone)]
pub struct SimilarityResolver {
    table: Arc<NutritionTable>,
}

impl SimilarityResolver {
    /// Create a resolver over `table`
    #[must_use]
    pub fn new(table: Arc<NutritionTable>) -> Self {
        Self { table }
    }

    /// Resolver over the built-in table
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(NutritionTable::builtin())
    }

    /// The table this resolver reads
    #[must_use]
    pub fn table(&self) -> &NutritionTable {
        &self.table
    }

    /// Exact, case-insensitive lookup with no fallback
    #[must_use]
    pub fn lookup_exact(&self, food_name: &str) -> Option<NutritionRecord> {
        self.table.get(&food_name.to_lowercase()).cloned()
    }

    /// Match a query without applying the arbitrary fallback
    #[must_use]
    pub fn match_food(&self, query: &str) -> FoodMatch {
        let query = query.to_lowercase();

        if let Some(record) = self.table.get(&query) {
            return FoodMatch::Exact(record.clone());
        }

        self.table
            .iter()
            .find(|(key, _)| key.contains(query.as_str()) || query.contains(key))
            .map_or(FoodMatch::NoMatch, |(key, record)| FoodMatch::Approximate {
                key: key.to_owned(),
                record: record.with_confidence(record.confidence * APPROXIMATE_MATCH_FACTOR),
            })
    }

    /// Resolve a query to a record; never comes back empty-handed
    #[must_use]
    pub fn resolve(&self, query: &str) -> NutritionRecord {
        self.resolve_with_rng(query, &mut rand::thread_rng())
    }

    /// [`resolve`](Self::resolve) with an injected random source for the fallback pick
    pub fn resolve_with_rng<R: Rng>(&self, query: &str, rng: &mut R) -> NutritionRecord {
        let matched = self.match_food(query);
        debug!(query, kind = matched.kind(), "Resolved food query");
        matched
            .into_record()
            .unwrap_or_else(|| self.arbitrary_with_rng(rng))
    }

    /// Uniformly random table record with the fixed fallback confidence
    pub fn arbitrary_with_rng<R: Rng>(&self, rng: &mut R) -> NutritionRecord {
        let (key, record) = self.table.entry_at(rng.gen_range(0..self.table.len()));
        debug!(
            fallback_key = key,
            "No nutrition match, returning arbitrary record"
        );
        record.with_confidence(ARBITRARY_FALLBACK)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn resolver() -> SimilarityResolver {
        SimilarityResolver::builtin()
    }

    #[test]
    fn test_exact_match_keeps_curated_confidence() {
        let resolver = resolver();
        for (key, record) in resolver.table().iter() {
            assert_eq!(&resolver.resolve(key), record);
        }
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let record = resolver().resolve("PIZZA");
        assert_eq!(record.food_name, "Pizza");
        assert!((record.confidence - 0.89).abs() < f64::EPSILON);
    }

    #[test]
    fn test_query_contained_in_key() {
        let record = resolver().resolve("apple");
        assert_eq!(record.food_name, "Apple Pie");
        assert!((record.confidence - 0.93 * 0.9).abs() < 1e-12);
        assert!((record.calories - 237.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_key_contained_in_query() {
        let matched = resolver().match_food("spicy_tuna_sushi_roll");
        let FoodMatch::Approximate { key, record } = matched else {
            panic!("expected approximate match, got {matched:?}");
        };
        assert_eq!(key, "sushi");
        assert!((record.confidence - 0.92 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_first_key_in_table_order_wins() {
        // "pizza_steak" contains both "pizza" (2nd) and "steak" (5th)
        let FoodMatch::Approximate { key, .. } = resolver().match_food("pizza_steak") else {
            panic!("expected approximate match");
        };
        assert_eq!(key, "pizza");
    }

    #[test]
    fn test_empty_query_matches_first_key() {
        let FoodMatch::Approximate { key, .. } = resolver().match_food("") else {
            panic!("expected approximate match");
        };
        assert_eq!(key, "apple_pie");
    }

    #[test]
    fn test_no_match_falls_back_to_table_record() {
        let resolver = resolver();
        assert_eq!(resolver.match_food("broccoli"), FoodMatch::NoMatch);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let record = resolver.resolve_with_rng("broccoli", &mut rng);
            assert!((record.confidence - 0.6).abs() < f64::EPSILON);
            let original = resolver
                .table()
                .iter()
                .find(|(_, candidate)| candidate.food_name == record.food_name)
                .map(|(_, candidate)| candidate)
                .unwrap();
            assert_eq!(original.with_confidence(0.6), record);
        }
    }

    #[test]
    fn test_arbitrary_pick_is_seedable() {
        let resolver = resolver();
        let first = resolver.resolve_with_rng("xyz", &mut StdRng::seed_from_u64(42));
        let second = resolver.resolve_with_rng("xyz", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookup_exact_has_no_fallback() {
        let resolver = resolver();
        assert!(resolver.lookup_exact("Steak").is_some());
        assert!(resolver.lookup_exact("apple").is_none());
    }

    #[test]
    fn test_table_is_not_mutated_by_lookups() {
        let resolver = resolver();
        let _ = resolver.resolve("apple");
        let _ = resolver.resolve("unknown_thing");
        let pie = resolver.table().get("apple_pie").unwrap();
        assert!((pie.confidence - 0.93).abs() < f64::EPSILON);
    }
}
