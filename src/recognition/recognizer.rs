// ABOUTME: Recognition orchestrator turning classifier predictions into nutrition records
// ABOUTME: Normalizes and maps the top label, resolves nutrition, and degrades to the stand-in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recognition Orchestrator
//!
//! [`FoodRecognizer::recognize`] never fails. Every classifier problem (an
//! error, an empty prediction list, no classifier configured at all) routes
//! to the [`StandInRecognizer`], whose result is marked with a `" (detected)"`
//! suffix so callers can tell it apart from a model prediction.

use std::fmt;
use std::sync::Arc;

use food_scan_core::constants::estimated;
use food_scan_core::constants::labels::{DETECTED_SUFFIX, UNKNOWN_FOOD};
use food_scan_core::errors::AppResult;
use food_scan_core::models::{percent, NutrientAmount, NutritionRecord};
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    Classification, FoodClassifier, HuggingFaceClassifier, ImageData, StandInRecognizer,
};
use crate::config::{FallbackPolicy, ScannerConfig};
use crate::nutrition::{is_food101_class, normalize, ClassMapping, SimilarityResolver};

/// Score assumed when a classifier reports a non-finite score
const MISSING_SCORE: f64 = 0.5;

/// Which path produced a recognition result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionSource {
    /// Top classifier prediction resolved against the nutrition table
    Classifier,
    /// Top classifier prediction with no table match; placeholder macros
    Estimated,
    /// Classifier unusable; hash-based stand-in
    StandIn,
}

impl fmt::Display for RecognitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classifier => write!(f, "classifier"),
            Self::Estimated => write!(f, "estimated"),
            Self::StandIn => write!(f, "stand_in"),
        }
    }
}

/// Recognition result with provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    /// Record to present
    pub record: NutritionRecord,
    /// Path that produced it
    pub source: RecognitionSource,
    /// Classifier prediction used, absent on the stand-in path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Classification>,
}

/// Orchestrates classifier, mapping, resolver, and stand-in
#[derive(Clone)]
pub struct FoodRecognizer {
    classifier: Option<Arc<dyn FoodClassifier>>,
    resolver: SimilarityResolver,
    mapping: Arc<ClassMapping>,
    stand_in: StandInRecognizer,
    fallback_policy: FallbackPolicy,
}

impl fmt::Debug for FoodRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoodRecognizer")
            .field("classifier", &self.classifier.as_ref().map(|c| c.name()))
            .field("fallback_policy", &self.fallback_policy)
            .field("stand_in_delay", &self.stand_in.delay())
            .finish_non_exhaustive()
    }
}

impl FoodRecognizer {
    /// Recognizer without a classifier; every scan takes the stand-in path
    #[must_use]
    pub fn new(
        resolver: SimilarityResolver,
        mapping: Arc<ClassMapping>,
        stand_in: StandInRecognizer,
    ) -> Self {
        Self {
            classifier: None,
            resolver,
            mapping,
            stand_in,
            fallback_policy: FallbackPolicy::default(),
        }
    }

    /// Attach a classifier
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn FoodClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Choose what an unmatched label produces
    #[must_use]
    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    /// Build the full pipeline from configuration, including the remote classifier
    ///
    /// # Errors
    ///
    /// Returns an error if a configured table file is invalid or the HTTP
    /// client cannot be created
    pub fn from_config(config: &ScannerConfig) -> AppResult<Self> {
        let recognizer = Self::offline_from_config(config)?;
        let classifier = HuggingFaceClassifier::new(config.huggingface.clone())?;
        Ok(recognizer.with_classifier(Arc::new(classifier)))
    }

    /// Build the pipeline from configuration without any classifier
    ///
    /// # Errors
    ///
    /// Returns an error if a configured table file is invalid
    pub fn offline_from_config(config: &ScannerConfig) -> AppResult<Self> {
        let tables = config.load_tables()?;
        let resolver = SimilarityResolver::new(tables.table);
        let stand_in = StandInRecognizer::new(resolver.clone(), config.stand_in_delay);
        Ok(Self::new(resolver, tables.mapping, stand_in).with_fallback_policy(config.fallback_policy))
    }

    /// The stand-in recognizer used on the degraded path
    #[must_use]
    pub const fn stand_in(&self) -> &StandInRecognizer {
        &self.stand_in
    }

    /// The resolver used for table lookups
    #[must_use]
    pub const fn resolver(&self) -> &SimilarityResolver {
        &self.resolver
    }

    /// Recognize the food in `image`; always produces a record
    pub async fn recognize(&self, image: &ImageData) -> NutritionRecord {
        self.recognize_detailed(image).await.record
    }

    /// [`recognize`](Self::recognize) with the path that produced the record
    pub async fn recognize_detailed(&self, image: &ImageData) -> Recognition {
        let Some(classifier) = &self.classifier else {
            debug!("No classifier configured, using stand-in recognizer");
            return self.detected(image).await;
        };

        let predictions = match classifier.classify(image).await {
            Ok(predictions) => predictions,
            Err(e) => {
                warn!(
                    classifier = classifier.name(),
                    error = %e,
                    "Classifier failed, falling back to stand-in recognizer"
                );
                return self.detected(image).await;
            }
        };

        let Some(top) = predictions.first() else {
            warn!(
                classifier = classifier.name(),
                "No classification results returned, falling back to stand-in recognizer"
            );
            return self.detected(image).await;
        };

        debug!(
            label = %top.label,
            score = top.score,
            candidates = predictions.len(),
            "Top classifier prediction"
        );
        self.recognize_prediction(top)
    }

    /// Turn one classifier prediction into a record, skipping the classifier call
    #[must_use]
    pub fn record_for_prediction(&self, prediction: &Classification) -> NutritionRecord {
        self.recognize_prediction(prediction).record
    }

    /// [`record_for_prediction`](Self::record_for_prediction) with provenance
    #[must_use]
    pub fn recognize_prediction(&self, prediction: &Classification) -> Recognition {
        let label = if prediction.label.is_empty() {
            UNKNOWN_FOOD
        } else {
            prediction.label.as_str()
        };
        let score = if prediction.score.is_finite() {
            prediction.score.clamp(0.0, 1.0)
        } else {
            MISSING_SCORE
        };

        let key = normalize(label);
        if !is_food101_class(&key) {
            warn!(label, key = %key, "Food label not in Food-101 vocabulary");
        }
        let canonical = self.mapping.map_to_canonical(&key);

        let matched = match self.fallback_policy {
            FallbackPolicy::ArbitraryRecord => Some(self.resolver.resolve(canonical)),
            FallbackPolicy::Estimated => self.resolver.match_food(canonical).into_record(),
        };
        let used = Some(Classification::new(label, score));

        match matched {
            Some(record) => Recognition {
                record: NutritionRecord {
                    food_name: format!("{label} ({}% confident)", percent(score)),
                    confidence: score,
                    ..record
                },
                source: RecognitionSource::Classifier,
                prediction: used,
            },
            None => {
                debug!(label, canonical, "No nutrition match, using estimated values");
                Recognition {
                    record: estimated_record(label, score),
                    source: RecognitionSource::Estimated,
                    prediction: used,
                }
            }
        }
    }

    async fn detected(&self, image: &ImageData) -> Recognition {
        let record = self.stand_in.recognize(image).await;
        Recognition {
            record: NutritionRecord {
                food_name: format!("{}{DETECTED_SUFFIX}", record.food_name),
                ..record
            },
            source: RecognitionSource::StandIn,
            prediction: None,
        }
    }
}

/// Placeholder record for a recognized label with no nutrition data
#[must_use]
pub fn estimated_record(label: &str, confidence: f64) -> NutritionRecord {
    NutritionRecord {
        food_name: label.to_owned(),
        calories: estimated::CALORIES,
        proteins: estimated::PROTEINS,
        carbs: estimated::CARBS,
        fats: estimated::FATS,
        confidence,
        vitamins: Some(vec![NutrientAmount::new(
            estimated::NOTE_NAME,
            estimated::NOTE_AMOUNT,
        )]),
        minerals: None,
    }
}
