// ABOUTME: Image classifier abstraction returning ranked food label predictions
// ABOUTME: Defines the FoodClassifier trait and a configurable mock for tests and offline runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use food_scan_core::constants::classifier::SERVICE_NAME;
use food_scan_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use super::ImageData;

/// One ranked prediction from an image classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Human-readable class name, e.g. `"beef tartare"`
    pub label: String,
    /// Model confidence in `[0, 1]`
    pub score: f64,
}

impl Classification {
    /// Create a prediction
    #[must_use]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Create a prediction from user-supplied values, rejecting scores outside `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns a value-out-of-range error for a non-finite score or one outside `[0, 1]`
    pub fn checked(label: impl Into<String>, score: f64) -> AppResult<Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(AppError::out_of_range(format!(
                "score must be between 0.0 and 1.0, got {score}"
            )));
        }
        Ok(Self::new(label, score))
    }
}

/// Image classification backend
///
/// Implementations return predictions sorted by descending score. An empty
/// list is a valid answer meaning "no prediction".
#[async_trait]
pub trait FoodClassifier: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Classify an image
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable, rejects the request, or
    /// answers with something that is not a prediction list
    async fn classify(&self, image: &ImageData) -> AppResult<Vec<Classification>>;
}

enum MockBehavior {
    Predict(Vec<Classification>),
    Fail(String),
}

/// Mock classifier for testing (no model, no network)
pub struct MockFoodClassifier {
    behavior: MockBehavior,
}

impl MockFoodClassifier {
    /// Always return `predictions`, re-sorted by descending score
    #[must_use]
    pub fn with_predictions(mut predictions: Vec<Classification>) -> Self {
        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self {
            behavior: MockBehavior::Predict(predictions),
        }
    }

    /// Always return a single prediction
    #[must_use]
    pub fn with_label(label: &str, score: f64) -> Self {
        Self::with_predictions(vec![Classification::new(label, score)])
    }

    /// Always return an empty prediction list
    #[must_use]
    pub fn empty() -> Self {
        Self::with_predictions(Vec::new())
    }

    /// Always fail with an external service error
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            behavior: MockBehavior::Fail(message.to_owned()),
        }
    }
}

#[async_trait]
impl FoodClassifier for MockFoodClassifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn classify(&self, _image: &ImageData) -> AppResult<Vec<Classification>> {
        match &self.behavior {
            MockBehavior::Predict(predictions) => Ok(predictions.clone()),
            MockBehavior::Fail(message) => {
                Err(AppError::external_service(SERVICE_NAME, message.clone()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use food_scan_core::errors::ErrorCode;

    fn image() -> ImageData {
        ImageData::from_bytes("image/jpeg", b"plate")
    }

    #[test]
    fn test_checked_score_range() {
        assert_eq!(
            Classification::checked("Ramen", 1.0).unwrap(),
            Classification::new("Ramen", 1.0)
        );
        assert!(Classification::checked("Ramen", 0.0).is_ok());
        for score in [1.2, -0.1, f64::NAN] {
            let error = Classification::checked("Ramen", score).unwrap_err();
            assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        }
    }

    #[tokio::test]
    async fn test_mock_sorts_predictions() {
        let mock = MockFoodClassifier::with_predictions(vec![
            Classification::new("pizza", 0.2),
            Classification::new("sushi", 0.7),
        ]);
        let predictions = mock.classify(&image()).await.unwrap();
        assert_eq!(predictions[0].label, "sushi");
        assert_eq!(predictions.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_is_external() {
        let error = MockFoodClassifier::failing("model loading")
            .classify(&image())
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert!(error.code.is_external());
    }

    #[tokio::test]
    async fn test_mock_empty() {
        assert!(MockFoodClassifier::empty()
            .classify(&image())
            .await
            .unwrap()
            .is_empty());
    }
}
