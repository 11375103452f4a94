// ABOUTME: Hugging Face Inference API client for Food-101 image classification
// ABOUTME: Posts decoded image bytes to a hosted model and parses ranked label predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Hugging Face Inference API Classifier
//!
//! Sends the raw image bytes to `{base_url}/models/{model}` and reads back a
//! JSON array of `{ "label", "score" }` objects. The hosted model defaults to
//! `nateraw/vit-base-food101`, a ViT fine-tuned on the 101 Food-101 classes.
//!
//! # Example
//! ```rust,no_run
//! use food_scan::recognition::{FoodClassifier, HuggingFaceClassifier, HuggingFaceConfig, ImageData};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = HuggingFaceClassifier::new(HuggingFaceConfig::default())?;
//! let image = ImageData::from_bytes("image/jpeg", &std::fs::read("lunch.jpg")?);
//! let predictions = classifier.classify(&image).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use food_scan_core::constants::classifier::{
    DEFAULT_HF_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, SERVICE_NAME,
};
use food_scan_core::errors::{AppError, AppResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Classification, FoodClassifier, ImageData};

/// Hugging Face client configuration
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Inference API base URL (default: <https://api-inference.huggingface.co>)
    pub base_url: String,
    /// Model repository id (default: `nateraw/vit-base-food101`)
    pub model: String,
    /// Optional bearer token; anonymous requests are heavily rate limited
    pub api_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HF_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Response body: predictions on success, an error object otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Predictions(Vec<Classification>),
    Failure {
        error: String,
        #[serde(default)]
        estimated_time: Option<f64>,
    },
}

/// Image classifier backed by the Hugging Face Inference API
pub struct HuggingFaceClassifier {
    config: HuggingFaceConfig,
    http_client: reqwest::Client,
}

impl HuggingFaceClassifier {
    /// Create a client with the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: HuggingFaceConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AppError::internal(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full inference endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Model repository id
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl FoodClassifier for HuggingFaceClassifier {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn classify(&self, image: &ImageData) -> AppResult<Vec<Classification>> {
        let decoded = image.decode()?;
        let url = self.endpoint();
        debug!(
            url = %url,
            bytes = decoded.bytes.len(),
            mime_type = %decoded.mime_type,
            "Sending image to classifier"
        );

        let mut request = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, decoded.mime_type)
            .body(decoded.bytes);
        if let Some(token) = &self.config.api_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::external_unavailable(SERVICE_NAME, format!("request timed out: {e}"))
            } else {
                AppError::external_service(SERVICE_NAME, e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            let parsed = response.json::<InferenceResponse>().await.map_err(|e| {
                AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
            })?;
            return into_predictions(parsed);
        }

        let body = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("failed to read response: {e}"))
        })?;

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::external_auth(
                SERVICE_NAME,
                format!("HTTP {status}: {}", error_message(&body)),
            )),
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS => {
                warn!(status = %status, "Classifier temporarily unavailable");
                Err(AppError::external_unavailable(
                    SERVICE_NAME,
                    format!("HTTP {status}: {}", error_message(&body)),
                ))
            }
            _ => Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {status}: {}", error_message(&body)),
            )),
        }
    }
}

/// Parse an inference response body into predictions sorted by descending score
///
/// # Errors
///
/// Returns an external service error if the body is an error object or not
/// a prediction list at all
pub fn parse_predictions(body: &str) -> AppResult<Vec<Classification>> {
    let parsed: InferenceResponse = serde_json::from_str(body).map_err(|e| {
        AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
    })?;
    into_predictions(parsed)
}

fn into_predictions(parsed: InferenceResponse) -> AppResult<Vec<Classification>> {
    match parsed {
        InferenceResponse::Predictions(mut predictions) => {
            predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
            Ok(predictions)
        }
        InferenceResponse::Failure {
            error,
            estimated_time,
        } => {
            let message = estimated_time.map_or_else(
                || error.clone(),
                |secs| format!("{error} (retry in ~{secs:.0}s)"),
            );
            Err(AppError::external_service(SERVICE_NAME, message))
        }
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<InferenceResponse>(body) {
        Ok(InferenceResponse::Failure { error, .. }) => error,
        _ => body.chars().take(200).collect(),
    }
}
