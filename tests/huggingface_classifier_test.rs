// ABOUTME: Integration tests for the Hugging Face classifier against a wiremock server
// ABOUTME: Request shape, status code mapping, and recognizer fallback on transport failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{init_test_logging, instant_stand_in, sample_image};
use food_scan::errors::ErrorCode;
use food_scan::nutrition::{ClassMapping, SimilarityResolver};
use food_scan::recognition::{
    FoodClassifier, FoodRecognizer, HuggingFaceClassifier, HuggingFaceConfig, RecognitionSource,
};
use serde_json::json;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/nateraw/vit-base-food101";

/// Start a mock inference endpoint answering every POST with `response`
async fn mock_inference(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

fn classifier(base_url: String, token: Option<&str>) -> HuggingFaceClassifier {
    init_test_logging();
    HuggingFaceClassifier::new(HuggingFaceConfig {
        base_url,
        api_token: token.map(str::to_owned),
        timeout: Duration::from_secs(5),
        ..HuggingFaceConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_posts_image_bytes_and_parses_predictions() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_secret"))
        .and(header("content-type", "image/jpeg"))
        .and(body_bytes(b"tartare".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"label": "beef_carpaccio", "score": 0.1},
            {"label": "beef_tartare", "score": 0.8}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let predictions = classifier(mock_server.uri(), Some("hf_secret"))
        .classify(&sample_image("tartare"))
        .await
        .unwrap();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].label, "beef_tartare");
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization() {
    let mock_server = mock_inference(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let predictions = classifier(mock_server.uri(), None)
        .classify(&sample_image("empty"))
        .await
        .unwrap();
    assert!(predictions.is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_model_loading_is_unavailable() {
    let mock_server = mock_inference(ResponseTemplate::new(503).set_body_json(json!({
        "error": "Model nateraw/vit-base-food101 is currently loading",
        "estimated_time": 20.0
    })))
    .await;

    let error = classifier(mock_server.uri(), None)
        .classify(&sample_image("loading"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(error.message.contains("currently loading"));
}

#[tokio::test]
async fn test_bad_token_is_auth_failure() {
    let mock_server = mock_inference(ResponseTemplate::new(401).set_body_json(json!({
        "error": "Invalid credentials in Authorization header"
    })))
    .await;

    let error = classifier(mock_server.uri(), Some("hf_wrong"))
        .classify(&sample_image("auth"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_server_error_is_external_service_error() {
    let mock_server = mock_inference(ResponseTemplate::new(500).set_body_string("oops")).await;

    let error = classifier(mock_server.uri(), None)
        .classify(&sample_image("500"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("500"));
}

#[tokio::test]
async fn test_non_json_success_body_is_external_service_error() {
    let mock_server =
        mock_inference(ResponseTemplate::new(200).set_body_string("<html>gateway</html>")).await;

    let error = classifier(mock_server.uri(), None)
        .classify(&sample_image("html"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("JSON parse error"));
}

fn recognizer(classifier: HuggingFaceClassifier) -> FoodRecognizer {
    FoodRecognizer::new(
        SimilarityResolver::builtin(),
        ClassMapping::builtin(),
        instant_stand_in(),
    )
    .with_classifier(Arc::new(classifier))
}

#[tokio::test]
async fn test_recognizer_end_to_end_over_http() {
    let mock_server = mock_inference(ResponseTemplate::new(200).set_body_json(json!([
        {"label": "Beef Tartare", "score": 0.8},
        {"label": "steak", "score": 0.15}
    ])))
    .await;

    let record = recognizer(classifier(mock_server.uri(), None))
        .recognize(&sample_image("tartare"))
        .await;
    assert_eq!(record.food_name, "Beef Tartare (80% confident)");
    assert!((record.calories - 271.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unreachable_classifier_falls_back_to_stand_in() {
    // Bind then drop to obtain a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let recognition = recognizer(classifier(base_url, None))
        .recognize_detailed(&sample_image("offline"))
        .await;
    assert_eq!(recognition.source, RecognitionSource::StandIn);
    assert!(recognition.record.food_name.ends_with(" (detected)"));
}
