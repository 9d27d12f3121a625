//! Tests for the remote zero-shot classifier backend against a wiremock
//! stand-in for the scoring endpoint.

use image::RgbImage;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deepguard_core::ClassifierError;
use deepguard_detect::classifier::CANDIDATE_LABELS;
use deepguard_detect::{ClassifierHandle, RemoteClipClassifier, ZeroShotClassifier};

fn test_image() -> RgbImage {
    RgbImage::from_pixel(8, 8, image::Rgb([10, 20, 30]))
}

#[tokio::test]
async fn classify_round_trips_through_the_scoring_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(body_partial_json(json!({ "labels": CANDIDATE_LABELS })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "probabilities": [0.2, 0.8] })),
        )
        .mount(&server)
        .await;

    let classifier = RemoteClipClassifier::new(server.uri());
    let scores = classifier
        .classify(&test_image(), CANDIDATE_LABELS)
        .await
        .unwrap();

    assert!((scores.real - 0.2).abs() < 1e-12);
    assert!((scores.fake - 0.8).abs() < 1e-12);
}

#[tokio::test]
async fn unnormalized_probabilities_are_renormalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "probabilities": [3.0, 1.0] })),
        )
        .mount(&server)
        .await;

    let classifier = RemoteClipClassifier::new(server.uri());
    let scores = classifier
        .classify(&test_image(), CANDIDATE_LABELS)
        .await
        .unwrap();

    assert_eq!(scores.real, 0.75);
    assert_eq!(scores.fake, 0.25);
}

#[tokio::test]
async fn a_failing_endpoint_is_terminal_for_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // no retries
        .mount(&server)
        .await;

    let classifier = RemoteClipClassifier::new(server.uri());
    let err = classifier
        .classify(&test_image(), CANDIDATE_LABELS)
        .await
        .unwrap_err();

    assert!(matches!(err, ClassifierError::RequestFailed { .. }));
}

#[tokio::test]
async fn a_malformed_response_is_its_own_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let classifier = RemoteClipClassifier::new(server.uri());
    let err = classifier
        .classify(&test_image(), CANDIDATE_LABELS)
        .await
        .unwrap_err();

    assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
}

#[tokio::test]
async fn capability_check_yields_ready_when_the_probe_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let handle = ClassifierHandle::connect(&server.uri()).await;
    assert!(handle.get().is_ok());
}

#[tokio::test]
async fn capability_check_yields_unavailable_with_a_reason() {
    // Nothing is listening on this port.
    let handle = ClassifierHandle::connect("http://127.0.0.1:9").await;
    let err = handle.get().unwrap_err();
    assert!(err.to_string().starts_with("AI model is not available"));
}
