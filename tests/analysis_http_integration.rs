//! Integration tests for the analysis HTTP endpoints.
//!
//! These tests drive the assembled router end to end:
//! 1. Request bodies deserialize into the shared request records
//! 2. Successful rankings serialize with the documented field names
//! 3. Analysis errors map to the right status code and error body

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use decision_scoring::adapters::http::app_router;
use decision_scoring::config::AppConfig;
use decision_scoring::domain::analysis::NormalizationPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    app_router(&AppConfig::default())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() < 1e-9)
        .unwrap_or(false)
}

fn cost_quality_request() -> Value {
    json!({
        "criteria": ["cost", "quality"],
        "weights": [0.5, 0.5],
        "negativityBias": [true, false],
        "choices": ["A", "B"],
        "values": { "A": [100, 8], "B": [50, 6] }
    })
}

// =============================================================================
// Banner
// =============================================================================

#[tokio::test]
async fn root_returns_banner() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Decision Scoring Service");
}

// =============================================================================
// Weighted scoring
// =============================================================================

#[tokio::test]
async fn scoring_defaults_to_ratio_normalization() {
    let (status, body) = post_json(app(), "/api/dss/scoring", cost_quality_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["normalization"], "ratio");
    assert_eq!(body["scores"][0]["choice"], "A");
    assert!(approx(&body["scores"][0]["totalScore"], 0.75));
    assert_eq!(body["scores"][1]["choice"], "B");
    assert!(approx(&body["scores"][1]["totalScore"], 0.875));
}

#[tokio::test]
async fn scoring_sign_flip_keeps_input_order() {
    let mut request = cost_quality_request();
    request["normalization"] = json!("signFlip");

    let (status, body) = post_json(app(), "/api/dss/scoring", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["normalization"], "signFlip");
    assert_eq!(body["scores"][0]["choice"], "A");
    assert!(approx(&body["scores"][0]["totalScore"], -46.0));
    assert!(approx(&body["scores"][1]["totalScore"], -22.0));
}

#[tokio::test]
async fn scoring_uses_configured_default_policy() {
    let mut config = AppConfig::default();
    config.analysis.default_normalization = NormalizationPolicy::SignFlip;

    let (status, body) = post_json(
        app_router(&config),
        "/api/dss/scoring",
        cost_quality_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["normalization"], "signFlip");
}

#[tokio::test]
async fn scoring_without_negativity_bias_is_bad_request() {
    let mut request = cost_quality_request();
    request.as_object_mut().unwrap().remove("negativityBias");

    let (status, body) = post_json(app(), "/api/dss/scoring", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    assert!(body["message"].as_str().unwrap().contains("negativityBias"));
}

#[tokio::test]
async fn scoring_with_short_value_row_is_bad_request() {
    let mut request = cost_quality_request();
    request["values"]["B"] = json!([50]);

    let (status, body) = post_json(app(), "/api/dss/scoring", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SHAPE_MISMATCH");
}

#[tokio::test]
async fn scoring_overflow_is_unprocessable() {
    let request = json!({
        "criteria": ["size"],
        "weights": [10],
        "negativityBias": [false],
        "choices": ["A"],
        "values": { "A": [1e308] },
        "normalization": "signFlip"
    });

    let (status, body) = post_json(app(), "/api/dss/scoring", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "DEGENERATE_COMPUTATION");
}

// =============================================================================
// TOPSIS
// =============================================================================

#[tokio::test]
async fn topsis_handles_huge_column_values() {
    let request = json!({
        "criteria": ["a", "b"],
        "weights": [0.9, 0.1],
        "negativityBias": [false, false],
        "choices": ["A", "B"],
        "values": { "A": [2e200, 1], "B": [1e200, 2] }
    });

    let (status, body) = post_json(app(), "/api/dss/topsis", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rankedChoices"][0]["choice"], "A");
    assert!(approx(&body["rankedChoices"][0]["closeness"], 0.9));
}

#[tokio::test]
async fn topsis_ranks_ideal_choice_first() {
    let request = json!({
        "criteria": ["quality"],
        "weights": [1],
        "negativityBias": [false],
        "choices": ["A", "B"],
        "values": { "A": [3], "B": [4] }
    });

    let (status, body) = post_json(app(), "/api/dss/topsis", request).await;

    assert_eq!(status, StatusCode::OK);
    let ranked = body["rankedChoices"].as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["choice"], "B");
    assert!(approx(&ranked[0]["closeness"], 1.0));
    assert_eq!(ranked[1]["choice"], "A");
    assert!(approx(&ranked[1]["closeness"], 0.0));
}

#[tokio::test]
async fn topsis_with_all_zero_criterion_is_unprocessable() {
    let request = json!({
        "criteria": ["quality"],
        "weights": [1],
        "negativityBias": [false],
        "choices": ["A", "B"],
        "values": { "A": [0], "B": [0] }
    });

    let (status, body) = post_json(app(), "/api/dss/topsis", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "DEGENERATE_COMPUTATION");
}

// =============================================================================
// AHP
// =============================================================================

fn ahp_request() -> Value {
    json!({
        "criteria": ["price", "comfort"],
        "comparisons": [
            [["1", "3"], ["1/3", "1"]],
            [[1]]
        ],
        "alternatives": ["Y", "X"],
        "alternativeScores": { "Y": [0.3, 0.8], "X": [0.7, 0.2] }
    })
}

#[tokio::test]
async fn ahp_flat_ranks_descending() {
    let (status, body) = post_json(app(), "/api/dss/ahp", ahp_request()).await;

    assert_eq!(status, StatusCode::OK);
    let ranked = body["rankedAlternatives"].as_array().unwrap();
    assert_eq!(ranked[0]["alternative"], "X");
    assert!(approx(&ranked[0]["totalScore"], 0.2875));
    assert_eq!(ranked[1]["alternative"], "Y");
    assert!(approx(&ranked[1]["totalScore"], 0.2125));

    let weights = body["criteriaWeights"].as_array().unwrap();
    assert_eq!(weights.len(), 3);
    assert!(body.get("consistencyRatios").is_none());
}

#[tokio::test]
async fn ahp_two_level_composes_parent_weights() {
    let mut request = ahp_request();
    request["criteriaComparison"] = json!([["1", "2"], ["1/2", "1"]]);
    request["alternativeScores"] = json!({ "X": [0.7, 0.2, 0.5], "Y": [0.3, 0.8, 0.5] });

    let (status, body) = post_json(app(), "/api/dss/ahp", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rankedAlternatives"][0]["alternative"], "X");
    assert!(approx(&body["rankedAlternatives"][0]["totalScore"], 0.55));
    assert!(approx(&body["criteriaWeights"][0], 0.5));
}

#[tokio::test]
async fn ahp_reports_ratios_when_check_requested() {
    let mut request = ahp_request();
    request["checkConsistency"] = json!(true);

    let (status, body) = post_json(app(), "/api/dss/ahp", request).await;

    assert_eq!(status, StatusCode::OK);
    let ratios = body["consistencyRatios"].as_array().unwrap();
    assert_eq!(ratios.len(), 2);
    assert!(approx(&ratios[0]["ratio"], 0.0));
}

#[tokio::test]
async fn ahp_inconsistent_judgments_are_unprocessable() {
    let request = json!({
        "criteria": ["a"],
        "comparisons": [
            [["1", "9", "1/9"], ["1/9", "1", "9"], ["9", "1/9", "1"]]
        ],
        "alternatives": ["X"],
        "alternativeScores": { "X": [1.0] },
        "checkConsistency": true
    });

    let (status, body) = post_json(app(), "/api/dss/ahp", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INCONSISTENT_JUDGMENTS");
}

#[tokio::test]
async fn ahp_unparseable_cell_is_unprocessable() {
    let mut request = ahp_request();
    request["comparisons"][0][0][1] = json!("three");

    let (status, body) = post_json(app(), "/api/dss/ahp", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_EXPRESSION");
}

#[tokio::test]
async fn ahp_deeply_nested_cell_is_unprocessable() {
    let mut request = ahp_request();
    let depth = 200_000;
    request["comparisons"][1] = json!([[format!(
        "{}1{}",
        "(".repeat(depth),
        ")".repeat(depth)
    )]]);

    let (status, body) = post_json(app(), "/api/dss/ahp", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_EXPRESSION");
    assert_eq!(body["details"]["matrix"], "comparisons[1]");
}

#[tokio::test]
async fn ahp_non_square_matrix_is_bad_request() {
    let mut request = ahp_request();
    request["comparisons"][0] = json!([["1", "3"]]);

    let (status, body) = post_json(app(), "/api/dss/ahp", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SHAPE_MISMATCH");
}
