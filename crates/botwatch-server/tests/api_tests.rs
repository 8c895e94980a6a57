//! Router tests driven through `tower::ServiceExt::oneshot`

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use botwatch_classifiers::{ModelConfig, PredictionService};
use botwatch_server::{create_router, AppState, BotwatchConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri).body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn test_health_ready() {
    let app = create_router(common::ready_state());
    let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_ready"], true);
    assert!(body.get("reason").is_none());
    assert_eq!(body["model"]["feature_dimension"], 13);
}

#[tokio::test]
async fn test_health_degraded() {
    let state = common::state_with(
        BotwatchConfig::default(),
        PredictionService::unavailable("vectorizer artifact not found"),
    );
    let (status, body) = send(
        create_router(state),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_ready"], false);
    assert_eq!(body["reason"], "vectorizer artifact not found");
}

#[tokio::test]
async fn test_classify_spam() {
    let app = create_router(common::ready_state());
    let (status, body) = send(
        app,
        post_json(
            "/v1/classify",
            &json!({"text": "win_free_iphone click_here_now limited_time_offer"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "spam_bot");
    assert_eq!(body["display_name"], "Spam Bot");
    assert!(body["insights"].as_array().is_some_and(|i| !i.is_empty()));

    let probabilities: Vec<f64> = body["probabilities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_f64().unwrap())
        .collect();
    assert_eq!(probabilities.len(), 5);
    assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-4);

    let max = probabilities.iter().cloned().fold(f64::MIN, f64::max);
    assert_eq!(body["confidence"].as_f64().unwrap(), max);
}

#[tokio::test]
async fn test_classify_empty_text() {
    let app = create_router(common::ready_state());
    let (status, body) = send(app, post_json("/v1/classify", &json!({"text": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "empty_input");
}

#[tokio::test]
async fn test_classify_bad_payload() {
    let app = create_router(common::ready_state());
    let (status, body) = send(app, post_json("/v1/classify", &json!({"body": "x"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_classify_without_model() {
    let state = common::state_with(
        BotwatchConfig::default(),
        PredictionService::unavailable("classifier artifact not found"),
    );
    let (status, body) = send(
        create_router(state),
        post_json("/v1/classify", &json!({"text": "a perfectly normal sentence"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["type"], "model_unavailable");
}

#[tokio::test]
async fn test_analyze_first_valid() {
    let app = create_router(common::ready_state());
    let (status, body) = send(
        app,
        post_raw(
            "/v1/analyze",
            r#"{"statuses":[{"full_text":"short"},{"full_text":"get more followers and boost your reach"},{"full_text":"free offer, click now to win_"}]}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweets_found"], 3);
    assert_eq!(body["valid_tweets"], 2);

    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0]["text"], "get more followers and boost your reach");
    assert_eq!(predictions[0]["result"]["label"], "follower_bot");
}

#[tokio::test]
async fn test_analyze_all() {
    let app = create_router(common::ready_state());
    let (status, body) = send(
        app,
        post_raw(
            "/v1/analyze?all=true",
            r#"[{"full_text":"get more followers and boost your reach"},{"full_text":"free offer, click now to win_"}]"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["result"]["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["follower_bot", "spam_bot"]);
}

#[tokio::test]
async fn test_analyze_no_tweets() {
    let app = create_router(common::ready_state());
    let (status, body) = send(app, post_raw("/v1/analyze", r#"{"data":[]}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweets_found"], 0);
    assert_eq!(body["predictions"], json!([]));
}

#[tokio::test]
async fn test_analyze_malformed() {
    let app = create_router(common::ready_state());
    let (status, body) = send(app, post_raw("/v1/analyze", "{not valid")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "malformed_json");
}

#[tokio::test]
async fn test_body_limit_returns_json_error() {
    let mut config = BotwatchConfig::default();
    config.server.max_body_bytes = 64;

    let big = json!([{ "full_text": "x".repeat(500) }]).to_string();
    let request = Request::post("/v1/analyze")
        .header(header::CONTENT_LENGTH, big.len())
        .body(Body::from(big))
        .unwrap();
    let app = create_router(common::state_with(config.clone(), common::ready_service()));
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["type"], "payload_too_large");
    assert!(body["error"]["message"].is_string());

    let app = create_router(common::state_with(config, common::ready_service()));
    let (status, body) = send(
        app,
        post_json("/v1/classify", &json!({ "text": "y".repeat(500) })),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["type"], "payload_too_large");
}

#[tokio::test]
async fn test_analyze_bad_query_returns_json_error() {
    let app = create_router(common::ready_state());
    let (status, body) = send(
        app,
        post_raw("/v1/analyze?all=maybe", r#"[{"full_text":"free offer, click now to win_"}]"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_analyze_deeply_nested_document() {
    let depth = 200;
    let document = format!(
        "{}{{\"full_text\":\"free offer, click now to win_\"}}{}",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let request = Request::post("/v1/analyze").body(Body::from(document)).unwrap();
    let (status, body) = send(create_router(common::ready_state()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweets_found"], 1);
    assert_eq!(body["predictions"][0]["result"]["label"], "spam_bot");
}

#[tokio::test]
async fn test_analyze_too_deep_document() {
    let depth = botwatch_extract::MAX_DOCUMENT_DEPTH + 1;
    let document = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let request = Request::post("/v1/analyze").body(Body::from(document)).unwrap();
    let (status, body) = send(create_router(common::ready_state()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "document_too_deep");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_router(common::ready_state());
    let (status, body) = send(app, Request::get("/v1/nope").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let app = create_router(common::ready_state());
    let response = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_state_loads_artifacts_from_config() {
    let dir = tempfile::tempdir().unwrap();
    common::write_artifacts(dir.path());

    let config = BotwatchConfig {
        model: ModelConfig::from_dir(dir.path()),
        ..Default::default()
    };
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();
    let state = AppState::new(config, handle);
    assert!(state.service.is_ready());

    let (status, body) = send(
        create_router(state),
        post_json("/v1/classify", &json!({"text": "I love my amazing family"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "human");
}
