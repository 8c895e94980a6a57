//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use botwatch_classifiers::ModelInfo;
use botwatch_core::{Error, PredictionResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::analysis::{AnalysisReport, SamplePolicy};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/v1/classify", post(classify))
        .route("/v1/analyze", post(analyze))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<ModelInfo>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_ready = state.service.is_ready();
    Json(HealthResponse {
        status: if model_ready { "ok" } else { "degraded" },
        model_ready,
        reason: state.service.unavailable_reason().map(str::to_string),
        model: state.service.model_info(),
    })
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    #[serde(flatten)]
    result: PredictionResult,
    display_name: &'static str,
    insights: &'static [&'static str],
}

async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, AppError> {
    metrics::counter!("botwatch_requests_total", "endpoint" => "classify").increment(1);

    let Json(req) = payload.map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
    let result = state.service.classify(&req.text)?;

    Ok(Json(ClassifyResponse {
        result,
        display_name: result.label.display_name(),
        insights: result.label.insights(),
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    all: Option<bool>,
}

async fn analyze(
    State(state): State<AppState>,
    params: Result<Query<AnalyzeParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    metrics::counter!("botwatch_requests_total", "endpoint" => "analyze").increment(1);

    let Query(params) = params.map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
    let body = body.map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

    let policy = match params.all {
        Some(true) => SamplePolicy::All,
        Some(false) => SamplePolicy::FirstValid,
        None => state.analyzer.default_policy(),
    };
    debug!(bytes = body.len(), policy = ?policy, "Received analyze request");

    let report = state.analyzer.analyze(&body, policy).await?;
    Ok(Json(report))
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    PayloadTooLarge(String),
    NotFound,
    Botwatch(Error),
}

impl AppError {
    /// Map an extractor rejection, keeping the size-limit status distinct
    fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::InvalidRequest(message)
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Botwatch(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, "invalid_request"),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, msg, "payload_too_large")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string(), "not_found"),
            AppError::Botwatch(err) => {
                let status = match &err {
                    e if e.is_caller_error() => StatusCode::BAD_REQUEST,
                    Error::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    error!(error = %err, "Request failed");
                }
                (status, err.to_string(), err.kind())
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
