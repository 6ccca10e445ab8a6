//! HTTP routes and handlers

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cybersakhi_core::{ChatMessage, Error};
use cybersakhi_guard::{
    evaluate_password, AnalysisReport, ComplaintDraft, ComplaintSubmission, Language,
    PasswordEvaluation,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Header that identifies the caller's analysis session
pub const SESSION_HEADER: &str = "x-session-id";

const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/password/evaluate", post(evaluate))
        .route(
            "/api/harassment/analyze",
            post(analyze).delete(cancel_analysis),
        )
        .route("/api/chat", post(chat))
        .route("/api/complaints/prepare", post(prepare_complaint))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

#[derive(Debug, Deserialize)]
struct PasswordRequest {
    password: String,
}

async fn evaluate(Json(req): Json<PasswordRequest>) -> Json<PasswordEvaluation> {
    metrics::counter!("cybersakhi_requests_total", "endpoint" => "password").increment(1);
    let evaluation = evaluate_password(&req.password);
    debug!(tier = ?evaluation.tier, "Password evaluated");
    Json(evaluation)
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
}

async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    metrics::counter!("cybersakhi_requests_total", "endpoint" => "analyze").increment(1);

    let session = session_id(&headers)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let lease = state.lease_detector(&session);
    let report = lease.detector().analyze(&req.text).await?;
    info!(
        session = %lease.session(),
        severity = %report.presentation.tier,
        "Analysis served"
    );
    Ok(Json(report))
}

async fn cancel_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = session_id(&headers).ok_or_else(|| {
        AppError::InvalidRequest(format!("missing {} header", SESSION_HEADER))
    })?;

    let cancelled = state.cancel_analysis(session);
    if cancelled {
        info!(session = %session, "Analysis cancelled");
    }
    Ok(Json(json!({ "cancelled": cancelled })))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    language: Language,
    #[serde(default)]
    history: Vec<ChatMessage>,
    message: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    metrics::counter!("cybersakhi_requests_total", "endpoint" => "chat").increment(1);
    let reply = state
        .assistant
        .reply(req.language, &req.history, &req.message)
        .await?;
    Ok(Json(reply))
}

async fn prepare_complaint(
    Json(draft): Json<ComplaintDraft>,
) -> Result<Json<ComplaintSubmission>, AppError> {
    metrics::counter!("cybersakhi_requests_total", "endpoint" => "complaint").increment(1);
    let submission = draft.into_submission()?;
    info!(
        category = ?submission.category,
        priority = ?submission.priority,
        "Complaint prepared"
    );
    Ok(Json(submission))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    Core(Error),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Core(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg),
            AppError::Core(err) => {
                let status = match &err {
                    Error::EmptyInput => StatusCode::BAD_REQUEST,
                    Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    Error::AnalysisInProgress => StatusCode::CONFLICT,
                    // Client closed request
                    Error::Cancelled => {
                        StatusCode::from_u16(499).unwrap_or(StatusCode::BAD_REQUEST)
                    }
                    Error::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    Error::Transport(_) | Error::Schema(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    warn!(kind = err.kind(), "Request failed: {}", err);
                    metrics::counter!("cybersakhi_errors_total", "kind" => err.kind())
                        .increment(1);
                }
                (status, err.kind(), err.to_string())
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
