use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::FixedOffset;
use mood_analytics::{
    analyze_emotional_patterns, analyze_session_trends_at, analyze_theme_patterns,
    analyze_time_patterns_at, analyze_tool_usage_patterns, analyze_training_quality,
    generate_full_report_at, has_enough_history, FullReport,
};
use mood_core::config::offset_from_minutes;
use mood_core::types::validate_records;
use mood_core::{SessionRecord, TrainingAnnotation};
use serde::{Deserialize, Serialize};

/// Rejected input: the validation message goes back to the caller as-is.
pub struct Unprocessable(String);

impl IntoResponse for Unprocessable {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": self.0 })),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<Json<T>, Unprocessable>;

// ── Health ──────────────────────────────────────────────────────────────

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ── Patterns ────────────────────────────────────────────────────────────

pub fn pattern_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/patterns/report", post(full_report))
        .route("/v1/patterns/time", post(time_patterns))
        .route("/v1/patterns/themes", post(theme_patterns))
        .route("/v1/patterns/emotions", post(emotional_patterns))
        .route("/v1/patterns/tools", post(tool_patterns))
        .route("/v1/patterns/trends", post(session_trends))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternsRequest {
    pub records: Vec<SessionRecord>,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: FullReport,
    /// Whether the history meets the configured minimum for insights.
    pub ready: bool,
}

/// Validate the records and resolve the offset for this request.
fn prepare(state: &AppState, req: &PatternsRequest) -> Result<FixedOffset, Unprocessable> {
    validate_records(&req.records).map_err(|e| Unprocessable(e.to_string()))?;
    match req.utc_offset_minutes {
        Some(minutes) => offset_from_minutes(minutes).map_err(|e| Unprocessable(e.to_string())),
        None => Ok(state.default_offset),
    }
}

async fn full_report(
    State(state): State<AppState>,
    Json(req): Json<PatternsRequest>,
) -> ApiResult<ReportResponse> {
    let offset = prepare(&state, &req)?;
    tracing::info!("Pattern report requested for {} records", req.records.len());

    let report = generate_full_report_at(&req.records, offset);
    let ready = has_enough_history(
        &req.records,
        state.config.analysis.min_sessions_for_insights,
    );
    Ok(Json(ReportResponse { report, ready }))
}

async fn time_patterns(
    State(state): State<AppState>,
    Json(req): Json<PatternsRequest>,
) -> ApiResult<mood_analytics::TimePatterns> {
    let offset = prepare(&state, &req)?;
    Ok(Json(analyze_time_patterns_at(&req.records, offset)))
}

async fn theme_patterns(
    State(state): State<AppState>,
    Json(req): Json<PatternsRequest>,
) -> ApiResult<mood_analytics::ThemePatterns> {
    prepare(&state, &req)?;
    Ok(Json(analyze_theme_patterns(&req.records)))
}

async fn emotional_patterns(
    State(state): State<AppState>,
    Json(req): Json<PatternsRequest>,
) -> ApiResult<mood_analytics::EmotionalPatterns> {
    prepare(&state, &req)?;
    Ok(Json(analyze_emotional_patterns(&req.records)))
}

async fn tool_patterns(
    State(state): State<AppState>,
    Json(req): Json<PatternsRequest>,
) -> ApiResult<mood_analytics::ToolUsagePatterns> {
    prepare(&state, &req)?;
    Ok(Json(analyze_tool_usage_patterns(&req.records)))
}

async fn session_trends(
    State(state): State<AppState>,
    Json(req): Json<PatternsRequest>,
) -> ApiResult<mood_analytics::SessionTrends> {
    let offset = prepare(&state, &req)?;
    Ok(Json(analyze_session_trends_at(&req.records, offset)))
}

// ── Training ────────────────────────────────────────────────────────────

pub fn training_routes() -> Router<AppState> {
    Router::new().route("/v1/training/quality", post(training_quality))
}

#[derive(Debug, Deserialize)]
pub struct TrainingRequest {
    pub annotations: Vec<TrainingAnnotation>,
}

async fn training_quality(
    Json(req): Json<TrainingRequest>,
) -> ApiResult<Option<mood_analytics::TrainingQuality>> {
    for (i, annotation) in req.annotations.iter().enumerate() {
        annotation
            .validate(i)
            .map_err(|e| Unprocessable(e.to_string()))?;
    }
    Ok(Json(analyze_training_quality(&req.annotations)))
}
