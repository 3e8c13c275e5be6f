//! HTTP API for the scoring session.
//!
//! Thin boundary over [`SessionStore`]: each route validates its input,
//! applies one engine operation, and returns the operation's JSON form.
//! Numeric fields that originate in free-form client inputs (participant
//! number, judge count) go through lenient coercion; an unusable value is
//! substituted with the operation's default rather than rejected.

use crate::ws::ws_handler;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rostrum_engine::{CompetitionState, SessionStore};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router.
pub fn build_router(store: SessionStore) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Session state
        .route("/api/v1/state", get(get_state))
        .route("/api/v1/all-scores", get(all_scores))
        // Scoring
        .route("/api/v1/score", post(submit_score))
        .route("/api/v1/calculate", post(calculate))
        .route("/api/v1/reset", post(reset))
        // Participant control
        .route("/api/v1/next-participant", post(next_participant))
        .route("/api/v1/participant-number", post(participant_number))
        // Judge panel
        .route("/api/v1/judge-count", post(judge_count))
        // WebSocket for real-time session updates
        .route("/api/v1/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(store)
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

async fn ready() -> &'static str {
    "OK"
}

// --- Common response shapes ---

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

// --- Session state endpoints ---

async fn get_state(State(store): State<SessionStore>) -> Json<CompetitionState> {
    Json(store.snapshot().await)
}

async fn all_scores(State(store): State<SessionStore>) -> Json<BTreeMap<String, String>> {
    Json(store.all_scores().await)
}

// --- Scoring endpoints ---

/// Judge ids arrive as numbers or numeric strings depending on which
/// screen submitted; both forms are accepted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitScoreRequest {
    #[serde(deserialize_with = "de_lenient_u32")]
    judge_id: u32,
    score: f64,
}

async fn submit_score(
    State(store): State<SessionStore>,
    Json(req): Json<SubmitScoreRequest>,
) -> Json<SuccessResponse> {
    // Scores are stored as submitted; the 0-100 range is enforced by the
    // judge input screens, not here.
    store.submit_score(req.judge_id, req.score).await;
    SuccessResponse::ok()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    final_score: String,
}

async fn calculate(
    State(store): State<SessionStore>,
) -> Result<Json<CalculateResponse>, (StatusCode, Json<ErrorResponse>)> {
    match store.compute_final().await {
        Ok(result) => Ok(Json(CalculateResponse {
            final_score: result.value,
        })),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetRequest {
    #[serde(default)]
    reset_all: bool,
}

async fn reset(
    State(store): State<SessionStore>,
    body: Option<Json<ResetRequest>>,
) -> Json<SuccessResponse> {
    let reset_all = body.map(|Json(req)| req.reset_all).unwrap_or(false);
    store.reset(reset_all).await;
    SuccessResponse::ok()
}

// --- Participant control endpoints ---

async fn next_participant(State(store): State<SessionStore>) -> Json<SuccessResponse> {
    store.advance_participant().await;
    SuccessResponse::ok()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchRequest {
    #[serde(default)]
    player_number: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchResponse {
    success: bool,
    player_number: String,
    player_theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_score: Option<String>,
    has_score: bool,
}

async fn participant_number(
    State(store): State<SessionStore>,
    Json(req): Json<SwitchRequest>,
) -> Json<SwitchResponse> {
    let outcome = store
        .switch_participant(coerce_positive(&req.player_number))
        .await;

    Json(SwitchResponse {
        success: true,
        player_number: outcome.participant_number.clone(),
        player_theme: outcome.participant_theme.clone(),
        has_score: outcome.has_score(),
        final_score: outcome.final_score,
    })
}

// --- Judge panel endpoints ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JudgeCountRequest {
    #[serde(default)]
    judge_count: Value,
}

async fn judge_count(
    State(store): State<SessionStore>,
    Json(req): Json<JudgeCountRequest>,
) -> Json<SuccessResponse> {
    // The 3-9 operating range is a client-side rule; only the
    // non-numeric fallback applies here.
    store
        .set_judge_count(coerce_positive(&req.judge_count))
        .await;
    SuccessResponse::ok()
}

// --- Input coercion ---

/// Lenient coercion for numeric values typed into client input fields.
///
/// Numbers and numeric strings are accepted; anything else, including a
/// non-positive value, yields `None` and the engine substitutes the
/// operation's default. Bad input falling back instead of failing is
/// intentional: callers must not rely on an error being raised.
fn coerce_positive(value: &Value) -> Option<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|n| *n >= 1)
}

fn de_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
