use super::state::AppState;
use crate::translation::{TargetLanguage, TranslationError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,

    /// Defaults to French when absent
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: TargetLanguage,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/translate
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return bad_request(TranslationError::EmptyText);
    }

    let target = match req.target_language.as_deref() {
        Some(code) => match TargetLanguage::from_code(code) {
            Ok(target) => target,
            Err(e) => return bad_request(e),
        },
        None => TargetLanguage::default(),
    };

    match state.translator.translate(&req.text, target).await {
        Ok(translation) => {
            let warning = translation
                .simulated
                .then(|| "Simulation mode (Gemini API unavailable)".to_string());

            (
                StatusCode::OK,
                Json(TranslateResponse {
                    translated_text: translation.text,
                    source_language: state.translator.source_language().to_string(),
                    target_language: target,
                    timestamp: Utc::now().timestamp_millis(),
                    warning,
                }),
            )
                .into_response()
        }
        Err(e) => bad_request(e),
    }
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let active_sessions = state.relay.registry().len().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().timestamp_millis(),
        active_sessions,
    })
}

/// GET /api/sessions/:session_id
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.relay.registry().stats(&session_id).await {
        Some(stats) => (StatusCode::OK, Json(stats)).into_response(),
        None => {
            info!("Session {} not found", session_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Session {} not found", session_id),
                    message: None,
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(err: TranslationError) -> axum::response::Response {
    warn!("Rejected translation request: {}", err);

    let body = match err {
        TranslationError::EmptyText => ErrorResponse {
            error: "Text required".to_string(),
            message: None,
        },
        other => ErrorResponse {
            error: "Invalid translation request".to_string(),
            message: Some(other.to_string()),
        },
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
