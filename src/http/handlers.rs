use super::state::AppState;
use crate::assistant::AssistantStatus;
use crate::error::SpeechError;
use crate::intent::IntentLabel;
use crate::session::SessionState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Utterance text, as a browser-side recognizer would deliver it
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub transcript: String,
    pub response: String,
    pub intent: IntentLabel,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListeningResponse {
    pub status: SessionState,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InterruptResponse {
    /// Whether anything was being spoken
    pub interrupted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /assistant/listen/start
/// Start the continuous listening session
pub async fn start_listening(State(state): State<AppState>) -> impl IntoResponse {
    if state.assistant.is_listening() {
        return error_response(StatusCode::CONFLICT, "Already listening");
    }

    match state.assistant.start_listening().await {
        Ok(()) => {
            info!("Listening started via HTTP");
            (
                StatusCode::OK,
                Json(ListeningResponse {
                    status: SessionState::Listening,
                    message: "Listening started".to_string(),
                }),
            )
                .into_response()
        }
        Err(e @ SpeechError::EngineUnavailable(_)) => {
            error!("Failed to start listening: {}", e);
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
        Err(e) => {
            error!("Failed to start listening: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST /assistant/listen/stop
/// Stop listening; suppresses any pending restart
pub async fn stop_listening(State(state): State<AppState>) -> impl IntoResponse {
    state.assistant.stop_listening().await;

    (
        StatusCode::OK,
        Json(ListeningResponse {
            status: SessionState::Idle,
            message: "Listening stopped".to_string(),
        }),
    )
}

/// POST /assistant/speech/interrupt
/// Silence the speech output (no-op when silent)
pub async fn interrupt_speech(State(state): State<AppState>) -> impl IntoResponse {
    let interrupted = state.assistant.interrupt().await;
    (StatusCode::OK, Json(InterruptResponse { interrupted }))
}

/// POST /assistant/commands
/// Dispatch a typed utterance
pub async fn submit_command(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Command text is empty");
    }

    let exchange = state.assistant.handle_text(&req.text).await;

    (
        StatusCode::OK,
        Json(CommandResponse {
            transcript: exchange.transcript,
            response: exchange.response,
            intent: exchange.intent,
        }),
    )
        .into_response()
}

/// GET /assistant/status
/// Session state, pending conversation state and the latest exchange
pub async fn get_status(State(state): State<AppState>) -> Json<AssistantStatus> {
    Json(state.assistant.status().await)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
