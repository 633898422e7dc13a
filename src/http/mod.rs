//! HTTP API server for external control (browser client, scripts)
//!
//! This module provides a REST API for driving the assistant:
//! - POST /assistant/listen/start - Start the listening session
//! - POST /assistant/listen/stop - Stop listening
//! - POST /assistant/speech/interrupt - Silence speech output
//! - POST /assistant/commands - Dispatch a typed utterance
//! - GET /assistant/status - Session and conversation status
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{CommandRequest, CommandResponse, ErrorResponse, InterruptResponse, ListeningResponse};
pub use routes::create_router;
pub use state::AppState;
