//! Error types for the kitchen assistant

use thiserror::Error;

/// Errors raised by the speech capture and speech output layers
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The host has no recognition capability; fatal to starting a session
    #[error("speech recognition is not available: {0}")]
    EngineUnavailable(String),

    /// A transient recognition failure reported by the engine
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Speech synthesis failed
    #[error("synthesis error: {0}")]
    Synthesis(String),
}

/// Errors raised by external collaborators (LLM, extraction, recipe, weather)
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The collaborator could not be reached
    #[error("collaborator unreachable: {0}")]
    Unreachable(String),

    /// The collaborator answered with a non-success status
    #[error("collaborator rejected the request with status {status}")]
    Rejected { status: u16 },

    /// The collaborator answered with a payload we could not decode
    #[error("malformed collaborator response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CollaboratorError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            CollaboratorError::Rejected {
                status: status.as_u16(),
            }
        } else {
            CollaboratorError::Unreachable(err.to_string())
        }
    }
}

/// Errors raised by grocery list stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be parsed
    #[error("malformed grocery document: {0}")]
    Malformed(#[from] serde_json::Error),
}
