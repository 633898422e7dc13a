use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of the capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session, or the session was stopped
    Idle,
    /// An engine instance is listening
    Listening,
    /// The previous engine ended; a fresh one starts after the grace delay
    Restarting,
}

/// One finalized recognition result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Recognized text (first alternative of the first result)
    pub text: String,

    /// When the result was received
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Statistics about a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: String,

    /// Current lifecycle state
    pub state: SessionState,

    /// When the session was last started, if ever
    pub started_at: Option<DateTime<Utc>>,

    /// Number of automatic restarts since the last start
    pub restarts: usize,

    /// Number of utterances emitted since the last start
    pub utterances: usize,
}
