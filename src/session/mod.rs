//! Speech capture session management
//!
//! This module provides the `CaptureSession` abstraction that manages:
//! - Engine instances (a fresh one per listening cycle)
//! - Auto-restart after a natural end of recognition
//! - The inactivity timeout
//! - Utterance emission to the dispatcher

mod config;
mod session;
mod stats;

pub use config::{SessionConfig, INACTIVITY_TIMEOUT, RESTART_GRACE};
pub use session::CaptureSession;
pub use stats::{SessionState, SessionStats, Utterance};
