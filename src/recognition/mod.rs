//! Speech recognition engines
//!
//! An engine instance covers exactly one listening cycle; the capture
//! session asks an [`EngineFactory`] for a fresh one on every restart.
//! Backends:
//! - console: stdin lines act as recognized speech
//! - scripted: replayed event scripts (tests, demos)
//! - unavailable: hosts without recognition

mod console;
mod engine;
mod scripted;

pub use console::{ConsoleEngine, ConsoleEngineFactory};
pub use engine::{EngineEvent, EngineFactory, RecognitionConfig, RecognitionEngine, UnavailableEngineFactory};
pub use scripted::{ScriptStep, ScriptedEngineFactory};
