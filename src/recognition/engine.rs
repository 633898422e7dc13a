use crate::error::SpeechError;
use tokio::sync::mpsc;

/// Events delivered by a recognition engine instance
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The engine began listening
    Start,
    /// A completed recognition: results × alternatives (transcripts)
    Result(Vec<Vec<String>>),
    /// A recognition error (network, no-speech, aborted, ...)
    Error(String),
    /// The engine stopped listening; no further events follow
    End,
}

impl EngineEvent {
    /// Convenience constructor for a single-result, single-alternative event
    pub fn transcript(text: impl Into<String>) -> Self {
        EngineEvent::Result(vec![vec![text.into()]])
    }
}

/// Configuration handed to every engine instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    /// Recognition locale (BCP 47)
    pub locale: String,
    /// Keep listening after the first result
    pub continuous: bool,
    /// Deliver partial (interim) results
    pub interim_results: bool,
    /// Maximum alternatives per result
    pub max_alternatives: u32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            continuous: false,     // single-shot
            interim_results: false, // final results only
            max_alternatives: 1,
        }
    }
}

/// Speech recognition engine trait
///
/// One instance covers one listening cycle. The capture session builds a
/// fresh instance through an [`EngineFactory`] every time it restarts.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send {
    /// Start listening
    ///
    /// Returns a channel receiver that will receive engine events. The
    /// engine must send [`EngineEvent::End`] (or close the channel) once it
    /// stops, whether on its own or after [`RecognitionEngine::stop`].
    async fn start(&mut self) -> Result<mpsc::Receiver<EngineEvent>, SpeechError>;

    /// Request the engine to stop listening
    async fn stop(&mut self) -> Result<(), SpeechError>;

    /// Get engine name for logging
    fn name(&self) -> &str;
}

/// Builds recognition engine instances
pub trait EngineFactory: Send + Sync {
    /// Create a new engine instance
    ///
    /// Fails with [`SpeechError::EngineUnavailable`] when the host has no
    /// recognition capability.
    fn create(&self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionEngine>, SpeechError>;
}

/// Factory for hosts without any recognition capability
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEngineFactory;

impl EngineFactory for UnavailableEngineFactory {
    fn create(&self, _config: &RecognitionConfig) -> Result<Box<dyn RecognitionEngine>, SpeechError> {
        Err(SpeechError::EngineUnavailable(
            "no speech recognition backend is configured".to_string(),
        ))
    }
}
