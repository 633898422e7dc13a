use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::SpeechError;

/// A voice offered by a synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub locale: Option<String>,
}

impl Voice {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: None,
        }
    }
}

/// One utterance handed to a synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    /// Text to speak
    pub text: String,
    /// Voice to use; `None` means the synthesizer's default voice
    pub voice: Option<Voice>,
}

/// Speech synthesis backend trait
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Voices this backend can speak with
    fn voices(&self) -> Vec<Voice>;

    /// Speak one utterance, resolving once it has been spoken
    ///
    /// The future may be dropped at any point; dropping it must silence
    /// whatever it started.
    async fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError>;

    /// Cancel queued and in-flight speech held outside the `speak` future
    fn cancel(&self) {}

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Speech output channel with a hard interrupt contract
///
/// At most one utterance is in flight; speaking a new one supersedes the
/// previous. `interrupt` silences the channel and is a no-op when idle.
pub struct SpeechOutput {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    preferred_voice: Option<String>,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl SpeechOutput {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, preferred_voice: Option<String>) -> Self {
        Self {
            synthesizer,
            preferred_voice,
            current: Mutex::new(None),
        }
    }

    /// Speak `text`, replacing anything still being spoken
    pub async fn speak(&self, text: &str) {
        let request = SpeechRequest {
            text: text.to_string(),
            voice: self.select_voice(),
        };

        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            if !previous.is_finished() {
                debug!("Superseding in-flight speech");
                previous.abort();
                self.synthesizer.cancel();
            }
        }

        let synthesizer = Arc::clone(&self.synthesizer);
        *current = Some(tokio::spawn(async move {
            if let Err(e) = synthesizer.speak(request).await {
                warn!("Speech synthesis error: {}", e);
            }
        }));
    }

    /// Cancel all queued and in-flight speech
    ///
    /// Returns whether anything was actually silenced.
    pub async fn interrupt(&self) -> bool {
        let mut current = self.current.lock().await;

        match current.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                self.synthesizer.cancel();
                info!("Speech interrupted");
                true
            }
            _ => {
                debug!("Interrupt requested while silent");
                false
            }
        }
    }

    /// Wait for the in-flight utterance, if any, to finish speaking
    pub async fn drain(&self) {
        let task = self.current.lock().await.take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }

    /// Whether an utterance is still being spoken
    pub async fn is_speaking(&self) -> bool {
        self.current
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Best-effort voice selection: the preferred voice if offered, else default
    fn select_voice(&self) -> Option<Voice> {
        let preferred = self.preferred_voice.as_deref()?;

        let voice = self
            .synthesizer
            .voices()
            .into_iter()
            .find(|voice| voice.name == preferred);

        if voice.is_none() {
            warn!(
                "Voice '{}' not offered by {}, using default voice",
                preferred,
                self.synthesizer.name()
            );
        }

        voice
    }
}
