// Speaks through an external TTS program such as `say` (macOS) or `espeak`.

use tokio::process::Command;
use tracing::debug;

use super::output::{SpeechRequest, SpeechSynthesizer, Voice};
use crate::error::SpeechError;

/// Runs a TTS command per utterance
///
/// The child is spawned with `kill_on_drop`, so dropping the `speak` future
/// (what `SpeechOutput::interrupt` does) kills it.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    voices: Vec<Voice>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, voices: Vec<Voice>) -> Self {
        Self {
            program: program.into(),
            voices,
        }
    }

    fn command(&self, request: &SpeechRequest) -> Command {
        let mut command = Command::new(&self.program);
        if let Some(voice) = &request.voice {
            command.arg("-v").arg(&voice.name);
        }
        command.arg(&request.text).kill_on_drop(true);
        command
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    async fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        debug!("Spawning '{}' for {} chars", self.program, request.text.len());

        let mut child = self
            .command(&request)
            .spawn()
            .map_err(|e| SpeechError::Synthesis(format!("failed to spawn {}: {}", self.program, e)))?;

        let status = child
            .wait()
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        if !status.success() {
            return Err(SpeechError::Synthesis(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
