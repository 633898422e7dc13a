use tracing::info;

use super::output::{SpeechRequest, SpeechSynthesizer, Voice};
use crate::error::SpeechError;

/// Prints responses to stdout instead of speaking them
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    async fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        println!("Assistant: {}", request.text);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Only logs responses
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    async fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        info!("Response (not spoken): {}", request.text);
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}
