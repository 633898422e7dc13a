use anyhow::{Context, Result};
use serde::Deserialize;

use crate::collaborators::{Location, DEFAULT_DOCUMENT};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    pub collaborators: CollaboratorsConfig,
    pub location: Location,
    #[serde(default)]
    pub grocery: GroceryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Which recognition backend to build engines from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionBackend {
    /// stdin lines are utterances
    #[default]
    Console,
    /// No recognition capability; starting a session fails
    None,
}

/// Which synthesizer speaks responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisBackend {
    #[default]
    Console,
    /// External TTS program (`synth_command`)
    Command,
    Silent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub locale: String,
    pub recognition: RecognitionBackend,
    pub synthesis: SynthesisBackend,
    pub synth_command: String,
    pub preferred_voice: Option<String>,
    pub voices: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            recognition: RecognitionBackend::Console,
            synthesis: SynthesisBackend::Console,
            synth_command: "say".to_string(),
            preferred_voice: None,
            voices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorsConfig {
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroceryConfig {
    /// Document name of the grocery list
    pub document: String,
    /// Directory holding the JSON document; in-memory store when absent
    pub store_dir: Option<String>,
}

impl Default for GroceryConfig {
    fn default() -> Self {
        Self {
            document: DEFAULT_DOCUMENT.to_string(),
            store_dir: None,
        }
    }
}

impl Config {
    /// Load from a config file (extension optional) overlaid with
    /// `KITCHEN__SECTION__KEY` environment variables
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("KITCHEN").separator("__"))
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        Ok(settings.try_deserialize()?)
    }
}
