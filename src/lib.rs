pub mod assistant;
pub mod collaborators;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod intent;
pub mod recognition;
pub mod session;
pub mod synthesis;

pub use assistant::{Assistant, AssistantStatus};
pub use collaborators::{
    Collaborators, FileGroceryStore, GroceryItem, GroceryStore, HttpCollaborators, Location, MemoryGroceryStore,
};
pub use config::Config;
pub use dispatch::{Clock, Dispatcher, Exchange, SystemClock};
pub use error::{CollaboratorError, SpeechError, StoreError};
pub use http::{create_router, AppState};
pub use intent::{classify, Intent, IntentLabel};
pub use recognition::{EngineEvent, EngineFactory, RecognitionConfig, RecognitionEngine};
pub use session::{CaptureSession, SessionConfig, SessionState, SessionStats, Utterance};
pub use synthesis::{SpeechOutput, SpeechSynthesizer};
