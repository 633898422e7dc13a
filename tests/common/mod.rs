// Test doubles for every external collaborator and the speech backends.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use kitchen_assistant::collaborators::{
    Collaborators, ConversationClient, ExtractedItem, GroceryItem, GroceryStore, ItemExtractor, Location,
    MemoryGroceryStore, RecipeClient, WeatherClient,
};
use kitchen_assistant::dispatch::{Dispatcher, FixedClock};
use kitchen_assistant::synthesis::{SpeechOutput, SpeechRequest, SpeechSynthesizer, Voice};
use kitchen_assistant::{CollaboratorError, SpeechError, StoreError};

/// How a fake collaborator should fail
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unreachable,
    Rejected(u16),
    Malformed,
}

impl Failure {
    fn error(self) -> CollaboratorError {
        match self {
            Failure::Unreachable => CollaboratorError::Unreachable("connection refused".to_string()),
            Failure::Rejected(status) => CollaboratorError::Rejected { status },
            Failure::Malformed => CollaboratorError::Malformed("expected value".to_string()),
        }
    }
}

/// A collaborator answering with a canned outcome and recording its inputs
pub struct Fake<T: Clone> {
    outcome: Mutex<Result<T, Failure>>,
    calls: Mutex<Vec<String>>,
}

impl<T: Clone> Fake<T> {
    pub fn returning(value: T) -> Self {
        Self {
            outcome: Mutex::new(Ok(value)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            outcome: Mutex::new(Err(failure)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set(&self, outcome: Result<T, Failure>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, input: String) -> Result<T, CollaboratorError> {
        self.calls.lock().unwrap().push(input);
        self.outcome.lock().unwrap().clone().map_err(Failure::error)
    }
}

#[async_trait::async_trait]
impl ConversationClient for Fake<String> {
    async fn converse(&self, command: &str) -> Result<String, CollaboratorError> {
        self.answer(command.to_string())
    }
}

#[async_trait::async_trait]
impl RecipeClient for Fake<String> {
    async fn suggest(&self, available_items: &str) -> Result<String, CollaboratorError> {
        self.answer(available_items.to_string())
    }
}

#[async_trait::async_trait]
impl WeatherClient for Fake<String> {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<String, CollaboratorError> {
        self.answer(format!("{},{}", latitude, longitude))
    }
}

#[async_trait::async_trait]
impl ItemExtractor for Fake<ExtractedItem> {
    async fn extract(&self, prompt: &str) -> Result<ExtractedItem, CollaboratorError> {
        self.answer(prompt.to_string())
    }
}

/// A grocery store whose every operation fails
pub struct BrokenStore;

#[async_trait::async_trait]
impl GroceryStore for BrokenStore {
    async fn fetch_items(&self) -> Result<Vec<GroceryItem>, StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
    }

    async fn append_item(&self, _item: GroceryItem) -> Result<(), StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
    }
}

/// Records every request; optionally takes time to "speak"
pub struct RecordingSynthesizer {
    voices: Vec<Voice>,
    duration: Option<Duration>,
    fail: bool,
    requests: Mutex<Vec<SpeechRequest>>,
    cancels: AtomicUsize,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            duration: None,
            fail: false,
            requests: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
        }
    }

    pub fn with_voices(mut self, names: &[&str]) -> Self {
        self.voices = names.iter().map(|n| Voice::named(*n)).collect();
        self
    }

    pub fn speaking_for(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.text).collect()
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    async fn speak(&self, request: SpeechRequest) -> Result<(), SpeechError> {
        self.requests.lock().unwrap().push(request);
        if let Some(duration) = self.duration {
            tokio::time::sleep(duration).await;
        }
        if self.fail {
            return Err(SpeechError::Synthesis("audio device lost".to_string()));
        }
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub const KITCHEN: Location = Location {
    latitude: 51.5,
    longitude: -0.12,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 28, 10, 0, 0).unwrap()
}

/// Every fake wired into one dispatcher
pub struct Harness {
    pub conversation: Arc<Fake<String>>,
    pub extractor: Arc<Fake<ExtractedItem>>,
    pub recipes: Arc<Fake<String>>,
    pub weather: Arc<Fake<String>>,
    pub grocery: Arc<MemoryGroceryStore>,
    pub synthesizer: Arc<RecordingSynthesizer>,
    pub output: Arc<SpeechOutput>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_grocery(MemoryGroceryStore::new())
    }

    pub fn with_grocery(grocery: MemoryGroceryStore) -> Self {
        let synthesizer = Arc::new(RecordingSynthesizer::new());
        let output = Arc::new(SpeechOutput::new(synthesizer.clone(), None));

        Self {
            conversation: Arc::new(Fake::returning("Happy to help!".to_string())),
            extractor: Arc::new(Fake::returning(ExtractedItem::new("apples", 3.0))),
            recipes: Arc::new(Fake::returning("Apple crumble.".to_string())),
            weather: Arc::new(Fake::returning("clear sky, temperature is 21°C".to_string())),
            grocery: Arc::new(grocery),
            synthesizer,
            output,
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            conversation: self.conversation.clone(),
            extractor: self.extractor.clone(),
            recipes: self.recipes.clone(),
            weather: self.weather.clone(),
            grocery: self.grocery.clone(),
            location: KITCHEN,
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.collaborators(), self.output.clone(), Arc::new(FixedClock(fixed_now())))
    }

    /// Collaborator calls across every fake
    pub fn total_calls(&self) -> usize {
        self.conversation.calls().len()
            + self.extractor.calls().len()
            + self.recipes.calls().len()
            + self.weather.calls().len()
    }
}

pub fn item(name: &str, quantity: f64) -> GroceryItem {
    GroceryItem {
        item_name: name.to_string(),
        quantity,
        expiry_date: Utc.with_ymd_and_hms(2025, 1, 4, 10, 0, 0).unwrap(),
    }
}
