use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use super::clock::Clock;
use super::handlers::{self, responses};
use crate::collaborators::Collaborators;
use crate::intent::{Classifier, Intent, IntentLabel};
use crate::session::Utterance;
use crate::synthesis::SpeechOutput;

/// Cross-utterance memory of the dispatcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// The user announced items to add but has not named one yet
    pub awaiting_item_details: bool,
}

/// The latest utterance and the response it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Utterance text as recognized
    pub transcript: String,
    /// Response spoken back
    pub response: String,
    /// Intent the utterance was handled as
    pub intent: IntentLabel,
    /// When the response was produced
    pub at: DateTime<Utc>,
}

/// Routes utterances to handlers and speaks the responses
///
/// Within one `dispatch` call classification, handling and response emission
/// run strictly in order. Concurrent calls are allowed; their completions may
/// interleave.
pub struct Dispatcher {
    classifier: Classifier,
    collaborators: Collaborators,
    output: Arc<SpeechOutput>,
    clock: Arc<dyn Clock>,
    state: Mutex<ConversationState>,
    latest: watch::Sender<Option<Exchange>>,
}

impl Dispatcher {
    pub fn new(collaborators: Collaborators, output: Arc<SpeechOutput>, clock: Arc<dyn Clock>) -> Self {
        Self::with_classifier(Classifier::default(), collaborators, output, clock)
    }

    pub fn with_classifier(
        classifier: Classifier,
        collaborators: Collaborators,
        output: Arc<SpeechOutput>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (latest, _) = watch::channel(None);

        Self {
            classifier,
            collaborators,
            output,
            clock,
            state: Mutex::new(ConversationState::default()),
            latest,
        }
    }

    /// Handle one utterance; returns the exchange whose response was spoken
    pub async fn dispatch(&self, utterance: &Utterance) -> Exchange {
        let intent = self.resolve(self.classifier.classify_utterance(&utterance.text));

        info!("Handling '{}' as {:?}", utterance.text.trim(), intent.label());

        let response = self.handle(&intent).await;

        let exchange = Exchange {
            transcript: utterance.text.clone(),
            response,
            intent: intent.label(),
            at: Utc::now(),
        };
        self.latest.send_replace(Some(exchange.clone()));
        self.output.speak(&exchange.response).await;

        exchange
    }

    /// While item details are pending, free-form text names the item
    fn resolve(&self, intent: Intent) -> Intent {
        match intent {
            Intent::General { text } if self.awaiting_item_details() => {
                debug!("Treating '{}' as the pending item", text);
                Intent::AddItem { text }
            }
            other => other,
        }
    }

    async fn handle(&self, intent: &Intent) -> String {
        match intent {
            Intent::Closing => {
                self.set_awaiting_item_details(false);
                responses::CLOSING.to_string()
            }
            Intent::AddItemsPrompt => {
                self.set_awaiting_item_details(true);
                responses::ADD_ITEMS_PROMPT.to_string()
            }
            Intent::AddItem { text } => {
                let outcome = handlers::add_item(&self.collaborators, text, self.clock.now()).await;
                if outcome.is_added() {
                    self.set_awaiting_item_details(false);
                }
                outcome.response()
            }
            Intent::SuggestRecipe => handlers::suggest_recipe(&self.collaborators).await,
            Intent::CheckWeather => handlers::check_weather(&self.collaborators).await,
            Intent::PlaySong { song } => handlers::play_song(song),
            Intent::ListItems => handlers::list_items(&self.collaborators).await,
            Intent::General { text } => handlers::converse(&self.collaborators, text).await,
        }
    }

    pub fn conversation_state(&self) -> ConversationState {
        *self.state()
    }

    pub fn awaiting_item_details(&self) -> bool {
        self.state().awaiting_item_details
    }

    fn set_awaiting_item_details(&self, awaiting: bool) {
        self.state().awaiting_item_details = awaiting;
    }

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The latest exchange, if any utterance was handled yet
    pub fn latest(&self) -> Option<Exchange> {
        self.latest.borrow().clone()
    }

    /// Watch exchanges as they are produced
    pub fn subscribe(&self) -> watch::Receiver<Option<Exchange>> {
        self.latest.subscribe()
    }

    pub fn output(&self) -> &Arc<SpeechOutput> {
        &self.output
    }
}
