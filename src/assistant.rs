//! Assistant runtime
//!
//! Wires the capture session to the dispatcher: recognized utterances flow
//! through a channel into a pump task that dispatches each one as soon as
//! it arrives. Dispatches are not serialized, so two utterances in close
//! succession may complete in either order.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::dispatch::{Dispatcher, Exchange};
use crate::error::SpeechError;
use crate::recognition::EngineFactory;
use crate::session::{CaptureSession, SessionConfig, SessionState, SessionStats, Utterance};

/// Recognized utterances waiting for the pump
const UTTERANCE_BUFFER: usize = 16;

/// Snapshot of the assistant for status displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantStatus {
    pub session: SessionStats,
    pub awaiting_item_details: bool,
    pub speaking: bool,
    pub latest: Option<Exchange>,
}

pub struct Assistant {
    session: CaptureSession,
    dispatcher: Arc<Dispatcher>,
    pump: JoinHandle<()>,
}

impl Assistant {
    /// Build the runtime; must be called inside a tokio runtime
    pub fn new(factory: Arc<dyn EngineFactory>, config: SessionConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let (utterance_tx, utterance_rx) = mpsc::channel(UTTERANCE_BUFFER);

        let session = CaptureSession::new(factory, config, utterance_tx);
        let pump = tokio::spawn(pump_utterances(utterance_rx, Arc::clone(&dispatcher)));

        Self {
            session,
            dispatcher,
            pump,
        }
    }

    pub async fn start_listening(&self) -> Result<(), SpeechError> {
        self.session.start().await
    }

    pub async fn stop_listening(&self) {
        self.session.stop().await
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_active()
    }

    /// Silence the speech output; a no-op when nothing is speaking
    pub async fn interrupt(&self) -> bool {
        self.dispatcher.output().interrupt().await
    }

    /// Dispatch typed text as if it had been recognized
    pub async fn handle_text(&self, text: &str) -> Exchange {
        self.dispatcher.dispatch(&Utterance::new(text)).await
    }

    /// Resolve once the capture session is idle
    pub async fn wait_until_idle(&self) {
        let mut state = self.session.subscribe();
        let _ = state.wait_for(|s| *s == SessionState::Idle).await;
    }

    pub async fn status(&self) -> AssistantStatus {
        AssistantStatus {
            session: self.session.stats(),
            awaiting_item_details: self.dispatcher.awaiting_item_details(),
            speaking: self.dispatcher.output().is_speaking().await,
            latest: self.dispatcher.latest(),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Stop listening and let in-flight dispatches finish
    pub async fn shutdown(self) {
        let Assistant {
            session,
            dispatcher,
            pump,
        } = self;

        session.stop().await;
        drop(session);

        if let Err(e) = pump.await {
            error!("Utterance pump panicked: {}", e);
        }
        dispatcher.output().drain().await;

        info!("Assistant shut down");
    }
}

async fn pump_utterances(mut utterances: mpsc::Receiver<Utterance>, dispatcher: Arc<Dispatcher>) {
    let mut in_flight: FuturesUnordered<BoxFuture<'static, Exchange>> = FuturesUnordered::new();

    loop {
        tokio::select! {
            utterance = utterances.recv() => match utterance {
                Some(utterance) => {
                    let dispatcher = Arc::clone(&dispatcher);
                    in_flight.push(async move { dispatcher.dispatch(&utterance).await }.boxed());
                }
                None => break,
            },
            Some(_) = in_flight.next(), if !in_flight.is_empty() => {}
        }
    }

    while in_flight.next().await.is_some() {}
}
