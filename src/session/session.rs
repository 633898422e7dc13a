use super::config::SessionConfig;
use super::stats::{SessionState, SessionStats, Utterance};
use crate::error::SpeechError;
use crate::recognition::{EngineEvent, EngineFactory, RecognitionEngine};
use chrono::{DateTime, Utc};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// A continuous listening session spanning many engine instances
///
/// At most one listening task exists at a time. Whenever the engine ends on
/// its own while the session is active, a fresh engine is built after the
/// restart grace delay. `stop()` (or the inactivity timeout) suppresses that
/// restart, including one already waiting on the grace delay.
pub struct CaptureSession {
    /// Session configuration
    config: SessionConfig,

    /// Builds engine instances
    factory: Arc<dyn EngineFactory>,

    /// Where recognized utterances go
    utterance_tx: mpsc::Sender<Utterance>,

    /// Whether the user wants the session listening
    active: Arc<AtomicBool>,

    /// Observable lifecycle state
    state_tx: Arc<watch::Sender<SessionState>>,

    /// Handle and stop token of the listening task
    task: Mutex<Option<ListeningTask>>,

    /// When the session was last started
    started_at: std::sync::Mutex<Option<DateTime<Utc>>>,

    /// Automatic restarts since the last start
    restarts: Arc<AtomicUsize>,

    /// Utterances emitted since the last start
    utterances: Arc<AtomicUsize>,
}

struct ListeningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CaptureSession {
    /// Create an idle session
    pub fn new(
        factory: Arc<dyn EngineFactory>,
        config: SessionConfig,
        utterance_tx: mpsc::Sender<Utterance>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);

        Self {
            config,
            factory,
            utterance_tx,
            active: Arc::new(AtomicBool::new(false)),
            state_tx: Arc::new(state_tx),
            task: Mutex::new(None),
            started_at: std::sync::Mutex::new(None),
            restarts: Arc::new(AtomicUsize::new(0)),
            utterances: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start listening
    ///
    /// Fails with [`SpeechError::EngineUnavailable`] when the host has no
    /// recognition capability. Starting an already active session is a no-op.
    pub async fn start(&self) -> Result<(), SpeechError> {
        let mut task = self.task.lock().await;

        if self.active.load(Ordering::SeqCst) {
            warn!("Capture session already listening");
            return Ok(());
        }

        // A previous run may still be winding down after an inactivity stop
        if let Some(previous) = task.take() {
            previous.cancel.cancel();
            if let Err(e) = previous.handle.await {
                error!("Listening task panicked: {}", e);
            }
        }

        let engine = self.factory.create(&self.config.recognition)?;

        info!("Starting capture session: {}", self.config.session_id);

        self.active.store(true, Ordering::SeqCst);
        self.restarts.store(0, Ordering::SeqCst);
        self.utterances.store(0, Ordering::SeqCst);
        if let Ok(mut started_at) = self.started_at.lock() {
            *started_at = Some(Utc::now());
        }
        self.state_tx.send_replace(SessionState::Listening);

        let cancel = CancellationToken::new();
        let listener = Listener {
            config: self.config.clone(),
            factory: Arc::clone(&self.factory),
            utterance_tx: self.utterance_tx.clone(),
            active: Arc::clone(&self.active),
            state_tx: Arc::clone(&self.state_tx),
            cancel: cancel.clone(),
            restarts: Arc::clone(&self.restarts),
            utterances: Arc::clone(&self.utterances),
        };

        let handle = tokio::spawn(listener.run(engine));
        *task = Some(ListeningTask { cancel, handle });

        Ok(())
    }

    /// Stop listening and wait for the listening task to finish
    ///
    /// Suppresses any pending auto-restart. Stopping an idle session is a no-op.
    pub async fn stop(&self) {
        let mut task = self.task.lock().await;

        let was_active = self.active.swap(false, Ordering::SeqCst);

        match task.take() {
            Some(running) => {
                if was_active {
                    info!("Stopping capture session: {}", self.config.session_id);
                }
                running.cancel.cancel();
                if let Err(e) = running.handle.await {
                    error!("Listening task panicked: {}", e);
                }
            }
            None => debug!("Capture session not active"),
        }

        self.state_tx.send_replace(SessionState::Idle);
    }

    /// Whether the session is logically active (not stopped)
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Watch lifecycle state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Get current session statistics
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.config.session_id.clone(),
            state: self.state(),
            started_at: self.started_at.lock().ok().and_then(|s| *s),
            restarts: self.restarts.load(Ordering::SeqCst),
            utterances: self.utterances.load(Ordering::SeqCst),
        }
    }
}

/// State moved into the listening task
struct Listener {
    config: SessionConfig,
    factory: Arc<dyn EngineFactory>,
    utterance_tx: mpsc::Sender<Utterance>,
    active: Arc<AtomicBool>,
    state_tx: Arc<watch::Sender<SessionState>>,
    cancel: CancellationToken,
    restarts: Arc<AtomicUsize>,
    utterances: Arc<AtomicUsize>,
}

impl Listener {
    async fn run(self, mut engine: Box<dyn RecognitionEngine>) {
        // One deadline for the whole session: it survives engine restarts
        // and is only pushed back by recognized speech
        let inactivity = tokio::time::sleep(self.config.inactivity_timeout);
        tokio::pin!(inactivity);

        loop {
            self.listen_once(engine.as_mut(), inactivity.as_mut()).await;
            drop(engine);

            if !self.should_continue() {
                break;
            }

            self.state_tx.send_replace(SessionState::Restarting);
            debug!("Restarting recognition in {:?}", self.config.restart_grace);

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = inactivity.as_mut() => {
                    self.expire();
                    break;
                }
                _ = tokio::time::sleep(self.config.restart_grace) => {}
            }

            if !self.should_continue() {
                break;
            }

            engine = match self.factory.create(&self.config.recognition) {
                Ok(engine) => engine,
                Err(e) => {
                    error!("Cannot restart speech recognition: {}", e);
                    self.active.store(false, Ordering::SeqCst);
                    break;
                }
            };

            self.restarts.fetch_add(1, Ordering::SeqCst);
            self.state_tx.send_replace(SessionState::Listening);
        }

        self.state_tx.send_replace(SessionState::Idle);
        info!("Capture session ended: {}", self.config.session_id);
    }

    fn should_continue(&self) -> bool {
        self.active.load(Ordering::SeqCst) && !self.cancel.is_cancelled()
    }

    /// The inactivity deadline passed; counts as an explicit stop
    fn expire(&self) {
        info!(
            "No speech detected for {:?}. Stopping recognition.",
            self.config.inactivity_timeout
        );
        self.active.store(false, Ordering::SeqCst);
    }

    /// Drive one engine instance until it ends
    async fn listen_once(&self, engine: &mut dyn RecognitionEngine, mut inactivity: Pin<&mut Sleep>) {
        let mut events = match engine.start().await {
            Ok(events) => events,
            Err(SpeechError::EngineUnavailable(reason)) => {
                error!("Speech recognition unavailable: {}", reason);
                self.active.store(false, Ordering::SeqCst);
                return;
            }
            Err(e) => {
                warn!("Failed to start {} engine: {}", engine.name(), e);
                return;
            }
        };

        // Set once stop has been requested; the engine still owes us an End
        let mut stopping = false;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled(), if !stopping => {
                    stopping = true;
                    if let Err(e) = engine.stop().await {
                        warn!("Failed to stop {} engine: {}", engine.name(), e);
                    }
                }
                _ = inactivity.as_mut(), if !stopping => {
                    self.expire();
                    stopping = true;
                    if let Err(e) = engine.stop().await {
                        warn!("Failed to stop {} engine: {}", engine.name(), e);
                    }
                }
                event = events.recv() => match event {
                    Some(EngineEvent::Start) => {
                        info!("Speech recognition started ({})", engine.name());
                    }
                    Some(EngineEvent::Result(results)) => {
                        match first_transcript(&results) {
                            Some(text) => {
                                info!("Recognized text: {}", text);
                                self.emit(Utterance::new(text)).await;
                                inactivity
                                    .as_mut()
                                    .reset(Instant::now() + self.config.inactivity_timeout);
                            }
                            None => info!("No speech recognized"),
                        }
                    }
                    Some(EngineEvent::Error(reason)) => {
                        warn!("Speech recognition error: {}", reason);
                    }
                    Some(EngineEvent::End) | None => {
                        info!("Speech recognition ended");
                        return;
                    }
                },
            }
        }
    }

    async fn emit(&self, utterance: Utterance) {
        self.utterances.fetch_add(1, Ordering::SeqCst);
        if self.utterance_tx.send(utterance).await.is_err() {
            warn!("Utterance receiver dropped; discarding recognized text");
        }
    }
}

/// First alternative of the first result, if it carries any text
fn first_transcript(results: &[Vec<String>]) -> Option<String> {
    results
        .first()
        .and_then(|alternatives| alternatives.first())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
