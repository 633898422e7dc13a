use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use super::engine::{EngineEvent, EngineFactory, RecognitionConfig, RecognitionEngine};
use crate::error::SpeechError;

/// One step of a scripted listening cycle
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Deliver an event to the session
    Emit(EngineEvent),
    /// Pause before the next step
    Wait(Duration),
}

/// Scripted recognition backend for tests and demos
///
/// Every created engine replays the next queued script. When a script runs
/// out without emitting [`EngineEvent::End`], the engine keeps listening
/// until it is stopped. Engines created after the queue is drained behave
/// the same way with an empty script.
pub struct ScriptedEngineFactory {
    scripts: Mutex<VecDeque<Vec<ScriptStep>>>,
    available: AtomicBool,
    created: AtomicUsize,
    stops: Arc<AtomicUsize>,
    configs: Mutex<Vec<RecognitionConfig>>,
}

impl ScriptedEngineFactory {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(VecDeque::new()),
            available: AtomicBool::new(true),
            created: AtomicUsize::new(0),
            stops: Arc::new(AtomicUsize::new(0)),
            configs: Mutex::new(Vec::new()),
        }
    }

    /// Queue the script for the next engine instance
    pub fn push_script(&self, script: Vec<ScriptStep>) -> &Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.push_back(script);
        }
        self
    }

    /// Toggle whether the host "has" a recognition capability
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of engine instances created so far
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Number of stop requests received across all engines
    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Configurations passed to `create`, in order
    pub fn configs(&self) -> Vec<RecognitionConfig> {
        self.configs.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for ScriptedEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineFactory for ScriptedEngineFactory {
    fn create(&self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionEngine>, SpeechError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(SpeechError::EngineUnavailable(
                "scripted engine disabled".to_string(),
            ));
        }

        self.created.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut configs) = self.configs.lock() {
            configs.push(config.clone());
        }

        let script = self
            .scripts
            .lock()
            .ok()
            .and_then(|mut scripts| scripts.pop_front())
            .unwrap_or_default();

        Ok(Box::new(ScriptedEngine {
            script: Some(script),
            stops: Arc::clone(&self.stops),
            stop_tx: None,
        }))
    }
}

struct ScriptedEngine {
    script: Option<Vec<ScriptStep>>,
    stops: Arc<AtomicUsize>,
    stop_tx: Option<oneshot::Sender<()>>,
}

#[async_trait::async_trait]
impl RecognitionEngine for ScriptedEngine {
    async fn start(&mut self) -> Result<mpsc::Receiver<EngineEvent>, SpeechError> {
        let script = self
            .script
            .take()
            .ok_or_else(|| SpeechError::Recognition("already started".to_string()))?;

        let (tx, rx) = mpsc::channel(16);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        self.stop_tx = Some(stop_tx);

        tokio::spawn(async move {
            let _ = tx.send(EngineEvent::Start).await;

            for step in script {
                match step {
                    ScriptStep::Emit(event) => {
                        let ended = event == EngineEvent::End;
                        let _ = tx.send(event).await;
                        if ended {
                            return;
                        }
                    }
                    ScriptStep::Wait(duration) => {
                        tokio::select! {
                            _ = tokio::time::sleep(duration) => {}
                            _ = &mut stop_rx => {
                                let _ = tx.send(EngineEvent::End).await;
                                return;
                            }
                        }
                    }
                }
            }

            // Script exhausted: keep listening until stopped
            let _ = stop_rx.await;
            let _ = tx.send(EngineEvent::End).await;
        });

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), SpeechError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
