// Console recognition backend: each line read from the input is treated as
// one recognized utterance. Useful for running the assistant in a terminal
// without a microphone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info};

use super::engine::{EngineEvent, EngineFactory, RecognitionConfig, RecognitionEngine};
use crate::error::SpeechError;

type LineSource = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Factory producing line-reading engines over a shared input
pub struct ConsoleEngineFactory {
    lines: Arc<Mutex<LineSource>>,
    exhausted: Arc<AtomicBool>,
}

impl ConsoleEngineFactory {
    /// Read utterances from standard input
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    /// Read utterances from any buffered reader
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let boxed: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            lines: Arc::new(Mutex::new(boxed.lines())),
            exhausted: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl EngineFactory for ConsoleEngineFactory {
    fn create(&self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionEngine>, SpeechError> {
        if self.exhausted.load(Ordering::SeqCst) {
            return Err(SpeechError::EngineUnavailable(
                "console input is closed".to_string(),
            ));
        }

        debug!("Creating console engine ({})", config.locale);

        Ok(Box::new(ConsoleEngine {
            lines: Arc::clone(&self.lines),
            exhausted: Arc::clone(&self.exhausted),
            stop_tx: None,
        }))
    }
}

/// One single-shot listening cycle over the shared console input
pub struct ConsoleEngine {
    lines: Arc<Mutex<LineSource>>,
    exhausted: Arc<AtomicBool>,
    stop_tx: Option<oneshot::Sender<()>>,
}

#[async_trait::async_trait]
impl RecognitionEngine for ConsoleEngine {
    async fn start(&mut self) -> Result<mpsc::Receiver<EngineEvent>, SpeechError> {
        if self.stop_tx.is_some() {
            return Err(SpeechError::Recognition("already listening".to_string()));
        }

        let (tx, rx) = mpsc::channel(4);
        let (stop_tx, mut stop_rx) = oneshot::channel();
        self.stop_tx = Some(stop_tx);

        let lines = Arc::clone(&self.lines);
        let exhausted = Arc::clone(&self.exhausted);

        tokio::spawn(async move {
            let _ = tx.send(EngineEvent::Start).await;

            let mut lines = lines.lock().await;
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        let text = line.trim();
                        let results = if text.is_empty() {
                            Vec::new()
                        } else {
                            vec![vec![text.to_string()]]
                        };
                        let _ = tx.send(EngineEvent::Result(results)).await;
                    }
                    Ok(None) => {
                        info!("Console input closed");
                        exhausted.store(true, Ordering::SeqCst);
                        let _ = tx.send(EngineEvent::Error("end of input".to_string())).await;
                    }
                    Err(e) => {
                        let _ = tx.send(EngineEvent::Error(e.to_string())).await;
                    }
                },
                _ = &mut stop_rx => {
                    debug!("Console engine stopped");
                }
            }

            let _ = tx.send(EngineEvent::End).await;
        });

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), SpeechError> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
