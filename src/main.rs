use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kitchen_assistant::collaborators::{FileGroceryStore, GroceryStore, HttpCollaborators, MemoryGroceryStore};
use kitchen_assistant::config::{RecognitionBackend, SynthesisBackend};
use kitchen_assistant::recognition::{ConsoleEngineFactory, EngineFactory, UnavailableEngineFactory};
use kitchen_assistant::synthesis::{CommandSynthesizer, ConsoleSynthesizer, SilentSynthesizer, SpeechSynthesizer, Voice};
use kitchen_assistant::{
    create_router, AppState, Assistant, Collaborators, Config, Dispatcher, SessionConfig, SpeechOutput, SystemClock,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kitchen-assistant", version, about = "Voice-driven kitchen assistant")]
struct Cli {
    /// Config file (extension optional)
    #[arg(short, long, default_value = "config/kitchen-assistant")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Listen continuously (console backend: type one utterance per line)
    Listen,
    /// Serve the HTTP control API
    Serve,
    /// Handle a single typed utterance and exit
    Ask {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Collaborators at {}", cfg.collaborators.base_url);

    let dispatcher = Arc::new(build_dispatcher(&cfg)?);
    let assistant = Assistant::new(
        build_engine_factory(&cfg),
        SessionConfig::with_locale(cfg.speech.locale.clone()),
        dispatcher,
    );

    match cli.command.unwrap_or(Command::Listen) {
        Command::Listen => listen(assistant).await,
        Command::Serve => serve(assistant, &cfg).await,
        Command::Ask { text } => {
            let exchange = assistant.handle_text(&text.join(" ")).await;
            info!("Handled as {:?}", exchange.intent);
            assistant.shutdown().await;
            Ok(())
        }
    }
}

async fn listen(assistant: Assistant) -> Result<()> {
    if let Err(e) = assistant.start_listening().await {
        error!("{}", e);
        return Err(e.into());
    }

    info!("Listening. Press Ctrl+C to stop.");

    tokio::select! {
        _ = assistant.wait_until_idle() => info!("Listening session ended"),
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    assistant.shutdown().await;
    Ok(())
}

async fn serve(assistant: Assistant, cfg: &Config) -> Result<()> {
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP API listening on {}", addr);

    let assistant = Arc::new(assistant);
    let app = create_router(AppState::new(Arc::clone(&assistant)));

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    assistant.stop_listening().await;
    Ok(())
}

fn build_dispatcher(cfg: &Config) -> Result<Dispatcher> {
    let http = Arc::new(
        HttpCollaborators::new(
            cfg.collaborators.base_url.clone(),
            Duration::from_secs(cfg.collaborators.request_timeout_secs),
        )
        .context("Failed to build collaborator client")?,
    );

    let grocery: Arc<dyn GroceryStore> = match &cfg.grocery.store_dir {
        Some(dir) => Arc::new(FileGroceryStore::new(dir, &cfg.grocery.document)),
        None => {
            info!("No grocery store directory configured; using in-memory list");
            Arc::new(MemoryGroceryStore::new())
        }
    };

    let collaborators = Collaborators {
        conversation: http.clone(),
        extractor: http.clone(),
        recipes: http.clone(),
        weather: http,
        grocery,
        location: cfg.location,
    };

    let output = Arc::new(SpeechOutput::new(
        build_synthesizer(cfg),
        cfg.speech.preferred_voice.clone(),
    ));

    Ok(Dispatcher::new(collaborators, output, Arc::new(SystemClock)))
}

fn build_synthesizer(cfg: &Config) -> Arc<dyn SpeechSynthesizer> {
    match cfg.speech.synthesis {
        SynthesisBackend::Console => Arc::new(ConsoleSynthesizer),
        SynthesisBackend::Silent => Arc::new(SilentSynthesizer),
        SynthesisBackend::Command => {
            let voices = cfg.speech.voices.iter().map(Voice::named).collect();
            Arc::new(CommandSynthesizer::new(cfg.speech.synth_command.clone(), voices))
        }
    }
}

fn build_engine_factory(cfg: &Config) -> Arc<dyn EngineFactory> {
    match cfg.speech.recognition {
        RecognitionBackend::Console => Arc::new(ConsoleEngineFactory::stdin()),
        RecognitionBackend::None => Arc::new(UnavailableEngineFactory),
    }
}
