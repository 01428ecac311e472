use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use somnia_capture::{
    create_router, upload_strategy_for, AppState, Config, EncoderProfile, InterpretationClient,
    RecorderBackendFactory, RecordingSession, StaticGate, TranscriptionClient,
};

#[derive(Debug, Parser)]
#[command(name = "somnia-capture", about = "Voice capture and transcription core")]
struct Args {
    /// Config file (without extension, resolved by the config crate)
    #[arg(long, default_value = "config/somnia-capture")]
    config: String,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config).context("Failed to load config")?;

    info!("somnia-capture v{}", env!("CARGO_PKG_VERSION"));
    info!("platform: {:?}", cfg.capture.platform);

    let profile = EncoderProfile::for_platform(cfg.capture.platform);
    let backend = RecorderBackendFactory::create(cfg.capture.platform);
    // Dev gate; app shells install their platform gate when embedding the lib
    let gate = Box::new(StaticGate::granted());

    let session = Arc::new(
        RecordingSession::new(backend, gate, profile.clone(), &cfg.capture.recordings_path)
            .context("Failed to create recording session")?,
    );

    let strategy = upload_strategy_for(cfg.capture.platform);
    let timeout = cfg.transcription.timeout_secs.map(Duration::from_secs);
    let transcriber = Arc::new(
        TranscriptionClient::new(&cfg.transcription.base_url, profile, strategy, timeout)
            .context("Failed to create transcription client")?,
    );

    let interpreter = Arc::new(
        InterpretationClient::new(
            &cfg.interpretation.base_url,
            cfg.interpretation.timeout_secs.map(Duration::from_secs),
        )
        .context("Failed to create interpretation client")?,
    );

    let state = AppState::new(session, transcriber, interpreter, cfg.service.language);
    let app = create_router(state);

    let addr = format!(
        "{}:{}",
        args.bind.unwrap_or(cfg.service.http.bind),
        cfg.service.http.port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP control surface listening on {addr}");
    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
