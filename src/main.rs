use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_relay::{
    create_router, AppState, Config, HttpTranscriptionGateway, RelaySettings, StreamingRelay,
    TranslationService,
};
use voice_relay::session::SessionRegistry;

#[derive(Debug, Parser)]
#[command(name = "voice-relay", version, about = "Streaming audio relay for speech-to-text")]
struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, default_value = "config/voice-relay")]
    config: String,

    /// Override the HTTP port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut cfg = Config::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;
    if let Some(port) = cli.port {
        cfg.service.http.port = port;
    }
    cfg.validate()?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let gateway = HttpTranscriptionGateway::new(&cfg.transcription)?;
    info!("Speech-to-text service: {}", gateway.base_url());
    if cfg.transcription.health_check {
        if let Err(e) = gateway.health_check().await {
            warn!("STT service not reachable yet: {}", e);
        }
    }

    let translator = TranslationService::new(&cfg.translation)?;
    let relay = StreamingRelay::new(
        SessionRegistry::new(),
        Arc::new(gateway),
        RelaySettings::from(&cfg.relay),
    );

    let addr = cfg.bind_address();
    let static_dir = cfg.service.http.static_dir.clone();
    let app = create_router(AppState::new(cfg, relay, translator));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("HTTP server listening on http://{}", addr);
    info!("WebSocket relay available on ws://{}/ws", addr);
    info!("Serving frontend from {}", static_dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
