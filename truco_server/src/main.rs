//! Truco game server.
//!
//! Serves the in-memory game store over HTTP and pushes change events over
//! WebSocket.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use log::info;
use pico_args::Arguments;
use truco::SpanishDeck;
use truco_server::{
    api::{self, AppState},
    config::{DEFAULT_BIND, ServerConfig},
    logging,
};

fn help() -> String {
    format!(
        "\
Run a Truco game server

USAGE:
  truco_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or {DEFAULT_BIND}]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  NOTIFY_CHANNEL_CAPACITY  Buffered change events per WebSocket client [default: 64]
  SEED_GAMES               Games to create on startup [default: 0]
  RUST_LOG                 Log filter [default: info]
"
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{}", help());
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override)?;
    config.validate()?;

    info!("Starting Truco server at {}", config.bind);

    let state = AppState::new(Arc::new(SpanishDeck), config.notify_channel_capacity);

    for i in 0..config.seed_games {
        let game = state.store.create_game(&format!("Game {}", i + 1)).await?;
        info!("Created game '{}' with ID {}", game.name, game.id);
    }

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
