//! Civics Word Quest · Backend
//!
//! - Axum HTTP API for quizzes ("word sets") and finished games ("game states")
//! - WebSocket game sessions driving the grouping/scoring rules server-side
//! - Static SPA fallback (<static_dir>/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000, wins over the config file)
//!   QUEST_CONFIG_PATH : path to TOML config (server settings + optional quiz bank)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"
//!
//! All state lives in memory and is gone after a restart.

mod telemetry;
mod error;
mod domain;
mod config;
mod seeds;
mod logic;
mod session;
mod state;
mod protocol;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::load_quest_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_quest_config_from_env().unwrap_or_default();

  // Build shared application state (store seeded with the quiz catalog).
  let state = Arc::new(AppState::new(&cfg).await);

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  let port = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(cfg.server.port);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "word_quest", %addr, static_dir = %state.static_dir, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "word_quest", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "word_quest", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
}
