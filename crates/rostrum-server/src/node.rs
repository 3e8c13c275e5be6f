//! Rostrum node - the service entry point.
//!
//! Architecture:
//! - Single process owning one [`SessionStore`]
//! - HTTP API for the session operations
//! - WebSocket fan-out to every connected screen
//!
//! State lives in memory only; a restart starts a fresh session.

use crate::api;
use rostrum_engine::{CompetitionState, SessionStore, DEFAULT_JUDGE_COUNT};
use std::net::SocketAddr;

/// Configuration for a Rostrum node.
#[derive(Debug, Clone)]
pub struct RostrumConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Theme label shown on every screen for the whole session
    pub theme: String,

    /// Number of judges expected at startup
    pub judge_count: u32,
}

impl Default for RostrumConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl RostrumConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let api_addr = std::env::var("ROSTRUM_API_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:2999".to_string())
            .parse()
            .expect("Invalid ROSTRUM_API_ADDR");

        let theme = std::env::var("ROSTRUM_THEME")
            .unwrap_or_else(|_| "Open topic presentation".to_string());

        let judge_count = std::env::var("ROSTRUM_JUDGE_COUNT")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_JUDGE_COUNT);

        Self {
            api_addr,
            theme,
            judge_count,
        }
    }
}

/// A Rostrum node instance.
pub struct RostrumNode {
    store: SessionStore,
    config: RostrumConfig,
}

impl RostrumNode {
    /// Create a new node with a fresh session.
    pub fn new(config: RostrumConfig) -> Self {
        let store = SessionStore::new(CompetitionState::new(
            config.theme.clone(),
            config.judge_count,
        ));
        Self { store, config }
    }

    /// Get the shared store (for API handlers and tests).
    pub fn store(&self) -> SessionStore {
        self.store.clone()
    }

    /// Run the node (starts the HTTP server).
    pub async fn run(self) -> std::io::Result<()> {
        tracing::info!("Rostrum node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!("  Theme: {}", self.config.theme);
        tracing::info!("  Judges: {}", self.config.judge_count);

        let app = api::build_router(self.store);

        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);

        axum::serve(listener, app).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn node_seeds_session_from_config() {
        let config = RostrumConfig {
            api_addr: "127.0.0.1:0".parse().unwrap(),
            theme: "Impromptu round".to_string(),
            judge_count: 5,
        };
        let node = RostrumNode::new(config);
        let store = node.store();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.participant_theme, "Impromptu round");
        assert_eq!(snapshot.judge_count, 5);
        assert_eq!(snapshot.current_participant, 1);
    }
}
