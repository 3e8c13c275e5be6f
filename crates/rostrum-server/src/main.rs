//! Rostrum node binary
//!
//! Serves the live scoring session over HTTP and WebSocket.

use rostrum_server::{RostrumConfig, RostrumNode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "rostrum_node=info,rostrum_server=info,rostrum_engine=info".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rostrum Node");

    let config = RostrumConfig::from_env();

    let node = RostrumNode::new(config);
    node.run().await
}
