//! Rostrum Server - HTTP and WebSocket boundary for a live scoring session.
//!
//! Maps inbound requests onto the engine's operations and streams every
//! resulting state change to all connected screens.
//!
//! # Architecture
//!
//! - **API**: HTTP routes for session operations (scores, resets,
//!   participant control, judge panel size)
//! - **WS**: one WebSocket per screen; snapshot on connect, then events
//! - **Node**: configuration and the serve loop
//!
//! # Example
//!
//! ```no_run
//! use rostrum_server::{RostrumConfig, RostrumNode};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let node = RostrumNode::new(RostrumConfig::default());
//!     node.run().await
//! }
//! ```

pub mod api;
pub mod node;
pub mod ws;

pub use api::build_router;
pub use node::{RostrumConfig, RostrumNode};
