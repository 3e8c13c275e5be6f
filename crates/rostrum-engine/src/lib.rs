//! Rostrum Engine - authoritative state for a live scoring session.
//!
//! Several judges score the participant currently presenting; a trimmed
//! mean produces the final score; every connected screen (public display,
//! scoreboard, judge inputs) observes the same state in real time.
//!
//! # Architecture
//!
//! - **State**: [`CompetitionState`], the single source of truth
//! - **Transitions**: pure mutation functions, one per session operation
//! - **Store**: [`SessionStore`], the single-writer owner that serializes
//!   mutations and fans out [`SessionEvent`]s to subscribers
//!
//! The store holds state in process memory only. A restart starts a fresh
//! session; durability is deliberately out of scope.

pub mod error;
pub mod events;
pub mod state;
pub mod store;
pub mod transitions;

pub use error::{Error, Result};
pub use events::SessionEvent;
pub use state::{pad_participant, CompetitionState, DEFAULT_JUDGE_COUNT};
pub use store::SessionStore;
pub use transitions::SwitchOutcome;

pub use rostrum_scoring::{FinalScore, ScoringError};
