//! Broadcast events pushed to connected observers.

use crate::state::CompetitionState;
use serde::{Deserialize, Serialize};

/// State-change notifications fanned out to every connected client.
///
/// Exactly one event is produced per successful mutation, in the order the
/// mutations were applied; a failed operation produces none. A newly
/// connected observer always receives [`SessionEvent::InitialState`] before
/// any other event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Full snapshot for a newly connected (or resynchronizing) observer.
    InitialState { state: CompetitionState },

    /// A judge submitted (or revised) a score for the current participant.
    ScoreSubmitted { judge_id: u32, score: f64 },

    /// The final score of the current participant was computed.
    FinalComputed {
        final_score: String,
        highest: f64,
        lowest: f64,
    },

    /// Scores for the current participant were cleared. When `reset_all` is
    /// set, the historical record was wiped and numbering restarted at 1.
    Reset {
        reset_all: bool,
        participant_number: String,
        participant_theme: String,
    },

    /// The session moved on to the next participant.
    ParticipantAdvanced {
        participant_number: String,
        participant_theme: String,
    },

    /// The session switched to a participant with a recorded final score,
    /// which is now showing again.
    ParticipantSwitched {
        participant_number: String,
        participant_theme: String,
        final_score: String,
        has_score: bool,
    },

    /// The session switched to a participant with no recorded score.
    ParticipantReset {
        participant_number: String,
        participant_theme: String,
    },

    /// The expected number of judges changed.
    JudgeCountChanged { judge_count: u32 },
}
