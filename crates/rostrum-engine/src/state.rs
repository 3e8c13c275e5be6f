//! Authoritative competition state.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Number of judges expected when nothing else is configured.
pub const DEFAULT_JUDGE_COUNT: u32 = 6;

/// The shared state of a live scoring session.
///
/// A single instance exists per running node, owned by the
/// [`SessionStore`](crate::SessionStore). The struct serializes directly as
/// the full-state snapshot sent to newly connected observers, so its wire
/// form is part of the client contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionState {
    /// Number of the participant currently presenting (1-based).
    pub current_participant: u32,

    /// Descriptive label for the presentation round. Fixed for the lifetime
    /// of the session but carried in every participant event so clients
    /// never need a second lookup.
    pub participant_theme: String,

    /// Scores submitted for the current participant, keyed by judge id.
    /// Only judges who have submitted for this participant appear here.
    pub scores: BTreeMap<u32, f64>,

    /// Final score of the current participant as a two-decimal string once
    /// computed. Serialized as the number `0` while uncomputed, which is
    /// what clients render before the first calculation.
    #[serde(
        serialize_with = "ser_final_score",
        deserialize_with = "de_final_score",
        default
    )]
    pub final_score: Option<String>,

    /// Number of judges expected to submit for each participant.
    pub judge_count: u32,

    /// Final scores of participants already scored, keyed by zero-padded
    /// participant number. Survives resets unless explicitly cleared.
    pub all_participant_scores: BTreeMap<String, String>,
}

impl CompetitionState {
    /// Create the state for a fresh session starting at participant 1.
    pub fn new(theme: impl Into<String>, judge_count: u32) -> Self {
        Self {
            current_participant: 1,
            participant_theme: theme.into(),
            scores: BTreeMap::new(),
            final_score: None,
            judge_count,
            all_participant_scores: BTreeMap::new(),
        }
    }

    /// The current participant number in its zero-padded display form.
    pub fn padded_participant(&self) -> String {
        pad_participant(self.current_participant)
    }

    /// Clear everything belonging to the current participant.
    pub fn clear_current(&mut self) {
        self.scores.clear();
        self.final_score = None;
    }
}

/// Zero-padded two-digit display form of a participant number.
pub fn pad_participant(number: u32) -> String {
    format!("{number:02}")
}

fn ser_final_score<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(score) => serializer.serialize_str(score),
        None => serializer.serialize_u32(0),
    }
}

fn de_final_score<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(score) => Ok(Some(score)),
        Raw::Number(_) => Ok(None),
    }
}
