//! State transitions for the scoring session.
//!
//! Each operation applies exactly one mutation to the authoritative state
//! and reports what to broadcast. Callers serialize the mutations; nothing
//! here is ever visible half-applied.
//!
//! Numeric client input that fails to parse is substituted with a default
//! (participant 1, [`DEFAULT_JUDGE_COUNT`] judges) rather than rejected.
//! Operations therefore take `Option<u32>` and treat `None` and `0` as
//! "invalid": callers must not expect an error for bad input.

use crate::error::Result;
use crate::events::SessionEvent;
use crate::state::{CompetitionState, DEFAULT_JUDGE_COUNT};
use rostrum_scoring::{compute_final_score, FinalScore};

/// Store a judge's score for the current participant.
///
/// Submissions overwrite any earlier score from the same judge. No range
/// check happens here: the input screens bound scores to 0-100 and the
/// session accepts whatever the boundary forwards.
pub fn submit_score(state: &mut CompetitionState, judge_id: u32, score: f64) -> SessionEvent {
    state.scores.insert(judge_id, score);
    SessionEvent::ScoreSubmitted { judge_id, score }
}

/// Compute the final score over the submitted scores and record it.
///
/// On success the result is stored as the current participant's final score
/// and appended to the historical record under the padded participant
/// number. Fails when no scores have been submitted; the state is untouched
/// in that case.
pub fn compute_final(state: &mut CompetitionState) -> Result<FinalScore> {
    let scores: Vec<f64> = state.scores.values().copied().collect();
    let result = compute_final_score(&scores)?;

    state.final_score = Some(result.value.clone());
    state
        .all_participant_scores
        .insert(state.padded_participant(), result.value.clone());

    Ok(result)
}

/// Clear the current participant's scores, optionally the whole session.
///
/// With `reset_all` the historical record is wiped and numbering restarts
/// at participant 1. Without it, history and the participant number are
/// untouched, which makes the plain reset idempotent.
pub fn reset(state: &mut CompetitionState, reset_all: bool) -> SessionEvent {
    state.clear_current();
    if reset_all {
        state.all_participant_scores.clear();
        state.current_participant = 1;
    }

    SessionEvent::Reset {
        reset_all,
        participant_number: state.padded_participant(),
        participant_theme: state.participant_theme.clone(),
    }
}

/// Move on to the next participant.
pub fn advance_participant(state: &mut CompetitionState) -> SessionEvent {
    state.current_participant += 1;
    state.clear_current();

    SessionEvent::ParticipantAdvanced {
        participant_number: state.padded_participant(),
        participant_theme: state.participant_theme.clone(),
    }
}

/// Outcome of a participant switch.
///
/// `final_score` is the restored historical score when the target
/// participant was scored before, `None` for a fresh participant.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchOutcome {
    pub participant_number: String,
    pub participant_theme: String,
    pub final_score: Option<String>,
}

impl SwitchOutcome {
    /// Whether a historical score was restored by the switch.
    pub fn has_score(&self) -> bool {
        self.final_score.is_some()
    }

    /// The broadcast form of this outcome.
    pub fn event(&self) -> SessionEvent {
        match &self.final_score {
            Some(score) => SessionEvent::ParticipantSwitched {
                participant_number: self.participant_number.clone(),
                participant_theme: self.participant_theme.clone(),
                final_score: score.clone(),
                has_score: true,
            },
            None => SessionEvent::ParticipantReset {
                participant_number: self.participant_number.clone(),
                participant_theme: self.participant_theme.clone(),
            },
        }
    }
}

/// Switch to an arbitrary participant number.
///
/// An unparseable or non-positive target falls back to participant 1. The
/// outgoing participant's computed final score is carried into the
/// historical record before the number changes. If the target participant
/// has a recorded score it is restored for display; scores of individual
/// judges are cleared either way, and the historical record itself is never
/// touched by a switch.
pub fn switch_participant(state: &mut CompetitionState, target: Option<u32>) -> SwitchOutcome {
    let target = target.filter(|n| *n >= 1).unwrap_or(1);

    if let Some(score) = state.final_score.take() {
        state
            .all_participant_scores
            .insert(state.padded_participant(), score);
    }

    state.current_participant = target;
    state.scores.clear();

    state.final_score = state
        .all_participant_scores
        .get(&state.padded_participant())
        .cloned();

    SwitchOutcome {
        participant_number: state.padded_participant(),
        participant_theme: state.participant_theme.clone(),
        final_score: state.final_score.clone(),
    }
}

/// Change the number of judges expected to submit.
///
/// An unparseable or non-positive count falls back to
/// [`DEFAULT_JUDGE_COUNT`]. Scores already submitted by judges whose id
/// exceeds the new count are purged immediately; everyone else's stand.
/// The 3-9 operating range is a client-side rule, not enforced here.
pub fn set_judge_count(state: &mut CompetitionState, count: Option<u32>) -> SessionEvent {
    state.judge_count = count.filter(|n| *n >= 1).unwrap_or(DEFAULT_JUDGE_COUNT);

    let cutoff = state.judge_count;
    state.scores.retain(|judge_id, _| *judge_id <= cutoff);

    SessionEvent::JudgeCountChanged {
        judge_count: state.judge_count,
    }
}
