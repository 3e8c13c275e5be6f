//! Single-writer owner of the competition state.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::error::Result;
use crate::events::SessionEvent;
use crate::state::CompetitionState;
use crate::transitions::{self, SwitchOutcome};
use rostrum_scoring::FinalScore;

/// Capacity of the event fan-out channel. A receiver that falls this far
/// behind is told it lagged and must resynchronize from a fresh snapshot.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the authoritative [`CompetitionState`] and fans out change events.
///
/// All mutations serialize on the internal write lock, so no operation ever
/// observes a half-applied change. Events are pushed into a broadcast
/// channel while the lock is held; `send` only copies into the channel's
/// ring buffer, so emit order matches mutation order and a slow observer
/// can never delay the next mutation. Actual socket delivery happens in
/// each subscriber's own task.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<CompetitionState>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Create a store around the given initial state.
    pub fn new(initial: CompetitionState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(initial)),
            events,
        }
    }

    /// Read-only snapshot of the current state.
    pub async fn snapshot(&self) -> CompetitionState {
        self.state.read().await.clone()
    }

    /// Snapshot plus an event receiver, taken atomically.
    ///
    /// Holding the read lock across the subscription means no mutation can
    /// slip between the snapshot and the receiver's registration: every
    /// event after the returned snapshot reaches the receiver. An event
    /// already incorporated in the snapshot may still be delivered once
    /// more, which observers must tolerate.
    pub async fn subscribe(&self) -> (CompetitionState, broadcast::Receiver<SessionEvent>) {
        let state = self.state.read().await;
        let receiver = self.events.subscribe();
        (state.clone(), receiver)
    }

    /// The historical record: padded participant number to final score.
    pub async fn all_scores(&self) -> BTreeMap<String, String> {
        self.state.read().await.all_participant_scores.clone()
    }

    /// Store a judge's score for the current participant.
    pub async fn submit_score(&self, judge_id: u32, score: f64) -> SessionEvent {
        self.apply(|state| transitions::submit_score(state, judge_id, score))
            .await
    }

    /// Compute and record the final score for the current participant.
    ///
    /// A failed computation emits no event and leaves the state untouched.
    pub async fn compute_final(&self) -> Result<FinalScore> {
        let mut state = self.state.write().await;
        let result = transitions::compute_final(&mut state)?;
        self.emit(SessionEvent::FinalComputed {
            final_score: result.value.clone(),
            highest: result.highest,
            lowest: result.lowest,
        });
        Ok(result)
    }

    /// Clear the current participant's scores, optionally the whole session.
    pub async fn reset(&self, reset_all: bool) -> SessionEvent {
        self.apply(|state| transitions::reset(state, reset_all)).await
    }

    /// Move on to the next participant.
    pub async fn advance_participant(&self) -> SessionEvent {
        self.apply(transitions::advance_participant).await
    }

    /// Switch to an arbitrary participant number, restoring any recorded
    /// score. `None` (unparseable client input) falls back to participant 1.
    pub async fn switch_participant(&self, target: Option<u32>) -> SwitchOutcome {
        let mut state = self.state.write().await;
        let outcome = transitions::switch_participant(&mut state, target);
        self.emit(outcome.event());
        outcome
    }

    /// Change the number of judges expected to submit.
    pub async fn set_judge_count(&self, count: Option<u32>) -> SessionEvent {
        self.apply(|state| transitions::set_judge_count(state, count))
            .await
    }

    async fn apply<F>(&self, mutate: F) -> SessionEvent
    where
        F: FnOnce(&mut CompetitionState) -> SessionEvent,
    {
        let mut state = self.state.write().await;
        let event = mutate(&mut state);
        self.emit(event.clone());
        event
    }

    /// Fire-and-forget fan-out. A send error just means nobody is
    /// listening right now.
    fn emit(&self, event: SessionEvent) {
        debug!(?event, "broadcasting session event");
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DEFAULT_JUDGE_COUNT;

    fn store() -> SessionStore {
        SessionStore::new(CompetitionState::new(
            "Open topic presentation",
            DEFAULT_JUDGE_COUNT,
        ))
    }

    #[tokio::test]
    async fn mutations_reach_subscribers_in_order() {
        let store = store();
        let (snapshot, mut events) = store.subscribe().await;
        assert!(snapshot.scores.is_empty());

        store.submit_score(1, 70.0).await;
        store.submit_score(2, 80.0).await;
        store.compute_final().await.unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::ScoreSubmitted {
                judge_id: 1,
                score: 70.0
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::ScoreSubmitted {
                judge_id: 2,
                score: 80.0
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::FinalComputed {
                final_score: "75.00".to_string(),
                highest: 80.0,
                lowest: 70.0,
            }
        );
    }

    #[tokio::test]
    async fn failed_compute_emits_no_event() {
        let store = store();
        let (_, mut events) = store.subscribe().await;

        assert!(store.compute_final().await.is_err());
        store.submit_score(3, 88.0).await;

        // The first delivered event is the submission, not a compute.
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::ScoreSubmitted {
                judge_id: 3,
                score: 88.0
            }
        );
    }

    #[tokio::test]
    async fn snapshot_reflects_applied_mutations() {
        let store = store();
        store.submit_score(1, 90.0).await;
        store.submit_score(2, 95.0).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.scores.len(), 2);
        assert!(snapshot.final_score.is_none());
    }

    #[tokio::test]
    async fn subscribe_after_mutations_sees_them_in_snapshot() {
        let store = store();
        store.submit_score(1, 90.0).await;

        let (snapshot, _) = store.subscribe().await;
        assert_eq!(snapshot.scores.get(&1), Some(&90.0));
    }

    #[tokio::test]
    async fn switch_outcome_matches_history() {
        let store = store();
        store.submit_score(1, 70.0).await;
        store.submit_score(2, 80.0).await;
        store.submit_score(3, 90.0).await;
        store.compute_final().await.unwrap();
        store.advance_participant().await;

        let outcome = store.switch_participant(Some(1)).await;
        assert_eq!(outcome.final_score.as_deref(), Some("80.00"));

        let outcome = store.switch_participant(Some(9)).await;
        assert!(!outcome.has_score());
    }

    #[tokio::test]
    async fn all_scores_exposes_history() {
        let store = store();
        store.submit_score(1, 84.0).await;
        store.compute_final().await.unwrap();

        let history = store.all_scores().await;
        assert_eq!(history.get("01").map(String::as_str), Some("84.00"));
    }

    #[tokio::test]
    async fn store_clones_share_state() {
        let store = store();
        let other = store.clone();

        other.submit_score(5, 77.0).await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.scores.get(&5), Some(&77.0));
    }
}
