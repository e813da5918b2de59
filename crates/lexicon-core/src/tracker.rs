//! [`ProgressTracker`] — runs state transitions against a [`ProgressStore`].
//!
//! Every event does a fresh load, applies the pure transition, then saves the
//! whole aggregate. Storage failures never reach the caller: a bad read
//! yields the default state and a failed write leaves the returned state as
//! the in-memory truth.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
  clock::{Clock, SystemClock},
  progress::{Completion, UserState},
  store::ProgressStore,
  transition,
};

pub struct ProgressTracker<S> {
  store: S,
  clock: Arc<dyn Clock>,
}

impl<S: ProgressStore> ProgressTracker<S> {
  /// A tracker dating events by the system clock.
  pub fn new(store: S) -> Self { Self::with_clock(store, Arc::new(SystemClock)) }

  pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self { Self { store, clock } }

  pub fn store(&self) -> &S { &self.store }

  pub fn today(&self) -> NaiveDate { self.clock.today() }

  /// Read the persisted state, falling back to the default on any failure.
  pub async fn load(&self) -> UserState {
    let blob = match self.store.read().await {
      Ok(Some(blob)) => blob,
      Ok(None) => return UserState::default(),
      Err(e) => {
        warn!(error = %e, "failed to read progress state; starting fresh");
        return UserState::default();
      }
    };

    match serde_json::from_str(&blob) {
      Ok(state) => state,
      Err(e) => {
        warn!(error = %e, "discarding malformed progress state");
        UserState::default()
      }
    }
  }

  /// Persist `state`. Failures are logged and swallowed.
  pub async fn save(&self, state: &UserState) {
    let blob = match serde_json::to_string(state) {
      Ok(blob) => blob,
      Err(e) => {
        warn!(error = %e, "failed to serialize progress state");
        return;
      }
    };

    if let Err(e) = self.store.write(blob).await {
      warn!(error = %e, "failed to save progress state");
    }
  }

  /// Record a finished attempt at a word and return the new state.
  pub async fn record_completion(&self, completion: Completion) -> UserState {
    let state = self.load().await;
    let today = self.today();
    let word_id = completion.word_id;
    let is_correct = completion.is_correct;

    let next = transition::record_completion(state, today, completion);
    debug!(word_id, is_correct, streak = next.streak, %today, "recorded completion");

    self.save(&next).await;
    next
  }

  /// Move on to the next word and return the new state.
  ///
  /// Not gated on the current word being mastered; callers decide that.
  pub async fn advance_word(&self) -> UserState {
    let state = self.load().await;
    let next = transition::advance_word(state);
    debug!(index = next.current_word_index, "advanced word");

    self.save(&next).await;
    next
  }
}
