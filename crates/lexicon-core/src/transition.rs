//! Pure state transitions.
//!
//! Every function here is total: it takes the previous [`UserState`] plus an
//! event payload and returns the next state. Persistence is the tracker's
//! job.

use chrono::NaiveDate;

use crate::progress::{Completion, UserState};

/// Apply a completion event on `today`.
///
/// The record replaces any earlier one for the same word. The streak grows
/// by one only for a correct completion on a day that differs from the
/// `last_login_date` held *before* this event; it never shrinks. The login
/// date moves to `today` whatever the outcome.
pub fn record_completion(
  mut state: UserState,
  today: NaiveDate,
  completion: Completion,
) -> UserState {
  let logged_today = state.last_login_date == Some(today);
  let earns_streak = completion.is_correct && !logged_today;

  let word_id = completion.word_id;
  state.history.retain(|record| record.word_id != word_id);
  state.history.push(completion.into_record(today));

  if earns_streak {
    state.streak = state.streak.saturating_add(1);
  }
  state.last_login_date = Some(today);
  state
}

/// Move the cursor forward one word. No bounds check: a cursor past the end
/// of the catalog means every word has been mastered.
pub fn advance_word(mut state: UserState) -> UserState {
  state.current_word_index = state.current_word_index.saturating_add(1);
  state
}
