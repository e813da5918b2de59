//! The persisted progress aggregate and its history records.
//!
//! Field names serialize in camelCase so the stored blob keeps the layout
//! `{currentWordIndex, lastLoginDate, history, streak}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::word::{Catalog, WordItem};

/// Sentences shorter than this (after trimming) are not worth grading.
pub const MIN_SENTENCE_CHARS: usize = 5;

// ─── History ─────────────────────────────────────────────────────────────────

/// One completed attempt at a word. History holds at most one per `word_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
  /// Calendar day of the completion, stored as `YYYY-MM-DD`.
  pub date:          NaiveDate,
  pub word_id:       u32,
  pub completed:     bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_sentence: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ai_feedback:   Option<String>,
  #[serde(default)]
  pub is_correct:    bool,
}

/// Payload of a completion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
  pub word_id:    u32,
  pub sentence:   String,
  pub feedback:   String,
  pub is_correct: bool,
}

impl Completion {
  /// Turn the payload into a history record dated `date`.
  pub fn into_record(self, date: NaiveDate) -> DayRecord {
    DayRecord {
      date,
      word_id:       self.word_id,
      completed:     true,
      user_sentence: Some(self.sentence),
      ai_feedback:   Some(self.feedback),
      is_correct:    self.is_correct,
    }
  }
}

// ─── UserState ───────────────────────────────────────────────────────────────

/// The whole of a learner's progress. Read and written as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserState {
  /// Position in the catalog. May run past the end; see
  /// [`Catalog::is_exhausted`].
  pub current_word_index: usize,
  pub last_login_date:    Option<NaiveDate>,
  pub history:            Vec<DayRecord>,
  pub streak:             u32,
}

impl UserState {
  pub fn record_for(&self, word_id: u32) -> Option<&DayRecord> {
    self.history.iter().find(|record| record.word_id == word_id)
  }

  /// Whether the learner has a correct completion on file for `word_id`.
  pub fn is_mastered(&self, word_id: u32) -> bool {
    self.record_for(word_id).is_some_and(|record| record.is_correct)
  }

  /// The word under the cursor, or `None` once the catalog is exhausted.
  pub fn current_word<'c>(&self, catalog: &'c Catalog) -> Option<&'c WordItem> {
    catalog.get(self.current_word_index)
  }

  /// An earlier attempt at the current word that carries both the sentence
  /// and the feedback, so a session can resume showing it.
  pub fn resumable_record(&self, catalog: &Catalog) -> Option<&DayRecord> {
    let word = self.current_word(catalog)?;
    self
      .record_for(word.id)
      .filter(|record| record.user_sentence.is_some() && record.ai_feedback.is_some())
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Read model for a progress bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
  /// One-based position of the current word.
  pub current:    usize,
  pub total:      usize,
  /// `current / total` as a percentage, capped at 100.
  pub percentage: f64,
  pub streak:     u32,
  /// Every word in the catalog has been passed.
  pub finished:   bool,
}

impl ProgressSummary {
  pub fn new(state: &UserState, catalog: &Catalog) -> Self {
    let current = state.current_word_index.saturating_add(1);
    let total = catalog.len();
    let percentage = if total == 0 {
      100.0
    } else {
      (current as f64 / total as f64 * 100.0).min(100.0)
    };

    Self {
      current,
      total,
      percentage,
      streak: state.streak,
      finished: catalog.is_exhausted(state.current_word_index),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, d).unwrap() }

  fn catalog() -> Catalog {
    Catalog::new(vec![
      WordItem::new(1, "Abhor", "hate"),
      WordItem::new(2, "Bigot", "narrow-minded, prejudiced person"),
      WordItem::new(3, "Counterfeit", "fake; false"),
      WordItem::new(4, "Enfranchise", "give voting rights"),
    ])
    .unwrap()
  }

  #[test]
  fn default_state_serializes_to_the_stored_layout() {
    let value = serde_json::to_value(UserState::default()).unwrap();
    assert_eq!(
      value,
      json!({
        "currentWordIndex": 0,
        "lastLoginDate": null,
        "history": [],
        "streak": 0,
      })
    );
  }

  #[test]
  fn parses_records_with_missing_optional_fields() {
    let state: UserState = serde_json::from_value(json!({
      "currentWordIndex": 2,
      "lastLoginDate": "2024-03-05",
      "history": [{ "date": "2024-03-05", "wordId": 1, "completed": true }],
      "streak": 1,
    }))
    .unwrap();

    assert_eq!(state.last_login_date, Some(day(5)));
    let record = state.record_for(1).unwrap();
    assert!(record.user_sentence.is_none());
    assert!(!record.is_correct);
  }

  #[test]
  fn completion_becomes_a_completed_record() {
    let record = Completion {
      word_id:    1,
      sentence:   "The cat is abhorrent.".into(),
      feedback:   "Good usage.".into(),
      is_correct: true,
    }
    .into_record(day(4));

    assert_eq!(
      serde_json::to_value(&record).unwrap(),
      json!({
        "date": "2024-03-04",
        "wordId": 1,
        "completed": true,
        "userSentence": "The cat is abhorrent.",
        "aiFeedback": "Good usage.",
        "isCorrect": true,
      })
    );
  }

  #[test]
  fn mastery_requires_a_correct_record() {
    let mut state = UserState::default();
    state.history.push(DayRecord {
      date:          day(1),
      word_id:       1,
      completed:     true,
      user_sentence: Some("I abhor".into()),
      ai_feedback:   Some("Too short".into()),
      is_correct:    false,
    });
    assert!(!state.is_mastered(1));
    assert!(!state.is_mastered(2));

    state.history[0].is_correct = true;
    assert!(state.is_mastered(1));
  }

  #[test]
  fn resumable_record_needs_sentence_and_feedback() {
    let catalog = catalog();
    let mut state = UserState::default();
    state.history.push(DayRecord {
      date:          day(1),
      word_id:       1,
      completed:     true,
      user_sentence: Some("I abhor cruelty.".into()),
      ai_feedback:   None,
      is_correct:    true,
    });
    assert!(state.resumable_record(&catalog).is_none());

    state.history[0].ai_feedback = Some("Correct.".into());
    assert_eq!(state.resumable_record(&catalog).unwrap().word_id, 1);

    state.current_word_index = 1;
    assert!(state.resumable_record(&catalog).is_none());
  }

  #[test]
  fn summary_reports_one_based_position() {
    let catalog = catalog();
    let state = UserState { current_word_index: 1, streak: 3, ..UserState::default() };

    let summary = ProgressSummary::new(&state, &catalog);
    assert_eq!(summary.current, 2);
    assert_eq!(summary.total, 4);
    assert!((summary.percentage - 50.0).abs() < f64::EPSILON);
    assert_eq!(summary.streak, 3);
    assert!(!summary.finished);
  }

  #[test]
  fn summary_caps_percentage_past_the_end() {
    let catalog = catalog();
    let state = UserState { current_word_index: 4, ..UserState::default() };

    let summary = ProgressSummary::new(&state, &catalog);
    assert!(summary.finished);
    assert!((summary.percentage - 100.0).abs() < f64::EPSILON);
    assert!(state.current_word(&catalog).is_none());
  }

  #[test]
  fn summary_for_the_largest_stored_index_is_finished() {
    let catalog = catalog();
    let state: UserState = serde_json::from_value(json!({
      "currentWordIndex": usize::MAX,
      "lastLoginDate": null,
      "history": [],
      "streak": 0,
    }))
    .unwrap();

    let summary = ProgressSummary::new(&state, &catalog);
    assert_eq!(summary.current, usize::MAX);
    assert!(summary.finished);
    assert!((summary.percentage - 100.0).abs() < f64::EPSILON);
  }
}
