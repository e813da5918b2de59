//! Response payloads and their fixed fallbacks.

use serde::{Deserialize, Serialize};

/// Enrichment shown alongside a word: three examples, three synonyms and an
/// origin fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordContext {
  pub examples:  Vec<String>,
  pub synonyms:  Vec<String>,
  pub etymology: String,
}

impl WordContext {
  pub fn fallback() -> Self {
    Self {
      examples:  vec!["Loading examples failed.".to_owned()],
      synonyms:  vec!["N/A".to_owned()],
      etymology: "Origin unavailable.".to_owned(),
    }
  }
}

/// The grade for a learner's sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
  pub is_correct:      bool,
  pub feedback:        String,
  /// An improved or alternative sentence; empty when none was offered.
  #[serde(default)]
  pub better_sentence: String,
}

impl Evaluation {
  pub fn fallback() -> Self {
    Self {
      is_correct:      false,
      feedback:        "There was an error connecting to the AI tutor. Please try again."
        .to_owned(),
      better_sentence: String::new(),
    }
  }
}
