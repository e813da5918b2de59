//! Plain-text rendering for the terminal.

use std::fmt::Write as _;

use lexicon_content::{Evaluation, Outcome, WordContext};
use lexicon_core::{
  progress::{DayRecord, ProgressSummary},
  word::WordItem,
};

const BAR_WIDTH: usize = 24;

pub fn progress(summary: &ProgressSummary) -> String {
  let filled = ((summary.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
  let filled = filled.min(BAR_WIDTH);
  format!(
    "Progress {} / {}  [{}{}] {:.1}%   Streak: {}",
    summary.current.min(summary.total),
    summary.total,
    "#".repeat(filled),
    "-".repeat(BAR_WIDTH - filled),
    summary.percentage,
    summary.streak,
  )
}

pub fn word_card(word: &WordItem) -> String {
  format!("WORD #{}\n\n  {}\n  \"{}\"\n", word.id, word.word, word.definition)
}

pub fn context(outcome: &Outcome<WordContext>) -> String {
  let context = outcome.value();
  let mut out = String::new();

  let _ = writeln!(out, "Synonyms: {}", context.synonyms.join(", "));
  let _ = writeln!(out, "Examples:");
  for example in &context.examples {
    let _ = writeln!(out, "  | {example}");
  }
  let _ = writeln!(out, "Origin: {}", context.etymology);
  if outcome.is_fallback() {
    let _ = writeln!(out, "(word details are unavailable right now)");
  }
  out
}

pub fn evaluation(outcome: &Outcome<Evaluation>) -> String {
  let evaluation = outcome.value();
  let mut out = String::new();

  let verdict = if evaluation.is_correct { "✓ Correct" } else { "✗ Try Again" };
  let _ = writeln!(out, "{verdict}");
  let _ = writeln!(out, "{}", evaluation.feedback);

  if !evaluation.is_correct && !evaluation.better_sentence.is_empty() {
    let _ = writeln!(out, "Suggestion: {}", evaluation.better_sentence);
  }
  if evaluation.is_correct {
    let _ = writeln!(out, "Great job! You've mastered this word.");
  }
  out
}

/// An earlier attempt shown when resuming on an already-answered word.
pub fn previous_attempt(record: &DayRecord) -> String {
  let verdict = if record.is_correct { "✓ Correct" } else { "✗ Try Again" };
  format!(
    "Your answer ({}): {}\n{verdict}\n{}\n",
    record.date,
    record.user_sentence.as_deref().unwrap_or_default(),
    record.ai_feedback.as_deref().unwrap_or_default(),
  )
}

pub fn finished(total: usize) -> String {
  format!("Congratulations!\nYou have mastered all {total} words.\n")
}
