//! Command logic shared by the one-shot subcommands and the study loop.

use std::{fs, path::Path};

use anyhow::{Context as _, bail};
use lexicon_api::AppState;
use lexicon_content::{ContentProvider, ContentService, Evaluation, GeminiProvider, Outcome};
use lexicon_core::{
  ingest,
  progress::{Completion, MIN_SENTENCE_CHARS, UserState},
  store::ProgressStore,
  tracker::ProgressTracker,
  word::{Catalog, WordItem},
};
use lexicon_store_sqlite::SqliteStore;
use tracing::info;

use crate::settings::Settings;

/// Open the configured store, catalog and provider.
pub async fn open(settings: &Settings) -> anyhow::Result<AppState<SqliteStore, GeminiProvider>> {
  if let Some(parent) = settings.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  let catalog = Catalog::load(&settings.catalog_path)
    .with_context(|| format!("failed to load catalog {:?}", settings.catalog_path))?;
  let provider =
    GeminiProvider::new(settings.gemini.clone()).context("failed to build Gemini client")?;

  Ok(AppState::new(
    ProgressTracker::new(store),
    catalog,
    ContentService::new(provider),
  ))
}

// ─── Attempts ────────────────────────────────────────────────────────────────

/// The graded result of one sentence.
#[derive(Debug)]
pub struct Attempt {
  pub word:    WordItem,
  pub outcome: Outcome<Evaluation>,
  pub state:   UserState,
}

/// Grade `sentence` against the current word. A correct answer is recorded;
/// anything else leaves progress untouched.
pub async fn submit<S, P>(app: &AppState<S, P>, sentence: &str) -> anyhow::Result<Attempt>
where
  S: ProgressStore,
  P: ContentProvider,
{
  let sentence = sentence.trim();
  if sentence.chars().count() < MIN_SENTENCE_CHARS {
    bail!("sentence must be at least {MIN_SENTENCE_CHARS} characters");
  }

  let state = app.tracker.load().await;
  let Some(word) = state.current_word(&app.catalog).cloned() else {
    bail!("every word has been completed");
  };

  let outcome = app
    .content
    .evaluate_sentence(&word.word, &word.definition, sentence)
    .await;

  let state = if outcome.value().is_correct {
    app
      .tracker
      .record_completion(Completion {
        word_id:    word.id,
        sentence:   sentence.to_owned(),
        feedback:   outcome.value().feedback.clone(),
        is_correct: true,
      })
      .await
  } else {
    state
  };

  Ok(Attempt { word, outcome, state })
}

// ─── Advancing ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum NextOutcome {
  /// Moved on; carries the new state.
  Advanced(UserState),
  /// The current word has no correct answer on file yet.
  NotMastered(WordItem),
  /// The cursor is already past the last word.
  Finished,
}

/// Move to the next word. Unless `force` is set, the current word must have
/// been answered correctly first.
pub async fn next<S, P>(app: &AppState<S, P>, force: bool) -> NextOutcome
where
  S: ProgressStore,
  P: ContentProvider,
{
  let state = app.tracker.load().await;
  let Some(word) = state.current_word(&app.catalog) else {
    return NextOutcome::Finished;
  };

  if !force && !state.is_mastered(word.id) {
    return NextOutcome::NotMastered(word.clone());
  }
  NextOutcome::Advanced(app.tracker.advance_word().await)
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ImportReport {
  pub added: Vec<WordItem>,
  pub total: usize,
}

/// Merge the numbered word list at `text_path` into the catalog file at
/// `catalog_path`, creating it if absent. Nothing is written on `dry_run`.
pub fn import_word_list(
  catalog_path: &Path,
  text_path: &Path,
  dry_run: bool,
) -> anyhow::Result<ImportReport> {
  let catalog = if catalog_path.exists() {
    Catalog::load(catalog_path)
      .with_context(|| format!("failed to load catalog {catalog_path:?}"))?
  } else {
    Catalog::default()
  };

  let text = fs::read_to_string(text_path)
    .with_context(|| format!("failed to read word list {text_path:?}"))?;
  let listed = ingest::parse_word_list(&text);
  let added = ingest::new_entries(&catalog, listed);

  let catalog = catalog.extend(added.clone()).context("failed to merge word list")?;
  let total = catalog.len();

  if dry_run {
    info!(added = added.len(), total, "dry run; catalog left unchanged");
  } else {
    catalog
      .save(catalog_path)
      .with_context(|| format!("failed to write catalog {catalog_path:?}"))?;
    info!(added = added.len(), total, path = ?catalog_path, "catalog updated");
  }

  Ok(ImportReport { added, total })
}

#[cfg(test)]
mod tests {
  use std::{future::Future, sync::Arc};

  use chrono::NaiveDate;
  use lexicon_content::GenerationRequest;
  use lexicon_core::{clock::FixedClock, store::MemoryStore};

  use super::*;

  /// Grades every sentence with a fixed verdict; `None` is an outage.
  struct Grader {
    verdict: Option<bool>,
  }

  impl ContentProvider for Grader {
    type Error = std::io::Error;

    fn generate<'a>(
      &'a self,
      request: &'a GenerationRequest,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a {
      let reply = match self.verdict {
        None => Err(std::io::Error::other("offline")),
        Some(_) if !request.prompt.contains("User's Sentence") => Ok(Some(
          r#"{"examples":["e1"],"synonyms":["s1"],"etymology":"Latin."}"#.to_owned(),
        )),
        Some(true) => Ok(Some(
          r#"{"isCorrect":true,"feedback":"Good usage.","betterSentence":""}"#.to_owned(),
        )),
        Some(false) => Ok(Some(
          r#"{"isCorrect":false,"feedback":"Not quite.","betterSentence":"I abhor lies."}"#
            .to_owned(),
        )),
      };
      async move { reply }
    }
  }

  fn app(verdict: Option<bool>) -> AppState<MemoryStore, Grader> {
    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    AppState::new(
      ProgressTracker::with_clock(MemoryStore::new(), Arc::new(clock)),
      Catalog::new(vec![
        WordItem::new(1, "Abhor", "hate"),
        WordItem::new(2, "Bigot", "narrow-minded, prejudiced person"),
      ])
      .unwrap(),
      ContentService::new(Grader { verdict }),
    )
  }

  #[tokio::test]
  async fn correct_submission_is_recorded() {
    let app = app(Some(true));
    let attempt = submit(&app, "  I abhor cold coffee. ").await.unwrap();

    assert_eq!(attempt.word.id, 1);
    assert!(!attempt.outcome.is_fallback());
    assert_eq!(attempt.state.streak, 1);
    assert_eq!(
      attempt.state.record_for(1).unwrap().user_sentence.as_deref(),
      Some("I abhor cold coffee.")
    );
  }

  #[tokio::test]
  async fn wrong_or_failed_submission_is_not_recorded() {
    for verdict in [Some(false), None] {
      let app = app(verdict);
      let attempt = submit(&app, "Abhor is a colour.").await.unwrap();
      assert!(!attempt.outcome.value().is_correct);
      assert_eq!(attempt.outcome.is_fallback(), verdict.is_none());
      assert!(app.tracker.load().await.history.is_empty());
    }
  }

  #[tokio::test]
  async fn short_submission_is_refused() {
    let err = submit(&app(Some(true)), " abc ").await.unwrap_err();
    assert!(err.to_string().contains("at least 5"));
  }

  #[tokio::test]
  async fn next_requires_mastery_unless_forced() {
    let app = app(Some(true));

    match next(&app, false).await {
      NextOutcome::NotMastered(word) => assert_eq!(word.id, 1),
      other => panic!("expected NotMastered, got {other:?}"),
    }

    submit(&app, "I abhor cold coffee.").await.unwrap();
    let NextOutcome::Advanced(state) = next(&app, false).await else {
      panic!("expected to advance");
    };
    assert_eq!(state.current_word_index, 1);

    let NextOutcome::Advanced(state) = next(&app, true).await else {
      panic!("expected forced advance");
    };
    assert_eq!(state.current_word_index, 2);
    assert!(matches!(next(&app, true).await, NextOutcome::Finished));

    let err = submit(&app, "I am finished now.").await.unwrap_err();
    assert!(err.to_string().contains("every word"));
  }

  #[test]
  fn import_creates_and_extends_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    let list_path = dir.path().join("list.txt");

    fs::write(&list_path, "1. Abhor, hate\n2. Bigot, narrow-minded,\n   prejudiced person\n")
      .unwrap();
    let report = import_word_list(&catalog_path, &list_path, false).unwrap();
    assert_eq!(report.added.len(), 2);
    assert_eq!(report.total, 2);

    fs::write(&list_path, "1. abhor, to loathe\n2. Enfranchise, give voting rights\n").unwrap();
    let report = import_word_list(&catalog_path, &list_path, false).unwrap();
    assert_eq!(report.added, vec![WordItem::new(3, "Enfranchise", "give voting rights")]);

    let catalog = Catalog::load(&catalog_path).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.find(2).unwrap().definition, "narrow-minded, prejudiced person");
  }

  #[test]
  fn dry_run_import_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    let list_path = dir.path().join("list.txt");
    fs::write(&list_path, "1. Abhor, hate\n").unwrap();

    let report = import_word_list(&catalog_path, &list_path, true).unwrap();
    assert_eq!(report.added.len(), 1);
    assert!(!catalog_path.exists());
  }
}
