//! Handlers for content endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/words/:id/context` | Examples, synonyms, etymology |
//! | `POST` | `/evaluations` | Body: [`EvaluateBody`]; grades, records if correct |
//!
//! Both answer 200 even when the provider failed; `fallback: true` marks a
//! placeholder payload.

use axum::{
  Json,
  extract::{Path, State},
};
use lexicon_content::{ContentProvider, Evaluation, WordContext};
use lexicon_core::{
  progress::{Completion, MIN_SENTENCE_CHARS, UserState},
  store::ProgressStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── Context ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ContextResponse {
  #[serde(flatten)]
  pub context:  WordContext,
  pub fallback: bool,
}

/// `GET /words/:id/context`
pub async fn context<S, P>(
  State(app): State<AppState<S, P>>,
  Path(id): Path<u32>,
) -> Result<Json<ContextResponse>, ApiError>
where
  S: ProgressStore,
  P: ContentProvider,
{
  let word = app
    .catalog
    .find(id)
    .ok_or_else(|| ApiError::NotFound(format!("word {id} not found")))?;

  let outcome = app.content.fetch_context(&word.word, &word.definition).await;
  let fallback = outcome.is_fallback();
  Ok(Json(ContextResponse { context: outcome.into_inner(), fallback }))
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateBody {
  pub word_id:  u32,
  pub sentence: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
  pub evaluation: Evaluation,
  pub fallback:   bool,
  /// Progress after the attempt; only a correct answer changes it.
  pub state:      UserState,
}

/// `POST /evaluations`
pub async fn evaluate<S, P>(
  State(app): State<AppState<S, P>>,
  Json(body): Json<EvaluateBody>,
) -> Result<Json<EvaluationResponse>, ApiError>
where
  S: ProgressStore,
  P: ContentProvider,
{
  let word = app
    .catalog
    .find(body.word_id)
    .ok_or_else(|| ApiError::NotFound(format!("word {} not found", body.word_id)))?;

  let sentence = body.sentence.trim();
  if sentence.chars().count() < MIN_SENTENCE_CHARS {
    return Err(ApiError::BadRequest(format!(
      "sentence must be at least {MIN_SENTENCE_CHARS} characters"
    )));
  }

  let outcome = app
    .content
    .evaluate_sentence(&word.word, &word.definition, sentence)
    .await;
  let fallback = outcome.is_fallback();
  let evaluation = outcome.into_inner();

  let state = if evaluation.is_correct {
    app
      .tracker
      .record_completion(Completion {
        word_id:    word.id,
        sentence:   sentence.to_owned(),
        feedback:   evaluation.feedback.clone(),
        is_correct: true,
      })
      .await
  } else {
    app.tracker.load().await
  };

  Ok(Json(EvaluationResponse { evaluation, fallback, state }))
}
