//! Handlers for progress endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/state` | The persisted [`UserState`] |
//! | `GET`  | `/progress` | [`ProgressSummary`] for a progress bar |
//! | `GET`  | `/word` | Current word plus any earlier attempt at it |
//! | `POST` | `/completions` | Body: [`Completion`]; records it, returns the new state |
//! | `POST` | `/advance` | Moves to the next word unconditionally |

use axum::{Json, extract::State};
use lexicon_content::ContentProvider;
use lexicon_core::{
  progress::{Completion, DayRecord, ProgressSummary, UserState},
  store::ProgressStore,
  word::WordItem,
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// `GET /state`
pub async fn state<S, P>(State(app): State<AppState<S, P>>) -> Json<UserState>
where
  S: ProgressStore,
  P: ContentProvider,
{
  Json(app.tracker.load().await)
}

/// `GET /progress`
pub async fn summary<S, P>(State(app): State<AppState<S, P>>) -> Json<ProgressSummary>
where
  S: ProgressStore,
  P: ContentProvider,
{
  let state = app.tracker.load().await;
  Json(ProgressSummary::new(&state, &app.catalog))
}

/// Response for `GET /word`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWord {
  /// `None` once every word has been passed.
  pub word:     Option<WordItem>,
  /// An earlier attempt at `word` that can be shown again on resume.
  pub record:   Option<DayRecord>,
  pub finished: bool,
}

/// `GET /word`
pub async fn current<S, P>(State(app): State<AppState<S, P>>) -> Json<CurrentWord>
where
  S: ProgressStore,
  P: ContentProvider,
{
  let state = app.tracker.load().await;
  Json(CurrentWord {
    word:     state.current_word(&app.catalog).cloned(),
    record:   state.resumable_record(&app.catalog).cloned(),
    finished: app.catalog.is_exhausted(state.current_word_index),
  })
}

/// `POST /completions`
pub async fn complete<S, P>(
  State(app): State<AppState<S, P>>,
  Json(completion): Json<Completion>,
) -> Result<Json<UserState>, ApiError>
where
  S: ProgressStore,
  P: ContentProvider,
{
  if app.catalog.find(completion.word_id).is_none() {
    return Err(ApiError::NotFound(format!("word {} not found", completion.word_id)));
  }
  Ok(Json(app.tracker.record_completion(completion).await))
}

/// `POST /advance`
///
/// Does not check that the current word was mastered; clients gate the
/// button on that themselves.
pub async fn advance<S, P>(State(app): State<AppState<S, P>>) -> Json<UserState>
where
  S: ProgressStore,
  P: ContentProvider,
{
  Json(app.tracker.advance_word().await)
}
