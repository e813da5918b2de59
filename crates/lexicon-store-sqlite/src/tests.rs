//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use std::sync::Arc;

use chrono::NaiveDate;
use lexicon_core::{
  clock::FixedClock,
  progress::{Completion, UserState},
  store::ProgressStore,
  tracker::ProgressTracker,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 9, d).unwrap() }

// ─── Raw slot ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_is_empty() {
  let s = store().await;
  assert_eq!(s.read().await.unwrap(), None);
  assert_eq!(s.last_saved_at().await.unwrap(), None);
}

#[tokio::test]
async fn write_then_read() {
  let s = store().await;
  s.write(r#"{"streak":1}"#.into()).await.unwrap();

  assert_eq!(s.read().await.unwrap().as_deref(), Some(r#"{"streak":1}"#));
  assert!(s.last_saved_at().await.unwrap().is_some());
}

#[tokio::test]
async fn write_overwrites_single_slot() {
  let s = store().await;
  s.write("first".into()).await.unwrap();
  s.write("second".into()).await.unwrap();

  assert_eq!(s.read().await.unwrap().as_deref(), Some("second"));

  let rows: i64 = s
    .conn
    .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))?))
    .await
    .unwrap();
  assert_eq!(rows, 1);
}

#[tokio::test]
async fn survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("progress.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.write("kept".into()).await.unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.read().await.unwrap().as_deref(), Some("kept"));
}

// ─── Through the tracker ─────────────────────────────────────────────────────

fn tracker(s: SqliteStore, d: u32) -> (ProgressTracker<SqliteStore>, Arc<FixedClock>) {
  let clock = Arc::new(FixedClock::new(day(d)));
  (ProgressTracker::with_clock(s, clock.clone()), clock)
}

#[tokio::test]
async fn tracker_round_trips_through_sqlite() {
  let (t, clock) = tracker(store().await, 1);

  t.record_completion(Completion {
    word_id:    1,
    sentence:   "The cat is abhorrent.".into(),
    feedback:   "Good usage.".into(),
    is_correct: true,
  })
  .await;
  t.advance_word().await;

  clock.advance_days(1);
  let state = t
    .record_completion(Completion {
      word_id:    2,
      sentence:   "He was a bigot.".into(),
      feedback:   "Correct.".into(),
      is_correct: true,
    })
    .await;

  assert_eq!(state.streak, 2);
  assert_eq!(state.current_word_index, 1);

  let loaded = t.load().await;
  assert_eq!(loaded, state);
  assert_eq!(loaded.last_login_date, Some(day(2)));
}

#[tokio::test]
async fn tracker_discards_corrupt_row() {
  let s = store().await;
  s.write("][".into()).await.unwrap();

  let (t, _) = tracker(s, 1);
  assert_eq!(t.load().await, UserState::default());

  // The next event overwrites the corrupt blob with a valid one.
  t.advance_word().await;
  assert_eq!(t.load().await.current_word_index, 1);
}
