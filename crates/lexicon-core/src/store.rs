//! The `ProgressStore` trait and an in-memory implementation.
//!
//! A store is a single durable slot holding the serialized [`UserState`]
//! blob under [`STATE_KEY`]. Backends only move opaque strings; parsing,
//! defaults and failure recovery live in
//! [`ProgressTracker`](crate::tracker::ProgressTracker).
//!
//! [`UserState`]: crate::progress::UserState

use std::{
  convert::Infallible,
  future::Future,
  sync::{Mutex, PoisonError},
};

/// Key under which the progress blob is persisted.
pub const STATE_KEY: &str = "lexicon_1500_state";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the persistent progress slot.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProgressStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the stored blob. `None` means nothing has been saved yet.
  fn read(&self) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Replace the stored blob.
  fn write(&self, blob: String) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// A process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
  slot: Mutex<Option<String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store pre-seeded with `blob`, as if an earlier session had saved it.
  pub fn with_blob(blob: impl Into<String>) -> Self {
    Self { slot: Mutex::new(Some(blob.into())) }
  }

  /// The raw blob currently held.
  pub fn blob(&self) -> Option<String> {
    self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }
}

impl ProgressStore for MemoryStore {
  type Error = Infallible;

  async fn read(&self) -> Result<Option<String>, Infallible> { Ok(self.blob()) }

  async fn write(&self, blob: String) -> Result<(), Infallible> {
    *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob);
    Ok(())
  }
}
