//! JSON API for Lexicon.
//!
//! Exposes an axum [`Router`] that dispatches learner events into a
//! [`ProgressTracker`] and proxies word enrichment through a
//! [`ContentService`]. Rendering is the client's business.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lexicon_api::api_router(state))
//! ```

pub mod content;
pub mod error;
pub mod progress;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lexicon_content::{ContentProvider, ContentService};
use lexicon_core::{store::ProgressStore, tracker::ProgressTracker, word::Catalog};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, P> {
  pub tracker: Arc<ProgressTracker<S>>,
  pub catalog: Arc<Catalog>,
  pub content: Arc<ContentService<P>>,
}

impl<S, P> AppState<S, P> {
  pub fn new(tracker: ProgressTracker<S>, catalog: Catalog, content: ContentService<P>) -> Self {
    Self {
      tracker: Arc::new(tracker),
      catalog: Arc::new(catalog),
      content: Arc::new(content),
    }
  }
}

impl<S, P> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      tracker: Arc::clone(&self.tracker),
      catalog: Arc::clone(&self.catalog),
      content: Arc::clone(&self.content),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, P>(state: AppState<S, P>) -> Router<()>
where
  S: ProgressStore + 'static,
  P: ContentProvider + 'static,
{
  Router::new()
    // Progress
    .route("/state", get(progress::state::<S, P>))
    .route("/progress", get(progress::summary::<S, P>))
    .route("/word", get(progress::current::<S, P>))
    .route("/completions", post(progress::complete::<S, P>))
    .route("/advance", post(progress::advance::<S, P>))
    // Content
    .route("/words/{id}/context", get(content::context::<S, P>))
    .route("/evaluations", post(content::evaluate::<S, P>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
