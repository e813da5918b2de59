//! Error type for `lexicon-content`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no API key configured for the content provider")]
  MissingApiKey,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("provider returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("provider returned no content")]
  EmptyResponse,

  #[error("malformed provider response: {0}")]
  Malformed(#[from] serde_json::Error),

  #[error("provider error: {0}")]
  Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
