//! Error types for `lexicon-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("duplicate word id in catalog: {0}")]
  DuplicateWordId(u32),

  #[error("word ids must be positive, found {0}")]
  InvalidWordId(u32),

  #[error("failed to access {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
