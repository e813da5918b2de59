//! Core types and the progress state machine for Lexicon.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ProgressStore`]; the surfaces
//! (`lexicon-api`, `lexicon-cli`) drive a [`tracker::ProgressTracker`].

pub mod clock;
pub mod error;
pub mod ingest;
pub mod progress;
pub mod store;
pub mod tracker;
pub mod transition;
pub mod word;

pub use error::{Error, Result};
