//! Word enrichment and sentence grading, delegated to a generative provider.
//!
//! [`ContentService`] never fails: provider errors, empty bodies and
//! malformed JSON all resolve to a fixed fallback payload wrapped in
//! [`Outcome::Fallback`]. Responses that arrive after the learner has moved
//! on can be filtered with [`ticket::Generation`].

pub mod error;
pub mod gemini;
pub mod model;
pub mod outcome;
pub mod prompt;
pub mod provider;
pub mod service;
pub mod ticket;

pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use model::{Evaluation, WordContext};
pub use outcome::Outcome;
pub use provider::{ContentProvider, GenerationRequest};
pub use service::ContentService;
