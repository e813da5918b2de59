//! [`ContentService`] — the fallback-on-failure wrapper around a provider.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{
  Error, Result,
  model::{Evaluation, WordContext},
  outcome::Outcome,
  prompt,
  provider::{ContentProvider, GenerationRequest},
};

/// Fetches word context and grades sentences. Single-shot: no retries, no
/// streaming, and no access to learner progress.
pub struct ContentService<P> {
  provider: P,
}

impl<P: ContentProvider> ContentService<P> {
  pub fn new(provider: P) -> Self { Self { provider } }

  pub fn provider(&self) -> &P { &self.provider }

  /// Examples, synonyms and an origin fact for `word`.
  pub async fn fetch_context(&self, word: &str, definition: &str) -> Outcome<WordContext> {
    match self.generate(prompt::context_request(word, definition)).await {
      Ok(context) => Outcome::Generated(context),
      Err(e) => {
        warn!(word, error = %e, "context generation failed; using fallback");
        Outcome::Fallback(WordContext::fallback())
      }
    }
  }

  /// Grade `sentence` as a usage of `word`.
  pub async fn evaluate_sentence(
    &self,
    word: &str,
    definition: &str,
    sentence: &str,
  ) -> Outcome<Evaluation> {
    match self
      .generate(prompt::evaluation_request(word, definition, sentence))
      .await
    {
      Ok(evaluation) => Outcome::Generated(evaluation),
      Err(e) => {
        warn!(word, error = %e, "sentence evaluation failed; using fallback");
        Outcome::Fallback(Evaluation::fallback())
      }
    }
  }

  async fn generate<T: DeserializeOwned>(&self, request: GenerationRequest) -> Result<T> {
    let text = self
      .provider
      .generate(&request)
      .await
      .map_err(|e| Error::Provider(Box::new(e)))?
      .filter(|text| !text.trim().is_empty())
      .ok_or(Error::EmptyResponse)?;

    Ok(serde_json::from_str(&text)?)
  }
}

#[cfg(test)]
mod tests {
  use std::{
    future::Future,
    sync::{Mutex, PoisonError},
  };

  use super::*;

  /// Replays one canned reply and remembers the last prompt it saw.
  struct Scripted {
    reply:       Result<Option<String>, String>,
    last_prompt: Mutex<Option<String>>,
  }

  impl Scripted {
    fn body(text: &str) -> Self { Self::new(Ok(Some(text.to_owned()))) }

    fn new(reply: Result<Option<String>, String>) -> Self {
      Self { reply, last_prompt: Mutex::new(None) }
    }

    fn last_prompt(&self) -> Option<String> {
      self.last_prompt.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
  }

  impl ContentProvider for Scripted {
    type Error = std::io::Error;

    fn generate<'a>(
      &'a self,
      request: &'a GenerationRequest,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a {
      *self.last_prompt.lock().unwrap_or_else(PoisonError::into_inner) =
        Some(request.prompt.clone());
      let reply = self.reply.clone().map_err(std::io::Error::other);
      async move { reply }
    }
  }

  #[tokio::test]
  async fn context_is_parsed_from_provider_json() {
    let service = ContentService::new(Scripted::body(
      r#"{"examples":["a","b","c"],"synonyms":["loathe","detest","despise"],"etymology":"Latin abhorrere."}"#,
    ));

    let outcome = service.fetch_context("Abhor", "hate").await;
    assert!(!outcome.is_fallback());
    assert_eq!(outcome.value().synonyms, ["loathe", "detest", "despise"]);
    assert!(service.provider().last_prompt().unwrap().contains("Word: Abhor"));
  }

  #[tokio::test]
  async fn context_falls_back_on_provider_error() {
    let service = ContentService::new(Scripted::new(Err("connection reset".into())));

    let outcome = service.fetch_context("Abhor", "hate").await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_inner(), WordContext {
      examples:  vec!["Loading examples failed.".into()],
      synonyms:  vec!["N/A".into()],
      etymology: "Origin unavailable.".into(),
    });
  }

  #[tokio::test]
  async fn context_falls_back_on_empty_body() {
    let service = ContentService::new(Scripted::new(Ok(None)));
    assert!(service.fetch_context("Abhor", "hate").await.is_fallback());

    let service = ContentService::new(Scripted::body("   "));
    assert!(service.fetch_context("Abhor", "hate").await.is_fallback());
  }

  #[tokio::test]
  async fn context_falls_back_on_malformed_json() {
    let service = ContentService::new(Scripted::body(r#"{"examples": "not a list"}"#));
    let outcome = service.fetch_context("Abhor", "hate").await;
    assert_eq!(outcome, Outcome::Fallback(WordContext::fallback()));
  }

  #[tokio::test]
  async fn evaluation_is_parsed_from_provider_json() {
    let service = ContentService::new(Scripted::body(
      r#"{"isCorrect":true,"feedback":"Good usage.","betterSentence":"I abhor cruelty."}"#,
    ));

    let outcome = service
      .evaluate_sentence("Abhor", "hate", "The cat is abhorrent.")
      .await;
    assert_eq!(outcome, Outcome::Generated(Evaluation {
      is_correct:      true,
      feedback:        "Good usage.".into(),
      better_sentence: "I abhor cruelty.".into(),
    }));
    assert!(
      service
        .provider()
        .last_prompt()
        .unwrap()
        .contains("User's Sentence: The cat is abhorrent.")
    );
  }

  #[tokio::test]
  async fn evaluation_falls_back_to_incorrect() {
    let service = ContentService::new(Scripted::body("<html>502</html>"));

    let outcome = service.evaluate_sentence("Abhor", "hate", "x").await;
    assert!(outcome.is_fallback());
    let evaluation = outcome.into_inner();
    assert!(!evaluation.is_correct);
    assert!(evaluation.feedback.contains("error connecting to the AI tutor"));
    assert!(evaluation.better_sentence.is_empty());
  }
}
