//! [`GeminiProvider`] — a [`ContentProvider`] over the Gemini REST API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{
  Error, Result,
  provider::{ContentProvider, GenerationRequest},
};

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  #[serde(default)]
  pub api_key:      String,
  #[serde(default = "default_model")]
  pub model:        String,
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Per-request timeout enforced by the HTTP client.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_model() -> String { "gemini-2.5-flash".to_owned() }

fn default_base_url() -> String {
  "https://generativelanguage.googleapis.com/v1beta".to_owned()
}

fn default_timeout_secs() -> u64 { 30 }

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key:      String::new(),
      model:        default_model(),
      base_url:     default_base_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

/// Async client for `models/{model}:generateContent`.
///
/// Clones share the inner [`reqwest::Client`].
#[derive(Clone)]
pub struct GeminiProvider {
  client: Client,
  config: GeminiConfig,
}

impl GeminiProvider {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }
}

impl ContentProvider for GeminiProvider {
  type Error = Error;

  async fn generate<'a>(&'a self, request: &'a GenerationRequest) -> Result<Option<String>> {
    if self.config.api_key.is_empty() {
      return Err(Error::MissingApiKey);
    }

    let resp = self
      .client
      .post(self.url())
      .header("x-goog-api-key", &self.config.api_key)
      .json(&request_body(request))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let parsed: GenerateContentResponse = resp.json().await?;
    let text = response_text(&parsed);
    debug!(model = %self.config.model, has_text = text.is_some(), "generation finished");
    Ok(text)
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

fn request_body(request: &GenerationRequest) -> serde_json::Value {
  json!({
    "contents": [{
      "role": "user",
      "parts": [{ "text": request.prompt }],
    }],
    "generationConfig": {
      "responseMimeType": "application/json",
      "responseSchema": request.schema,
    },
  })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
  text: Option<String>,
}

/// Concatenated text parts of the first candidate, if there is any text.
fn response_text(resp: &GenerateContentResponse) -> Option<String> {
  let content = resp.candidates.first()?.content.as_ref()?;
  let text: String = content
    .parts
    .iter()
    .filter_map(|part| part.text.as_deref())
    .collect();
  (!text.is_empty()).then_some(text)
}
