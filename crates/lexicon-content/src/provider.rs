//! The `ContentProvider` trait, the seam to the generative backend.

use std::future::Future;

/// A single structured-output generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
  pub prompt: String,
  /// Response schema the provider must conform to.
  pub schema: serde_json::Value,
}

/// Abstraction over a text-generation backend that can emit JSON matching a
/// schema.
pub trait ContentProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Run one generation. `Ok(None)` means the provider answered without a
  /// body.
  fn generate<'a>(
    &'a self,
    request: &'a GenerationRequest,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;
}
