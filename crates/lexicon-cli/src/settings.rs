//! Runtime settings, layered from an optional TOML file and `LEXICON_*`
//! environment variables.
//!
//! ```toml
//! store_path   = "~/.local/share/lexicon/progress.db"
//! catalog_path = "catalog.json"
//! port         = 5240
//!
//! [gemini]
//! api_key = "..."
//! model   = "gemini-2.5-flash"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `LEXICON_GEMINI__API_KEY`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use lexicon_content::GeminiConfig;
use serde::Deserialize;

/// Fallback variables consulted when no key is configured.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_store_path")]
  pub store_path:   PathBuf,
  #[serde(default = "default_catalog_path")]
  pub catalog_path: PathBuf,
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  #[serde(default)]
  pub gemini:       GeminiConfig,
}

fn default_store_path() -> PathBuf {
  dirs::data_local_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join("lexicon")
    .join("progress.db")
}

fn default_catalog_path() -> PathBuf { PathBuf::from("catalog.json") }

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5240 }

impl Settings {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(
        config::Environment::with_prefix("LEXICON")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise settings")?;

    if settings.gemini.api_key.is_empty() {
      settings.gemini.api_key = api_key_from(|var| std::env::var(var).ok());
    }
    settings.store_path = expand_tilde(&settings.store_path);
    settings.catalog_path = expand_tilde(&settings.catalog_path);
    Ok(settings)
  }
}

/// First non-empty value among [`API_KEY_VARS`].
fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> String {
  API_KEY_VARS
    .iter()
    .filter_map(|var| lookup(var))
    .find(|value| !value.is_empty())
    .unwrap_or_default()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.toml");
    fs::write(
      &path,
      r#"
catalog_path = "/srv/words.json"
port = 8088

[gemini]
api_key = "from-file"
timeout_secs = 5
"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.catalog_path, PathBuf::from("/srv/words.json"));
    assert_eq!(settings.port, 8088);
    assert_eq!(settings.host, "127.0.0.1");
    assert_eq!(settings.gemini.api_key, "from-file");
    assert_eq!(settings.gemini.timeout_secs, 5);
    assert_eq!(settings.gemini.model, "gemini-2.5-flash");
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert!(settings.store_path.ends_with("lexicon/progress.db"));
  }

  #[test]
  fn api_key_prefers_first_non_empty_var() {
    let key = api_key_from(|var| match var {
      "GEMINI_API_KEY" => Some(String::new()),
      "API_KEY" => Some("legacy".into()),
      _ => None,
    });
    assert_eq!(key, "legacy");
    assert_eq!(api_key_from(|_| None), "");
  }

  #[test]
  fn tilde_is_expanded() {
    let expanded = expand_tilde(Path::new("~/words.json"));
    if let Some(home) = dirs::home_dir() {
      assert_eq!(expanded, home.join("words.json"));
    }
    assert_eq!(expand_tilde(Path::new("/abs/words.json")), PathBuf::from("/abs/words.json"));
  }
}
