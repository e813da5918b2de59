//! The word catalog: the ordered, immutable list of vocabulary entries.
//!
//! Catalog order defines progression order: the tracker's
//! `currentWordIndex` is a position in this list, not a word id.

use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── WordItem ────────────────────────────────────────────────────────────────

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
  /// Unique positive id, stable across sessions.
  pub id:         u32,
  pub word:       String,
  pub definition: String,
}

impl WordItem {
  pub fn new(id: u32, word: impl Into<String>, definition: impl Into<String>) -> Self {
    Self { id, word: word.into(), definition: definition.into() }
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Ordered word list with an id index.
///
/// Ids need not be contiguous but must be unique and positive.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  items:     Vec<WordItem>,
  positions: HashMap<u32, usize>,
}

impl Catalog {
  pub fn new(items: Vec<WordItem>) -> Result<Self> {
    let mut positions = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
      if item.id == 0 {
        return Err(Error::InvalidWordId(item.id));
      }
      if positions.insert(item.id, index).is_some() {
        return Err(Error::DuplicateWordId(item.id));
      }
    }
    Ok(Self { items, positions })
  }

  /// Parse a JSON array of `{id, word, definition}` objects.
  pub fn from_json(raw: &str) -> Result<Self> {
    let items: Vec<WordItem> = serde_json::from_str(raw)?;
    Self::new(items)
  }

  /// Read and parse a catalog file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&raw)
  }

  /// Write the catalog back out as pretty-printed JSON.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let raw = self.to_json_pretty()?;
    fs::write(path, raw).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(&self.items)?)
  }

  /// Append `additions` after the existing entries, re-validating ids.
  pub fn extend(self, additions: Vec<WordItem>) -> Result<Self> {
    let mut items = self.items;
    items.extend(additions);
    Self::new(items)
  }

  pub fn items(&self) -> &[WordItem] { &self.items }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// The word at progression position `index`.
  pub fn get(&self, index: usize) -> Option<&WordItem> { self.items.get(index) }

  /// Look a word up by its id.
  pub fn find(&self, id: u32) -> Option<&WordItem> {
    self.positions.get(&id).map(|&index| &self.items[index])
  }

  /// Whether a cursor at `index` has run past the last word, i.e. every word
  /// has been mastered.
  pub fn is_exhausted(&self, index: usize) -> bool { index >= self.items.len() }

  /// Largest id in the catalog, or 0 when empty.
  pub fn max_id(&self) -> u32 {
    self.items.iter().map(|item| item.id).max().unwrap_or(0)
  }
}
