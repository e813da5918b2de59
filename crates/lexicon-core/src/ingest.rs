//! Word-list ingestion. Turns a numbered text dump into catalog entries.
//!
//! The input is the extracted text of a list like:
//!
//! ```text
//! 1. Abhor, hate
//! 2. Bigot, narrow-minded,
//!    prejudiced person
//! ```
//!
//! An item starts at a line beginning with `N.` and runs to the next one.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use tracing::warn;

use crate::word::{Catalog, WordItem};

static ITEM_START: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^(\d+)\.\s+").expect("item pattern is valid"));

const MIN_WORD_CHARS: usize = 2;
const MAX_WORD_CHARS: usize = 50;

/// An entry parsed from a word list, before it has been given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedWord {
  pub word:       String,
  pub definition: String,
}

/// Case- and padding-insensitive form used for duplicate detection.
pub fn normalize(word: &str) -> String { word.trim().to_lowercase() }

/// Parse every well-formed `N. Word, definition` item in `text`.
///
/// Items without a comma, and words outside 2–50 characters, are dropped.
/// Anything from `http://` onwards is treated as page-footer noise.
pub fn parse_word_list(text: &str) -> Vec<ListedWord> {
  let starts: Vec<(usize, usize)> = ITEM_START
    .find_iter(text)
    .map(|m| (m.start(), m.end()))
    .collect();

  let mut listed = Vec::new();
  for (i, &(_, content_start)) in starts.iter().enumerate() {
    let end = starts.get(i + 1).map_or(text.len(), |&(next, _)| next);
    let mut chunk = text[content_start..end].trim();

    if let Some(cut) = chunk.find("http://") {
      chunk = chunk[..cut].trim();
    }

    let Some((word, definition)) = chunk.split_once(',') else {
      continue;
    };

    let word = word.trim();
    let chars = word.chars().count();
    if !(MIN_WORD_CHARS..=MAX_WORD_CHARS).contains(&chars) {
      continue;
    }

    listed.push(ListedWord {
      word:       word.to_owned(),
      definition: definition.split_whitespace().collect::<Vec<_>>().join(" "),
    });
  }
  listed
}

/// Pick the listed words that are new to `catalog` and assign them ids
/// following the catalog's largest id. Later duplicates in `listed` lose to
/// earlier ones. Entries that would need an id past `u32::MAX` are dropped.
pub fn new_entries(catalog: &Catalog, listed: Vec<ListedWord>) -> Vec<WordItem> {
  let mut seen: HashSet<String> = catalog
    .items()
    .iter()
    .map(|item| normalize(&item.word))
    .collect();
  let mut next_id = catalog.max_id();

  let mut entries = Vec::new();
  for ListedWord { word, definition } in listed {
    if !seen.insert(normalize(&word)) {
      continue;
    }
    let Some(id) = next_id.checked_add(1) else {
      warn!(word = %word, "word ids exhausted; skipping the rest of the list");
      break;
    };
    next_id = id;
    entries.push(WordItem { id, word, definition });
  }
  entries
}
