//! Generation tickets, for discarding content responses that arrive too late.
//!
//! Each time the learner moves to a word, the caller issues a new [`Ticket`]
//! and tags outstanding requests with it. When a response resolves it is
//! passed through [`Generation::accept`], which drops it unless its ticket is
//! still the latest one.

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

use tracing::debug;

/// Shared counter of issued tickets. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct Generation {
  latest: Arc<AtomicU64>,
}

/// Identifies the word a request was issued for and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
  generation: u64,
  word_id:    u32,
}

/// A response paired with the ticket of the request that produced it.
#[derive(Debug, Clone)]
pub struct Tagged<T> {
  pub ticket: Ticket,
  pub value:  T,
}

impl Ticket {
  pub fn word_id(&self) -> u32 { self.word_id }

  pub fn generation(&self) -> u64 { self.generation }

  pub fn tag<T>(self, value: T) -> Tagged<T> { Tagged { ticket: self, value } }
}

impl Generation {
  pub fn new() -> Self { Self::default() }

  /// Start a new generation for `word_id`, superseding every earlier ticket.
  pub fn issue(&self, word_id: u32) -> Ticket {
    let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
    Ticket { generation, word_id }
  }

  pub fn is_current(&self, ticket: &Ticket) -> bool {
    self.latest.load(Ordering::SeqCst) == ticket.generation
  }

  /// Unwrap `tagged` if its ticket is still current; otherwise drop it.
  pub fn accept<T>(&self, tagged: Tagged<T>) -> Option<T> {
    if self.is_current(&tagged.ticket) {
      Some(tagged.value)
    } else {
      debug!(
        word_id = tagged.ticket.word_id,
        generation = tagged.ticket.generation,
        "discarding superseded response"
      );
      None
    }
  }
}
