//! Source of "today" for the state machine.

use std::sync::{Mutex, PoisonError};

use chrono::{Days, NaiveDate, Utc};

/// Supplies the current calendar date.
pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// Wall-clock date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Utc::now().date_naive() }
}

/// A clock pinned to a settable date.
#[derive(Debug)]
pub struct FixedClock {
  day: Mutex<NaiveDate>,
}

impl FixedClock {
  pub fn new(day: NaiveDate) -> Self { Self { day: Mutex::new(day) } }

  pub fn set(&self, day: NaiveDate) {
    *self.day.lock().unwrap_or_else(PoisonError::into_inner) = day;
  }

  /// Move the pinned date forward by `days`.
  pub fn advance_days(&self, days: u64) {
    let mut day = self.day.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(next) = day.checked_add_days(Days::new(days)) {
      *day = next;
    }
  }
}

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate {
    *self.day.lock().unwrap_or_else(PoisonError::into_inner)
  }
}
