//! [`Outcome`] — a payload tagged with whether the provider produced it.

/// Either a provider-generated value or the fixed fallback used in its place.
///
/// Both variants carry a usable value, so callers can render without
/// branching; [`Outcome::is_fallback`] tells them whether to offer a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  Generated(T),
  Fallback(T),
}

impl<T> Outcome<T> {
  pub fn is_fallback(&self) -> bool { matches!(self, Self::Fallback(_)) }

  pub fn value(&self) -> &T {
    match self {
      Self::Generated(v) | Self::Fallback(v) => v,
    }
  }

  pub fn into_inner(self) -> T {
    match self {
      Self::Generated(v) | Self::Fallback(v) => v,
    }
  }
}
