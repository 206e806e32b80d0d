//! Data shaping over already-loaded records.
//!
//! Every function here is pure and synchronous: raw collections in, view models out. Malformed
//! input never fails a view. Where a parse has to fall back to a default, the result says so
//! through [`ParseOutcome`].

pub mod health_check;
pub mod pagination;
pub mod ranges;
pub mod schedule;
pub mod search;
pub mod series;

use serde::Serialize;

/// Result of a lenient parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "lowercase")]
pub enum ParseOutcome<T> {
    /// The input was well formed.
    Parsed(T),
    /// The input was malformed and `T` is the fallback.
    Defaulted(T),
}

impl<T> ParseOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Defaulted(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Defaulted(v) => v,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ParseOutcome::Defaulted(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(v) => ParseOutcome::Parsed(f(v)),
            ParseOutcome::Defaulted(v) => ParseOutcome::Defaulted(f(v)),
        }
    }
}
