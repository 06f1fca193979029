//! Core domain types for Wordle
//!
//! Words, per-letter classifications and the scoring engine. Everything here
//! is pure and deterministic.

mod classification;
mod pattern;
mod word;

pub use classification::Classification;
pub use pattern::{Pattern, ScoredGuess};
pub use word::{WORD_LENGTH, Word, WordError};
