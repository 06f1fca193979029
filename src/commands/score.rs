//! One-off scoring of a guess against an answer

use crate::core::{ScoredGuess, Word, WordError};

/// Score `guess` against `answer`
///
/// # Errors
///
/// Returns an error if either word is not five ASCII letters.
pub fn score_words(guess: &str, answer: &str) -> Result<ScoredGuess, WordError> {
    let answer = Word::new(answer)?;
    Ok(ScoredGuess::new(Word::new(guess)?, &answer))
}
