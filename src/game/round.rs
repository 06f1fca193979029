//! Round state machine
//!
//! A round owns the secret answer, the scored guesses so far and the keyboard
//! letter states. It starts active and ends exactly once, either won or lost.

use super::keyboard::LetterTracker;
use crate::core::{ScoredGuess, Word};
use thiserror::Error;

/// Guesses allowed per round
pub const MAX_GUESSES: usize = 6;

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Won,
    Lost,
}

/// How a finished round ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnd {
    /// Guessed the answer using this many guesses (1-6)
    Won { guesses: usize },
    /// Ran out of guesses; the answer is revealed
    Lost { answer: Word },
}

impl RoundEnd {
    /// Statistics bucket for this ending: 0 for a loss, otherwise the guess count
    #[must_use]
    pub const fn stats_bucket(&self) -> usize {
        match self {
            Self::Won { guesses } => *guesses,
            Self::Lost { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A guess arrived after the round was won or lost
    #[error("too many guesses: the round is already {0:?}")]
    Finished(RoundStatus),
}

/// One play-through from answer selection to win or loss
#[derive(Debug, Clone)]
pub struct Round {
    answer: Word,
    guesses: Vec<ScoredGuess>,
    letters: LetterTracker,
    status: RoundStatus,
}

impl Round {
    #[must_use]
    pub fn new(answer: Word) -> Self {
        Self {
            answer,
            guesses: Vec::with_capacity(MAX_GUESSES),
            letters: LetterTracker::new(),
            status: RoundStatus::Active,
        }
    }

    /// Discard history and letter states and start over with a new answer
    pub fn restart(&mut self, answer: Word) {
        self.answer = answer;
        self.guesses.clear();
        self.letters.reset();
        self.status = RoundStatus::Active;
    }

    /// Score and record a validated guess
    ///
    /// Returns the scored guess, plus `Some(end)` on the guess that finishes
    /// the round.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Finished` if the round is no longer active; the
    /// round is left untouched.
    pub fn add_guess(
        &mut self,
        word: Word,
    ) -> Result<(ScoredGuess, Option<RoundEnd>), RoundError> {
        if self.status != RoundStatus::Active {
            return Err(RoundError::Finished(self.status));
        }

        let scored = ScoredGuess::new(word, &self.answer);
        self.letters.record_guess(&scored);
        self.guesses.push(scored.clone());

        let end = if scored.pattern().is_perfect() {
            self.status = RoundStatus::Won;
            Some(RoundEnd::Won {
                guesses: self.guesses.len(),
            })
        } else if self.guesses.len() == MAX_GUESSES {
            self.status = RoundStatus::Lost;
            Some(RoundEnd::Lost {
                answer: self.answer.clone(),
            })
        } else {
            None
        };

        Ok((scored, end))
    }

    #[must_use]
    pub const fn answer(&self) -> &Word {
        &self.answer
    }

    #[must_use]
    pub fn guesses(&self) -> &[ScoredGuess] {
        &self.guesses
    }

    #[must_use]
    pub fn last_guess(&self) -> Option<&ScoredGuess> {
        self.guesses.last()
    }

    #[must_use]
    pub const fn letters(&self) -> &LetterTracker {
        &self.letters
    }

    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES - self.guesses.len()
    }
}
