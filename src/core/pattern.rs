//! Guess scoring and feedback patterns
//!
//! A pattern is the positional feedback for one guess: five
//! [`Classification`]s in guess order.

use super::{Classification, WORD_LENGTH, Word};
use std::fmt;

/// Feedback pattern for a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern([Classification; WORD_LENGTH]);

impl Pattern {
    /// All exact (the guess is the answer)
    pub const PERFECT: Self = Self([Classification::Exact; WORD_LENGTH]);

    /// Build a pattern from explicit classifications
    #[inline]
    #[must_use]
    pub const fn new(classes: [Classification; WORD_LENGTH]) -> Self {
        Self(classes)
    }

    /// Score `guess` against `answer`
    ///
    /// Implements Wordle's feedback rules, including repeated letters.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the answer's letter pool
    /// 2. Second pass: mark present letters from what is left in the pool, left to right
    ///
    /// The exact pass must run first, otherwise an early misplaced copy of a
    /// letter can use up the pool entry that a later exact match needs.
    ///
    /// # Examples
    /// ```
    /// use wordle_game::core::{Classification, Pattern, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    /// let pattern = Pattern::score(&guess, &answer);
    ///
    /// assert_eq!(pattern.get(2), Classification::Exact);
    /// assert_eq!(pattern.to_string(), "--G-G");
    /// ```
    #[must_use]
    pub fn score(guess: &Word, answer: &Word) -> Self {
        let mut result = [Classification::Absent; WORD_LENGTH];
        let mut answer_available = answer.char_counts();

        // First pass: exact position matches
        for (i, (&g, &a)) in guess.chars().iter().zip(answer.chars()).enumerate() {
            if g == a {
                result[i] = Classification::Exact;
                if let Some(count) = answer_available.get_mut(&g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: present letters from the remaining pool
        for (i, &letter) in guess.chars().iter().enumerate() {
            if result[i] == Classification::Exact {
                continue;
            }
            if let Some(count) = answer_available.get_mut(&letter)
                && *count > 0
            {
                result[i] = Classification::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Classification at a position (0-4)
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn get(self, position: usize) -> Classification {
        self.0[position]
    }

    /// All five classifications in guess order
    #[inline]
    #[must_use]
    pub const fn classes(&self) -> &[Classification; WORD_LENGTH] {
        &self.0
    }

    /// Check if this is a perfect match
    #[inline]
    #[must_use]
    pub fn is_perfect(self) -> bool {
        self == Self::PERFECT
    }

    /// Count positions with the given classification
    #[must_use]
    pub fn count(self, class: Classification) -> usize {
        self.0.iter().filter(|&&c| c == class).count()
    }

    /// Parse a pattern from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// # Examples
    /// ```
    /// use wordle_game::core::Pattern;
    ///
    /// let p1 = Pattern::parse("GY-GY").unwrap();
    /// let p2 = Pattern::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut classes = [Classification::Absent; WORD_LENGTH];
        let mut chars = s.chars();

        for slot in &mut classes {
            *slot = Classification::from_code(chars.next()?)?;
        }

        if chars.next().is_some() {
            return None;
        }

        Some(Self(classes))
    }

    /// Convert pattern to emoji string
    ///
    /// # Examples
    /// ```
    /// use wordle_game::core::Pattern;
    ///
    /// let p = Pattern::parse("GY-GY").unwrap();
    /// assert_eq!(p.to_emoji(), "🟩🟨⬜🟩🟨");
    /// ```
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.0.iter().map(|c| c.emoji()).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.0 {
            write!(f, "{}", class.code())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid pattern string: {s}"))
    }
}

/// A guess together with its feedback. Immutable once scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGuess {
    word: Word,
    pattern: Pattern,
}

impl ScoredGuess {
    /// Score `word` against `answer`
    #[must_use]
    pub fn new(word: Word, answer: &Word) -> Self {
        let pattern = Pattern::score(&word, answer);
        Self { word, pattern }
    }

    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Letters paired with their classifications, in guess order
    pub fn letters(&self) -> impl Iterator<Item = (u8, Classification)> + '_ {
        self.word
            .chars()
            .iter()
            .copied()
            .zip(self.pattern.classes().iter().copied())
    }
}
