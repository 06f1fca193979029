//! Letter-state tracking for the on-screen keyboard
//!
//! Keeps the best-known classification of every letter across the guesses of
//! the current round.

use crate::core::{Classification, ScoredGuess};
use clap::ValueEnum;

const ALPHABET_SIZE: usize = 26;

/// Best-known classification per letter A-Z; `None` means unseen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterTracker {
    states: [Option<Classification>; ALPHABET_SIZE],
}

impl LetterTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every letter back to unseen
    pub fn reset(&mut self) {
        self.states = [None; ALPHABET_SIZE];
    }

    /// Record a classification for one letter
    ///
    /// Exact always wins, present replaces anything but exact, and absent only
    /// fills an unseen slot. A known state never regresses. Non-letters are
    /// ignored.
    pub fn record_status(&mut self, letter: u8, status: Classification) {
        let Some(slot) = Self::index(letter).map(|i| &mut self.states[i]) else {
            return;
        };

        match status {
            Classification::Exact => *slot = Some(Classification::Exact),
            Classification::Absent => {
                if slot.is_none() {
                    *slot = Some(Classification::Absent);
                }
            }
            Classification::Present => {
                if *slot != Some(Classification::Exact) {
                    *slot = Some(Classification::Present);
                }
            }
        }
    }

    /// Feed every positional classification of a scored guess
    pub fn record_guess(&mut self, guess: &ScoredGuess) {
        for (letter, class) in guess.letters() {
            self.record_status(letter, class);
        }
    }

    /// Best-known state of a letter (either case)
    #[must_use]
    pub fn status(&self, letter: u8) -> Option<Classification> {
        Self::index(letter).and_then(|i| self.states[i])
    }

    /// Number of letters with a known state
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_some()).count()
    }

    fn index(letter: u8) -> Option<usize> {
        let upper = letter.to_ascii_uppercase();
        upper
            .is_ascii_uppercase()
            .then(|| usize::from(upper - b'A'))
    }
}

/// Keyboard layout used to arrange the letter display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Dvorak,
}

/// A keyboard cell: a letter key or a half-width indent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(u8),
    Spacer,
}

impl KeyboardLayout {
    /// Rows of the layout; `-` marks half a key of indent
    #[must_use]
    pub const fn rows(self) -> &'static [&'static str] {
        match self {
            Self::Qwerty => &["QWERTYUIOP", "-ASDFGHJKL", "--ZXCVBNM"],
            Self::Dvorak => &["-----PYFGCRL", "AOEUIDHTNS", "---QJKXBMWVZ"],
        }
    }

    /// Rows of keys, spacers included
    pub fn keys(self) -> impl Iterator<Item = Vec<Key>> {
        self.rows().iter().map(|row| {
            row.bytes()
                .map(|b| if b == b'-' { Key::Spacer } else { Key::Letter(b) })
                .collect()
        })
    }
}
