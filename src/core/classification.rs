//! Per-letter feedback classification
//!
//! The variant order doubles as the aggregation precedence used by the
//! keyboard tracker: `Absent < Present < Exact`.

use std::fmt;

/// Feedback for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// Letter does not occur in the answer, or all its occurrences are already accounted for
    Absent,
    /// Letter occurs elsewhere in the answer
    Present,
    /// Correct letter in the correct position
    Exact,
}

impl Classification {
    /// Single-character code: `G` exact, `Y` present, `-` absent
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    /// Emoji tile for share-style output
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Parse a feedback character
    ///
    /// Accepts `G`/`g`/🟩, `Y`/`y`/🟨 and `-`/`_`/⬜.
    #[must_use]
    pub const fn from_code(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Exact),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::Present => "present",
            Self::Absent => "absent",
        };
        f.write_str(name)
    }
}
