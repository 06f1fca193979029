//! Offline oracle backed by a word list

use super::ValidityOracle;
use crate::core::Word;
use async_trait::async_trait;
use rustc_hash::FxHashSet;

/// Accepts exactly the words of a fixed list
#[derive(Debug, Clone, Default)]
pub struct WordListOracle {
    words: FxHashSet<Word>,
}

impl WordListOracle {
    /// Build from raw strings, skipping anything that is not a 5-letter word
    #[must_use]
    pub fn from_slice(slice: &[&str]) -> Self {
        slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }
}

impl FromIterator<Word> for WordListOracle {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ValidityOracle for WordListOracle {
    async fn is_valid(&self, word: &Word) -> bool {
        self.contains(word)
    }
}
