//! Guess validity oracles
//!
//! An oracle decides whether a well-formed 5-letter word is an acceptable
//! guess. Lookups may be slow (the dictionary oracle goes over the network)
//! but never fail: any lookup error counts as "not a word".

mod dictionary;
mod wordlist;

pub use dictionary::{DEFAULT_DICTIONARY_URL, DictionaryOracle};
pub use wordlist::WordListOracle;

use crate::core::Word;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("dictionary URL must start with http:// or https://, got {0:?}")]
    InvalidUrl(String),

    #[error("building HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[async_trait]
pub trait ValidityOracle: Send + Sync {
    /// Whether `word` may be played as a guess
    async fn is_valid(&self, word: &Word) -> bool;
}

/// Accepts a word if any inner oracle does, asking them in order
pub struct AnyOracle {
    oracles: Vec<Arc<dyn ValidityOracle>>,
}

impl AnyOracle {
    #[must_use]
    pub fn new(oracles: Vec<Arc<dyn ValidityOracle>>) -> Self {
        Self { oracles }
    }
}

#[async_trait]
impl ValidityOracle for AnyOracle {
    async fn is_valid(&self, word: &Word) -> bool {
        for oracle in &self.oracles {
            if oracle.is_valid(word).await {
                return true;
            }
        }
        false
    }
}

/// Oracle with a fixed answer, for tests and offline play
#[derive(Debug, Clone, Copy)]
pub struct FixedOracle(pub bool);

#[async_trait]
impl ValidityOracle for FixedOracle {
    async fn is_valid(&self, _word: &Word) -> bool {
        self.0
    }
}
