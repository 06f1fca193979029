//! Session configuration
//!
//! Collects the knobs exposed on the command line and turns them into the
//! collaborators a [`Game`] needs: answer list, validity oracle, statistics
//! store and random source.

use crate::core::Word;
use crate::game::{Game, KeyboardLayout};
use crate::oracle::{AnyOracle, DEFAULT_DICTIONARY_URL, DictionaryOracle, ValidityOracle, WordListOracle};
use crate::stats::FileStatsStore;
use crate::wordlists::loader::{load_from_file, words_from_slice};
use crate::wordlists::{ALLOWED, ANSWERS};
use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default statistics file, relative to the working directory
pub const DEFAULT_STATS_FILE: &str = "wordle-stats.txt";

/// Which authority decides whether a guess is a real word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OracleKind {
    /// Online dictionary lookup
    #[default]
    Dictionary,
    /// Embedded list of guessable words (offline)
    Wordlist,
    /// Embedded list first, then the online dictionary
    Any,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub layout: KeyboardLayout,
    pub stats_file: PathBuf,
    pub oracle: OracleKind,
    pub dictionary_url: String,
    pub timeout: Duration,
    pub answers_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: KeyboardLayout::default(),
            stats_file: PathBuf::from(DEFAULT_STATS_FILE),
            oracle: OracleKind::default(),
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            timeout: Duration::from_secs(5),
            answers_file: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Answer candidates: the custom file if given, else the embedded list
    ///
    /// # Errors
    ///
    /// Fails if the custom file cannot be read or holds no valid words.
    pub fn answers(&self) -> Result<Vec<Word>> {
        let Some(path) = &self.answers_file else {
            return Ok(words_from_slice(ANSWERS));
        };

        let words = load_from_file(path)
            .with_context(|| format!("reading answer list {}", path.display()))?;
        if words.is_empty() {
            bail!("answer list {} has no 5-letter words", path.display());
        }
        Ok(words)
    }

    /// Build the configured validity oracle
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client for the dictionary oracle cannot be created.
    pub fn build_oracle(&self) -> Result<Arc<dyn ValidityOracle>> {
        let oracle: Arc<dyn ValidityOracle> = match self.oracle {
            OracleKind::Wordlist => Arc::new(self.word_list_oracle()),
            OracleKind::Dictionary => Arc::new(self.dictionary_oracle()?),
            OracleKind::Any => Arc::new(AnyOracle::new(vec![
                Arc::new(self.word_list_oracle()),
                Arc::new(self.dictionary_oracle()?),
            ])),
        };
        Ok(oracle)
    }

    fn word_list_oracle(&self) -> WordListOracle {
        let mut words = words_from_slice(ALLOWED);
        // A custom answer must always be guessable
        if self.answers_file.is_some()
            && let Ok(answers) = self.answers()
        {
            words.extend(answers);
        }
        words.into_iter().collect()
    }

    fn dictionary_oracle(&self) -> Result<DictionaryOracle> {
        DictionaryOracle::new(self.dictionary_url.as_str(), self.timeout)
            .context("building dictionary HTTP client")
    }

    #[must_use]
    pub fn stats_store(&self) -> FileStatsStore {
        FileStatsStore::new(&self.stats_file)
    }

    /// Seeded random source if a seed is set, else one seeded from the OS
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Assemble a game session from this configuration
    ///
    /// # Errors
    ///
    /// Fails if the answer list or oracle cannot be built.
    pub fn build_game(&self) -> Result<Game<FileStatsStore>> {
        let game = Game::new(
            self.answers()?,
            self.build_oracle()?,
            self.stats_store(),
            self.rng(),
        )?;
        Ok(game)
    }
}
