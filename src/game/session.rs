//! Game session: rounds, guess submission and outcome reporting
//!
//! Submitting a guess is a two-step affair because the validity oracle is
//! asynchronous:
//!
//! 1. [`Game::prepare`] checks the round is still active and captures the
//!    round number together with the parsed word.
//! 2. [`Game::resolve`] applies the oracle's verdict. If a new round started
//!    in between, the verdict is stale and is dropped without touching the
//!    new round.
//!
//! [`Game::submit_guess`] runs both steps around the oracle call while holding
//! `&mut self`, so nothing else can touch the round while it waits.

use super::round::{Round, RoundEnd, RoundError, RoundStatus};
use crate::core::{ScoredGuess, Word, WordError};
use crate::oracle::ValidityOracle;
use crate::stats::{Statistics, StatsStore};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the answer word list is empty")]
    EmptyWordList,

    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Why a submission was turned away without consuming a guess
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGuess {
    #[error("{0}")]
    Format(#[from] WordError),

    #[error("not a recognised word")]
    NotAWord,
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// Rejected; the round is unchanged
    Invalid { guess: String, reason: InvalidGuess },
    /// Scored; the round goes on
    Accepted { guess: ScoredGuess, remaining: usize },
    /// Scored and correct
    Won {
        guess: ScoredGuess,
        guesses: usize,
        stats: Statistics,
    },
    /// Scored, wrong, and the last allowed guess
    Lost {
        guess: ScoredGuess,
        answer: Word,
        stats: Statistics,
    },
    /// The round this guess was made in has since been replaced
    Stale { guess: String },
}

impl GuessOutcome {
    /// Whether this outcome finished the round
    #[must_use]
    pub const fn ends_round(&self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost { .. })
    }
}

/// A submission waiting for the validity oracle
#[derive(Debug, Clone)]
pub struct PendingGuess {
    round_number: u64,
    raw: String,
    word: Result<Word, WordError>,
}

impl PendingGuess {
    /// The parsed word, if the input was well-formed
    #[must_use]
    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref().ok()
    }

    /// The submitted text, uppercased
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn round_number(&self) -> u64 {
        self.round_number
    }
}

/// A player's session: the current round plus everything that outlives it
pub struct Game<S: StatsStore> {
    answers: Vec<Word>,
    round: Round,
    round_number: u64,
    oracle: Arc<dyn ValidityOracle>,
    store: S,
    stats: Statistics,
    rng: StdRng,
}

impl<S: StatsStore> Game<S> {
    /// Start a session with a random first answer
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyWordList` if `answers` is empty.
    pub fn new(
        answers: Vec<Word>,
        oracle: Arc<dyn ValidityOracle>,
        store: S,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        if answers.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        let first = answers[rng.random_range(0..answers.len())].clone();
        debug!(answer = %first, "round 1 started");

        Ok(Self {
            answers,
            round: Round::new(first),
            round_number: 1,
            oracle,
            stats: store.load(),
            store,
            rng,
        })
    }

    /// Discard the current round and draw a new answer uniformly at random
    ///
    /// The same answer may come up twice in a row.
    pub fn new_round(&mut self) {
        let answer = self.answers[self.rng.random_range(0..self.answers.len())].clone();
        self.new_round_with_answer(answer);
    }

    /// Discard the current round and play `answer` next
    pub fn new_round_with_answer(&mut self, answer: Word) {
        self.round_number = self.round_number.wrapping_add(1);
        debug!(answer = %answer, round = self.round_number, "round started");
        self.round.restart(answer);
    }

    /// First half of a submission: check the round and parse the input
    ///
    /// # Errors
    ///
    /// Returns `GameError::Round` if the round is already won or lost.
    pub fn prepare(&self, raw: &str) -> Result<PendingGuess, GameError> {
        if !self.round.is_active() {
            return Err(RoundError::Finished(self.round.status()).into());
        }

        let raw = raw.to_uppercase();
        Ok(PendingGuess {
            round_number: self.round_number,
            word: Word::new(raw.as_str()),
            raw,
        })
    }

    /// Second half of a submission: apply the oracle verdict
    ///
    /// Malformed input is reported invalid whatever the verdict. A pending
    /// guess from an earlier round resolves to [`GuessOutcome::Stale`].
    ///
    /// # Errors
    ///
    /// Returns `GameError::Round` if the round finished after `pending` was
    /// prepared.
    pub fn resolve(
        &mut self,
        pending: PendingGuess,
        accepted: bool,
    ) -> Result<GuessOutcome, GameError> {
        if pending.round_number != self.round_number {
            debug!(
                guess = %pending.raw,
                from_round = pending.round_number,
                current_round = self.round_number,
                "dropping stale guess"
            );
            return Ok(GuessOutcome::Stale { guess: pending.raw });
        }

        let word = match pending.word {
            Ok(word) => word,
            Err(e) => {
                return Ok(GuessOutcome::Invalid {
                    guess: pending.raw,
                    reason: e.into(),
                });
            }
        };

        if !accepted {
            return Ok(GuessOutcome::Invalid {
                guess: pending.raw,
                reason: InvalidGuess::NotAWord,
            });
        }

        let (guess, end) = self.round.add_guess(word)?;
        let Some(end) = end else {
            return Ok(GuessOutcome::Accepted {
                guess,
                remaining: self.round.remaining_guesses(),
            });
        };

        let stats = self.record_end(&end);
        Ok(match end {
            RoundEnd::Won { guesses } => GuessOutcome::Won {
                guess,
                guesses,
                stats,
            },
            RoundEnd::Lost { answer } => GuessOutcome::Lost {
                guess,
                answer,
                stats,
            },
        })
    }

    /// Submit a guess: parse, ask the oracle, then score it
    ///
    /// # Errors
    ///
    /// Returns `GameError::Round` if the round is already won or lost.
    pub async fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GameError> {
        let pending = self.prepare(raw)?;
        let accepted = match pending.word() {
            Some(word) => self.oracle.is_valid(word).await,
            None => false,
        };
        self.resolve(pending, accepted)
    }

    fn record_end(&mut self, end: &RoundEnd) -> Statistics {
        info!(round = self.round_number, outcome = ?end, "round finished");
        let bucket = end.stats_bucket();
        match self.store.increment(bucket) {
            Ok(stats) => self.stats = stats,
            Err(e) => {
                warn!(error = %e, "could not record round outcome, keeping it for this session only");
                // Buckets from a RoundEnd are always in range
                let _ = self.stats.increment(bucket);
            }
        }
        self.stats
    }

    #[must_use]
    pub const fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub const fn round_number(&self) -> u64 {
        self.round_number
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// Shared handle to the oracle, for running lookups off the game loop
    #[must_use]
    pub fn oracle(&self) -> Arc<dyn ValidityOracle> {
        Arc::clone(&self.oracle)
    }

    /// Statistics as of the last finished round
    ///
    /// Read from the store once at start-up, then kept in step with every
    /// increment.
    #[must_use]
    pub const fn stats(&self) -> Statistics {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classification, Pattern};
    use crate::game::MAX_GUESSES;
    use crate::oracle::{FixedOracle, WordListOracle};
    use crate::stats::{MemoryStatsStore, StatsError};
    use rand::SeedableRng;
    use std::io;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use Classification::{Absent, Exact, Present};

    /// Memory store that counts reads and can refuse writes
    struct CountingStore {
        inner: MemoryStatsStore,
        loads: Arc<AtomicUsize>,
        fail_writes: bool,
    }

    impl StatsStore for CountingStore {
        fn load(&self) -> Statistics {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load()
        }

        fn increment(&mut self, bucket: usize) -> Result<Statistics, StatsError> {
            if self.fail_writes {
                return Err(StatsError::Io {
                    path: PathBuf::from("stats.txt"),
                    source: io::Error::other("disk full"),
                });
            }
            self.inner.increment(bucket)
        }

        fn clear(&mut self) -> Result<(), StatsError> {
            self.inner.clear()
        }
    }

    fn counting_game(fail_writes: bool) -> (Game<CountingStore>, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let store = CountingStore {
            inner: MemoryStatsStore::with_stats(Statistics::from_counts([1, 0, 2, 0, 0, 0, 0])),
            loads: Arc::clone(&loads),
            fail_writes,
        };
        let mut game = Game::new(
            vec![word("APPLE")],
            Arc::new(FixedOracle(true)),
            store,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        game.new_round_with_answer(word("APPLE"));
        (game, loads)
    }

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn game_with(answers: &[&str], oracle: Arc<dyn ValidityOracle>) -> Game<MemoryStatsStore> {
        Game::new(
            answers.iter().map(|&s| word(s)).collect(),
            oracle,
            MemoryStatsStore::new(),
            StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    fn apple_badly() -> Game<MemoryStatsStore> {
        let mut game = game_with(&["APPLE", "BADLY"], Arc::new(FixedOracle(true)));
        game.new_round_with_answer(word("APPLE"));
        game
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let result = Game::new(
            Vec::new(),
            Arc::new(FixedOracle(true)),
            MemoryStatsStore::new(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(GameError::EmptyWordList)));
    }

    #[tokio::test]
    async fn apple_badly_end_to_end() {
        let mut game = apple_badly();

        let outcome = game.submit_guess("BADLY").await.unwrap();
        let GuessOutcome::Accepted { guess, remaining } = outcome else {
            panic!("expected accepted, got {outcome:?}");
        };
        assert_eq!(
            guess.pattern(),
            Pattern::new([Absent, Present, Absent, Exact, Absent])
        );
        assert_eq!(remaining, MAX_GUESSES - 1);
        assert_eq!(game.status(), RoundStatus::Active);

        let outcome = game.submit_guess("APPLE").await.unwrap();
        let GuessOutcome::Won {
            guess,
            guesses,
            stats,
        } = outcome
        else {
            panic!("expected win, got {outcome:?}");
        };
        assert!(guess.pattern().is_perfect());
        assert_eq!(guesses, 2);
        assert_eq!(stats.counts(), &[0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(game.status(), RoundStatus::Won);
    }

    #[tokio::test]
    async fn win_on_guess_k_increments_bucket_k() {
        for k in 1..=MAX_GUESSES {
            let mut game = apple_badly();
            for _ in 1..k {
                game.submit_guess("BADLY").await.unwrap();
            }
            let outcome = game.submit_guess("APPLE").await.unwrap();
            assert!(outcome.ends_round());

            let mut expected = [0u64; 7];
            expected[k] = 1;
            assert_eq!(game.stats().counts(), &expected, "won in {k}");
        }
    }

    #[tokio::test]
    async fn six_misses_lose_and_reveal_answer() {
        let mut game = apple_badly();
        for _ in 1..MAX_GUESSES {
            let outcome = game.submit_guess("BADLY").await.unwrap();
            assert!(!outcome.ends_round());
        }

        let outcome = game.submit_guess("BADLY").await.unwrap();
        let GuessOutcome::Lost { answer, stats, .. } = outcome else {
            panic!("expected loss, got {outcome:?}");
        };
        assert_eq!(answer, word("APPLE"));
        assert_eq!(stats.counts(), &[1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(game.status(), RoundStatus::Lost);
    }

    #[tokio::test]
    async fn no_guess_after_round_ends() {
        let mut game = apple_badly();
        game.submit_guess("APPLE").await.unwrap();

        let err = game.submit_guess("BADLY").await.unwrap_err();
        assert!(matches!(
            err,
            GameError::Round(RoundError::Finished(RoundStatus::Won))
        ));
        assert_eq!(game.round().guesses().len(), 1);
        assert_eq!(game.stats().played(), 1);
        assert!(game.prepare("BADLY").is_err());
    }

    #[tokio::test]
    async fn malformed_guess_is_invalid_without_state_change() {
        let mut game = apple_badly();

        for raw in ["APP", "APPLES", "APP1E", ""] {
            let outcome = game.submit_guess(raw).await.unwrap();
            assert!(
                matches!(
                    outcome,
                    GuessOutcome::Invalid {
                        reason: InvalidGuess::Format(_),
                        ..
                    }
                ),
                "{raw:?} -> {outcome:?}"
            );
        }
        assert!(game.round().guesses().is_empty());
        assert_eq!(game.round().letters().known_count(), 0);
    }

    #[tokio::test]
    async fn guess_is_uppercased() {
        let mut game = apple_badly();
        let outcome = game.submit_guess("apple").await.unwrap();
        assert!(matches!(outcome, GuessOutcome::Won { guesses: 1, .. }));
    }

    #[tokio::test]
    async fn oracle_rejection_is_invalid_without_state_change() {
        let oracle = Arc::new(WordListOracle::from_slice(&["APPLE", "BADLY"]));
        let mut game = game_with(&["APPLE", "BADLY"], oracle);
        game.new_round_with_answer(word("APPLE"));

        let outcome = game.submit_guess("qzxvj").await.unwrap();
        assert_eq!(
            outcome,
            GuessOutcome::Invalid {
                guess: "QZXVJ".to_string(),
                reason: InvalidGuess::NotAWord,
            }
        );
        assert_eq!(game.round().remaining_guesses(), MAX_GUESSES);

        // A rejected oracle lookup does not use up a guess
        let outcome = game.submit_guess("badly").await.unwrap();
        assert!(matches!(outcome, GuessOutcome::Accepted { remaining: 5, .. }));
    }

    #[tokio::test]
    async fn new_round_resets_state() {
        let mut game = apple_badly();
        game.submit_guess("BADLY").await.unwrap();
        game.submit_guess("APPLE").await.unwrap();
        let before = game.round_number();

        game.new_round();

        assert_eq!(game.status(), RoundStatus::Active);
        assert!(game.round().guesses().is_empty());
        assert_eq!(game.round().letters().known_count(), 0);
        assert!(game.answers().contains(game.round().answer()));
        assert_eq!(game.round_number(), before + 1);
        // Statistics survive the new round
        assert_eq!(game.stats().played(), 1);
    }

    #[test]
    fn answers_are_drawn_from_the_list() {
        let mut game = game_with(&["APPLE", "BADLY"], Arc::new(FixedOracle(true)));
        let mut seen = rustc_hash::FxHashSet::default();
        for _ in 0..64 {
            game.new_round();
            seen.insert(game.round().answer().clone());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn stale_resolution_is_dropped() {
        let mut game = apple_badly();
        let pending = game.prepare("BADLY").unwrap();

        game.new_round_with_answer(word("BADLY"));
        let outcome = game.resolve(pending, true).unwrap();

        assert_eq!(
            outcome,
            GuessOutcome::Stale {
                guess: "BADLY".to_string()
            }
        );
        assert!(game.round().guesses().is_empty());
        assert_eq!(game.stats().played(), 0);
    }

    #[test]
    fn resolve_after_finish_is_an_error() {
        let mut game = apple_badly();
        let first = game.prepare("APPLE").unwrap();
        let second = game.prepare("BADLY").unwrap();

        game.resolve(first, true).unwrap();
        assert!(matches!(game.resolve(second, true), Err(GameError::Round(_))));
        assert_eq!(game.stats().played(), 1);
    }

    #[test]
    fn pending_guess_exposes_parsed_word() {
        let game = apple_badly();
        let pending = game.prepare("badly").unwrap();
        assert_eq!(pending.raw(), "BADLY");
        assert_eq!(pending.word(), Some(&word("BADLY")));
        assert_eq!(pending.round_number(), game.round_number());

        assert_eq!(game.prepare("bad").unwrap().word(), None);
    }

    #[tokio::test]
    async fn stats_are_read_from_the_store_once() {
        let (mut game, loads) = counting_game(false);
        for _ in 0..50 {
            assert_eq!(game.stats().won_in(2), 2);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        game.submit_guess("APPLE").await.unwrap();
        assert_eq!(game.stats().counts(), &[1, 1, 2, 0, 0, 0, 0]);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_stats_write_still_counts_for_the_session() {
        let (mut game, _) = counting_game(true);

        let outcome = game.submit_guess("APPLE").await.unwrap();
        let GuessOutcome::Won { stats, .. } = outcome else {
            panic!("expected win, got {outcome:?}");
        };
        assert_eq!(stats.won_in(1), 1);
        assert_eq!(game.stats(), stats);
    }
}
