//! Historical outcome counts
//!
//! Bucket 0 counts lost rounds; buckets 1-6 count rounds won with exactly
//! that many guesses, so the index matches the guess count.

use super::StatsError;
use crate::game::MAX_GUESSES;

/// Number of buckets: losses plus one per possible winning guess count
pub const BUCKETS: usize = MAX_GUESSES + 1;

const SEPARATOR: &str = "|";

/// Seven-bucket outcome counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    counts: [u64; BUCKETS],
}

impl Statistics {
    #[must_use]
    pub const fn from_counts(counts: [u64; BUCKETS]) -> Self {
        Self { counts }
    }

    #[must_use]
    pub const fn counts(&self) -> &[u64; BUCKETS] {
        &self.counts
    }

    /// Add one to a bucket
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidBucket` if `bucket` is greater than 6.
    pub fn increment(&mut self, bucket: usize) -> Result<(), StatsError> {
        let slot = self
            .counts
            .get_mut(bucket)
            .ok_or(StatsError::InvalidBucket(bucket))?;
        *slot = slot.saturating_add(1);
        Ok(())
    }

    #[must_use]
    pub const fn losses(&self) -> u64 {
        self.counts[0]
    }

    /// Rounds won with exactly `guesses` guesses
    #[must_use]
    pub fn won_in(&self, guesses: usize) -> u64 {
        if guesses == 0 {
            return 0;
        }
        self.counts.get(guesses).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn wins(&self) -> u64 {
        self.counts[1..].iter().sum()
    }

    #[must_use]
    pub fn played(&self) -> u64 {
        self.wins() + self.losses()
    }

    /// Mean guesses over won rounds; 0.0 with no wins
    #[must_use]
    pub fn average_guesses(&self) -> f64 {
        let wins = self.wins();
        if wins == 0 {
            return 0.0;
        }
        let total: u64 = (1..BUCKETS).map(|g| g as u64 * self.counts[g]).sum();
        total as f64 / wins as f64
    }

    /// Fraction of played rounds that were won; 0.0 when nothing was played
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let played = self.played();
        if played == 0 {
            0.0
        } else {
            self.wins() as f64 / played as f64
        }
    }

    /// Persisted form: seven decimal counts joined by `|`
    #[must_use]
    pub fn encode(&self) -> String {
        self.counts
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Parse the persisted form
    ///
    /// Anything other than exactly seven unsigned decimal counts separated by
    /// `|` yields `None`; callers treat that as tampered data.
    #[must_use]
    pub fn decode(s: &str) -> Option<Self> {
        let mut counts = [0u64; BUCKETS];
        let mut parts = s.split(SEPARATOR);

        for slot in &mut counts {
            let part = parts.next()?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            *slot = part.parse().ok()?;
        }

        if parts.next().is_some() {
            return None;
        }

        Some(Self { counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_statistics() {
        let stats = Statistics::default();
        assert_eq!(stats.played(), 0);
        assert!(stats.average_guesses().abs() < f64::EPSILON);
        assert!(stats.win_rate().abs() < f64::EPSILON);
        assert_eq!(stats.encode(), "0|0|0|0|0|0|0");
    }

    #[test]
    fn increment_buckets() {
        let mut stats = Statistics::default();
        stats.increment(0).unwrap();
        stats.increment(2).unwrap();
        stats.increment(2).unwrap();
        stats.increment(6).unwrap();

        assert_eq!(stats.counts(), &[1, 0, 2, 0, 0, 0, 1]);
        assert_eq!(stats.losses(), 1);
        assert_eq!(stats.wins(), 3);
        assert_eq!(stats.won_in(2), 2);
        assert_eq!(stats.won_in(0), 0);
        assert_eq!(stats.played(), 4);
    }

    #[test]
    fn increment_rejects_out_of_range_bucket() {
        let mut stats = Statistics::default();
        assert!(matches!(
            stats.increment(7),
            Err(StatsError::InvalidBucket(7))
        ));
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn average_counts_wins_only() {
        // 2 wins in 3, 1 win in 6, 5 losses
        let stats = Statistics::from_counts([5, 0, 0, 2, 0, 0, 1]);
        assert!((stats.average_guesses() - 4.0).abs() < 1e-9);
        assert!((stats.win_rate() - 3.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn decode_valid() {
        let stats = Statistics::decode("3|1|4|1|5|9|2").unwrap();
        assert_eq!(stats.counts(), &[3, 1, 4, 1, 5, 9, 2]);
        assert_eq!(Statistics::decode(&stats.encode()), Some(stats));
    }

    #[test]
    fn decode_rejects_tampered_values() {
        for bad in [
            "",
            "1|2|3|4|5|6",
            "1|2|3|4|5|6|7|8",
            "1|2|3|-4|5|6|7",
            "1|2|3|+4|5|6|7",
            "1|2||4|5|6|7",
            "1|2|3|4|5|6|x",
            " 1|2|3|4|5|6|7",
            "1,2,3,4,5,6,7",
            "99999999999999999999999|0|0|0|0|0|0",
        ] {
            assert_eq!(Statistics::decode(bad), None, "{bad:?}");
        }
    }
}
