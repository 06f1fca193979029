//! Statistics commands

use crate::output::print_statistics;
use crate::stats::{StatsError, StatsStore};

/// Print the stored statistics
pub fn show_stats<S: StatsStore>(store: &S) {
    print_statistics(&store.load());
}

/// Zero the stored statistics
///
/// # Errors
///
/// Returns an error if the store cannot be cleared.
pub fn reset_stats<S: StatsStore>(store: &mut S) -> Result<(), StatsError> {
    store.clear()?;
    println!("Statistics reset.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{FileStatsStore, Statistics};

    #[test]
    fn reset_zeroes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStatsStore::new(dir.path().join("stats.txt"));
        store.increment(3).unwrap();
        store.increment(0).unwrap();

        reset_stats(&mut store).unwrap();
        assert_eq!(store.load(), Statistics::default());

        // Resetting twice is fine
        reset_stats(&mut store).unwrap();
    }
}
