//! Statistics persistence
//!
//! The game only talks to the [`StatsStore`] trait. Reads never fail: missing
//! or tampered data is reported as all zeros.

use super::{StatsError, Statistics};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persistent seven-bucket outcome counter
pub trait StatsStore {
    /// Current statistics; zeros if nothing usable is stored
    fn load(&self) -> Statistics;

    /// Read-modify-write one bucket, returning the updated statistics
    ///
    /// # Errors
    ///
    /// Fails if the bucket is out of range or the new value cannot be stored.
    fn increment(&mut self, bucket: usize) -> Result<Statistics, StatsError>;

    /// Forget all stored statistics
    ///
    /// # Errors
    ///
    /// Fails if the stored data cannot be removed.
    fn clear(&mut self) -> Result<(), StatsError>;
}

/// In-process store, used for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStatsStore {
    stats: Statistics,
}

impl MemoryStatsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_stats(stats: Statistics) -> Self {
        Self { stats }
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> Statistics {
        self.stats
    }

    fn increment(&mut self, bucket: usize) -> Result<Statistics, StatsError> {
        self.stats.increment(bucket)?;
        Ok(self.stats)
    }

    fn clear(&mut self) -> Result<(), StatsError> {
        self.stats = Statistics::default();
        Ok(())
    }
}

/// Single-line text file holding `c0|c1|c2|c3|c4|c5|c6`
#[derive(Debug, Clone)]
pub struct FileStatsStore {
    path: PathBuf,
}

impl FileStatsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StatsError {
        StatsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Write through a sibling temp file and rename so readers never see a
    /// half-written value
    fn write(&self, stats: &Statistics) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, stats.encode()).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

impl StatsStore for FileStatsStore {
    fn load(&self) -> Statistics {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no statistics file yet");
                return Statistics::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read statistics, using zeros");
                return Statistics::default();
            }
        };

        Statistics::decode(content.trim_end_matches(['\r', '\n'])).unwrap_or_else(|| {
            warn!(path = %self.path.display(), "malformed statistics file, using zeros");
            Statistics::default()
        })
    }

    fn increment(&mut self, bucket: usize) -> Result<Statistics, StatsError> {
        let mut stats = self.load();
        stats.increment(bucket)?;
        self.write(&stats)?;
        Ok(stats)
    }

    fn clear(&mut self) -> Result<(), StatsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
