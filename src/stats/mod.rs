//! Cross-session outcome statistics

mod record;
mod store;

pub use record::{BUCKETS, Statistics};
pub use store::{FileStatsStore, MemoryStatsStore, StatsStore};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("statistics bucket {0} out of range (0-6)")]
    InvalidBucket(usize),

    #[error("statistics file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
