//! Error types for profile generation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    /// A curve needs both end points
    #[error("a profile needs at least 2 points, got {points}")]
    TooFewPoints { points: usize },

    /// Table output failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed
    #[error("Failed to write table: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
