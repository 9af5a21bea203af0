//! Error types for fanout.

use std::path::PathBuf;

use thiserror::Error;

use crate::common::config::{MAX_MIN_DEGREE, MIN_MIN_DEGREE};

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in fanout.
///
/// Tree operations themselves never fail once a tree exists; errors come from
/// construction, configuration, and report export.
#[derive(Debug, Error)]
pub enum Error {
    /// A B-tree was requested with a minimum degree outside
    /// `MIN_MIN_DEGREE..=MAX_MIN_DEGREE`.
    ///
    /// Below 2 a full node cannot be split around a median; above the cap a
    /// node's key reservation no longer fits in memory.
    #[error(
        "minimum degree must be between {} and {}, got {0}",
        MIN_MIN_DEGREE,
        MAX_MIN_DEGREE
    )]
    InvalidMinDegree(usize),

    /// I/O error without a known file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error while creating or writing a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value could not be parsed or is out of range.
    #[error("invalid value for {name}: {message}")]
    Config { name: String, message: String },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }

    /// Build a configuration error for the named setting.
    pub fn config(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            name: name.into(),
            message: message.into(),
        }
    }
}
