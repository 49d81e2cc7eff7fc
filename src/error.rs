//! Error types for smitty.
//!
//! Every fallible operation in the crate returns [`Result`]. Nothing is
//! retried or recovered locally; failures propagate to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error.
#[derive(Debug, Error)]
pub enum Error {
    /// Percentiles were requested for an empty sample set.
    #[error("cannot reduce an empty sample set")]
    EmptySamples,

    /// Adaptive precision needs both interval half-widths to be positive.
    #[error(
        "cannot derive decimal places from a degenerate interval \
         (lower gap {lower_gap}, upper gap {upper_gap}); pass explicit decimal places"
    )]
    DegenerateInterval { lower_gap: f64, upper_gap: f64 },

    /// A per-column argument disagrees with the number of chain columns.
    #[error("{what}: expected {expected} entries (one per column), got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A chain row has a different width than the first row.
    #[error("chain row {row} has {actual} values, expected {expected}")]
    RaggedChain {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{0} decimal places requested, at most 65535 supported")]
    TooManyDecimalPlaces(usize),

    #[error("invalid field spec {0:?}: expected an optional leading '0' followed by a width")]
    InvalidFieldSpec(String),

    #[error("unknown transformation {0:?}")]
    InvalidTransform(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The display sink could not take the fragment.
    #[error("display sink failed: {0}")]
    Display(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
