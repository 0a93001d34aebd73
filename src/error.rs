use std::io;
use thiserror::Error;

/// Errors surfaced while scanning the log directory.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors surfaced by one aggregation pass.
///
/// Unparsable lines are not errors at this level; they are counted and only
/// become fatal when their share of the stream exceeds the configured limit.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("error rate {actual:.2}% exceeds the allowed limit of {limit:.2}%")]
    ThresholdExceeded { limit: f64, actual: f64 },

    #[error("I/O error while reading log: {0}")]
    Io(#[from] io::Error),
}
