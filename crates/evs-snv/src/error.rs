//! SNV-subsystem error type.

use thiserror::Error;

/// Errors produced by `evs-snv`.
#[derive(Debug, Error)]
pub enum SnvError {
    #[error("no segment of BR-{highway} found in {state}")]
    NoStartSegment { state: String, highway: String },

    #[error("CSV parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SnvResult<T> = Result<T, SnvError>;
