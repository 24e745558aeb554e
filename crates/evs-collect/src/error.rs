//! Collector-subsystem error type.

use thiserror::Error;

/// Errors produced by `evs-collect`.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected payload from {source_name}: {detail}")]
    Payload { source_name: &'static str, detail: String },
}

pub type CollectResult<T> = Result<T, CollectError>;
