//! Scoring-subsystem error type.

use thiserror::Error;

/// Errors produced by `evs-score`.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("route has no waypoints")]
    EmptyRoute,
}

pub type ScoreResult<T> = Result<T, ScoreError>;
