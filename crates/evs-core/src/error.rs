//! Pipeline-wide error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `SitingError` via `From` impls or keep them separate and wrap
//! `SitingError` as one variant.  Both patterns are acceptable; prefer
//! whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `evs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SitingError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `evs-*` crates.
pub type SitingResult<T> = Result<T, SitingError>;
