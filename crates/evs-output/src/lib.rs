//! `evs-output` — run artifacts.
//!
//! Two files per analyzed route:
//!
//! | Module    | Artifact                                               |
//! |-----------|--------------------------------------------------------|
//! | [`table`] | `*_ranked.csv` — the scored candidate table            |
//! | [`map`]   | `*_map.html` — self-contained interactive Leaflet map  |

pub mod error;
pub mod map;
pub mod table;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OutputError, OutputResult};
pub use map::{write_map_html, MapSpec};
pub use table::RankedTableWriter;
