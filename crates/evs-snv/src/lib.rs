//! `evs-snv` — SNV highway registry handling.
//!
//! The SNV (Sistema Nacional de Viação) registry is a tabular dump of
//! federal highway segments: one row per stretch, keyed by state and
//! highway code, with kilometre markers, endpoint place names, and mean
//! daily traffic (VMD) per direction.  This crate turns that table into a
//! contiguous corridor:
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`record`]   | `RoadSegment`, `SegmentTable`, highway-code handling  |
//! | [`loader`]   | Semicolon/Latin-1/decimal-comma CSV loading           |
//! | [`stitcher`] | Segment-chain reconstruction with fallback matchers   |
//! | [`traffic`]  | Length-weighted mean VMD for a stitched chain         |
//! | [`error`]    | `SnvError`, `SnvResult`                               |

pub mod error;
pub mod loader;
pub mod record;
pub mod stitcher;
pub mod traffic;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SnvError, SnvResult};
pub use loader::{load_registry_csv, load_registry_reader};
pub use record::{normalize_highway_code, RoadSegment, SegmentTable};
pub use stitcher::{RouteChain, StitchRequest, Stitcher};
pub use traffic::mean_daily_traffic;
