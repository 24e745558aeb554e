//! `evs-core` — foundational types for the `ev-siting` corridor analysis
//! pipeline.
//!
//! This crate is a dependency of every other `evs-*` crate.  It intentionally
//! has no `evs-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`geo`]     | `GeoPoint`, haversine distance                      |
//! | [`ids`]     | `SegmentId`, `PoiId`, `StationId`                   |
//! | [`vehicle`] | `VehicleProfile`, autonomy-window bounds            |
//! | [`norm`]    | normalization helpers with divide-by-zero guards    |
//! | [`error`]   | `SitingError`, `SitingResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.      |
//!           | Required by `evs-pipeline` (TOML config).                |

pub mod error;
pub mod geo;
pub mod ids;
pub mod norm;
pub mod vehicle;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SitingError, SitingResult};
pub use geo::GeoPoint;
pub use ids::{PoiId, SegmentId, StationId};
pub use norm::Normalization;
pub use vehicle::VehicleProfile;
