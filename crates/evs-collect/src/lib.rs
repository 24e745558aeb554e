//! `evs-collect` — external data collectors.
//!
//! Three collaborator kinds feed the pipeline, each behind a trait so the
//! orchestration (and the tests) never touch HTTP directly:
//!
//! | Trait             | Production impl                       | Returns            |
//! |-------------------|---------------------------------------|--------------------|
//! | [`RouteSource`]   | [`OsrmClient`] (OSRM demo server)     | ordered waypoints  |
//! | [`PoiSource`]     | [`OverpassClient`] (Overpass API)     | fuel/food/lodging  |
//! | [`StationSource`] | [`OpenChargeMapClient`]               | competitor chargers|
//!
//! All calls are synchronous and sequential; [`sweep`] walks sampled route
//! waypoints with a fixed sleep between calls to respect the public rate
//! limits, deduplicates by upstream id, and degrades gracefully — a failed
//! call is a warning and fewer candidates, never a pipeline abort.

pub mod error;
pub mod ocm;
pub mod osrm;
pub mod overpass;
pub mod sweep;
pub mod types;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CollectError, CollectResult};
pub use ocm::OpenChargeMapClient;
pub use osrm::OsrmClient;
pub use overpass::OverpassClient;
pub use sweep::{collect_pois_along, collect_stations_along, SweepParams};
pub use types::{Poi, PoiCategory, Station};

use evs_core::GeoPoint;

/// Produces a driving route between two points.
pub trait RouteSource {
    /// Ordered waypoints approximating the driving path, or an empty vec
    /// when the router knows no route between the points.
    fn driving_route(&self, from: GeoPoint, to: GeoPoint) -> CollectResult<Vec<GeoPoint>>;
}

/// Produces candidate POIs around a point.
pub trait PoiSource {
    fn pois_near(&self, center: GeoPoint, radius_m: u32) -> CollectResult<Vec<Poi>>;
}

/// Produces existing competitor charging stations around a point.
pub trait StationSource {
    fn stations_near(&self, center: GeoPoint, radius_km: f64) -> CollectResult<Vec<Station>>;
}
