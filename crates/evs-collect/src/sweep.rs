//! Corridor sweep: query a source at sampled route waypoints, deduplicate,
//! pace the calls.
//!
//! Both public APIs rate-limit aggressively, so the sweep queries every
//! `stride`-th waypoint with a fixed sleep between calls.  A failed call is
//! logged and skipped — the analysis proceeds with whatever the surviving
//! calls returned.  Deduplication is keyed on the upstream id and preserves
//! first-seen order, so two runs over the same data rank ties identically.

use std::time::Duration;

use log::{debug, warn};
use rustc_hash::FxHashSet;

use evs_core::GeoPoint;

use crate::types::{Poi, Station};
use crate::{PoiSource, StationSource};

/// Sampling and pacing for one sweep.
#[derive(Clone, Copy, Debug)]
pub struct SweepParams {
    /// Query every `stride`-th waypoint (≥ 1).
    pub stride: usize,
    /// Search radius per query, metres.
    pub radius_m: u32,
    /// Sleep between consecutive calls.
    pub pace: Duration,
}

/// Collect unique POIs along the route.
pub fn collect_pois_along(
    source: &dyn PoiSource,
    waypoints: &[GeoPoint],
    params: SweepParams,
) -> Vec<Poi> {
    let mut seen = FxHashSet::default();
    let mut pois = Vec::new();

    for (i, center) in sample(waypoints, params.stride).enumerate() {
        if i > 0 {
            std::thread::sleep(params.pace);
        }
        match source.pois_near(center, params.radius_m) {
            Ok(batch) => {
                debug!("POI query {i} at {center}: {} results", batch.len());
                for poi in batch {
                    if seen.insert(poi.id) {
                        pois.push(poi);
                    }
                }
            }
            Err(e) => warn!("POI query {i} at {center} failed: {e}"),
        }
    }
    pois
}

/// Collect unique competitor stations along the route.
pub fn collect_stations_along(
    source: &dyn StationSource,
    waypoints: &[GeoPoint],
    params: SweepParams,
) -> Vec<Station> {
    let radius_km = f64::from(params.radius_m) / 1_000.0;
    let mut seen = FxHashSet::default();
    let mut stations = Vec::new();

    for (i, center) in sample(waypoints, params.stride).enumerate() {
        if i > 0 {
            std::thread::sleep(params.pace);
        }
        match source.stations_near(center, radius_km) {
            Ok(batch) => {
                debug!("station query {i} at {center}: {} results", batch.len());
                for station in batch {
                    if seen.insert(station.id) {
                        stations.push(station);
                    }
                }
            }
            Err(e) => warn!("station query {i} at {center} failed: {e}"),
        }
    }
    stations
}

/// Every `stride`-th waypoint; a non-empty route always yields at least its
/// first point, even when `stride` exceeds the route length.
fn sample(waypoints: &[GeoPoint], stride: usize) -> impl Iterator<Item = GeoPoint> + '_ {
    waypoints.iter().copied().step_by(stride.max(1))
}
