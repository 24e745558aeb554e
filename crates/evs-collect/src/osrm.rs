//! OSRM routing client.
//!
//! Talks to an OSRM `route` endpoint with `overview=full&geometries=geojson`
//! and returns the route geometry as ordered waypoints.  The public demo
//! server works for exploratory runs; point `base_url` at a self-hosted
//! instance for anything heavier.

use std::time::Duration;

use log::warn;
use serde::Deserialize;

use evs_core::GeoPoint;

use crate::error::CollectResult;
use crate::RouteSource;

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// Blocking OSRM client.
pub struct OsrmClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

// ── Response payload ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    /// GeoJSON LineString coordinates: `[longitude, latitude]` pairs.
    coordinates: Vec<[f64; 2]>,
}

// ── Client ────────────────────────────────────────────────────────────────────

impl OsrmClient {
    pub fn new(base_url: impl Into<String>) -> CollectResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { base_url: base_url.into(), client })
    }

    fn route_url(&self, from: GeoPoint, to: GeoPoint) -> String {
        // OSRM takes lon,lat order.
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url.trim_end_matches('/'),
            from.lon,
            from.lat,
            to.lon,
            to.lat,
        )
    }
}

impl RouteSource for OsrmClient {
    fn driving_route(&self, from: GeoPoint, to: GeoPoint) -> CollectResult<Vec<GeoPoint>> {
        let url = self.route_url(from, to);
        let response: RouteResponse =
            self.client.get(&url).send()?.error_for_status()?.json()?;
        Ok(parse_route(response))
    }
}

/// Extract the first route's waypoints; no route is empty, not an error.
fn parse_route(response: RouteResponse) -> Vec<GeoPoint> {
    match response.routes.into_iter().next() {
        Some(route) => route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| GeoPoint::from_lon_lat(lon, lat))
            .collect(),
        None => {
            warn!("OSRM returned no route");
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) fn parse_route_json(json: &str) -> serde_json::Result<Vec<GeoPoint>> {
    serde_json::from_str::<RouteResponse>(json).map(parse_route)
}
