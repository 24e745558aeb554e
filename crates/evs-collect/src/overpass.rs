//! Overpass API client for candidate POIs.
//!
//! One POST per queried point, bundling the three node queries the analysis
//! cares about (`amenity=fuel`, `amenity=restaurant`, `tourism~hotel|motel`)
//! into a single Overpass QL request.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use evs_core::{GeoPoint, PoiId};

use crate::error::CollectResult;
use crate::types::{Poi, PoiCategory};
use crate::PoiSource;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Blocking Overpass client.
pub struct OverpassClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

// ── Response payload ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Deserialize)]
struct Element {
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: serde_json::Map<String, Value>,
}

// ── Client ────────────────────────────────────────────────────────────────────

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>) -> CollectResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { endpoint: endpoint.into(), client })
    }

    /// Overpass QL for all three POI categories around one point.
    fn query(center: GeoPoint, radius_m: u32) -> String {
        let GeoPoint { lat, lon } = center;
        format!(
            "[out:json];(\
             node[\"amenity\"=\"fuel\"](around:{radius_m},{lat},{lon});\
             node[\"amenity\"=\"restaurant\"](around:{radius_m},{lat},{lon});\
             node[\"tourism\"~\"hotel|motel\"](around:{radius_m},{lat},{lon});\
             );out body;"
        )
    }
}

impl PoiSource for OverpassClient {
    fn pois_near(&self, center: GeoPoint, radius_m: u32) -> CollectResult<Vec<Poi>> {
        let response: OverpassResponse = self
            .client
            .post(&self.endpoint)
            .body(Self::query(center, radius_m))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(parse_elements(response))
    }
}

// ── Payload mapping ───────────────────────────────────────────────────────────

fn parse_elements(response: OverpassResponse) -> Vec<Poi> {
    response
        .elements
        .into_iter()
        .filter_map(|el| {
            let (lat, lon) = (el.lat?, el.lon?);
            let category = categorize(&el.tags)?;
            let name = el
                .tags
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unnamed")
                .to_owned();
            Some(Poi {
                id: PoiId(el.id),
                pos: GeoPoint::new(lat, lon),
                name,
                category,
            })
        })
        .collect()
}

/// Map OSM tags onto the analysis categories; `None` drops the element
/// (skeleton nodes from way expansions carry no tags at all).
fn categorize(tags: &serde_json::Map<String, Value>) -> Option<PoiCategory> {
    match tags.get("amenity").and_then(Value::as_str) {
        Some("fuel") => return Some(PoiCategory::FuelStation),
        Some("restaurant") => return Some(PoiCategory::Restaurant),
        _ => {}
    }
    match tags.get("tourism").and_then(Value::as_str) {
        Some("hotel") | Some("motel") => Some(PoiCategory::Hotel),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_elements_json(json: &str) -> serde_json::Result<Vec<Poi>> {
    serde_json::from_str::<OverpassResponse>(json).map(parse_elements)
}
