//! OpenChargeMap client for existing competitor stations.

use std::time::Duration;

use serde::Deserialize;

use evs_core::{GeoPoint, StationId};

use crate::error::CollectResult;
use crate::types::Station;
use crate::StationSource;

pub const DEFAULT_OCM_URL: &str = "https://api.openchargemap.io/v3/poi/";

const SOURCE_NAME: &str = "openchargemap";

/// Blocking OpenChargeMap client.  Results are restricted to Brazil
/// (`countrycode=BR`), matching the corridor registry's coverage.
pub struct OpenChargeMapClient {
    endpoint: String,
    api_key: String,
    max_results: u32,
    client: reqwest::blocking::Client,
}

// ── Response payload ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OcmPoi {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "AddressInfo")]
    address: OcmAddressInfo,
}

#[derive(Deserialize)]
struct OcmAddressInfo {
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

// ── Client ────────────────────────────────────────────────────────────────────

impl OpenChargeMapClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> CollectResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            max_results: 50,
            client,
        })
    }
}

impl StationSource for OpenChargeMapClient {
    fn stations_near(&self, center: GeoPoint, radius_km: f64) -> CollectResult<Vec<Station>> {
        let pois: Vec<OcmPoi> = self
            .client
            .get(&self.endpoint)
            .header("X-API-Key", &self.api_key)
            .query(&[
                ("output", "json".to_owned()),
                ("countrycode", "BR".to_owned()),
                ("latitude", center.lat.to_string()),
                ("longitude", center.lon.to_string()),
                ("distance", radius_km.to_string()),
                ("distanceunit", "KM".to_owned()),
                ("maxresults", self.max_results.to_string()),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(parse_stations(pois))
    }
}

fn parse_stations(pois: Vec<OcmPoi>) -> Vec<Station> {
    pois.into_iter()
        .map(|p| Station {
            id: StationId(p.id),
            pos: GeoPoint::new(p.address.latitude, p.address.longitude),
            name: p.address.title.unwrap_or_else(|| "unnamed".to_owned()),
            source: SOURCE_NAME.to_owned(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn parse_stations_json(json: &str) -> serde_json::Result<Vec<Station>> {
    serde_json::from_str::<Vec<OcmPoi>>(json).map(parse_stations)
}
