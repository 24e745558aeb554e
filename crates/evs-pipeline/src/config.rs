//! TOML run configuration.
//!
//! # Example
//!
//! ```toml
//! snv_registry = "data/snv_2024.csv"
//! output_dir   = "output"
//!
//! [apis]
//! ocm_api_key = "your-key-here"
//!
//! [weights]
//! window     = 0.6
//! competitor = 0.3
//! traffic    = 0.1
//!
//! [[vehicles]]
//! name        = "compact-ev"
//! autonomy_km = 300.0
//! color       = "blue"
//!
//! [[routes]]
//! name                = "curitiba-sao-paulo"
//! origin              = { lat = -25.4284, lon = -49.2733 }
//! destination         = { lat = -23.5505, lon = -46.6333 }
//! destination_keyword = "SAO PAULO"
//! start_state         = "PR"
//! start_highway       = "116"
//! allowed_states      = ["PR", "SP"]
//! allowed_highways    = ["116"]
//! ```
//!
//! Every `[analysis]` and `[apis]` key has a default; routes, vehicles,
//! the registry path, and weights are validated for presence and sanity at
//! load time so a typo fails the run up front instead of mid-sweep.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use evs_core::{GeoPoint, SitingError, SitingResult, VehicleProfile};
use evs_score::ScoreWeights;

// ── Config tree ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Path to the SNV registry CSV.
    pub snv_registry: PathBuf,
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub apis: ApiConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub weights: WeightsConfig,
    pub vehicles: Vec<VehicleProfile>,
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "defaults::osrm_url")]
    pub osrm_url: String,
    #[serde(default = "defaults::overpass_url")]
    pub overpass_url: String,
    #[serde(default = "defaults::ocm_url")]
    pub ocm_url: String,
    /// Without a key the competitor sweep is skipped (everything scores
    /// as if no competition exists) — allowed, but warned about.
    #[serde(default)]
    pub ocm_api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            osrm_url: defaults::osrm_url(),
            overpass_url: defaults::overpass_url(),
            ocm_url: defaults::ocm_url(),
            ocm_api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// POI search radius per Overpass query, metres.
    #[serde(default = "defaults::poi_radius_m")]
    pub poi_radius_m: u32,
    /// Station search radius per OpenChargeMap query, kilometres.
    #[serde(default = "defaults::station_radius_km")]
    pub station_radius_km: f64,
    /// Query every Nth waypoint for POIs.
    #[serde(default = "defaults::poi_stride")]
    pub poi_stride: usize,
    /// Query every Nth waypoint for stations.
    #[serde(default = "defaults::station_stride")]
    pub station_stride: usize,
    /// Index every Nth waypoint for route-proximity queries.
    #[serde(default = "defaults::index_stride")]
    pub index_stride: usize,
    /// Candidates farther than this from the route are excluded, km.
    #[serde(default = "defaults::max_route_distance_km")]
    pub max_route_distance_km: f64,
    /// Daily traffic volume that maps to a traffic score of 1.0.
    #[serde(default = "defaults::traffic_reference")]
    pub traffic_reference: f64,
    /// Stitcher kilometre tolerance for registry breaks.
    #[serde(default = "defaults::km_tolerance")]
    pub km_tolerance: f64,
    /// Sleep between Overpass calls, seconds.
    #[serde(default = "defaults::poi_pace_secs")]
    pub poi_pace_secs: f64,
    /// Sleep between OpenChargeMap calls, seconds.
    #[serde(default = "defaults::station_pace_secs")]
    pub station_pace_secs: f64,
    /// Candidate markers drawn on the map.
    #[serde(default = "defaults::top_n_markers")]
    pub top_n_markers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        // serde's field defaults and Default must agree; route both
        // through the same functions.
        Self {
            poi_radius_m: defaults::poi_radius_m(),
            station_radius_km: defaults::station_radius_km(),
            poi_stride: defaults::poi_stride(),
            station_stride: defaults::station_stride(),
            index_stride: defaults::index_stride(),
            max_route_distance_km: defaults::max_route_distance_km(),
            traffic_reference: defaults::traffic_reference(),
            km_tolerance: defaults::km_tolerance(),
            poi_pace_secs: defaults::poi_pace_secs(),
            station_pace_secs: defaults::station_pace_secs(),
            top_n_markers: defaults::top_n_markers(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightsConfig {
    pub window: f64,
    pub competitor: f64,
    pub traffic: f64,
}

impl WeightsConfig {
    pub fn to_weights(&self) -> ScoreWeights {
        ScoreWeights {
            window: self.window,
            competitor: self.competitor,
            traffic: self.traffic,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Used in log lines and output file names.
    pub name: String,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    /// Substring of the SNV place name where stitching stops.
    pub destination_keyword: String,
    pub start_state: String,
    pub start_highway: String,
    pub allowed_states: Vec<String>,
    pub allowed_highways: Vec<String>,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

mod defaults {
    use std::path::PathBuf;

    pub fn output_dir() -> PathBuf {
        PathBuf::from("output")
    }
    pub fn osrm_url() -> String {
        evs_collect::osrm::DEFAULT_OSRM_URL.to_owned()
    }
    pub fn overpass_url() -> String {
        evs_collect::overpass::DEFAULT_OVERPASS_URL.to_owned()
    }
    pub fn ocm_url() -> String {
        evs_collect::ocm::DEFAULT_OCM_URL.to_owned()
    }
    pub fn poi_radius_m() -> u32 {
        7_000
    }
    pub fn station_radius_km() -> f64 {
        15.0
    }
    pub fn poi_stride() -> usize {
        20
    }
    pub fn station_stride() -> usize {
        50
    }
    pub fn index_stride() -> usize {
        5
    }
    pub fn max_route_distance_km() -> f64 {
        15.0
    }
    pub fn traffic_reference() -> f64 {
        20_000.0
    }
    pub fn km_tolerance() -> f64 {
        5.0
    }
    pub fn poi_pace_secs() -> f64 {
        1.0
    }
    pub fn station_pace_secs() -> f64 {
        0.5
    }
    pub fn top_n_markers() -> usize {
        20
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl PipelineConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> SitingResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig =
            toml::from_str(&text).map_err(|e| SitingError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SitingResult<()> {
        if self.routes.is_empty() {
            return Err(SitingError::Config("no routes configured".into()));
        }
        if self.vehicles.is_empty() {
            return Err(SitingError::Config("no vehicles configured".into()));
        }
        if let Some(v) = self.vehicles.iter().find(|v| v.autonomy_km <= 0.0) {
            return Err(SitingError::Config(format!(
                "vehicle {:?} has non-positive autonomy",
                v.name
            )));
        }
        self.weights
            .to_weights()
            .validate()
            .map_err(|e| SitingError::Config(e.to_string()))?;
        let analysis = &self.analysis;
        if !analysis.station_radius_km.is_finite() || analysis.station_radius_km <= 0.0 {
            return Err(SitingError::Config(format!(
                "station_radius_km must be positive, got {}",
                analysis.station_radius_km
            )));
        }
        if analysis.poi_radius_m == 0 {
            return Err(SitingError::Config("poi_radius_m must be positive".into()));
        }
        if analysis.poi_stride == 0 || analysis.station_stride == 0 || analysis.index_stride == 0
        {
            return Err(SitingError::Config("waypoint strides must be at least 1".into()));
        }
        for route in &self.routes {
            if route.allowed_states.is_empty() || route.allowed_highways.is_empty() {
                return Err(SitingError::Config(format!(
                    "route {:?} has empty allowed states or highways",
                    route.name
                )));
            }
        }
        Ok(())
    }
}
