//! Per-route pipeline orchestration.
//!
//! One [`run`] call processes every configured route in sequence.  Failure
//! policy, per the degradation ladder the analysis tolerates:
//!
//! - missing/malformed config or registry → the whole run aborts (handled
//!   by the caller before `run` is reached, or as the registry load error);
//! - no OSRM route → that route is skipped with a warning;
//! - no stitchable corridor → traffic figure falls back to 0, the route
//!   continues;
//! - failed POI/station calls → fewer candidates, handled inside the sweep;
//! - missing OCM key → competitor sweep skipped entirely, one warning.

use std::time::Duration;

use anyhow::Context;
use log::{info, warn};

use evs_collect::{
    collect_pois_along, collect_stations_along, OpenChargeMapClient, OsrmClient,
    OverpassClient, RouteSource, Station, SweepParams,
};
use evs_core::VehicleProfile;
use evs_output::{write_map_html, MapSpec, RankedTableWriter};
use evs_score::{rank_candidates, RouteIndex, ScoreParams};
use evs_snv::{load_registry_csv, mean_daily_traffic, SegmentTable, StitchRequest, Stitcher};

use crate::config::{PipelineConfig, RouteConfig};

/// Run the full analysis for every configured route.
pub fn run(config: &PipelineConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output dir {:?}", config.output_dir))?;

    let table = load_registry_csv(&config.snv_registry)
        .with_context(|| format!("loading SNV registry {:?}", config.snv_registry))?;
    info!("SNV registry loaded: {} segments", table.len());

    let osrm = OsrmClient::new(config.apis.osrm_url.clone())?;
    let overpass = OverpassClient::new(config.apis.overpass_url.clone())?;
    let ocm = match &config.apis.ocm_api_key {
        Some(key) => Some(OpenChargeMapClient::new(config.apis.ocm_url.clone(), key.clone())?),
        None => {
            warn!("no OpenChargeMap API key configured; competitor sweep disabled");
            None
        }
    };

    for route in &config.routes {
        info!("── route {:?} ──", route.name);
        if let Err(e) = run_route(config, &table, &osrm, &overpass, ocm.as_ref(), route) {
            warn!("route {:?} aborted: {e:#}", route.name);
        }
    }
    Ok(())
}

fn run_route(
    config: &PipelineConfig,
    table: &SegmentTable,
    osrm: &OsrmClient,
    overpass: &OverpassClient,
    ocm: Option<&OpenChargeMapClient>,
    route: &RouteConfig,
) -> anyhow::Result<()> {
    let analysis = &config.analysis;

    // 1. Driving route.
    let waypoints = osrm
        .driving_route(route.origin, route.destination)
        .context("fetching driving route")?;
    if waypoints.is_empty() {
        anyhow::bail!("router returned no route");
    }
    info!("route geometry: {} waypoints", waypoints.len());

    // 2. Corridor traffic.
    let request = StitchRequest {
        allowed_states:      route.allowed_states.clone(),
        allowed_highways:    route.allowed_highways.clone(),
        start_state:         route.start_state.clone(),
        start_highway:       route.start_highway.clone(),
        destination_keyword: route.destination_keyword.clone(),
        km_tolerance:        analysis.km_tolerance,
    };
    let mean_traffic = match Stitcher::new(analysis.km_tolerance).stitch(table, &request) {
        Ok(chain) => {
            let vmd = mean_daily_traffic(&chain, table);
            info!(
                "corridor: {} segments, {:.0} km, mean VMD {vmd:.0}",
                chain.len(),
                chain.total_length_km(table)
            );
            vmd
        }
        Err(e) => {
            warn!("corridor stitching failed ({e}); traffic score will be 0");
            0.0
        }
    };

    // 3. Candidates and competitors.
    let pois = collect_pois_along(
        overpass,
        &waypoints,
        SweepParams {
            stride:   analysis.poi_stride,
            radius_m: analysis.poi_radius_m,
            pace:     Duration::from_secs_f64(analysis.poi_pace_secs),
        },
    );
    info!("{} unique candidate POIs", pois.len());

    let stations: Vec<Station> = match ocm {
        Some(client) => collect_stations_along(
            client,
            &waypoints,
            SweepParams {
                stride:   analysis.station_stride,
                radius_m: (analysis.station_radius_km * 1_000.0) as u32,
                pace:     Duration::from_secs_f64(analysis.station_pace_secs),
            },
        ),
        None => Vec::new(),
    };
    info!("{} existing competitor stations", stations.len());

    // 4. Score and write artifacts, one set per vehicle profile.
    let index = RouteIndex::build(&waypoints, analysis.index_stride)?;
    let params = ScoreParams {
        weights: config.weights.to_weights(),
        max_route_distance_km: analysis.max_route_distance_km,
        traffic_reference: analysis.traffic_reference,
        ..ScoreParams::default()
    };

    for vehicle in &config.vehicles {
        let ranked = rank_candidates(&pois, &stations, &index, mean_traffic, vehicle, &params)?;
        info!(
            "vehicle {:?}: {} ranked candidates, best score {:.3}",
            vehicle.name,
            ranked.len(),
            ranked.first().map_or(0.0, |c| c.potential)
        );
        write_artifacts(config, route, vehicle, &waypoints, &ranked, &stations)?;
    }
    Ok(())
}

fn write_artifacts(
    config: &PipelineConfig,
    route: &RouteConfig,
    vehicle: &VehicleProfile,
    waypoints: &[evs_core::GeoPoint],
    ranked: &[evs_score::ScoredCandidate],
    stations: &[Station],
) -> anyhow::Result<()> {
    let stem = format!("{}_{}", slug(&route.name), slug(&vehicle.name));

    let table_path = config.output_dir.join(format!("{stem}_ranked.csv"));
    let mut writer = RankedTableWriter::new(&table_path)?;
    writer.write_candidates(ranked)?;
    writer.finish()?;
    info!("wrote {table_path:?}");

    let map_path = config.output_dir.join(format!("{stem}_map.html"));
    write_map_html(
        &map_path,
        &MapSpec {
            title: &format!("{} — {}", route.name, vehicle.name),
            route: waypoints,
            candidates: ranked,
            stations,
            vehicle,
            top_n: config.analysis.top_n_markers,
        },
    )?;
    info!("wrote {map_path:?}");
    Ok(())
}

/// File-name-safe version of a config name.
pub(crate) fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
