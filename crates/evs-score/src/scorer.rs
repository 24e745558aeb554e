//! Composite potential score and ranking.
//!
//! Candidates beyond `max_route_distance_km` of the nearest sampled route
//! point are excluded up front; the survivors get three sub-scores in
//! `[0, 1]` and a weighted composite.  When the weights sum to 1 the
//! composite is a convex combination and also lands in `[0, 1]`.

use log::info;

use evs_collect::{Poi, Station};
use evs_core::norm::ratio_to_reference;
use evs_core::{GeoPoint, Normalization, VehicleProfile};

use crate::error::{ScoreError, ScoreResult};
use crate::route_index::RouteIndex;
use crate::window::window_score;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Weights of the three score axes.  Must be non-negative and not all
/// zero; convexity (summing to 1) is the caller's choice, not enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    pub window: f64,
    pub competitor: f64,
    pub traffic: f64,
}

impl Default for ScoreWeights {
    /// The 0.60 / 0.30 / 0.10 split used throughout the corridor studies.
    fn default() -> Self {
        Self { window: 0.60, competitor: 0.30, traffic: 0.10 }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> ScoreResult<()> {
        let all = [self.window, self.competitor, self.traffic];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScoreError::InvalidWeights(
                "weights must be finite and non-negative".into(),
            ));
        }
        if all.iter().sum::<f64>() == 0.0 {
            return Err(ScoreError::InvalidWeights("weights must not all be zero".into()));
        }
        Ok(())
    }
}

/// Full parameter set for one ranking run.
#[derive(Clone, Copy, Debug)]
pub struct ScoreParams {
    pub weights: ScoreWeights,
    /// Candidates farther than this from the route are excluded.
    pub max_route_distance_km: f64,
    /// Reference daily traffic volume mapping to a traffic score of 1.0.
    pub traffic_reference: f64,
    /// Policy for normalizing competitor distances over the candidate set.
    pub competitor_norm: Normalization,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            max_route_distance_km: 15.0,
            traffic_reference: 20_000.0,
            competitor_norm: Normalization::RatioToMax,
        }
    }
}

// ── Result type ───────────────────────────────────────────────────────────────

/// A candidate with its derived distances and scores.
#[derive(Clone, Debug)]
pub struct ScoredCandidate {
    pub poi: Poi,
    pub dist_to_route_km: f64,
    pub dist_from_origin_km: f64,
    /// `+∞` when no competitor station exists anywhere.
    pub dist_to_competitor_km: f64,
    pub window_score: f64,
    pub competitor_score: f64,
    pub traffic_score: f64,
    pub potential: f64,
}

// ── Ranking ───────────────────────────────────────────────────────────────────

/// Score and rank `pois` against the route, competitor stations, and
/// corridor traffic.  Returns candidates sorted by descending potential;
/// the sort is stable, so ties keep insertion (first-seen) order.
pub fn rank_candidates(
    pois: &[Poi],
    stations: &[Station],
    route: &RouteIndex,
    mean_traffic: f64,
    vehicle: &VehicleProfile,
    params: &ScoreParams,
) -> ScoreResult<Vec<ScoredCandidate>> {
    params.weights.validate()?;

    // Traffic is a route-level figure, identical for every candidate.
    let traffic_score = ratio_to_reference(mean_traffic, params.traffic_reference);

    // Proximity filter + per-candidate distances.
    let mut candidates: Vec<ScoredCandidate> = pois
        .iter()
        .filter_map(|poi| {
            let dist_to_route_km = route.distance_to_route_km(poi.pos);
            if dist_to_route_km > params.max_route_distance_km {
                return None;
            }
            let dist_from_origin_km = route.distance_from_origin_km(poi.pos);
            Some(ScoredCandidate {
                poi: poi.clone(),
                dist_to_route_km,
                dist_from_origin_km,
                dist_to_competitor_km: nearest_station_km(poi.pos, stations),
                window_score: window_score(dist_from_origin_km, vehicle),
                competitor_score: 0.0, // filled below
                traffic_score,
                potential: 0.0, // filled below
            })
        })
        .collect();

    info!(
        "{} of {} candidates within {} km of the route",
        candidates.len(),
        pois.len(),
        params.max_route_distance_km
    );

    // Competitor scores need the whole set for normalization.
    let mut competitor_scores: Vec<f64> =
        candidates.iter().map(|c| c.dist_to_competitor_km).collect();
    params.competitor_norm.apply(&mut competitor_scores);

    let w = params.weights;
    for (candidate, competitor_score) in candidates.iter_mut().zip(competitor_scores) {
        candidate.competitor_score = competitor_score;
        candidate.potential = candidate.window_score * w.window
            + competitor_score * w.competitor
            + candidate.traffic_score * w.traffic;
    }

    // Stable sort keeps insertion order on ties.
    candidates.sort_by(|a, b| b.potential.total_cmp(&a.potential));
    Ok(candidates)
}

/// Distance to the nearest competitor station; `+∞` when there is none,
/// which normalizes to a full competitor score.
fn nearest_station_km(point: GeoPoint, stations: &[Station]) -> f64 {
    stations
        .iter()
        .map(|s| point.distance_km(s.pos))
        .fold(f64::INFINITY, f64::min)
}
