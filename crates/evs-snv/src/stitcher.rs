//! Corridor reconstruction from registry segments.
//!
//! The registry has no explicit topology: consecutive stretches are linked
//! only by their endpoint place names, and those names break in two known
//! ways — kilometre markers that drift by a rounding error between rows,
//! and junctions where the corridor changes highway.  The stitcher walks
//! the table with an ordered list of [`ContinuationMatcher`] strategies,
//! trying each in turn:
//!
//! 1. [`ExactPlaceMatch`] — next stretch starts exactly where this one ends.
//! 2. [`KmToleranceMatch`] — same highway and state, start marker within a
//!    small tolerance of the current end marker.
//! 3. [`JunctionTransitionMatch`] — a different allowed highway whose start
//!    place references an interchange (`ENTR …`) with the current highway.
//!
//! A chain that cannot be extended is returned as-is with
//! `reached_destination == false`; downstream stages still work on a
//! partial corridor, just with reduced accuracy.

use log::{info, warn};
use rustc_hash::FxHashSet;

use evs_core::SegmentId;

use crate::error::{SnvError, SnvResult};
use crate::record::{normalize_highway_code, RoadSegment, SegmentTable};

// ── Request / result types ────────────────────────────────────────────────────

/// Parameters for one stitching run.
#[derive(Clone, Debug)]
pub struct StitchRequest {
    /// States the corridor is allowed to traverse (`sg_uf` codes).
    pub allowed_states: Vec<String>,
    /// Highways the corridor is allowed to use (any code form; normalized
    /// internally).
    pub allowed_highways: Vec<String>,
    /// State of the origin city.
    pub start_state: String,
    /// Highway the corridor leaves the origin on.
    pub start_highway: String,
    /// Case-insensitive substring of the destination's place name.
    pub destination_keyword: String,
    /// Kilometre tolerance for registry rounding breaks.
    pub km_tolerance: f64,
}

impl StitchRequest {
    pub const DEFAULT_KM_TOLERANCE: f64 = 5.0;
}

/// An ordered chain of registry segments; never contains a duplicate id.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteChain {
    pub segments: Vec<SegmentId>,
    /// `true` when the last segment's end place matched the destination
    /// keyword; `false` for a partial (broken) chain.
    pub reached_destination: bool,
}

impl RouteChain {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve the chain against its table.
    pub fn resolve<'t>(&self, table: &'t SegmentTable) -> Vec<&'t RoadSegment> {
        self.segments.iter().map(|&id| table.get(id)).collect()
    }

    /// Total chained length in kilometres.
    pub fn total_length_km(&self, table: &SegmentTable) -> f64 {
        self.segments.iter().map(|&id| table.get(id).length_km()).sum()
    }
}

// ── Continuation matchers ─────────────────────────────────────────────────────

/// One strategy for finding the segment that continues the chain.
///
/// Matchers only see the pre-filtered corridor pool and must never return a
/// visited id — the stitcher relies on that to terminate.
pub trait ContinuationMatcher {
    fn name(&self) -> &'static str;

    fn find(
        &self,
        table: &SegmentTable,
        current: &RoadSegment,
        pool: &[SegmentId],
        visited: &FxHashSet<SegmentId>,
    ) -> Option<SegmentId>;
}

/// Next stretch starts at exactly the place the current one ends.
pub struct ExactPlaceMatch;

impl ContinuationMatcher for ExactPlaceMatch {
    fn name(&self) -> &'static str {
        "exact-place"
    }

    fn find(
        &self,
        table: &SegmentTable,
        current: &RoadSegment,
        pool: &[SegmentId],
        visited: &FxHashSet<SegmentId>,
    ) -> Option<SegmentId> {
        pool.iter()
            .copied()
            .filter(|id| !visited.contains(id))
            .find(|&id| table.get(id).start_place == current.end_place)
    }
}

/// Same highway and state, start marker within `tolerance_km` of the
/// current end marker.  Handles off-by-rounding breaks in the registry.
pub struct KmToleranceMatch {
    pub tolerance_km: f64,
}

impl ContinuationMatcher for KmToleranceMatch {
    fn name(&self) -> &'static str {
        "km-tolerance"
    }

    fn find(
        &self,
        table: &SegmentTable,
        current: &RoadSegment,
        pool: &[SegmentId],
        visited: &FxHashSet<SegmentId>,
    ) -> Option<SegmentId> {
        pool.iter()
            .copied()
            .filter(|id| !visited.contains(id))
            .filter(|&id| {
                let s = table.get(id);
                s.highway == current.highway
                    && s.state == current.state
                    && (s.km_start - current.km_end).abs() < self.tolerance_km
            })
            .min_by(|&a, &b| table.get(a).km_start.total_cmp(&table.get(b).km_start))
    }
}

/// A different allowed highway, same state, whose start place references an
/// interchange with the current highway ("ENTR BR-116 …").  Handles
/// highway-to-highway transitions at junctions.
pub struct JunctionTransitionMatch;

impl JunctionTransitionMatch {
    /// Does `place` read as an interchange with highway `code`?
    fn references_junction(place: &str, code: &str) -> bool {
        let upper = place.to_uppercase();
        match upper.find("ENTR") {
            Some(i) => upper[i..].contains(code),
            None => false,
        }
    }
}

impl ContinuationMatcher for JunctionTransitionMatch {
    fn name(&self) -> &'static str {
        "junction-transition"
    }

    fn find(
        &self,
        table: &SegmentTable,
        current: &RoadSegment,
        pool: &[SegmentId],
        visited: &FxHashSet<SegmentId>,
    ) -> Option<SegmentId> {
        pool.iter()
            .copied()
            .filter(|id| !visited.contains(id))
            .filter(|&id| {
                let s = table.get(id);
                s.highway != current.highway
                    && s.state == current.state
                    && Self::references_junction(&s.start_place, &current.highway)
            })
            .min_by(|&a, &b| table.get(a).km_start.total_cmp(&table.get(b).km_start))
    }
}

// ── Stitcher ──────────────────────────────────────────────────────────────────

/// Walks the registry table, chaining segments via its matcher list.
pub struct Stitcher {
    matchers: Vec<Box<dyn ContinuationMatcher>>,
}

impl Stitcher {
    /// The standard matcher chain: exact place, km tolerance, junction
    /// transition — in that order.
    pub fn new(km_tolerance: f64) -> Self {
        Self {
            matchers: vec![
                Box::new(ExactPlaceMatch),
                Box::new(KmToleranceMatch { tolerance_km: km_tolerance }),
                Box::new(JunctionTransitionMatch),
            ],
        }
    }

    /// A stitcher with a caller-supplied matcher chain.
    pub fn with_matchers(matchers: Vec<Box<dyn ContinuationMatcher>>) -> Self {
        Self { matchers }
    }

    /// Build a [`RouteChain`] per `request`.
    ///
    /// Fails only when no segment matches the start criteria (a
    /// misconfiguration); an unreachable destination yields a partial chain
    /// with `reached_destination == false` and a warning.
    pub fn stitch(&self, table: &SegmentTable, request: &StitchRequest) -> SnvResult<RouteChain> {
        let highways: Vec<String> = request
            .allowed_highways
            .iter()
            .filter_map(|h| normalize_highway_code(h))
            .collect();
        let states: Vec<String> =
            request.allowed_states.iter().map(|s| s.trim().to_uppercase()).collect();

        let pool = table.filter_corridor(&states, &highways);
        info!("corridor pool: {} of {} registry segments", pool.len(), table.len());

        let start_state = request.start_state.trim().to_uppercase();
        let start_highway = normalize_highway_code(&request.start_highway)
            .unwrap_or_else(|| request.start_highway.clone());

        // Smallest start marker among the origin state+highway rows.
        let start = pool
            .iter()
            .copied()
            .filter(|&id| {
                let s = table.get(id);
                s.state == start_state && s.highway == start_highway
            })
            .min_by(|&a, &b| table.get(a).km_start.total_cmp(&table.get(b).km_start))
            .ok_or_else(|| SnvError::NoStartSegment {
                state:   start_state.clone(),
                highway: start_highway.clone(),
            })?;

        let keyword = request.destination_keyword.to_uppercase();
        let mut chain = vec![start];
        let mut visited: FxHashSet<SegmentId> = FxHashSet::default();
        visited.insert(start);
        let mut current = start;

        let reached = loop {
            let seg = table.get(current);
            if seg.end_place.to_uppercase().contains(&keyword) {
                break true;
            }

            let next = self
                .matchers
                .iter()
                .find_map(|m| m.find(table, seg, &pool, &visited));

            match next {
                Some(id) => {
                    chain.push(id);
                    visited.insert(id);
                    current = id;
                }
                None => {
                    warn!(
                        "route chain broken: no continuation from {:?} ({} segments so far)",
                        seg.end_place,
                        chain.len()
                    );
                    break false;
                }
            }
        };

        info!(
            "stitched {} segments, destination {}",
            chain.len(),
            if reached { "reached" } else { "NOT reached" }
        );

        Ok(RouteChain { segments: chain, reached_destination: reached })
    }
}
