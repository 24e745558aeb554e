//! Spatial index over sampled route waypoints.
//!
//! An R-tree (via `rstar`) answers "how far is this candidate from the
//! route" without scanning every waypoint.  Nearest-neighbour selection
//! runs in squared lat/lon space — adequate for picking the closest sample
//! along a corridor — and the reported distance is then computed with the
//! haversine formula on the winning point.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use evs_core::GeoPoint;

use crate::error::{ScoreError, ScoreResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// One sampled waypoint: a 2-D `[lat, lon]` point.
#[derive(Clone)]
struct SampleEntry {
    point: [f64; 2], // [lat, lon]
}

impl RTreeObject for SampleEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SampleEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RouteIndex ────────────────────────────────────────────────────────────────

/// Sampled route waypoints in an R-tree, plus the route origin.
pub struct RouteIndex {
    tree: RTree<SampleEntry>,
    origin: GeoPoint,
}

impl RouteIndex {
    /// Index every `stride`-th waypoint of `route`.
    ///
    /// The origin (first waypoint) is always indexed regardless of stride.
    /// Fails on an empty route.
    pub fn build(route: &[GeoPoint], stride: usize) -> ScoreResult<Self> {
        let origin = *route.first().ok_or(ScoreError::EmptyRoute)?;
        let entries: Vec<SampleEntry> = route
            .iter()
            .step_by(stride.max(1))
            .map(|p| SampleEntry { point: [p.lat, p.lon] })
            .collect();
        Ok(Self { tree: RTree::bulk_load(entries), origin })
    }

    /// First waypoint of the route.
    #[inline]
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Haversine distance from `point` to the nearest indexed waypoint, km.
    pub fn distance_to_route_km(&self, point: GeoPoint) -> f64 {
        let nearest = self
            .tree
            .nearest_neighbor(&[point.lat, point.lon])
            .map(|e| GeoPoint::new(e.point[0], e.point[1]))
            .unwrap_or(self.origin); // tree is never empty (origin always indexed)
        point.distance_km(nearest)
    }

    /// Straight-line distance from the route origin to `point`, km.
    #[inline]
    pub fn distance_from_origin_km(&self, point: GeoPoint) -> f64 {
        self.origin.distance_km(point)
    }
}
