//! Unit tests for evs-output.

use evs_collect::{Poi, PoiCategory, Station};
use evs_core::{GeoPoint, PoiId, StationId, VehicleProfile};
use evs_score::ScoredCandidate;

use crate::map::{render_for_test, MapSpec};
use crate::table::RankedTableWriter;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn candidate(id: u64, potential: f64, competitor_km: f64) -> ScoredCandidate {
    ScoredCandidate {
        poi: Poi {
            id: PoiId(id),
            pos: GeoPoint::new(-24.5, -48.5),
            name: format!("Posto {id}"),
            category: PoiCategory::FuelStation,
        },
        dist_to_route_km: 2.5,
        dist_from_origin_km: 210.0,
        dist_to_competitor_km: competitor_km,
        window_score: 1.0,
        competitor_score: 0.8,
        traffic_score: 0.5,
        potential,
    }
}

fn vehicle() -> VehicleProfile {
    VehicleProfile { name: "test-ev".into(), autonomy_km: 300.0, color: "blue".into() }
}

// ── Ranked table ──────────────────────────────────────────────────────────────

mod table {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked.csv");

        let mut writer = RankedTableWriter::new(&path).unwrap();
        writer
            .write_candidates(&[candidate(1, 0.95, 12.0), candidate(2, 0.80, 40.0)])
            .unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,latitude,longitude,name,category"));
        assert!(lines[1].starts_with("1,"));
        assert!(lines[1].contains("Posto 1"));
        assert!(lines[2].starts_with("2,"));
    }

    #[test]
    fn infinite_competitor_distance_is_an_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked.csv");

        let mut writer = RankedTableWriter::new(&path).unwrap();
        writer
            .write_candidates(&[candidate(1, 0.95, f64::INFINITY)])
            .unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("inf"));
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked.csv");
        let mut writer = RankedTableWriter::new(&path).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

// ── Map artifact ──────────────────────────────────────────────────────────────

mod map {
    use super::*;

    fn spec_data() -> (Vec<GeoPoint>, Vec<ScoredCandidate>, Vec<Station>, VehicleProfile) {
        let route = vec![GeoPoint::new(-25.4, -49.3), GeoPoint::new(-23.6, -46.6)];
        let candidates = vec![candidate(1, 0.95, 12.0), candidate(2, 0.80, 40.0)];
        let stations = vec![Station {
            id: StationId(7),
            pos: GeoPoint::new(-24.0, -47.5),
            name: "Existing".into(),
            source: "openchargemap".into(),
        }];
        (route, candidates, stations, vehicle())
    }

    #[test]
    fn renders_standalone_html() {
        let (route, candidates, stations, v) = spec_data();
        let html = render_for_test(&MapSpec {
            title: "Curitiba - Sao Paulo",
            route: &route,
            candidates: &candidates,
            stations: &stations,
            vehicle: &v,
            top_n: 20,
        })
        .unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("leaflet"));
        assert!(html.contains("Posto 1"));
        assert!(html.contains("Existing"));
        // Autonomy circle radius in metres.
        assert!(html.contains("300000"));
    }

    #[test]
    fn top_n_limits_candidate_markers() {
        let (route, candidates, stations, v) = spec_data();
        let html = render_for_test(&MapSpec {
            title: "t",
            route: &route,
            candidates: &candidates,
            stations: &stations,
            vehicle: &v,
            top_n: 1,
        })
        .unwrap();
        assert!(html.contains("Posto 1"));
        assert!(!html.contains("Posto 2"));
    }

    #[test]
    fn title_is_escaped() {
        let (route, candidates, stations, v) = spec_data();
        let html = render_for_test(&MapSpec {
            title: "a <b> & c",
            route: &route,
            candidates: &candidates,
            stations: &stations,
            vehicle: &v,
            top_n: 5,
        })
        .unwrap();
        assert!(html.contains("a &lt;b&gt; &amp; c"));
    }
}
