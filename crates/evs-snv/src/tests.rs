//! Unit tests for evs-snv.

use evs_core::SegmentId;

use crate::loader::{load_registry_csv, load_registry_reader};
use crate::record::{normalize_highway_code, RoadSegment, SegmentTable};
use crate::stitcher::{RouteChain, StitchRequest, Stitcher};
use crate::traffic::mean_daily_traffic;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A segment on BR-116/PR with the given endpoints and markers.
fn seg(idx: u32, start: &str, end: &str, km0: f64, km1: f64) -> RoadSegment {
    RoadSegment {
        id:             SegmentId(idx),
        snv_id:         format!("116BPR{idx:04}"),
        state:          "PR".into(),
        highway:        "116".into(),
        start_place:    start.into(),
        end_place:      end.into(),
        km_start:       km0,
        km_end:         km1,
        vmd_increasing: Some(10_000.0),
        vmd_decreasing: Some(10_000.0),
    }
}

fn table(segments: Vec<RoadSegment>) -> SegmentTable {
    SegmentTable::new(segments)
}

fn request(dest: &str) -> StitchRequest {
    StitchRequest {
        allowed_states:      vec!["PR".into()],
        allowed_highways:    vec!["116".into()],
        start_state:         "PR".into(),
        start_highway:       "116".into(),
        destination_keyword: dest.into(),
        km_tolerance:        StitchRequest::DEFAULT_KM_TOLERANCE,
    }
}

fn stitch(table: &SegmentTable, req: &StitchRequest) -> RouteChain {
    Stitcher::new(req.km_tolerance).stitch(table, req).unwrap()
}

// ── Highway-code normalization ────────────────────────────────────────────────

mod highway_codes {
    use super::*;

    #[test]
    fn pads_to_three_digits() {
        assert_eq!(normalize_highway_code("60").as_deref(), Some("060"));
        assert_eq!(normalize_highway_code("6").as_deref(), Some("006"));
        assert_eq!(normalize_highway_code("116").as_deref(), Some("116"));
    }

    #[test]
    fn already_padded_is_unchanged() {
        assert_eq!(normalize_highway_code("060").as_deref(), Some("060"));
    }

    #[test]
    fn strips_textual_prefix() {
        assert_eq!(normalize_highway_code("BR-60").as_deref(), Some("060"));
        assert_eq!(normalize_highway_code(" BR 116 ").as_deref(), Some("116"));
    }

    #[test]
    fn no_digits_is_none() {
        assert_eq!(normalize_highway_code("rodovia"), None);
        assert_eq!(normalize_highway_code(""), None);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

mod loader {
    use super::*;

    const REGISTRY: &str = "\
id_trecho_snv;sg_uf;vl_br;ds_local_i;ds_local_f;vl_km_inic;vl_km_fina;vmd_crescente;vmd_decrescente
116BPR0010;PR;116;CURITIBA;ENTR BR-277;0,0;12,4;15230;14890
060BDF0010;DF;60;BRASILIA;ENTR DF-001;0,0;8,2;;
999BXX0010;SP;116;SAO PAULO;REGISTRO;bad;10,0;100;100
";

    #[test]
    fn parses_decimal_comma_markers() {
        let t = load_registry_reader(REGISTRY.as_bytes()).unwrap();
        let first = t.get(SegmentId(0));
        assert_eq!(first.km_start, 0.0);
        assert_eq!(first.km_end, 12.4);
    }

    #[test]
    fn normalizes_highway_code_on_load() {
        let t = load_registry_reader(REGISTRY.as_bytes()).unwrap();
        assert_eq!(t.get(SegmentId(1)).highway, "060");
    }

    #[test]
    fn empty_vmd_loads_as_none() {
        let t = load_registry_reader(REGISTRY.as_bytes()).unwrap();
        let seg = t.get(SegmentId(1));
        assert_eq!(seg.vmd_increasing, None);
        assert_eq!(seg.vmd_decreasing, None);
        assert_eq!(seg.total_vmd(), 0.0);
    }

    #[test]
    fn bad_km_row_is_skipped_not_fatal() {
        let t = load_registry_reader(REGISTRY.as_bytes()).unwrap();
        // Third row has a mangled km marker; only two rows survive.
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn ids_are_dense_after_skips() {
        let t = load_registry_reader(REGISTRY.as_bytes()).unwrap();
        let ids: Vec<usize> = t.iter().map(|s| s.id.index()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn latin1_file_decodes_place_names() {
        // Government dumps are Windows-1252: "SÃO PAULO" carries "Ã" as the
        // single byte 0xC3, which is invalid UTF-8 on its own.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(
            b"id_trecho_snv;sg_uf;vl_br;ds_local_i;ds_local_f;\
              vl_km_inic;vl_km_fina;vmd_crescente;vmd_decrescente\n",
        );
        bytes.extend_from_slice(b"116BSP0010;SP;116;REGISTRO;S\xC3O PAULO;0,0;12,4;100;100\n");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snv.csv");
        std::fs::write(&path, &bytes).unwrap();

        let t = load_registry_csv(&path).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(SegmentId(0)).end_place, "SÃO PAULO");
    }
}

// ── Stitcher ──────────────────────────────────────────────────────────────────

mod stitcher {
    use super::*;

    #[test]
    fn chains_exact_place_matches() {
        // A(X→Y), B(Y→Z) from X toward "Z" yields [A, B].
        let t = table(vec![
            seg(0, "X", "Y", 0.0, 10.0),
            seg(1, "Y", "Z", 10.0, 20.0),
        ]);
        let chain = stitch(&t, &request("Z"));
        assert_eq!(chain.segments, vec![SegmentId(0), SegmentId(1)]);
        assert!(chain.reached_destination);
    }

    #[test]
    fn start_is_smallest_km_marker() {
        // Rows out of order; the km 0 row must start the chain.
        let t = table(vec![
            seg(0, "Y", "Z", 10.0, 20.0),
            seg(1, "X", "Y", 0.0, 10.0),
        ]);
        let chain = stitch(&t, &request("Z"));
        assert_eq!(chain.segments.first(), Some(&SegmentId(1)));
    }

    #[test]
    fn km_tolerance_bridges_registry_breaks() {
        // No place-name link, but B starts 2.6 km past A's end marker.
        let t = table(vec![
            seg(0, "X", "PONTE", 0.0, 10.0),
            seg(1, "VIADUTO", "Z", 12.6, 20.0),
        ]);
        let chain = stitch(&t, &request("Z"));
        assert_eq!(chain.segments, vec![SegmentId(0), SegmentId(1)]);
        assert!(chain.reached_destination);
    }

    #[test]
    fn km_gap_beyond_tolerance_breaks_chain() {
        let t = table(vec![
            seg(0, "X", "PONTE", 0.0, 10.0),
            seg(1, "VIADUTO", "Z", 30.0, 40.0),
        ]);
        let chain = stitch(&t, &request("Z"));
        assert_eq!(chain.segments, vec![SegmentId(0)]);
        assert!(!chain.reached_destination);
    }

    #[test]
    fn junction_transition_switches_highway() {
        let mut b = seg(1, "ENTR BR-116 (JUNCAO)", "Z", 50.0, 60.0);
        b.highway = "376".into();
        b.snv_id = "376BPR0001".into();
        let t = table(vec![seg(0, "X", "FIM DA 116", 0.0, 10.0), b]);

        let mut req = request("Z");
        req.allowed_highways = vec!["116".into(), "376".into()];
        let chain = stitch(&t, &req);
        assert_eq!(chain.segments, vec![SegmentId(0), SegmentId(1)]);
        assert!(chain.reached_destination);
    }

    #[test]
    fn unpadded_config_codes_join_padded_registry() {
        // Registry stores "060"; the request says "60".
        let mut a = seg(0, "X", "Y", 0.0, 10.0);
        a.highway = "060".into();
        let mut b = seg(1, "Y", "Z", 10.0, 20.0);
        b.highway = "060".into();
        let t = table(vec![a, b]);

        let mut req = request("Z");
        req.allowed_highways = vec!["60".into()];
        req.start_highway = "60".into();
        let chain = stitch(&t, &req);
        assert_eq!(chain.len(), 2);
        assert!(chain.reached_destination);
    }

    #[test]
    fn never_revisits_a_segment() {
        // X→Y and Y→X form a loop; the walk must terminate with unique ids.
        let t = table(vec![
            seg(0, "X", "Y", 0.0, 10.0),
            seg(1, "Y", "X", 10.0, 20.0),
        ]);
        let chain = stitch(&t, &request("NEVER"));
        let mut ids = chain.segments.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), chain.segments.len());
        assert!(!chain.reached_destination);
    }

    #[test]
    fn destination_keyword_is_case_insensitive() {
        let t = table(vec![seg(0, "X", "Sao Jose dos Pinhais", 0.0, 10.0)]);
        let chain = stitch(&t, &request("sao jose"));
        assert!(chain.reached_destination);
    }

    #[test]
    fn out_of_state_segments_are_excluded() {
        let mut b = seg(1, "Y", "Z", 10.0, 20.0);
        b.state = "SC".into();
        let t = table(vec![seg(0, "X", "Y", 0.0, 10.0), b]);
        // SC not in allowed_states → chain breaks after A.
        let chain = stitch(&t, &request("Z"));
        assert_eq!(chain.segments, vec![SegmentId(0)]);
        assert!(!chain.reached_destination);
    }

    #[test]
    fn missing_start_is_an_error() {
        let t = table(vec![seg(0, "X", "Y", 0.0, 10.0)]);
        let mut req = request("Z");
        req.start_state = "SP".into();
        let err = Stitcher::new(req.km_tolerance).stitch(&t, &req);
        assert!(err.is_err());
    }
}

// ── Traffic aggregation ───────────────────────────────────────────────────────

mod traffic {
    use super::*;

    fn chain_of(ids: Vec<u32>) -> RouteChain {
        RouteChain {
            segments:            ids.into_iter().map(SegmentId).collect(),
            reached_destination: true,
        }
    }

    #[test]
    fn length_weighted_average() {
        // 10 km at 20 000 total, 30 km at 4 000 total →
        // (20000*10 + 4000*30) / 40 = 8000.
        let mut a = seg(0, "X", "Y", 0.0, 10.0);
        a.vmd_increasing = Some(12_000.0);
        a.vmd_decreasing = Some(8_000.0);
        let mut b = seg(1, "Y", "Z", 10.0, 40.0);
        b.vmd_increasing = Some(4_000.0);
        b.vmd_decreasing = None;
        let t = table(vec![a, b]);

        let vmd = mean_daily_traffic(&chain_of(vec![0, 1]), &t);
        assert!((vmd - 8_000.0).abs() < 1e-9);
    }

    #[test]
    fn reversed_markers_use_absolute_length() {
        // km_start > km_end in the source row.
        let mut a = seg(0, "X", "Y", 25.0, 5.0);
        a.vmd_increasing = Some(6_000.0);
        a.vmd_decreasing = Some(4_000.0);
        let t = table(vec![a]);
        assert_eq!(mean_daily_traffic(&chain_of(vec![0]), &t), 10_000.0);
    }

    #[test]
    fn zero_total_length_yields_zero() {
        let t = table(vec![seg(0, "X", "Y", 10.0, 10.0)]);
        assert_eq!(mean_daily_traffic(&chain_of(vec![0]), &t), 0.0);
    }

    #[test]
    fn empty_chain_yields_zero() {
        let t = table(vec![]);
        assert_eq!(mean_daily_traffic(&chain_of(vec![]), &t), 0.0);
    }

    #[test]
    fn aggregate_bounded_by_segment_totals() {
        let a = seg(0, "X", "Y", 0.0, 10.0); // total 20 000
        let mut b = seg(1, "Y", "Z", 10.0, 20.0);
        b.vmd_increasing = Some(1_000.0);
        b.vmd_decreasing = Some(1_000.0); // total 2 000
        let t = table(vec![a, b]);

        let vmd = mean_daily_traffic(&chain_of(vec![0, 1]), &t);
        assert!(vmd >= 2_000.0 && vmd <= 20_000.0);
    }
}
