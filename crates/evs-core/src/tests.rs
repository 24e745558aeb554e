//! Unit tests for evs-core.

use crate::geo::GeoPoint;
use crate::norm::{ratio_to_reference, Normalization};
use crate::vehicle::VehicleProfile;

fn test_vehicle() -> VehicleProfile {
    VehicleProfile {
        name:        "test-ev".into(),
        autonomy_km: 300.0,
        color:       "blue".into(),
    }
}

// ── GeoPoint ──────────────────────────────────────────────────────────────────

mod geo {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(-25.4284, -49.2733); // Curitiba
        assert_eq!(p.distance_km(p), 0.0);
    }

    #[test]
    fn curitiba_sao_paulo_roughly_340km() {
        // Great-circle distance between the two city centres is ~340 km.
        let cwb = GeoPoint::new(-25.4284, -49.2733);
        let sp = GeoPoint::new(-23.5505, -46.6333);
        let d = cwb.distance_km(sp);
        assert!((330.0..350.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(-25.4284, -49.2733);
        let b = GeoPoint::new(-23.5505, -46.6333);
        assert!((a.distance_km(b) - b.distance_km(a)).abs() < 1e-9);
    }

    #[test]
    fn from_lon_lat_swaps_order() {
        let p = GeoPoint::from_lon_lat(-49.2733, -25.4284);
        assert_eq!(p.lat, -25.4284);
        assert_eq!(p.lon, -49.2733);
    }

    #[test]
    fn midpoint_is_componentwise_mean() {
        let a = GeoPoint::new(-20.0, -40.0);
        let b = GeoPoint::new(-30.0, -50.0);
        assert_eq!(a.midpoint(b), GeoPoint::new(-25.0, -45.0));
    }
}

// ── VehicleProfile ────────────────────────────────────────────────────────────

mod vehicle {
    use super::*;

    #[test]
    fn window_bounds_at_60_and_90_percent() {
        let v = test_vehicle();
        assert_eq!(v.window_min_km(), 180.0);
        assert_eq!(v.window_max_km(), 270.0);
    }

    #[test]
    fn reserve_at_80_percent() {
        assert_eq!(test_vehicle().reserve_km(), 240.0);
    }
}

// ── Normalization ─────────────────────────────────────────────────────────────

mod norm {
    use super::*;

    #[test]
    fn min_max_spreads_range() {
        let mut v = vec![10.0, 20.0, 30.0];
        Normalization::MinMax.apply(&mut v);
        assert_eq!(v, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn ratio_to_max_keeps_zero() {
        let mut v = vec![0.0, 50.0, 100.0];
        Normalization::RatioToMax.apply(&mut v);
        assert_eq!(v, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn single_element_series_normalizes_to_one() {
        // max == min must not produce NaN.
        for policy in [Normalization::MinMax, Normalization::RatioToMax] {
            let mut v = vec![42.0];
            policy.apply(&mut v);
            assert_eq!(v, vec![1.0]);
        }
    }

    #[test]
    fn constant_series_normalizes_to_ones() {
        let mut v = vec![7.0, 7.0, 7.0];
        Normalization::MinMax.apply(&mut v);
        assert_eq!(v, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn infinite_entries_normalize_to_one() {
        // +∞ is the "no competitor anywhere" sentinel.
        let mut v = vec![10.0, f64::INFINITY, 20.0];
        Normalization::RatioToMax.apply(&mut v);
        assert_eq!(v, vec![0.5, 1.0, 1.0]);
    }

    #[test]
    fn all_infinite_normalizes_to_ones() {
        let mut v = vec![f64::INFINITY, f64::INFINITY];
        Normalization::RatioToMax.apply(&mut v);
        assert_eq!(v, vec![1.0, 1.0]);
    }

    #[test]
    fn all_zero_ratio_series_normalizes_to_ones() {
        let mut v = vec![0.0, 0.0];
        Normalization::RatioToMax.apply(&mut v);
        assert_eq!(v, vec![1.0, 1.0]);
    }

    #[test]
    fn ratio_to_reference_clamps() {
        assert_eq!(ratio_to_reference(10_000.0, 20_000.0), 0.5);
        assert_eq!(ratio_to_reference(40_000.0, 20_000.0), 1.0);
        assert_eq!(ratio_to_reference(-5.0, 20_000.0), 0.0);
    }

    #[test]
    fn ratio_to_reference_guards_zero_reference() {
        assert_eq!(ratio_to_reference(10_000.0, 0.0), 1.0);
    }
}
