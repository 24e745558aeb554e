//! Autonomy-window score.

use evs_core::VehicleProfile;

/// Score how well a candidate's distance from the route origin fits the
/// vehicle's practical recharge window.
///
/// With `lo = 0.60·autonomy` and `hi = 0.90·autonomy`:
///
/// - `lo ≤ d ≤ hi` → 1.0 (inside the window),
/// - `d < lo`      → `max(0, d/lo − 0.5)` (too close to the origin),
/// - `d > hi`      → `max(0, 1 − (d − hi)/(0.5·autonomy))` (past safe range).
///
/// The result is in `[0, 1]` for any `d ≥ 0`.
pub fn window_score(distance_km: f64, vehicle: &VehicleProfile) -> f64 {
    let lo = vehicle.window_min_km();
    let hi = vehicle.window_max_km();

    if distance_km < lo {
        (distance_km / lo - 0.5).max(0.0)
    } else if distance_km <= hi {
        1.0
    } else {
        (1.0 - (distance_km - hi) / (vehicle.autonomy_km * 0.5)).max(0.0)
    }
}
