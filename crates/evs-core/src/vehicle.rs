//! Vehicle profile and autonomy-window bounds.
//!
//! The scoring heuristic treats 60–90 % of a vehicle's nominal range as the
//! practical recharge window: closer to the origin a stop is premature,
//! beyond 90 % the driver is running on reserve.  The 80 % reserve threshold
//! is what the map renderer draws as the comfortable-coverage circle.

/// An electric-vehicle profile used to derive the autonomy window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    pub name: String,
    /// Nominal range on a full charge, kilometres.
    pub autonomy_km: f64,
    /// Display colour for map artifacts (any CSS colour string).
    pub color: String,
}

impl VehicleProfile {
    /// Lower bound of the ideal recharge window (60 % of range).
    #[inline]
    pub fn window_min_km(&self) -> f64 {
        self.autonomy_km * 0.60
    }

    /// Upper bound of the ideal recharge window (90 % of range).
    #[inline]
    pub fn window_max_km(&self) -> f64 {
        self.autonomy_km * 0.90
    }

    /// Reserve threshold (80 % of range).
    #[inline]
    pub fn reserve_km(&self) -> f64 {
        self.autonomy_km * 0.80
    }
}
