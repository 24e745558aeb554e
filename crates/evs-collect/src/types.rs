//! Records returned by the collectors.

use evs_core::{GeoPoint, PoiId, StationId};

/// Category of a candidate point of interest.
///
/// The three categories mirror what the siting analysis considers a viable
/// charger host: somewhere drivers already stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PoiCategory {
    FuelStation,
    Restaurant,
    Hotel,
}

impl PoiCategory {
    /// Stable label used in output tables and map popups.
    pub fn label(self) -> &'static str {
        match self {
            PoiCategory::FuelStation => "fuel_station",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::Hotel => "hotel",
        }
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate site for charger placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Poi {
    pub id: PoiId,
    pub pos: GeoPoint,
    pub name: String,
    pub category: PoiCategory,
}

/// An existing competitor charging station.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub pos: GeoPoint,
    pub name: String,
    /// Attribution of the upstream source, e.g. "openchargemap".
    pub source: String,
}
