//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `SegmentId` is a dense index into
//! the in-memory segment table; `PoiId` and `StationId` carry the upstream
//! identifiers (OSM node id, OpenChargeMap id) used for deduplication.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a road segment in the loaded SNV registry table.
    /// The raw registry identifier string lives on the record itself.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Upstream OSM node id of a candidate point of interest.
    pub struct PoiId(u64);
}

typed_id! {
    /// Upstream identifier of an existing competitor charging station.
    pub struct StationId(u64);
}
