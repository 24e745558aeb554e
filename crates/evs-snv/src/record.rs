//! Road-segment record and in-memory registry table.

use evs_core::SegmentId;

/// One stretch of federal highway from the SNV registry.
///
/// `km_start ≤ km_end` is NOT guaranteed by the source data — some states
/// register stretches against the opposite milepost direction — so segment
/// length is always the absolute difference.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadSegment {
    /// Dense index into the owning [`SegmentTable`].
    pub id: SegmentId,
    /// Raw registry identifier (`id_trecho_snv`), kept for reporting.
    pub snv_id: String,
    /// Two-letter state code (`sg_uf`), e.g. "PR".
    pub state: String,
    /// Zero-padded three-digit highway code (`vl_br`), e.g. "116".
    pub highway: String,
    /// Place name where the stretch begins (`ds_local_i`).
    pub start_place: String,
    /// Place name where the stretch ends (`ds_local_f`).
    pub end_place: String,
    pub km_start: f64,
    pub km_end: f64,
    /// Mean daily traffic in the increasing-milepost direction.
    pub vmd_increasing: Option<f64>,
    /// Mean daily traffic in the decreasing-milepost direction.
    pub vmd_decreasing: Option<f64>,
}

impl RoadSegment {
    /// Stretch length in kilometres.
    #[inline]
    pub fn length_km(&self) -> f64 {
        (self.km_end - self.km_start).abs()
    }

    /// Combined daily traffic over both directions; missing counts are 0.
    #[inline]
    pub fn total_vmd(&self) -> f64 {
        self.vmd_increasing.unwrap_or(0.0) + self.vmd_decreasing.unwrap_or(0.0)
    }
}

/// Normalize a highway code to the registry's canonical zero-padded
/// three-digit form ("60" → "060").
///
/// The registry mixes numeric and textual representations of the same code
/// across rows; comparing un-normalized codes silently fails to join and
/// produces an empty corridor, so every code entering this crate goes
/// through here first.  Returns `None` when the value has no leading
/// numeric part at all.
pub fn normalize_highway_code(raw: &str) -> Option<String> {
    let digits: String = raw
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    // Strip leading zeros, then re-pad, so "060" and "60" agree.
    let n: u32 = digits.parse().ok()?;
    Some(format!("{n:03}"))
}

// ── SegmentTable ──────────────────────────────────────────────────────────────

/// The loaded registry: segments indexed by [`SegmentId`].
#[derive(Clone, Debug, Default)]
pub struct SegmentTable {
    segments: Vec<RoadSegment>,
}

impl SegmentTable {
    pub fn new(segments: Vec<RoadSegment>) -> Self {
        debug_assert!(
            segments.iter().enumerate().all(|(i, s)| s.id.index() == i),
            "segment ids must be dense indices"
        );
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn get(&self, id: SegmentId) -> &RoadSegment {
        &self.segments[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoadSegment> {
        self.segments.iter()
    }

    /// Ids of segments whose state and highway are both in the allowed sets.
    ///
    /// `highways` must already be normalized via [`normalize_highway_code`].
    pub fn filter_corridor(&self, states: &[String], highways: &[String]) -> Vec<SegmentId> {
        self.segments
            .iter()
            .filter(|s| {
                states.iter().any(|uf| uf == &s.state)
                    && highways.iter().any(|br| br == &s.highway)
            })
            .map(|s| s.id)
            .collect()
    }
}
