//! Route-level traffic aggregation.

use crate::record::SegmentTable;
use crate::stitcher::RouteChain;

/// Length-weighted mean daily traffic (VMD) over a stitched chain.
///
/// Each segment contributes the sum of both directional counts (missing
/// counts are 0), weighted by its length `|km_end − km_start|`:
///
/// ```text
/// Σ(total_i × length_i) / Σ(length_i)
/// ```
///
/// A chain with zero total length (empty, or all degenerate zero-length
/// stretches) yields 0.0 rather than dividing by zero.
pub fn mean_daily_traffic(chain: &RouteChain, table: &SegmentTable) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_length = 0.0;

    for &id in &chain.segments {
        let seg = table.get(id);
        let length = seg.length_km();
        weighted_sum += seg.total_vmd() * length;
        total_length += length;
    }

    if total_length == 0.0 {
        return 0.0;
    }
    weighted_sum / total_length
}
