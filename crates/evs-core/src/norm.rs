//! Normalization helpers.
//!
//! The source data for every score axis is unbounded (kilometres, vehicles
//! per day), so each axis is mapped into `[0, 1]` before weighting.  Every
//! helper here guards the degenerate ranges that blow up naive formulas:
//! a collapsed range (`max == min`), an empty series, and non-finite inputs
//! all yield a constant 1.0 instead of NaN.

/// Policy for mapping a series of raw values into `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Normalization {
    /// `(v - min) / (max - min)` — spreads the observed range over [0, 1].
    MinMax,
    /// `v / max` — preserves zero as zero; the observed maximum maps to 1.
    #[default]
    RatioToMax,
}

impl Normalization {
    /// Normalize `values` in place according to the policy.
    ///
    /// Non-finite entries (e.g. the +∞ "no competitor anywhere" sentinel)
    /// are excluded from the range computation and normalize to 1.0.  When
    /// the finite range collapses, every entry normalizes to 1.0.
    pub fn apply(self, values: &mut [f64]) {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in finite {
            min = min.min(v);
            max = max.max(v);
        }

        let collapsed = !min.is_finite() || !max.is_finite() || max == min
            || (self == Normalization::RatioToMax && max == 0.0);

        for v in values.iter_mut() {
            *v = if collapsed || !v.is_finite() {
                1.0
            } else {
                match self {
                    Normalization::MinMax => (*v - min) / (max - min),
                    Normalization::RatioToMax => *v / max,
                }
            };
        }
    }
}

/// Ratio of `value` to a fixed `reference`, clamped to `[0, 1]`.
///
/// Used for the traffic axis, where the reference volume comes from
/// configuration rather than from the candidate set.  A non-positive
/// reference is treated as a collapsed range.
pub fn ratio_to_reference(value: f64, reference: f64) -> f64 {
    if reference <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    (value / reference).clamp(0.0, 1.0)
}
