//! The regenerative (ratio) estimator.
//!
//! # Background
//!
//! A long-run average rate (e.g. cost per served customer) equals the ratio
//! of expected per-cycle reward to expected per-cycle weight, because
//! regeneration cycles are i.i.d.  The point estimate is the ratio of sample
//! means; its asymptotic variance comes from the delta method applied to the
//! correlated pair of per-cycle statistics.

use crate::describe::{Interval, mean};
use crate::error::{StatsError, StatsResult, check_alpha};
use crate::normal::inverse_standard_normal;

/// Result of [`regenerative_estimate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RatioEstimate {
    /// Point estimate `R = mean(costs) / mean(weights)`.
    pub ratio: f64,
    /// Asymptotic `1 − α` confidence interval around `ratio`.
    pub interval: Interval,
    /// Number of regeneration cycles the estimate is based on.
    pub cycles: usize,
}

/// Delta-method ratio estimator over one `(cost, weight)` pair per
/// regeneration cycle.
///
/// Computes `R = mean(costs)/mean(weights)`, the `n − 1` sample variances
/// and covariance `S11, S22, S12`, the combined deviation
/// `S = sqrt(S11 − 2·R·S12 + R²·S22)` (clamped at zero against rounding),
/// and the interval `R ± z(1 − α/2) · S / sqrt(n · mean(weights))`.
///
/// Cycle order carries no meaning; the inputs are treated as one unordered
/// i.i.d. sample, so cycles pooled across replications are fine.
pub fn regenerative_estimate(
    costs: &[f64],
    weights: &[f64],
    alpha: f64,
) -> StatsResult<RatioEstimate> {
    check_alpha(alpha)?;
    if costs.len() != weights.len() {
        return Err(StatsError::LengthMismatch {
            costs:   costs.len(),
            weights: weights.len(),
        });
    }
    let n = costs.len();
    if n < 2 {
        return Err(StatsError::InsufficientData { needed: 2, got: n });
    }

    let mean_cost = mean(costs)?;
    let mean_weight = mean(weights)?;
    if mean_weight <= 0.0 {
        return Err(StatsError::NonPositiveWeightMean(mean_weight));
    }
    let ratio = mean_cost / mean_weight;

    // Centered two-pass sums; numerically stabler than raw-moment algebra.
    let mut s11 = 0.0;
    let mut s22 = 0.0;
    let mut s12 = 0.0;
    for (&c, &w) in costs.iter().zip(weights) {
        let dc = c - mean_cost;
        let dw = w - mean_weight;
        s11 += dc * dc;
        s22 += dw * dw;
        s12 += dc * dw;
    }
    let denom = (n - 1) as f64;
    s11 /= denom;
    s22 /= denom;
    s12 /= denom;

    let combined = (s11 - 2.0 * ratio * s12 + ratio * ratio * s22).max(0.0);
    let s = combined.sqrt();

    let z = inverse_standard_normal(1.0 - alpha / 2.0)?;
    let margin = z * s / (n as f64 * mean_weight).sqrt();

    Ok(RatioEstimate {
        ratio,
        interval: Interval { lower: ratio - margin, upper: ratio + margin },
        cycles: n,
    })
}
