//! Sample mean, variance, and the normal-approximation confidence interval.

use std::fmt;

use crate::error::{StatsError, StatsResult, check_alpha};
use crate::normal::inverse_standard_normal;

// ── Interval ──────────────────────────────────────────────────────────────────

/// A symmetric confidence interval `(lower, upper)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    #[inline]
    pub fn width(self) -> f64 {
        self.upper - self.lower
    }

    #[inline]
    pub fn contains(self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

// ── Sample statistics ─────────────────────────────────────────────────────────

/// Sample mean.  Errors on an empty sequence.
pub fn mean(xs: &[f64]) -> StatsResult<f64> {
    if xs.is_empty() {
        return Err(StatsError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Sample variance with `n − 1` normalization.  Errors for `n < 2`.
pub fn variance(xs: &[f64]) -> StatsResult<f64> {
    if xs.len() < 2 {
        return Err(StatsError::InsufficientData { needed: 2, got: xs.len() });
    }
    let m = mean(xs)?;
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    Ok(ss / (xs.len() - 1) as f64)
}

/// Symmetric normal-approximation interval `mean ± z(1 − α/2)·s/√n`.
///
/// `alpha` is the significance level: `alpha = 0.05` gives the familiar 95%
/// interval with `z ≈ 1.96`.  The quantile is computed from `alpha` via the
/// inverse normal CDF, so any level works — the approximation is only in
/// using the normal quantile instead of Student's t, which is fine for the
/// large samples a simulation run produces.
pub fn confidence_interval(xs: &[f64], alpha: f64) -> StatsResult<Interval> {
    check_alpha(alpha)?;
    let m = mean(xs)?;
    let sd = variance(xs)?.sqrt();
    let z = inverse_standard_normal(1.0 - alpha / 2.0)?;
    let margin = z * sd / (xs.len() as f64).sqrt();
    Ok(Interval { lower: m - margin, upper: m + margin })
}
