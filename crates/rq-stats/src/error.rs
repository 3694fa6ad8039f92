use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("cost and weight sequences differ in length ({costs} vs {weights})")]
    LengthMismatch { costs: usize, weights: usize },

    #[error("probability must lie strictly inside (0, 1), got {0}")]
    InvalidProbability(f64),

    #[error("significance level must lie strictly inside (0, 1), got {0}")]
    InvalidAlpha(f64),

    /// The ratio estimator divides by the mean cycle weight.
    #[error("mean cycle weight must be positive, got {0}")]
    NonPositiveWeightMean(f64),
}

pub type StatsResult<T> = Result<T, StatsError>;

/// Validate a significance level α (the interval has confidence 1 − α).
pub(crate) fn check_alpha(alpha: f64) -> StatsResult<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidAlpha(alpha))
    }
}
