//! Simulation configuration.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Capacity sentinel meaning "no limit on this queue".
///
/// Queue occupancy is a `u32`, so a cap of `u32::MAX` can never be reached.
pub const UNBOUNDED: u32 = u32::MAX;

/// Immutable parameters for one experiment.
///
/// Shared read-only across all replications spawned from it; the conductor
/// and cost policies live alongside the sim (see `rq-sim`), not in here, so
/// this stays plain serializable data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated-time horizon `T`.  The run stops at the first event whose
    /// timestamp reaches `T`; that event is still fully applied.
    pub horizon: f64,

    /// Male arrival rate λ₁ (exponential interarrival times).
    pub lambda_male: f64,

    /// Female arrival rate λ₂.
    pub lambda_female: f64,

    /// Batch service rate μ.
    pub mu: f64,

    /// Male queue capacity.  Arrivals beyond it balk.  Default [`UNBOUNDED`].
    pub male_queue_cap: u32,

    /// Female queue capacity.  Default [`UNBOUNDED`].
    pub female_queue_cap: u32,

    /// Master RNG seed.  Replication `i` draws from the deterministic
    /// sub-stream `RunRng::substream(seed, i)`, so the same seed always
    /// reproduces the same batch of results.
    pub seed: u64,

    /// Worker thread count for parallel replications.  `None` uses all
    /// logical cores.  Ignored without the `parallel` feature of `rq-sim`.
    pub num_threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon:          100.0,
            lambda_male:      1.0,
            lambda_female:    1.0,
            mu:               1.0,
            male_queue_cap:   UNBOUNDED,
            female_queue_cap: UNBOUNDED,
            seed:             0,
            num_threads:      None,
        }
    }
}

impl SimConfig {
    /// Check that the horizon and all rates are positive and finite.
    ///
    /// Called by the sim builder; a config that fails here would otherwise
    /// produce NaN clock draws or a loop that never terminates.
    pub fn validate(&self) -> CoreResult<()> {
        for (param, value) in [
            ("horizon", self.horizon),
            ("lambda_male", self.lambda_male),
            ("lambda_female", self.lambda_female),
            ("mu", self.mu),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::NonPositiveParam { param, value });
            }
        }
        Ok(())
    }
}

impl fmt::Display for SimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======= SYSTEM SUMMARY =======")?;
        writeln!(f, "Horizon:             {}", self.horizon)?;
        writeln!(f, "Male arrival rate:   {}", self.lambda_male)?;
        writeln!(f, "Female arrival rate: {}", self.lambda_female)?;
        writeln!(f, "Service rate:        {}", self.mu)?;
        writeln!(f, "Male queue limit:    {}", cap_str(self.male_queue_cap))?;
        writeln!(f, "Female queue limit:  {}", cap_str(self.female_queue_cap))?;
        write!(f, "==============================")
    }
}

fn cap_str(cap: u32) -> String {
    if cap == UNBOUNDED {
        "unbounded".to_string()
    } else {
        cap.to_string()
    }
}
