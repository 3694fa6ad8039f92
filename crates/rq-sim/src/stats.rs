//! Per-run observation record: totals, interarrival gaps, and sealed
//! regeneration cycles.

use std::fmt;

use rq_core::QueueState;

// ── CycleRecord ───────────────────────────────────────────────────────────────

/// Observations for one regeneration cycle (the interval between two
/// consecutive returns to the all-empty state).
///
/// Cycles start from the same regeneration state by construction, so the
/// sequence of `CycleRecord`s is i.i.d. — the property the ratio estimator
/// in `rq-stats` relies on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleRecord {
    /// Simulated time spanned by this cycle.
    pub duration: f64,
    pub arrivals_male: u64,
    pub arrivals_female: u64,
    pub balked_male: u64,
    pub balked_female: u64,
    pub served: u64,
    /// Cost-model output integrated over the cycle.
    pub cost: f64,
}

impl CycleRecord {
    /// Admitted arrivals in this cycle — the stock weight for the
    /// regenerative cost-per-customer estimator.
    #[inline]
    pub fn arrivals(&self) -> u64 {
        self.arrivals_male + self.arrivals_female
    }
}

// ── RunStats ──────────────────────────────────────────────────────────────────

/// Everything one replication observed.
///
/// Populated incrementally by [`Sim::run`][crate::Sim::run]; immutable once
/// the run finishes.  Derives `PartialEq` so determinism can be asserted as
/// bit-identity between same-seed runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Total time the system spent completely empty.
    pub downtime: f64,
    /// Simulated time at the final event (≥ the horizon — the event that
    /// crosses it is still fully applied).
    pub elapsed: f64,

    pub total_arrivals_male: u64,
    pub total_arrivals_female: u64,
    pub total_balked_male: u64,
    pub total_balked_female: u64,
    pub total_served: u64,

    /// Gap since the previous event of the same type, one entry per event.
    /// The first gap is measured from time zero.
    pub interarrival_male: Vec<f64>,
    pub interarrival_female: Vec<f64>,
    pub interarrival_balk_male: Vec<f64>,
    pub interarrival_balk_female: Vec<f64>,

    /// Sealed regeneration cycles, in order of occurrence.
    pub cycles: Vec<CycleRecord>,

    /// Occupancy when the horizon was reached (the unfinished final cycle).
    pub final_state: QueueState,
}

impl RunStats {
    /// Per-cycle integrated costs, as estimator input.
    pub fn cycle_costs(&self) -> Vec<f64> {
        self.cycles.iter().map(|c| c.cost).collect()
    }

    /// Per-cycle admitted-arrival counts, as estimator weights.
    pub fn cycle_weights(&self) -> Vec<f64> {
        self.cycles.iter().map(|c| c.arrivals() as f64).collect()
    }

    /// Per-cycle durations.
    pub fn cycle_durations(&self) -> Vec<f64> {
        self.cycles.iter().map(|c| c.duration).collect()
    }

    /// All admitted arrivals across the run.
    #[inline]
    pub fn total_arrivals(&self) -> u64 {
        self.total_arrivals_male + self.total_arrivals_female
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========= STATISTICS =========")?;
        writeln!(f, "Total downtime:     {}", self.downtime)?;
        writeln!(f, "Total male:         {}", self.total_arrivals_male)?;
        writeln!(f, "Total female:       {}", self.total_arrivals_female)?;
        writeln!(f, "Male balked:        {}", self.total_balked_male)?;
        writeln!(f, "Female balked:      {}", self.total_balked_female)?;
        writeln!(f, "Total served:       {}", self.total_served)?;
        writeln!(f, "Cycles completed:   {}", self.cycles.len())?;
        write!(f, "==============================")
    }
}

// ── Pooling across replications ───────────────────────────────────────────────

/// Pool per-cycle `(cost, weight)` pairs across replications for the
/// regenerative ratio estimator.
///
/// Cycle order across replications carries no meaning — the estimator treats
/// the pooled cycles as one unordered i.i.d. sample.
pub fn pooled_cycles(runs: &[RunStats]) -> (Vec<f64>, Vec<f64>) {
    let n: usize = runs.iter().map(|r| r.cycles.len()).sum();
    let mut costs = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);
    for run in runs {
        for cycle in &run.cycles {
            costs.push(cycle.cost);
            weights.push(cycle.arrivals() as f64);
        }
    }
    (costs, weights)
}
