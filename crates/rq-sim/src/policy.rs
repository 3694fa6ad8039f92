//! Pluggable service-discipline and cost policies.
//!
//! The conductor and cost model are the two extension points of the
//! simulator.  Both are plain one-method traits so an experiment can swap
//! disciplines (priority rules, different batch sizes, per-class costs)
//! without touching the clock bank or the driver.

use rq_core::QueueState;

// ── Traits ────────────────────────────────────────────────────────────────────

/// The post-event state-shaping policy (admission/batching rule).
///
/// Runs unconditionally after every event.  Implementations must be pure
/// (same input, same output) and may only *move* customers between queue and
/// service — the driver rejects a conductor that changes the total count.
///
/// # Thread safety
///
/// Replications may run in parallel via Rayon, so implementations must be
/// `Send + Sync`; per-run mutable state is not available by design.
pub trait Conductor: Send + Sync + 'static {
    fn conduct(&self, state: QueueState) -> QueueState;
}

/// A cost-rate function integrated over the run as a Riemann sum: each
/// elapsed segment of length `dt` spent in `state` contributes
/// `accrue(state, dt)` to the current cycle's cost.
pub trait CostModel: Send + Sync + 'static {
    fn accrue(&self, state: QueueState, dt: f64) -> f64;
}

// ── Stock implementations ─────────────────────────────────────────────────────

/// The stock batching rule: when the server is idle, admit up to
/// `max_batch` customers from the larger queue (ties broken toward male).
///
/// A busy server is never touched, so `in_service` stays bounded by
/// `max_batch` across the whole run.
#[derive(Copy, Clone, Debug)]
pub struct BatchConductor {
    pub max_batch: u32,
}

impl BatchConductor {
    pub const DEFAULT_BATCH: u32 = 3;

    pub fn new(max_batch: u32) -> Self {
        Self { max_batch }
    }
}

impl Default for BatchConductor {
    fn default() -> Self {
        Self { max_batch: Self::DEFAULT_BATCH }
    }
}

impl Conductor for BatchConductor {
    fn conduct(&self, mut state: QueueState) -> QueueState {
        if state.in_service != 0 {
            return state;
        }

        if state.queued_male >= state.queued_female {
            let batch = state.queued_male.min(self.max_batch);
            state.queued_male -= batch;
            state.in_service = batch;
        } else {
            let batch = state.queued_female.min(self.max_batch);
            state.queued_female -= batch;
            state.in_service = batch;
        }
        state
    }
}

/// The stock cost model: integrated total queue length,
/// `(queued_male + queued_female) × Δt`.
#[derive(Copy, Clone, Debug, Default)]
pub struct QueueLengthCost;

impl CostModel for QueueLengthCost {
    fn accrue(&self, state: QueueState, dt: f64) -> f64 {
        (state.queued_male + state.queued_female) as f64 * dt
    }
}
