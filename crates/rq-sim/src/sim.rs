//! The `Sim` struct, its event loop, and replication orchestration.

use rq_core::{Event, QueueState, RunRng, SimConfig};

use crate::clock::ClockBank;
use crate::observer::{NoopObserver, SimObserver};
use crate::policy::{Conductor, CostModel};
use crate::stats::{CycleRecord, RunStats};
use crate::{SimError, SimResult};

// ── Per-cycle accumulator ─────────────────────────────────────────────────────

/// Counters for the in-progress regeneration cycle, zeroed at each
/// regeneration point.
#[derive(Default)]
struct CycleAccum {
    arrivals_male: u64,
    arrivals_female: u64,
    balked_male: u64,
    balked_female: u64,
    served: u64,
    cost: f64,
}

impl CycleAccum {
    fn seal(&mut self, duration: f64) -> CycleRecord {
        let record = CycleRecord {
            duration,
            arrivals_male:   self.arrivals_male,
            arrivals_female: self.arrivals_female,
            balked_male:     self.balked_male,
            balked_female:   self.balked_female,
            served:          self.served,
            cost:            self.cost,
        };
        *self = CycleAccum::default();
        record
    }
}

// ── FailurePolicy ─────────────────────────────────────────────────────────────

/// What a batch of replications does when one replication fails (a conductor
/// violated the conservation invariant).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure aborts the whole batch.
    Abort,
    /// Failed replications are dropped; the batch returns the rest.
    Skip,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One configured experiment: a config plus its conductor and cost policies.
///
/// `Sim` holds no mutable run state — each call to [`run`][Sim::run] owns
/// its clock bank, occupancy, and statistics locally, so a single `Sim` can
/// drive any number of replications, sequentially or in parallel, with zero
/// shared mutable state.
///
/// Create via [`SimBuilder`][crate::SimBuilder], which validates the config.
pub struct Sim<C: Conductor, K: CostModel> {
    /// Immutable experiment parameters, shared by every replication.
    pub config: SimConfig,
    /// The admission/batching policy, run after every event.
    pub conductor: C,
    /// The cost-rate function integrated over the run.
    pub cost: K,
}

impl<C: Conductor, K: CostModel> Sim<C, K> {
    // ── Single replication ────────────────────────────────────────────────

    /// Run one replication on the given stream.
    ///
    /// Deterministic: the same stream always produces an identical
    /// [`RunStats`].
    pub fn run(&self, rng: &mut RunRng) -> SimResult<RunStats> {
        self.run_with(rng, &mut NoopObserver)
    }

    /// Run one replication with observer callbacks.
    pub fn run_with<O: SimObserver>(
        &self,
        rng:      &mut RunRng,
        observer: &mut O,
    ) -> SimResult<RunStats> {
        let cfg = &self.config;

        let mut clocks = ClockBank::init(cfg, rng);
        let mut state = QueueState::EMPTY;
        let mut stats = RunStats::default();

        let mut t = 0.0;
        let mut cycle_start = 0.0;
        let mut cycle = CycleAccum::default();

        // Timestamp of the previous event of each type, for interarrival gaps.
        let mut last_male = 0.0;
        let mut last_female = 0.0;
        let mut last_balk_male = 0.0;
        let mut last_balk_female = 0.0;

        // The horizon is a soft stopping check: the last event that crosses
        // it is still fully applied, never truncated mid-event.
        while t < cfg.horizon {
            let (dt, event) = clocks.next_event(state, cfg);
            let before = state;
            t += dt;

            // Cost and downtime accrue over the segment spent in the
            // pre-event state.
            cycle.cost += self.cost.accrue(before, dt);
            if before.is_empty() {
                stats.downtime += dt;
            }

            let applied = before.apply(event);
            state = self.conductor.conduct(applied);
            if state.total() != applied.total() {
                return Err(SimError::ConductorConservation {
                    before: applied.total(),
                    after:  state.total(),
                });
            }

            // Refresh must see the post-conductor occupancy so the service
            // clock activates when a batch was just admitted.
            clocks.refresh(dt, event, state, cfg, rng);

            match event {
                Event::ArrivalMale => {
                    cycle.arrivals_male += 1;
                    stats.interarrival_male.push(t - last_male);
                    last_male = t;
                }
                Event::ArrivalFemale => {
                    cycle.arrivals_female += 1;
                    stats.interarrival_female.push(t - last_female);
                    last_female = t;
                }
                Event::BalkMale => {
                    cycle.balked_male += 1;
                    stats.interarrival_balk_male.push(t - last_balk_male);
                    last_balk_male = t;
                }
                Event::BalkFemale => {
                    cycle.balked_female += 1;
                    stats.interarrival_balk_female.push(t - last_balk_female);
                    last_balk_female = t;
                }
                Event::ServiceCompletion => {
                    cycle.served += 1;
                    stats.total_served += 1;
                }
            }

            observer.on_event(t, dt, event, state);

            // Regeneration: the process is back at its reference state.
            if state.is_empty() {
                let record = cycle.seal(t - cycle_start);
                observer.on_cycle(t, &record);
                stats.cycles.push(record);
                cycle_start = t;
            }
        }

        stats.elapsed = t;
        stats.final_state = state;
        stats.total_arrivals_male = stats.interarrival_male.len() as u64;
        stats.total_arrivals_female = stats.interarrival_female.len() as u64;
        stats.total_balked_male = stats.interarrival_balk_male.len() as u64;
        stats.total_balked_female = stats.interarrival_balk_female.len() as u64;

        observer.on_run_end(&stats);
        Ok(stats)
    }

    // ── Replication batches ───────────────────────────────────────────────

    /// Run `n` independent replications.
    ///
    /// Replication `i` draws from the deterministic sub-stream
    /// `RunRng::substream(config.seed, i)`, so results are reproducible and
    /// independent of completion order.  With the `parallel` feature the
    /// replications run on a Rayon pool sized from `config.num_threads`;
    /// results are still indexed by replication number, not completion order.
    pub fn run_replications(
        &self,
        n:      usize,
        policy: FailurePolicy,
    ) -> SimResult<Vec<RunStats>> {
        #[cfg(not(feature = "parallel"))]
        let runs: Vec<SimResult<RunStats>> = (0..n)
            .map(|i| {
                let mut rng = RunRng::substream(self.config.seed, i as u64);
                self.run(&mut rng)
            })
            .collect();

        #[cfg(feature = "parallel")]
        let runs: Vec<SimResult<RunStats>> = {
            use rayon::prelude::*;

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.num_threads.unwrap_or(0))
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?;

            pool.install(|| {
                (0..n)
                    .into_par_iter()
                    .map(|i| {
                        let mut rng = RunRng::substream(self.config.seed, i as u64);
                        self.run(&mut rng)
                    })
                    .collect()
            })
        };

        let mut results = Vec::with_capacity(n);
        for run in runs {
            match run {
                Ok(stats) => results.push(stats),
                Err(e) => match policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {}
                },
            }
        }
        Ok(results)
    }
}
