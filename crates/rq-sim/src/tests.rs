//! Integration tests for rq-sim.

use rq_core::{Event, QueueState, RunRng, SimConfig};

use crate::{
    BatchConductor, ClockBank, Conductor, CostModel, FailurePolicy, QueueLengthCost, SimBuilder,
    SimObserver, pooled_cycles,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The concrete scenario from the design notes: moderately loaded, finite
/// queues, fixed seed.
fn capped_config() -> SimConfig {
    SimConfig {
        horizon:          300.0,
        lambda_male:      1.4,
        lambda_female:    1.4,
        mu:               1.0,
        male_queue_cap:   10,
        female_queue_cap: 10,
        seed:             42,
        num_threads:      Some(1),
    }
}

/// Records per-event invariants for a whole run.
struct InvariantProbe {
    max_queued_male:   u32,
    max_queued_female: u32,
    max_in_service:    u32,
    empty_visits:      usize,
    cycle_calls:       usize,
    events:            usize,
    nonpositive_dt:    usize,
}

impl InvariantProbe {
    fn new() -> Self {
        Self {
            max_queued_male:   0,
            max_queued_female: 0,
            max_in_service:    0,
            empty_visits:      0,
            cycle_calls:       0,
            events:            0,
            nonpositive_dt:    0,
        }
    }
}

impl SimObserver for InvariantProbe {
    fn on_event(&mut self, _t: f64, dt: f64, _event: Event, state: QueueState) {
        self.events += 1;
        if dt <= 0.0 {
            self.nonpositive_dt += 1;
        }
        self.max_queued_male = self.max_queued_male.max(state.queued_male);
        self.max_queued_female = self.max_queued_female.max(state.queued_female);
        self.max_in_service = self.max_in_service.max(state.in_service);
        if state.is_empty() {
            self.empty_visits += 1;
        }
    }

    fn on_cycle(&mut self, _t: f64, _cycle: &crate::CycleRecord) {
        self.cycle_calls += 1;
    }
}

// ── Clock bank ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clock_tests {
    use super::*;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    #[test]
    fn idle_server_races_arrivals_only() {
        let bank = ClockBank { t_male: 1.0, t_female: 2.0, t_service: 0.0 };
        let (dt, event) = bank.next_event(QueueState::EMPTY, &cfg());
        assert_eq!((dt, event), (1.0, Event::ArrivalMale));

        let bank = ClockBank { t_male: 3.0, t_female: 2.0, t_service: 0.0 };
        let (dt, event) = bank.next_event(QueueState::EMPTY, &cfg());
        assert_eq!((dt, event), (2.0, Event::ArrivalFemale));
    }

    #[test]
    fn smallest_active_clock_wins() {
        let state = QueueState::new(0, 0, 1);
        let bank = ClockBank { t_male: 2.0, t_female: 3.0, t_service: 1.0 };
        assert_eq!(bank.next_event(state, &cfg()), (1.0, Event::ServiceCompletion));

        let bank = ClockBank { t_male: 0.5, t_female: 3.0, t_service: 1.0 };
        assert_eq!(bank.next_event(state, &cfg()), (0.5, Event::ArrivalMale));

        let bank = ClockBank { t_male: 2.0, t_female: 0.25, t_service: 1.0 };
        assert_eq!(bank.next_event(state, &cfg()), (0.25, Event::ArrivalFemale));
    }

    #[test]
    fn exact_tie_goes_to_the_service_clock() {
        // Arrival clocks win only on strict inequality.
        let state = QueueState::new(0, 0, 1);
        let bank = ClockBank { t_male: 1.0, t_female: 2.0, t_service: 1.0 };
        assert_eq!(bank.next_event(state, &cfg()), (1.0, Event::ServiceCompletion));
    }

    #[test]
    fn full_queue_turns_arrival_into_balk() {
        let config = SimConfig { male_queue_cap: 2, ..cfg() };
        let bank = ClockBank { t_male: 1.0, t_female: 2.0, t_service: 0.0 };

        let below_cap = QueueState::new(1, 0, 0);
        assert_eq!(bank.next_event(below_cap, &config), (1.0, Event::ArrivalMale));

        let at_cap = QueueState::new(2, 0, 0);
        // Time still elapses: the arrival process continues, the customer is lost.
        assert_eq!(bank.next_event(at_cap, &config), (1.0, Event::BalkMale));
    }

    #[test]
    fn refresh_redraws_winner_and_ages_losers() {
        let mut rng = RunRng::from_seed(1);
        let mut bank = ClockBank { t_male: 1.0, t_female: 2.5, t_service: 2.0 };
        let after = QueueState::new(0, 0, 1);
        bank.refresh(1.0, Event::ArrivalMale, after, &cfg(), &mut rng);

        assert!(bank.t_male > 0.0, "winner redrawn, got {}", bank.t_male);
        assert_eq!(bank.t_female, 1.5);
        assert_eq!(bank.t_service, 1.0);
    }

    #[test]
    fn conductor_admission_activates_service_clock() {
        let mut rng = RunRng::from_seed(1);
        let mut bank = ClockBank { t_male: 1.0, t_female: 2.0, t_service: 0.0 };
        // The arrival went straight into service via the conductor.
        let after = QueueState::new(0, 0, 1);
        bank.refresh(1.0, Event::ArrivalMale, after, &cfg(), &mut rng);
        assert!(bank.t_service > 0.0);
    }

    #[test]
    fn balk_leaves_idle_service_clock_idle() {
        let mut rng = RunRng::from_seed(1);
        let mut bank = ClockBank { t_male: 1.0, t_female: 2.0, t_service: 0.0 };
        let after = QueueState::new(2, 0, 0); // still nobody in service
        bank.refresh(1.0, Event::BalkMale, after, &cfg(), &mut rng);
        assert_eq!(bank.t_service, 0.0);
    }

    #[test]
    fn completion_restarts_or_idles_the_server() {
        let mut rng = RunRng::from_seed(1);

        // More of the batch left: redraw.
        let mut bank = ClockBank { t_male: 3.0, t_female: 2.0, t_service: 1.0 };
        bank.refresh(1.0, Event::ServiceCompletion, QueueState::new(0, 0, 1), &cfg(), &mut rng);
        assert!(bank.t_service > 0.0);
        assert_eq!(bank.t_male, 2.0);
        assert_eq!(bank.t_female, 1.0);

        // Last customer served and nothing admitted: back to the sentinel.
        let mut bank = ClockBank { t_male: 3.0, t_female: 2.0, t_service: 1.0 };
        bank.refresh(1.0, Event::ServiceCompletion, QueueState::EMPTY, &cfg(), &mut rng);
        assert_eq!(bank.t_service, 0.0);
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn admits_from_the_larger_queue() {
        let c = BatchConductor::default();
        assert_eq!(c.conduct(QueueState::new(5, 2, 0)), QueueState::new(2, 2, 3));
        assert_eq!(c.conduct(QueueState::new(1, 4, 0)), QueueState::new(1, 1, 3));
    }

    #[test]
    fn ties_break_toward_male() {
        let c = BatchConductor::default();
        assert_eq!(c.conduct(QueueState::new(2, 2, 0)), QueueState::new(0, 2, 2));
    }

    #[test]
    fn busy_server_is_never_touched() {
        let c = BatchConductor::default();
        let busy = QueueState::new(4, 4, 2);
        assert_eq!(c.conduct(busy), busy);
    }

    #[test]
    fn empty_state_stays_empty() {
        let c = BatchConductor::default();
        assert_eq!(c.conduct(QueueState::EMPTY), QueueState::EMPTY);
    }

    #[test]
    fn batch_size_is_configurable() {
        let c = BatchConductor::new(5);
        assert_eq!(c.conduct(QueueState::new(7, 0, 0)), QueueState::new(2, 0, 5));
        assert_eq!(c.conduct(QueueState::new(0, 3, 0)), QueueState::new(0, 0, 3));
    }

    #[test]
    fn queue_length_cost_integrates_waiting_customers() {
        let cost = QueueLengthCost;
        assert_eq!(cost.accrue(QueueState::new(2, 3, 1), 0.5), 2.5);
        assert_eq!(cost.accrue(QueueState::new(0, 0, 3), 10.0), 0.0);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_stock_policies() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert_eq!(sim.config.horizon, 100.0);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let cfg = SimConfig { lambda_male: 0.0, ..SimConfig::default() };
        assert!(SimBuilder::new(cfg).build().is_err());

        let cfg = SimConfig { horizon: -5.0, ..SimConfig::default() };
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn policies_are_swappable() {
        struct FemaleFirst;
        impl Conductor for FemaleFirst {
            fn conduct(&self, mut state: QueueState) -> QueueState {
                if state.in_service == 0 && state.queued_female > 0 {
                    state.queued_female -= 1;
                    state.in_service = 1;
                }
                state
            }
        }
        struct ServiceCost;
        impl CostModel for ServiceCost {
            fn accrue(&self, state: QueueState, dt: f64) -> f64 {
                state.in_service as f64 * dt
            }
        }

        let sim = SimBuilder::new(capped_config())
            .conductor(FemaleFirst)
            .cost_model(ServiceCost)
            .build()
            .unwrap();
        let mut rng = RunRng::substream(sim.config.seed, 0);
        let stats = sim.run(&mut rng).unwrap();
        assert!(stats.total_served > 0);
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use super::*;

    #[test]
    fn same_stream_is_bit_identical() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let a = sim.run(&mut RunRng::substream(42, 0)).unwrap();
        let b = sim.run(&mut RunRng::substream(42, 0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn substreams_are_independent() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let a = sim.run(&mut RunRng::substream(42, 1)).unwrap();
        let b = sim.run(&mut RunRng::substream(42, 2)).unwrap();
        assert_ne!(a, b);
        // Both are non-degenerate runs, not empty shells.
        assert!(a.total_arrivals() > 0 && b.total_arrivals() > 0);
    }

    #[test]
    fn horizon_is_a_soft_stop() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let stats = sim.run(&mut RunRng::substream(42, 0)).unwrap();
        // The event that crosses the horizon is still applied.
        assert!(stats.elapsed >= sim.config.horizon);
        assert!(stats.downtime > 0.0 && stats.downtime <= stats.elapsed);
    }

    #[test]
    fn customers_are_conserved() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let stats = sim.run(&mut RunRng::substream(42, 0)).unwrap();
        // Everyone admitted is either served or still present at the horizon.
        assert_eq!(
            stats.total_arrivals(),
            stats.total_served + stats.final_state.total() as u64
        );
    }

    #[test]
    fn capacity_bound_holds_across_the_run() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let mut probe = InvariantProbe::new();
        let stats = sim
            .run_with(&mut RunRng::substream(42, 0), &mut probe)
            .unwrap();

        assert!(probe.events > 0);
        assert_eq!(probe.nonpositive_dt, 0);
        assert!(probe.max_queued_male <= 10, "got {}", probe.max_queued_male);
        assert!(probe.max_queued_female <= 10, "got {}", probe.max_queued_female);
        assert!(probe.max_in_service <= 3, "got {}", probe.max_in_service);
        // A loaded system with finite queues balks eventually.
        assert!(stats.total_balked_male + stats.total_balked_female > 0);
    }

    #[test]
    fn cycles_partition_the_run() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let mut probe = InvariantProbe::new();
        let stats = sim
            .run_with(&mut RunRng::substream(42, 0), &mut probe)
            .unwrap();

        // One sealed cycle per return to the all-empty state.
        assert_eq!(stats.cycles.len(), probe.empty_visits);
        assert_eq!(stats.cycles.len(), probe.cycle_calls);
        assert!(!stats.cycles.is_empty());

        // Durations telescope to the last regeneration instant.
        let total: f64 = stats.cycle_durations().iter().sum();
        assert!(total <= stats.elapsed + 1e-9);
        assert!(stats.cycle_durations().iter().all(|&d| d > 0.0));

        // Sealed-cycle counts never exceed the run totals; the remainder sits
        // in the unfinished final cycle.
        let cycle_arrivals: u64 = stats.cycles.iter().map(|c| c.arrivals()).sum();
        let cycle_served: u64 = stats.cycles.iter().map(|c| c.served).sum();
        assert!(cycle_arrivals <= stats.total_arrivals());
        assert!(cycle_served <= stats.total_served);
    }

    #[test]
    fn interarrival_gaps_are_positive_and_track_the_rate() {
        let cfg = SimConfig {
            horizon: 5_000.0,
            lambda_male: 1.4,
            lambda_female: 1.4,
            mu: 1.0,
            seed: 7,
            ..SimConfig::default()
        };
        let sim = SimBuilder::new(cfg).build().unwrap();
        let stats = sim.run(&mut RunRng::substream(7, 0)).unwrap();

        assert!(stats.interarrival_male.iter().all(|&g| g > 0.0));
        let n = stats.interarrival_male.len();
        assert!(n > 1_000);
        let mean: f64 = stats.interarrival_male.iter().sum::<f64>() / n as f64;
        // Exponential interarrivals with rate 1.4: mean 1/1.4 ≈ 0.714.
        assert!((mean - 1.0 / 1.4).abs() < 0.05, "got {mean}");
    }

    #[test]
    fn totals_match_sequence_lengths() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let stats = sim.run(&mut RunRng::substream(42, 0)).unwrap();
        assert_eq!(stats.total_arrivals_male, stats.interarrival_male.len() as u64);
        assert_eq!(stats.total_balked_female, stats.interarrival_balk_female.len() as u64);
    }
}

// ── Replication batches ───────────────────────────────────────────────────────

#[cfg(test)]
mod replication_tests {
    use super::*;

    #[test]
    fn batch_matches_individual_substream_runs() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let batch = sim.run_replications(4, FailurePolicy::Abort).unwrap();
        assert_eq!(batch.len(), 4);

        for (i, stats) in batch.iter().enumerate() {
            let mut rng = RunRng::substream(sim.config.seed, i as u64);
            assert_eq!(*stats, sim.run(&mut rng).unwrap());
        }
    }

    #[test]
    fn pooled_cycles_concatenate_all_replications() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let batch = sim.run_replications(3, FailurePolicy::Abort).unwrap();
        let (costs, weights) = pooled_cycles(&batch);

        let expected: usize = batch.iter().map(|r| r.cycles.len()).sum();
        assert_eq!(costs.len(), expected);
        assert_eq!(weights.len(), expected);
        assert!(costs.iter().all(|&c| c >= 0.0));
    }

    #[test]
    fn failure_policy_decides_abort_or_skip() {
        // A conductor that conjures a customer out of thin air.
        struct Counterfeiter;
        impl Conductor for Counterfeiter {
            fn conduct(&self, mut state: QueueState) -> QueueState {
                state.queued_male += 1;
                state
            }
        }

        let sim = SimBuilder::new(capped_config())
            .conductor(Counterfeiter)
            .build()
            .unwrap();

        assert!(sim.run_replications(3, FailurePolicy::Abort).is_err());
        let skipped = sim.run_replications(3, FailurePolicy::Skip).unwrap();
        assert!(skipped.is_empty());
    }

    #[test]
    fn end_to_end_cost_per_customer_estimate() {
        // Lightly loaded system (μ = 3.5 vs λ = 1 + 1): frequent
        // regenerations, plenty of cycles for the ratio estimator.
        let cfg = SimConfig {
            horizon: 2_000.0,
            mu: 3.5,
            seed: 11,
            ..SimConfig::default()
        };
        let sim = SimBuilder::new(cfg).build().unwrap();
        let runs = sim.run_replications(4, FailurePolicy::Abort).unwrap();

        let (costs, weights) = pooled_cycles(&runs);
        assert!(costs.len() > 100, "only {} cycles", costs.len());

        let est = rq_stats::regenerative_estimate(&costs, &weights, 0.05).unwrap();
        assert!(est.ratio.is_finite() && est.ratio >= 0.0);
        assert!(est.interval.contains(est.ratio));
        assert_eq!(est.cycles, costs.len());

        // The per-run helpers feed the same estimator for a single replication.
        let single = rq_stats::regenerative_estimate(
            &runs[0].cycle_costs(),
            &runs[0].cycle_weights(),
            0.05,
        )
        .unwrap();
        assert!(single.ratio.is_finite());
    }

    #[test]
    fn display_summaries_render() {
        let sim = SimBuilder::new(capped_config()).build().unwrap();
        let stats = sim.run(&mut RunRng::substream(42, 0)).unwrap();
        let text = stats.to_string();
        assert!(text.contains("STATISTICS"));
        assert!(sim.config.to_string().contains("SYSTEM SUMMARY"));
    }
}
