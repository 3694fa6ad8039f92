//! The clock bank — three competing exponential clocks.
//!
//! # Design
//!
//! The two arrival processes and the batch-service process are modelled as a
//! race between independent exponential residual times.  When a clock fires,
//! only that clock is redrawn; every other *active* clock has the elapsed
//! time subtracted instead.  By the memoryless property, the residual of an
//! exponential clock conditioned on not having fired is still exponential
//! with the same rate, so subtraction is exact — no resampling of the losers.
//!
//! `t_service == 0.0` is the "server idle" sentinel.  Active exponential
//! clocks are always strictly positive (`RunRng::exp` never returns 0), and
//! a losing service clock stays strictly positive after subtraction (the
//! winner's value is strictly smaller), so the sentinel is unambiguous.

use rq_core::{Event, QueueState, RunRng, SimConfig};

/// Sentinel residual for an inactive service clock.
const IDLE: f64 = 0.0;

/// Residual times of the three competing exponential processes.
#[derive(Copy, Clone, Debug)]
pub struct ClockBank {
    /// Residual time until the next male arrival.
    pub t_male: f64,
    /// Residual time until the next female arrival.
    pub t_female: f64,
    /// Residual time until the current batch completes; [`IDLE`] (0.0) when
    /// the server is empty.
    pub t_service: f64,
}

impl ClockBank {
    /// Draw initial arrival residuals; the server starts idle.
    pub fn init(config: &SimConfig, rng: &mut RunRng) -> Self {
        ClockBank {
            t_male:    rng.exp(config.lambda_male),
            t_female:  rng.exp(config.lambda_female),
            t_service: IDLE,
        }
    }

    /// Resolve the race: which event fires next, and after how long?
    ///
    /// Pure function of the clocks, the current occupancy, and the capacity
    /// limits.  An arrival-clock win against a full queue is reported as the
    /// balk variant; the elapsed time is still the clock's value.
    ///
    /// Comparison order is fixed: male vs female, then vs service, with
    /// arrival clocks winning only on strict inequality (an exact tie goes
    /// to the service clock).  Ties have probability zero under continuous
    /// clocks, so the order only pins down determinism.
    pub fn next_event(&self, state: QueueState, config: &SimConfig) -> (f64, Event) {
        if self.t_service == IDLE {
            // Server empty: only the two arrival clocks race.
            return if self.t_male < self.t_female {
                (self.t_male, male_arrival(state, config))
            } else {
                (self.t_female, female_arrival(state, config))
            };
        }

        if self.t_male < self.t_female && self.t_male < self.t_service {
            (self.t_male, male_arrival(state, config))
        } else if self.t_female < self.t_service {
            (self.t_female, female_arrival(state, config))
        } else {
            (self.t_service, Event::ServiceCompletion)
        }
    }

    /// Redraw the winner's clock and age the losers by `dt`.
    ///
    /// Must be called exactly once per event, *after* the state transition
    /// and the conductor: the decision to activate, redraw, or idle the
    /// service clock depends on the post-transition occupancy.
    pub fn refresh(
        &mut self,
        dt:     f64,
        event:  Event,
        after:  QueueState,
        config: &SimConfig,
        rng:    &mut RunRng,
    ) {
        match event {
            Event::ArrivalMale | Event::BalkMale => {
                self.t_male = rng.exp(config.lambda_male);
                self.t_female -= dt;
            }
            Event::ArrivalFemale | Event::BalkFemale => {
                self.t_female = rng.exp(config.lambda_female);
                self.t_male -= dt;
            }
            Event::ServiceCompletion => {
                self.t_male -= dt;
                self.t_female -= dt;
            }
        }

        if event == Event::ServiceCompletion {
            // Batch finished: start the next one, or idle the server.
            self.t_service = if after.in_service > 0 {
                rng.exp(config.mu)
            } else {
                IDLE
            };
        } else if self.t_service == IDLE {
            // The conductor may have just admitted a batch to an idle server.
            if after.in_service > 0 {
                self.t_service = rng.exp(config.mu);
            }
        } else {
            self.t_service -= dt;
        }
    }
}

fn male_arrival(state: QueueState, config: &SimConfig) -> Event {
    if state.queued_male < config.male_queue_cap {
        Event::ArrivalMale
    } else {
        Event::BalkMale
    }
}

fn female_arrival(state: QueueState, config: &SimConfig) -> Event {
    if state.queued_female < config.female_queue_cap {
        Event::ArrivalFemale
    } else {
        Event::BalkFemale
    }
}
