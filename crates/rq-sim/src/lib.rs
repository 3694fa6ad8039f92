//! `rq-sim` — event loop and replication orchestration for the `rq`
//! regenerative queue simulator.
//!
//! # Event loop
//!
//! ```text
//! while t < horizon:
//!   ① Race     — ClockBank picks the winning clock → (Δt, event);
//!                 an arrival into a full queue becomes a balk.
//!   ② Advance  — t += Δt; accrue cost and downtime over the Δt segment
//!                 spent in the pre-event state.
//!   ③ Apply    — the event mutates the occupancy triple, then the
//!                 conductor (batch-admission policy) reshapes it.
//!   ④ Refresh  — the winning clock is redrawn; every other active clock
//!                 has Δt subtracted (memoryless property); the service
//!                 clock activates or idles based on post-event occupancy.
//!   ⑤ Record   — interarrival gap, cycle counters; if the state returned
//!                 to all-empty, seal the regeneration cycle.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rq_core::SimConfig;
//! use rq_sim::{FailurePolicy, SimBuilder};
//!
//! let sim = SimBuilder::new(SimConfig { horizon: 1000.0, ..Default::default() })
//!     .build()?;
//! let runs = sim.run_replications(100, FailurePolicy::Abort)?;
//! ```

pub mod builder;
pub mod clock;
pub mod error;
pub mod observer;
pub mod policy;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use clock::ClockBank;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use policy::{BatchConductor, Conductor, CostModel, QueueLengthCost};
pub use sim::{FailurePolicy, Sim};
pub use stats::{CycleRecord, RunStats, pooled_cycles};
