//! Run observer trait for progress reporting and data collection.

use rq_core::{Event, QueueState};

use crate::{CycleRecord, RunStats};

/// Callbacks invoked by [`Sim::run_with`][crate::Sim::run_with] at key
/// points in the event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Reporting lives entirely behind this
/// trait — the driver never prints.
///
/// # Example — event trace printer
///
/// ```rust,ignore
/// struct TracePrinter;
///
/// impl SimObserver for TracePrinter {
///     fn on_event(&mut self, t: f64, _dt: f64, event: Event, state: QueueState) {
///         println!("t={t:.3} {event} -> {state}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after each event is applied, conducted, and recorded.
    ///
    /// `state` is the post-conductor occupancy; `dt` is the time elapsed
    /// since the previous event.
    fn on_event(&mut self, _t: f64, _dt: f64, _event: Event, _state: QueueState) {}

    /// Called when a regeneration cycle is sealed (state returned to
    /// all-empty), before the record is appended to the run's statistics.
    fn on_cycle(&mut self, _t: f64, _cycle: &CycleRecord) {}

    /// Called once when the horizon is reached, with the completed record.
    fn on_run_end(&mut self, _stats: &RunStats) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `run_with` but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
