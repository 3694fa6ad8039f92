//! `rq-stats` — estimation layer for the `rq` regenerative queue simulator.
//!
//! Pure functions over completed sample sequences, no hidden state.  The
//! inputs are exactly what `rq-sim` accumulates: interarrival gaps, cycle
//! costs, and cycle weights.
//!
//! # What lives here
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`describe`] | `mean`, `variance`, `confidence_interval`, `Interval` |
//! | [`ratio`]    | `regenerative_estimate`, `RatioEstimate`            |
//! | [`normal`]   | `inverse_standard_normal` (Acklam approximation)    |
//! | [`error`]    | `StatsError`, `StatsResult`                         |
//!
//! Every function signals insufficient data or out-of-range parameters as a
//! [`StatsError`] instead of silently returning NaN.

pub mod describe;
pub mod error;
pub mod normal;
pub mod ratio;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use describe::{Interval, confidence_interval, mean, variance};
pub use error::{StatsError, StatsResult};
pub use normal::inverse_standard_normal;
pub use ratio::{RatioEstimate, regenerative_estimate};
