//! `rq-core` — foundational types for the `rq` regenerative queue simulator.
//!
//! This crate is a dependency of every other `rq-*` crate.  It intentionally
//! has no `rq-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                           |
//! |------------|----------------------------------------------------|
//! | [`state`]  | `QueueState`, `Event`, event application           |
//! | [`config`] | `SimConfig` and its validation                     |
//! | [`rng`]    | `RunRng` — deterministic per-replication streams   |
//! | [`error`]  | `CoreError`, `CoreResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the plain-data types. |

pub mod config;
pub mod error;
pub mod rng;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, UNBOUNDED};
pub use error::{CoreError, CoreResult};
pub use rng::RunRng;
pub use state::{Event, QueueState};
