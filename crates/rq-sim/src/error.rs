use rq_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    /// The conductor may only move customers between queue and service;
    /// creating or destroying them breaks the conservation invariant.
    #[error("conductor changed the customer count from {before} to {after}")]
    ConductorConservation { before: u32, after: u32 },

    #[error("failed to build replication worker pool: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
