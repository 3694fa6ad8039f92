//! Fluent builder for constructing a [`Sim`].

use rq_core::SimConfig;

use crate::policy::{BatchConductor, Conductor, CostModel, QueueLengthCost};
use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<C, K>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, rates, capacities, seed.
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                              |
/// |------------------|--------------------------------------|
/// | `.conductor(c)`  | [`BatchConductor`] with batch size 3 |
/// | `.cost_model(k)` | [`QueueLengthCost`]                  |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config)
///     .conductor(BatchConductor::new(5))
///     .build()?;
/// let stats = sim.run(&mut RunRng::substream(config.seed, 0))?;
/// ```
pub struct SimBuilder<C = BatchConductor, K = QueueLengthCost> {
    config:    SimConfig,
    conductor: C,
    cost:      K,
}

impl SimBuilder {
    /// Create a builder with the stock policies.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            conductor: BatchConductor::default(),
            cost:      QueueLengthCost,
        }
    }
}

impl<C: Conductor, K: CostModel> SimBuilder<C, K> {
    /// Swap the admission/batching policy.
    pub fn conductor<C2: Conductor>(self, conductor: C2) -> SimBuilder<C2, K> {
        SimBuilder {
            config: self.config,
            conductor,
            cost: self.cost,
        }
    }

    /// Swap the cost-rate function.
    pub fn cost_model<K2: CostModel>(self, cost: K2) -> SimBuilder<C, K2> {
        SimBuilder {
            config:    self.config,
            conductor: self.conductor,
            cost,
        }
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<C, K>> {
        self.config.validate()?;
        Ok(Sim {
            config:    self.config,
            conductor: self.conductor,
            cost:      self.cost,
        })
    }
}
