//! ACTIVATION — germline founding and expansion.

use crate::error::Result;
use crate::lineage::Lineage;
use crate::pool::AntigenPool;
use crate::receptor::Receptor;
use crate::types::CellId;
use rand::RngCore;

/// Found and expand the germline population.
///
/// `activate` runs once, on cycle 0, after the founding vaccine is merged:
/// it creates the generation-0 founder cells, drawing receptors from the
/// structural layer. `replicate` runs once, on cycle 1: it expands the
/// founders by plain replication (no mutation), consuming each founder
/// exactly once and returning the replacement generation — whose size
/// becomes the trial's `initial_size`.
pub trait ActivationModel<R: Receptor>: Send + Sync {
    fn activate(
        &self,
        pool: &AntigenPool<R::Epitope>,
        lineage: &mut Lineage<R>,
        rng: &mut dyn RngCore,
    ) -> Vec<CellId>;

    fn replicate(
        &self,
        founders: &[CellId],
        lineage: &mut Lineage<R>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<CellId>>;
}
