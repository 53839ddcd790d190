//! DIVISION — dark-zone round grants.

use crate::error::Result;
use crate::lineage::Lineage;
use crate::pool::AntigenPool;
use crate::receptor::Receptor;
use crate::types::CellId;
use rand::RngCore;

/// Grant each competition survivor its division rounds for the next dark
/// zone.
///
/// Runs immediately after T-cell-competition apoptosis, against the same
/// cell set and pool snapshot. Each cell's count is written exactly once;
/// writing a cell twice surfaces the lineage's contract violation.
pub trait DivisionModel<R: Receptor>: Send + Sync {
    fn assign(
        &self,
        cells: &[CellId],
        lineage: &mut Lineage<R>,
        pool: &AntigenPool<R::Epitope>,
        rng: &mut dyn RngCore,
    ) -> Result<()>;
}
