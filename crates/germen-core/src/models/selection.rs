//! SELECTION — exits from the active population.
//!
//! The same contract serves three doors: memory selection, plasma
//! selection, and memory-cell reentry into the dark zone. In every case
//! the model removes the chosen cells from the working set and returns
//! exactly them; the engine decides which compartment they land in.

use crate::lineage::Lineage;
use crate::receptor::Receptor;
use crate::types::CellId;
use rand::RngCore;

/// Select cells out of a working set.
///
/// Contract: remove the selected cells from `cells` (mutating the input
/// set) and return exactly them. Unselected cells keep their relative
/// order.
pub trait SelectionModel<R: Receptor>: Send + Sync {
    fn select(
        &self,
        cells: &mut Vec<CellId>,
        lineage: &Lineage<R>,
        rng: &mut dyn RngCore,
    ) -> Vec<CellId>;
}
