//! Division models — dark-zone round grants.

use germen_core::error::Result;
use germen_core::lineage::Lineage;
use germen_core::models::DivisionModel;
use germen_core::pool::AntigenPool;
use germen_core::receptor::Receptor;
use germen_core::types::CellId;
use rand::RngCore;

/// Every survivor is granted the same number of rounds.
#[derive(Debug, Clone, Copy)]
pub struct FixedDivision {
    pub rounds: u32,
}

impl FixedDivision {
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }
}

impl<R: Receptor> DivisionModel<R> for FixedDivision {
    fn assign(
        &self,
        cells: &[CellId],
        lineage: &mut Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
        _rng: &mut dyn RngCore,
    ) -> Result<()> {
        for &id in cells {
            lineage.cell_mut(id)?.assign_division_count(self.rounds)?;
        }
        Ok(())
    }
}

/// Rounds scale with captured quantity: the best forager in the set gets
/// `max_rounds`, everyone else a proportional share (rounded up, so any
/// cell that captured something divides at least once).
#[derive(Debug, Clone, Copy)]
pub struct QuantityProportionalDivision {
    pub max_rounds: u32,
}

impl QuantityProportionalDivision {
    pub fn new(max_rounds: u32) -> Self {
        Self { max_rounds }
    }
}

impl<R: Receptor> DivisionModel<R> for QuantityProportionalDivision {
    fn assign(
        &self,
        cells: &[CellId],
        lineage: &mut Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
        _rng: &mut dyn RngCore,
    ) -> Result<()> {
        let best = cells
            .iter()
            .filter_map(|&id| lineage.get(id))
            .map(|cell| cell.total_quantity())
            .fold(0.0_f64, f64::max);

        for &id in cells {
            let quantity = lineage.cell(id)?.total_quantity();
            let rounds = if best > 0.0 && quantity > 0.0 {
                ((self.max_rounds as f64) * quantity / best).ceil() as u32
            } else {
                0
            };
            lineage.cell_mut(id)?.assign_division_count(rounds)?;
        }
        Ok(())
    }
}
