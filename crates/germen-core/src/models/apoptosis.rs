//! APOPTOSIS — programmed death in the light zone.
//!
//! Cells that fail to signal through their receptor, or that lose the
//! competition for limited T-cell help, die in place. Death here is clean
//! and accounted: a model removes cells from the working set and returns
//! exactly the removed ids, so the engine's population bookkeeping always
//! balances.
//!
//! Two composition shapes exist. The whole-population shape decides in one
//! shot. The sequential shape first computes a population-level aggregate
//! (say, the mean captured quantity) and then decides each cell's fate
//! independently against that aggregate — rank-based, ratio-based and
//! probabilistic competition rules all need the same up-front statistic and
//! otherwise behave identically, so the split lives here once.

use crate::bcell::BCell;
use crate::lineage::Lineage;
use crate::pool::AntigenPool;
use crate::receptor::Receptor;
use crate::types::CellId;
use rand::RngCore;

/// Whole-population apoptosis decision.
///
/// Contract: remove a subset of `cells` (mutating the input set) and return
/// exactly that subset. Survivors keep their relative order.
pub trait ApoptosisModel<R: Receptor>: Send + Sync {
    fn apoptose(
        &self,
        cells: &mut Vec<CellId>,
        lineage: &Lineage<R>,
        pool: &AntigenPool<R::Epitope>,
        rng: &mut dyn RngCore,
    ) -> Vec<CellId>;
}

/// Sequential apoptosis: aggregate once, then decide per cell.
///
/// `initialize` computes one population-level statistic over the full cell
/// set before any decision is made. `survives` then judges each cell
/// reading only that precomputed aggregate — never other cells' in-flight
/// fates — which is what makes the per-cell step safe to serialize in any
/// order.
pub trait SequentialApoptosisModel<R: Receptor>: Send + Sync {
    /// The population-level statistic the per-cell decisions read.
    fn initialize(
        &self,
        cells: &[CellId],
        lineage: &Lineage<R>,
        pool: &AntigenPool<R::Epitope>,
    ) -> f64;

    /// Whether this cell survives, given the precomputed aggregate.
    fn survives(&self, cell: &BCell<R>, aggregate: f64, rng: &mut dyn RngCore) -> bool;
}

/// Adapter running a sequential model under the whole-population contract.
pub struct Sequential<M>(pub M);

impl<R, M> ApoptosisModel<R> for Sequential<M>
where
    R: Receptor,
    M: SequentialApoptosisModel<R>,
{
    fn apoptose(
        &self,
        cells: &mut Vec<CellId>,
        lineage: &Lineage<R>,
        pool: &AntigenPool<R::Epitope>,
        rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        let aggregate = self.0.initialize(cells, lineage, pool);
        let mut perished = Vec::new();
        let mut survivors = Vec::with_capacity(cells.len());
        for &id in cells.iter() {
            match lineage.get(id) {
                Some(cell) if self.0.survives(cell, aggregate, rng) => survivors.push(id),
                _ => perished.push(id),
            }
        }
        *cells = survivors;
        perished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::TestReceptor;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Survives iff the cell's id index clears the population's mean index.
    struct AboveMeanIndex;

    impl SequentialApoptosisModel<TestReceptor> for AboveMeanIndex {
        fn initialize(
            &self,
            cells: &[CellId],
            _lineage: &Lineage<TestReceptor>,
            _pool: &AntigenPool<u64>,
        ) -> f64 {
            if cells.is_empty() {
                return 0.0;
            }
            cells.iter().map(|id| id.index() as f64).sum::<f64>() / cells.len() as f64
        }

        fn survives(
            &self,
            cell: &BCell<TestReceptor>,
            aggregate: f64,
            _rng: &mut dyn RngCore,
        ) -> bool {
            cell.id().index() as f64 >= aggregate
        }
    }

    #[test]
    fn sequential_adapter_removes_and_returns_the_same_subset() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(0), 0);
        let mut cells = vec![founder];
        for _ in 0..5 {
            cells.push(lineage.replicate(founder, 1).unwrap());
        }
        let before = cells.clone();

        let pool: AntigenPool<u64> = AntigenPool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let perished = Sequential(AboveMeanIndex).apoptose(&mut cells, &lineage, &pool, &mut rng);

        assert_eq!(cells.len() + perished.len(), before.len());
        for id in &before {
            let survived = cells.contains(id);
            let died = perished.contains(id);
            assert!(survived != died, "{} must be in exactly one set", id);
        }
        // Ids below the mean index perished.
        assert!(perished.iter().all(|id| id.index() < 3));
    }
}
