//! Apoptosis models — BCR signaling and T-cell competition.
//!
//! The whole-population models cover the BCR-signaling step: a cell that
//! bound nothing (or bound too weakly) dies regardless of what the rest of
//! the population did. The sequential models cover T-cell competition,
//! where every decision reads one population-level statistic computed up
//! front — mean captured quantity or a quantity quantile.

use germen_core::bcell::BCell;
use germen_core::lineage::Lineage;
use germen_core::models::{ApoptosisModel, SequentialApoptosisModel};
use germen_core::pool::AntigenPool;
use germen_core::receptor::Receptor;
use germen_core::types::CellId;
use rand::{Rng, RngCore};

/// Cells that recorded no binding events die.
///
/// Relies on the no-affinity sentinel: a cell that never bound carries
/// negative infinity and zero captured quantity.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarvationApoptosis;

impl<R: Receptor> ApoptosisModel<R> for StarvationApoptosis {
    fn apoptose(
        &self,
        cells: &mut Vec<CellId>,
        lineage: &Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
        _rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        let mut perished = Vec::new();
        cells.retain(|&id| {
            let starving = lineage.get(id).map_or(true, |cell| !cell.has_bound());
            if starving {
                perished.push(id);
            }
            !starving
        });
        perished
    }
}

/// Cells whose best affinity falls below a floor die.
#[derive(Debug, Clone, Copy)]
pub struct AffinityFloorApoptosis {
    pub floor: f64,
}

impl AffinityFloorApoptosis {
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }
}

impl<R: Receptor> ApoptosisModel<R> for AffinityFloorApoptosis {
    fn apoptose(
        &self,
        cells: &mut Vec<CellId>,
        lineage: &Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
        _rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        let mut perished = Vec::new();
        cells.retain(|&id| {
            let weak = lineage
                .get(id)
                .map_or(true, |cell| cell.max_affinity() < self.floor);
            if weak {
                perished.push(id);
            }
            !weak
        });
        perished
    }
}

/// No cell ever dies. Useful as a disabled slot and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoApoptosis;

impl<R: Receptor> ApoptosisModel<R> for NoApoptosis {
    fn apoptose(
        &self,
        _cells: &mut Vec<CellId>,
        _lineage: &Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
        _rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        Vec::new()
    }
}

fn mean_quantity<R: Receptor>(cells: &[CellId], lineage: &Lineage<R>) -> f64 {
    if cells.is_empty() {
        return 0.0;
    }
    let total: f64 = cells
        .iter()
        .filter_map(|&id| lineage.get(id))
        .map(|cell| cell.total_quantity())
        .sum();
    total / cells.len() as f64
}

/// Ratio-based competition: survive by capturing at least `advantage`
/// times the population's mean quantity.
///
/// With an all-zero population (nobody captured anything) everyone dies —
/// there is no T-cell help to compete for.
#[derive(Debug, Clone, Copy)]
pub struct MeanRatioCompetition {
    pub advantage: f64,
}

impl MeanRatioCompetition {
    pub fn new(advantage: f64) -> Self {
        Self { advantage }
    }
}

impl Default for MeanRatioCompetition {
    fn default() -> Self {
        Self { advantage: 1.0 }
    }
}

impl<R: Receptor> SequentialApoptosisModel<R> for MeanRatioCompetition {
    fn initialize(
        &self,
        cells: &[CellId],
        lineage: &Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
    ) -> f64 {
        mean_quantity(cells, lineage)
    }

    fn survives(&self, cell: &BCell<R>, aggregate: f64, _rng: &mut dyn RngCore) -> bool {
        aggregate > 0.0 && cell.total_quantity() >= self.advantage * aggregate
    }
}

/// Probabilistic competition: survival probability is the cell's captured
/// quantity over `scale` times the population mean, clamped to [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct StochasticRatioCompetition {
    pub scale: f64,
}

impl StochasticRatioCompetition {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for StochasticRatioCompetition {
    fn default() -> Self {
        Self { scale: 2.0 }
    }
}

impl<R: Receptor> SequentialApoptosisModel<R> for StochasticRatioCompetition {
    fn initialize(
        &self,
        cells: &[CellId],
        lineage: &Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
    ) -> f64 {
        mean_quantity(cells, lineage)
    }

    fn survives(&self, cell: &BCell<R>, aggregate: f64, rng: &mut dyn RngCore) -> bool {
        if aggregate <= 0.0 {
            return false;
        }
        let probability = (cell.total_quantity() / (self.scale * aggregate)).clamp(0.0, 1.0);
        rng.gen_bool(probability)
    }
}

/// Rank-based competition: the top `survivors` fraction by captured
/// quantity lives. The aggregate is the quantity at the cut rank.
#[derive(Debug, Clone, Copy)]
pub struct QuantileCompetition {
    /// Fraction of the population that survives, in [0, 1].
    pub survivors: f64,
}

impl QuantileCompetition {
    pub fn new(survivors: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&survivors));
        Self { survivors }
    }
}

impl<R: Receptor> SequentialApoptosisModel<R> for QuantileCompetition {
    fn initialize(
        &self,
        cells: &[CellId],
        lineage: &Lineage<R>,
        _pool: &AntigenPool<R::Epitope>,
    ) -> f64 {
        if cells.is_empty() {
            return 0.0;
        }
        let mut quantities: Vec<f64> = cells
            .iter()
            .filter_map(|&id| lineage.get(id))
            .map(|cell| cell.total_quantity())
            .collect();
        quantities.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let cut = ((quantities.len() as f64) * (1.0 - self.survivors)).floor() as usize;
        quantities[cut.min(quantities.len() - 1)]
    }

    fn survives(&self, cell: &BCell<R>, aggregate: f64, _rng: &mut dyn RngCore) -> bool {
        cell.total_quantity() >= aggregate
    }
}
