//! Selection models — memory, plasma and reentry exits.

use germen_core::bcell::BCell;
use germen_core::lineage::Lineage;
use germen_core::models::SelectionModel;
use germen_core::receptor::Receptor;
use germen_core::types::CellId;
use rand::{Rng, RngCore};

/// Each cell is selected independently with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilisticSelection {
    /// Per-cell selection probability, in [0, 1].
    pub rate: f64,
}

impl ProbabilisticSelection {
    pub fn new(rate: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&rate));
        Self { rate }
    }
}

impl<R: Receptor> SelectionModel<R> for ProbabilisticSelection {
    fn select(
        &self,
        cells: &mut Vec<CellId>,
        _lineage: &Lineage<R>,
        rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        let mut selected = Vec::new();
        cells.retain(|&id| {
            if rng.gen_bool(self.rate) {
                selected.push(id);
                false
            } else {
                true
            }
        });
        selected
    }
}

/// The `count` cells with the highest best affinity are selected.
///
/// Ties keep their incoming order: the sort is stable, and the no-affinity
/// sentinel puts never-bound cells at the bottom.
#[derive(Debug, Clone, Copy)]
pub struct TopAffinitySelection {
    pub count: usize,
}

impl TopAffinitySelection {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl<R: Receptor> SelectionModel<R> for TopAffinitySelection {
    fn select(
        &self,
        cells: &mut Vec<CellId>,
        lineage: &Lineage<R>,
        _rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        if self.count == 0 || cells.is_empty() {
            return Vec::new();
        }
        let mut ranked: Vec<CellId> = cells.clone();
        ranked.sort_by(|&a, &b| {
            match (lineage.get(a), lineage.get(b)) {
                (Some(ca), Some(cb)) => BCell::cmp_affinity(cb, ca), // descending
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        ranked.truncate(self.count);
        cells.retain(|id| !ranked.contains(id));
        ranked
    }
}

/// Nothing is ever selected. The off switch for a selection slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl<R: Receptor> SelectionModel<R> for NoSelection {
    fn select(
        &self,
        _cells: &mut Vec<CellId>,
        _lineage: &Lineage<R>,
        _rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstring::{BitstringReceptor, MutationRates};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(size: usize) -> (Lineage<BitstringReceptor>, Vec<CellId>) {
        let rates = MutationRates::new(0.0, 0.0);
        let mut lineage = Lineage::new();
        let cells = (0..size)
            .map(|i| lineage.founder(BitstringReceptor::new(i as u64, rates), 0))
            .collect();
        (lineage, cells)
    }

    #[test]
    fn probabilistic_selection_partitions_the_set() {
        let (lineage, mut cells) = population(200);
        let before = cells.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let selected = ProbabilisticSelection::new(0.25).select(&mut cells, &lineage, &mut rng);

        assert_eq!(selected.len() + cells.len(), before.len());
        for id in &before {
            assert!(selected.contains(id) != cells.contains(id));
        }
        assert!(!selected.is_empty() && !cells.is_empty());
    }

    #[test]
    fn zero_rate_selects_nothing() {
        let (lineage, mut cells) = population(20);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(ProbabilisticSelection::new(0.0)
            .select(&mut cells, &lineage, &mut rng)
            .is_empty());
        assert_eq!(cells.len(), 20);
    }

    #[test]
    fn top_affinity_takes_unbound_ties_in_stable_order() {
        // Nobody has bound: all carry the sentinel, so the first `count`
        // cells in incoming order are taken.
        let (lineage, mut cells) = population(5);
        let before = cells.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let selected = TopAffinitySelection::new(2).select(&mut cells, &lineage, &mut rng);
        assert_eq!(selected, before[..2].to_vec());
        assert_eq!(cells, before[2..].to_vec());
    }

    #[test]
    fn no_selection_is_a_no_op() {
        let (lineage, mut cells) = population(3);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(NoSelection.select(&mut cells, &lineage, &mut rng).is_empty());
        assert_eq!(cells.len(), 3);
    }
}
