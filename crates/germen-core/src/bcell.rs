//! BCell — one node of the clonal forest.
//!
//! A B cell's identity is settled at birth: its receptor, parent, founder,
//! generation and mutation count never change afterwards. Only two things
//! accumulate over its life in the light zone — the binding events it
//! records against the antigen pool, and the single division-count grant it
//! wins in the competition for T-cell help.

use crate::error::{LineageError, Result};
use crate::models::{AffinityModel, CaptureModel};
use crate::pool::AntigenPool;
use crate::receptor::Receptor;
use crate::types::{AntigenId, BindingEvent, CellId, Cycle, DivisionCount};
use std::cmp::Ordering;

/// Affinity of a cell that has never bound anything. Negative infinity, so
/// an unbound cell loses every affinity comparison.
pub const NO_AFFINITY: f64 = f64::NEG_INFINITY;

/// A B cell in the lineage arena.
#[derive(Debug, Clone)]
pub struct BCell<R: Receptor> {
    id: CellId,
    parent: Option<CellId>,
    founder: CellId,
    receptor: R,
    generation: u32,
    mutations: u32,
    cycle: Cycle,
    division: DivisionCount,
    bindings: Vec<BindingEvent>,
    total_quantity: f64,
    max_affinity: f64,
}

impl<R: Receptor> BCell<R> {
    pub(crate) fn new(
        id: CellId,
        parent: Option<CellId>,
        founder: CellId,
        receptor: R,
        generation: u32,
        mutations: u32,
        cycle: Cycle,
    ) -> Self {
        Self {
            id,
            parent,
            founder,
            receptor,
            generation,
            mutations,
            cycle,
            division: DivisionCount::Unassigned,
            bindings: Vec::new(),
            total_quantity: 0.0,
            max_affinity: NO_AFFINITY,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// The cell this one was produced from, `None` for founders.
    pub fn parent(&self) -> Option<CellId> {
        self.parent
    }

    /// The root of this cell's lineage (itself, for founders).
    pub fn founder(&self) -> CellId {
        self.founder
    }

    pub fn is_founder(&self) -> bool {
        self.parent.is_none()
    }

    pub fn receptor(&self) -> &R {
        &self.receptor
    }

    /// Distance from the founder: 0 for founders, parent's generation + 1
    /// otherwise.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Replacement mutations accumulated since the founder.
    pub fn mutations(&self) -> u32 {
        self.mutations
    }

    /// The cycle this cell was created in.
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn division_count(&self) -> DivisionCount {
        self.division
    }

    /// Grant this cell its dark-zone division rounds.
    ///
    /// The count is written exactly once; a second write is a contract
    /// violation.
    pub fn assign_division_count(&mut self, rounds: u32) -> Result<()> {
        if self.division.is_assigned() {
            return Err(LineageError::DivisionCountAssigned(self.id).into());
        }
        self.division = DivisionCount::Assigned(rounds);
        Ok(())
    }

    /// The binding events recorded this light zone, in encounter order.
    pub fn bindings(&self) -> &[BindingEvent] {
        &self.bindings
    }

    /// Whether at least one binding event has been recorded.
    pub fn has_bound(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Total antigen quantity captured across all recorded events.
    pub fn total_quantity(&self) -> f64 {
        self.total_quantity
    }

    /// Best affinity across all recorded events, or [`NO_AFFINITY`] if the
    /// cell never bound.
    pub fn max_affinity(&self) -> f64 {
        self.max_affinity
    }

    /// Bind every epitope of every visited antigen against this cell's
    /// receptor, recording one event per encounter.
    ///
    /// The visited collection is a multiset: an antigen drawn twice is
    /// engaged twice. Each event uses the pool's concentration at call time.
    /// The cached quantity/affinity scalars are recomputed only if at least
    /// one event was recorded, so a cell that visits nothing keeps the
    /// [`NO_AFFINITY`] sentinel. Returns the number of recorded events;
    /// fails if a visited antigen is not in the pool.
    pub fn bind(
        &mut self,
        pool: &AntigenPool<R::Epitope>,
        visited: &[AntigenId],
        affinity: &dyn AffinityModel<R>,
        capture: &dyn CaptureModel,
    ) -> Result<usize> {
        let mut recorded = 0;
        for &antigen_id in visited {
            let antigen = pool
                .get(antigen_id)
                .ok_or(crate::error::PoolError::UnknownAntigen(antigen_id))?;
            let concentration = pool.concentration(antigen_id);
            for (index, epitope) in antigen.epitopes().iter().enumerate() {
                let strength = affinity.affinity(epitope, &self.receptor);
                let quantity = capture.capture(strength, concentration);
                self.bindings
                    .push(BindingEvent::new(antigen_id, index, strength, quantity));
                recorded += 1;
            }
        }
        if recorded > 0 {
            self.recompute_binding_summary();
        }
        Ok(recorded)
    }

    fn recompute_binding_summary(&mut self) {
        self.total_quantity = self.bindings.iter().map(|event| event.quantity).sum();
        self.max_affinity = self
            .bindings
            .iter()
            .map(|event| event.affinity)
            .fold(NO_AFFINITY, f64::max);
    }

    /// Strict weak ordering by best binding affinity. Unbound cells carry
    /// the sentinel and sort below every bound cell; equal affinities keep
    /// their incoming order under a stable sort.
    pub fn cmp_affinity(a: &Self, b: &Self) -> Ordering {
        a.max_affinity
            .partial_cmp(&b.max_affinity)
            .unwrap_or(Ordering::Equal)
    }

    /// Strict weak ordering by total captured antigen quantity.
    pub fn cmp_quantity(a: &Self, b: &Self) -> Ordering {
        a.total_quantity
            .partial_cmp(&b.total_quantity)
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antigen::Antigen;
    use crate::testkit::{BitOverlapAffinity, TestReceptor, UnitCapture};
    use crate::types::AntigenId;

    fn cell(receptor: TestReceptor) -> BCell<TestReceptor> {
        BCell::new(
            CellId::from_index(0),
            None,
            CellId::from_index(0),
            receptor,
            0,
            0,
            0,
        )
    }

    #[test]
    fn unbound_cell_carries_the_sentinel() {
        let cell = cell(TestReceptor::exact(0));
        assert!(!cell.has_bound());
        assert_eq!(cell.max_affinity(), NO_AFFINITY);
        assert_eq!(cell.total_quantity(), 0.0);
    }

    #[test]
    fn binding_records_one_event_per_epitope_per_visit() {
        let antigen = Antigen::with_id(AntigenId::from_seed(1), vec![0u64, u64::MAX]);
        let id = antigen.id();
        let mut pool = AntigenPool::new();
        pool.add(antigen, 4.0).unwrap();

        let mut cell = cell(TestReceptor::exact(0));
        // Visited twice: 2 visits x 2 epitopes = 4 events.
        let recorded = cell
            .bind(&pool, &[id, id], &BitOverlapAffinity, &UnitCapture)
            .unwrap();
        assert_eq!(recorded, 4);
        assert_eq!(cell.bindings().len(), 4);

        // Perfect match on the zero epitope, zero overlap on the other.
        assert!((cell.max_affinity() - 1.0).abs() < 1e-12);
        // Quantity = affinity * concentration summed: (1.0 + 0.0) * 4.0 * 2 visits.
        assert!((cell.total_quantity() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn binding_nothing_keeps_the_sentinel() {
        let pool: AntigenPool<u64> = AntigenPool::new();
        let mut cell = cell(TestReceptor::exact(0));
        let recorded = cell
            .bind(&pool, &[], &BitOverlapAffinity, &UnitCapture)
            .unwrap();
        assert_eq!(recorded, 0);
        assert_eq!(cell.max_affinity(), NO_AFFINITY);
    }

    #[test]
    fn binding_unknown_antigen_is_an_error() {
        let pool: AntigenPool<u64> = AntigenPool::new();
        let mut cell = cell(TestReceptor::exact(0));
        assert!(cell
            .bind(
                &pool,
                &[AntigenId::from_seed(5)],
                &BitOverlapAffinity,
                &UnitCapture
            )
            .is_err());
    }

    #[test]
    fn division_count_locks_after_first_write() {
        let mut cell = cell(TestReceptor::exact(0));
        cell.assign_division_count(2).unwrap();
        assert_eq!(cell.division_count().get(), Some(2));
        assert!(matches!(
            cell.assign_division_count(3),
            Err(crate::error::GermenError::Lineage(
                LineageError::DivisionCountAssigned(_)
            ))
        ));
        assert_eq!(cell.division_count().get(), Some(2), "first write sticks");
    }

    #[test]
    fn unbound_cells_lose_affinity_comparisons() {
        let antigen = Antigen::with_id(AntigenId::from_seed(1), vec![0u64]);
        let id = antigen.id();
        let mut pool = AntigenPool::new();
        pool.add(antigen, 1.0).unwrap();

        let mut bound = cell(TestReceptor::exact(0));
        bound
            .bind(&pool, &[id], &BitOverlapAffinity, &UnitCapture)
            .unwrap();
        let unbound = cell(TestReceptor::exact(0));

        assert_eq!(BCell::cmp_affinity(&unbound, &bound), Ordering::Less);
        assert_eq!(BCell::cmp_affinity(&bound, &unbound), Ordering::Greater);
    }
}
