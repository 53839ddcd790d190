//! Lineage — the append-only clonal forest.
//!
//! Every B cell ever created during a trial lives here, founders and dead
//! branches included: the structure IS the trial's memory. The arena is a
//! directed graph whose nodes are B-cell records and whose edges run
//! parent → daughter; because nothing is ever removed, a node's index is
//! the cell's monotonically increasing id, and parent/founder references
//! are plain ids rather than owning pointers.

use crate::bcell::BCell;
use crate::error::{LineageError, Result};
use crate::receptor::Receptor;
use crate::types::{CellId, Cycle};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::Direction;

/// Outcome of one dark-zone division.
///
/// `all` lists every daughter produced across every mutation round,
/// flattened in creation order — these are all durable lineage nodes.
/// `final_round` lists only the last round's survivors: the cells the
/// engine admits to the next active generation. Intermediate-round
/// daughters stay in the lineage for mutation accounting but are never
/// active-population members.
#[derive(Debug, Clone, Default)]
pub struct Division {
    pub all: Vec<CellId>,
    pub final_round: Vec<CellId>,
}

/// The clonal forest of one trial.
#[derive(Debug, Clone)]
pub struct Lineage<R: Receptor> {
    forest: DiGraph<BCell<R>, ()>,
}

impl<R: Receptor> Default for Lineage<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Receptor> Lineage<R> {
    pub fn new() -> Self {
        Self {
            forest: DiGraph::new(),
        }
    }

    /// Number of cells ever created.
    pub fn len(&self) -> usize {
        self.forest.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.node_count() == 0
    }

    /// The cell behind an id, if the id names one.
    pub fn get(&self, id: CellId) -> Option<&BCell<R>> {
        self.forest.node_weight(NodeIndex::new(id.index()))
    }

    /// The cell behind an id; unknown ids are a contract violation.
    pub fn cell(&self, id: CellId) -> Result<&BCell<R>> {
        self.get(id).ok_or_else(|| LineageError::UnknownCell(id).into())
    }

    /// Mutable access to a cell (binding accumulation, division-count grant).
    pub fn cell_mut(&mut self, id: CellId) -> Result<&mut BCell<R>> {
        self.forest
            .node_weight_mut(NodeIndex::new(id.index()))
            .ok_or_else(|| LineageError::UnknownCell(id).into())
    }

    /// Every cell ever created, in id order.
    pub fn cells(&self) -> impl Iterator<Item = &BCell<R>> {
        self.forest.node_weights()
    }

    /// Create a founder cell: generation 0, its own founder reference.
    pub fn founder(&mut self, receptor: R, cycle: Cycle) -> CellId {
        let id = CellId::from_index(self.forest.node_count());
        let index = self
            .forest
            .add_node(BCell::new(id, None, id, receptor, 0, 0, cycle));
        debug_assert_eq!(index.index(), id.index());
        id
    }

    /// Create an identical daughter: same receptor, generation + 1.
    pub fn replicate(&mut self, parent: CellId, cycle: Cycle) -> Result<CellId> {
        let parent_cell = self.cell(parent)?;
        let receptor = parent_cell.receptor().clone();
        let founder = parent_cell.founder();
        let generation = parent_cell.generation() + 1;
        let mutations = parent_cell.mutations();
        Ok(self.insert_child(parent, receptor, founder, generation, mutations, cycle))
    }

    /// Create a hypermutated daughter, or `None` when the mutation is lethal.
    ///
    /// A lethal mutation is an expected outcome, not an error: the branch
    /// simply ends. A daughter whose receptor differs from the parent's
    /// advances the mutation counter.
    pub fn mutate(
        &mut self,
        parent: CellId,
        cycle: Cycle,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Option<CellId>> {
        let parent_cell = self.cell(parent)?;
        let receptor = match parent_cell.receptor().mutate(rng) {
            Some(receptor) => receptor,
            None => return Ok(None),
        };
        let founder = parent_cell.founder();
        let generation = parent_cell.generation() + 1;
        let mutations = if receptor == *parent_cell.receptor() {
            parent_cell.mutations()
        } else {
            parent_cell.mutations() + 1
        };
        Ok(Some(self.insert_child(
            parent, receptor, founder, generation, mutations, cycle,
        )))
    }

    /// Run the parent's granted division rounds.
    ///
    /// Each round, every current-round parent spawns exactly two mutation
    /// attempts; non-lethal daughters parent the next round. Dividing a
    /// cell whose count was never assigned is a contract violation.
    pub fn divide(
        &mut self,
        parent: CellId,
        cycle: Cycle,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Division> {
        let rounds = self
            .cell(parent)?
            .division_count()
            .get()
            .ok_or(LineageError::DivisionCountUnassigned(parent))?;
        if rounds == 0 {
            return Ok(Division::default());
        }

        let mut all = Vec::new();
        let mut current = vec![parent];
        for _ in 0..rounds {
            let mut next = Vec::with_capacity(current.len() * 2);
            for &round_parent in &current {
                for _ in 0..2 {
                    if let Some(daughter) = self.mutate(round_parent, cycle, rng)? {
                        next.push(daughter);
                    }
                }
            }
            all.extend_from_slice(&next);
            current = next;
            if current.is_empty() {
                break;
            }
        }
        Ok(Division {
            all,
            final_round: current,
        })
    }

    /// Ancestors-to-self in chronological order, restricted to cells created
    /// on or after `first_cycle`. The walk stops at the first ancestor
    /// created before `first_cycle`, which is excluded.
    pub fn trace(&self, id: CellId, first_cycle: Cycle) -> Result<Vec<CellId>> {
        // Validate the starting id even when it falls outside the window.
        let mut cursor = Some(self.cell(id)?.id());
        let mut chain = Vec::new();
        while let Some(current) = cursor {
            let cell = self.cell(current)?;
            if cell.cycle() < first_cycle {
                break;
            }
            chain.push(current);
            cursor = cell.parent();
        }
        chain.reverse();
        Ok(chain)
    }

    /// Direct daughters of a cell, in creation order.
    pub fn children(&self, id: CellId) -> Result<Vec<CellId>> {
        self.cell(id)?;
        let mut daughters: Vec<CellId> = self
            .forest
            .neighbors_directed(NodeIndex::new(id.index()), Direction::Outgoing)
            .map(|index| CellId::from_index(index.index()))
            .collect();
        daughters.sort();
        Ok(daughters)
    }

    /// Every descendant of a cell (the clonal burst it seeded), in id order.
    pub fn descendants(&self, id: CellId) -> Result<Vec<CellId>> {
        self.cell(id)?;
        let root = NodeIndex::new(id.index());
        let mut walker = Bfs::new(&self.forest, root);
        let mut found = Vec::new();
        while let Some(index) = walker.next(&self.forest) {
            if index != root {
                found.push(CellId::from_index(index.index()));
            }
        }
        found.sort();
        Ok(found)
    }

    fn insert_child(
        &mut self,
        parent: CellId,
        receptor: R,
        founder: CellId,
        generation: u32,
        mutations: u32,
        cycle: Cycle,
    ) -> CellId {
        let id = CellId::from_index(self.forest.node_count());
        let index = self.forest.add_node(BCell::new(
            id,
            Some(parent),
            founder,
            receptor,
            generation,
            mutations,
            cycle,
        ));
        debug_assert_eq!(index.index(), id.index());
        self.forest
            .add_edge(NodeIndex::new(parent.index()), index, ());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GermenError;
    use crate::testkit::TestReceptor;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn founder_is_its_own_root() {
        let mut lineage = Lineage::new();
        let id = lineage.founder(TestReceptor::exact(1), 0);
        let cell = lineage.cell(id).unwrap();
        assert!(cell.is_founder());
        assert_eq!(cell.founder(), id);
        assert_eq!(cell.generation(), 0);
        assert_eq!(cell.mutations(), 0);
    }

    #[test]
    fn trace_returns_chain_in_chronological_order() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(1), 0);
        let d1 = lineage.replicate(founder, 1).unwrap();
        let d2 = lineage.replicate(d1, 2).unwrap();
        let d3 = lineage.replicate(d2, 3).unwrap();

        assert_eq!(lineage.trace(d3, 0).unwrap(), vec![founder, d1, d2, d3]);
        assert_eq!(lineage.trace(d3, 2).unwrap(), vec![d2, d3]);
        assert_eq!(lineage.trace(founder, 0).unwrap(), vec![founder]);
    }

    #[test]
    fn trace_rejects_unknown_cells() {
        let lineage: Lineage<TestReceptor> = Lineage::new();
        assert!(matches!(
            lineage.trace(CellId::from_index(3), 0),
            Err(GermenError::Lineage(LineageError::UnknownCell(_)))
        ));
    }

    #[test]
    fn replication_keeps_receptor_and_advances_generation() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(5), 0);
        let daughter = lineage.replicate(founder, 1).unwrap();
        let cell = lineage.cell(daughter).unwrap();
        assert_eq!(cell.receptor(), lineage.cell(founder).unwrap().receptor());
        assert_eq!(cell.generation(), 1);
        assert_eq!(cell.mutations(), 0);
        assert_eq!(cell.founder(), founder);
        assert_eq!(cell.cycle(), 1);
    }

    #[test]
    fn silent_mutation_keeps_the_mutation_counter() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::always_silent(5), 0);
        let daughter = lineage.mutate(founder, 1, &mut rng(0)).unwrap().unwrap();
        let cell = lineage.cell(daughter).unwrap();
        assert_eq!(cell.mutations(), 0, "identical receptor is a silent mutation");
        assert_eq!(cell.generation(), 1);
    }

    #[test]
    fn replacement_mutation_advances_the_counter() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(5), 0);
        let daughter = lineage.mutate(founder, 1, &mut rng(0)).unwrap().unwrap();
        assert_eq!(lineage.cell(daughter).unwrap().mutations(), 1);
    }

    #[test]
    fn lethal_mutation_is_not_an_error() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::always_lethal(5), 0);
        let outcome = lineage.mutate(founder, 1, &mut rng(0)).unwrap();
        assert!(outcome.is_none());
        assert_eq!(lineage.len(), 1, "no daughter node was created");
    }

    #[test]
    fn divide_requires_an_assigned_count() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(1), 0);
        assert!(matches!(
            lineage.divide(founder, 1, &mut rng(0)),
            Err(GermenError::Lineage(LineageError::DivisionCountUnassigned(_)))
        ));
    }

    #[test]
    fn divide_doubles_per_round_without_lethality() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::always_silent(1), 0);
        lineage.cell_mut(founder).unwrap().assign_division_count(3).unwrap();

        let division = lineage.divide(founder, 1, &mut rng(0)).unwrap();
        // Rounds of 2, 4, 8 daughters; all survive with lethality 0.
        assert_eq!(division.all.len(), 2 + 4 + 8);
        assert_eq!(division.final_round.len(), 8);
        assert!(division
            .final_round
            .iter()
            .all(|id| division.all.contains(id)));
    }

    #[test]
    fn zero_division_rounds_produce_nothing() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(1), 0);
        lineage.cell_mut(founder).unwrap().assign_division_count(0).unwrap();
        let division = lineage.divide(founder, 1, &mut rng(0)).unwrap();
        assert!(division.all.is_empty());
        assert!(division.final_round.is_empty());
    }

    #[test]
    fn fully_lethal_division_terminates_the_branch() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::always_lethal(1), 0);
        lineage.cell_mut(founder).unwrap().assign_division_count(4).unwrap();
        let division = lineage.divide(founder, 1, &mut rng(0)).unwrap();
        assert!(division.all.is_empty());
        assert!(division.final_round.is_empty());
    }

    #[test]
    fn descendants_cover_the_clonal_burst() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::always_silent(1), 0);
        lineage.cell_mut(founder).unwrap().assign_division_count(2).unwrap();
        let division = lineage.divide(founder, 1, &mut rng(0)).unwrap();

        let descendants = lineage.descendants(founder).unwrap();
        assert_eq!(descendants.len(), division.all.len());
        let children = lineage.children(founder).unwrap();
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn ids_are_monotonic_in_creation_order() {
        let mut lineage = Lineage::new();
        let founder = lineage.founder(TestReceptor::exact(1), 0);
        let d1 = lineage.replicate(founder, 1).unwrap();
        let d2 = lineage.replicate(d1, 2).unwrap();
        assert!(founder < d1 && d1 < d2);
    }
}
