//! Repertoire — the trial's output.
//!
//! At trial end the collected plasma cells are grouped by receptor into
//! clonal families: the antibody repertoire the germinal center produced.
//! Receptor equality, not lineage, defines a family — two branches that
//! converged on the same receptor are one antibody.

use germen_core::error::Result;
use germen_core::lineage::Lineage;
use germen_core::receptor::Receptor;
use germen_core::types::CellId;

/// One receptor and every plasma cell secreting it.
#[derive(Debug, Clone)]
pub struct ClonalFamily<R: Receptor> {
    receptor: R,
    cells: Vec<CellId>,
}

impl<R: Receptor> ClonalFamily<R> {
    pub fn receptor(&self) -> &R {
        &self.receptor
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// The receptor → plasma-cell multimap of one trial.
#[derive(Debug, Clone)]
pub struct Repertoire<R: Receptor> {
    families: Vec<ClonalFamily<R>>,
}

impl<R: Receptor> Repertoire<R> {
    /// Group plasma cells by receptor equality. Families keep first-seen
    /// order; cells within a family keep collection order.
    pub fn collect(lineage: &Lineage<R>, plasma: &[CellId]) -> Result<Self> {
        let mut families: Vec<ClonalFamily<R>> = Vec::new();
        for &id in plasma {
            let receptor = lineage.cell(id)?.receptor();
            match families
                .iter_mut()
                .find(|family| family.receptor == *receptor)
            {
                Some(family) => family.cells.push(id),
                None => families.push(ClonalFamily {
                    receptor: receptor.clone(),
                    cells: vec![id],
                }),
            }
        }
        Ok(Self { families })
    }

    /// Distinct receptors.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Plasma cells across all families.
    pub fn total_cells(&self) -> usize {
        self.families.iter().map(ClonalFamily::size).sum()
    }

    pub fn families(&self) -> &[ClonalFamily<R>] {
        &self.families
    }

    /// The largest family; first-seen order breaks ties.
    pub fn dominant(&self) -> Option<&ClonalFamily<R>> {
        self.families.iter().fold(None, |best, family| match best {
            Some(current) if current.size() >= family.size() => Some(current),
            _ => Some(family),
        })
    }
}
