//! Germline activation — founding and expanding the naive population.

use germen_core::error::Result;
use germen_core::lineage::Lineage;
use germen_core::models::ActivationModel;
use germen_core::pool::AntigenPool;
use germen_core::receptor::Receptor;
use germen_core::types::{CellId, GERMLINE_CYCLE, REPLICATION_CYCLE};
use rand::RngCore;

/// Generator producing one germline receptor per call.
pub type GermlineGenerator<R> = Box<dyn Fn(&mut dyn RngCore) -> R + Send + Sync>;

/// Activate a fixed number of naive founders, then expand each by a fixed
/// replication factor on cycle 1.
///
/// Receptors come from an injected germline generator — the structural
/// layer's business, not this crate's.
pub struct GermlineActivation<R> {
    founders: usize,
    replication: u32,
    germline: GermlineGenerator<R>,
}

impl<R: Receptor> GermlineActivation<R> {
    pub fn new(
        founders: usize,
        replication: u32,
        germline: impl Fn(&mut dyn RngCore) -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            founders,
            replication,
            germline: Box::new(germline),
        }
    }
}

impl<R: Receptor> ActivationModel<R> for GermlineActivation<R> {
    fn activate(
        &self,
        _pool: &AntigenPool<R::Epitope>,
        lineage: &mut Lineage<R>,
        rng: &mut dyn RngCore,
    ) -> Vec<CellId> {
        (0..self.founders)
            .map(|_| lineage.founder((self.germline)(rng), GERMLINE_CYCLE))
            .collect()
    }

    fn replicate(
        &self,
        founders: &[CellId],
        lineage: &mut Lineage<R>,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<CellId>> {
        let mut expanded = Vec::with_capacity(founders.len() * self.replication as usize);
        for &founder in founders {
            for _ in 0..self.replication {
                expanded.push(lineage.replicate(founder, REPLICATION_CYCLE)?);
            }
        }
        Ok(expanded)
    }
}
