//! VISITATION — the light-zone antigen search.

use crate::pool::AntigenPool;
use crate::types::{AntigenId, Cycle};
use rand::RngCore;

/// The antigens a single B cell encounters during one light-zone pass.
///
/// The result is a multiset: it may be empty (the cell found nothing) and
/// may repeat an antigen (several encounters with the same FDC deposit).
/// Occupation-style models — a fixed number of FDC sites handing out
/// whatever they hold — implement this same contract.
///
/// The pool is taken mutably only so draws can rebuild the cached selection
/// distribution; implementations must not add, remove, or re-concentrate
/// antigens.
pub trait VisitationModel<E>: Send + Sync {
    fn visit(
        &self,
        cycle: Cycle,
        pool: &mut AntigenPool<E>,
        rng: &mut dyn RngCore,
    ) -> Vec<AntigenId>;
}
