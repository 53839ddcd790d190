//! AFFINITY — receptor–epitope scoring.

use crate::receptor::Receptor;

/// Score a receptor against an epitope.
///
/// Implementations must be pure: no side effects, no randomness, the same
/// pair always scores the same. Higher is stronger; the scale is the
/// model's own, the engine only ever compares and ranks.
pub trait AffinityModel<R: Receptor>: Send + Sync {
    fn affinity(&self, epitope: &R::Epitope, receptor: &R) -> f64;
}
