//! Receptor — the seam between the engine and the structural layer.
//!
//! The engine never inspects how a B-cell receptor or an epitope is encoded.
//! Bit-strings, spin chains, Potts sequences — all of that lives behind this
//! trait, together with the mutation and distance math that goes with a
//! particular encoding. What the engine needs is small: receptors can be
//! copied, compared for identity, and hypermutated into a daughter receptor
//! that may turn out lethal.

use rand::RngCore;
use std::fmt;

/// An opaque B-cell receptor encoding.
///
/// Somatic hypermutation is modeled by [`Receptor::mutate`]: it produces the
/// daughter's receptor as a fresh value, never modifying the parent in place
/// (a cell's receptor is fixed for its lifetime). Three outcomes are
/// possible, and all three are ordinary:
///
/// - `None` — the mutation was lethal; the daughter is never created
/// - `Some(r)` with `r == self` — a silent mutation
/// - `Some(r)` with `r != self` — a replacement mutation; the daughter's
///   mutation counter advances
pub trait Receptor: Clone + PartialEq + fmt::Debug {
    /// The epitope representation this receptor is scored against.
    type Epitope: Clone + fmt::Debug;

    /// Produce a hypermutated copy, or `None` for a lethal mutation.
    fn mutate(&self, rng: &mut dyn RngCore) -> Option<Self>;
}
