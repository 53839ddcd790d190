//! Bitstring receptor — the reference structural encoding.
//!
//! A receptor is 64 bits; an epitope is 64 bits; affinity is the fraction
//! of matching positions. Hypermutation flips a single random position,
//! with configurable probabilities of the two degenerate outcomes — a
//! lethal mutation (the daughter is never born) and a silent one (the
//! receptor is copied unchanged).

use germen_core::models::AffinityModel;
use germen_core::receptor::Receptor;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Probabilities of the degenerate mutation outcomes.
///
/// The remaining mass, `1 - lethal - silent`, is a replacement mutation
/// (one flipped bit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationRates {
    /// Probability that a mutation kills the daughter.
    pub lethal: f64,
    /// Probability that a mutation leaves the receptor unchanged.
    pub silent: f64,
}

impl MutationRates {
    pub fn new(lethal: f64, silent: f64) -> Self {
        debug_assert!(lethal >= 0.0 && silent >= 0.0 && lethal + silent <= 1.0);
        Self { lethal, silent }
    }
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            lethal: 0.3,
            silent: 0.3,
        }
    }
}

/// The reference 64-bit receptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitstringReceptor {
    bits: u64,
    rates: MutationRates,
}

impl BitstringReceptor {
    pub fn new(bits: u64, rates: MutationRates) -> Self {
        Self { bits, rates }
    }

    /// A germline receptor with uniformly random bits.
    pub fn germline(rng: &mut dyn RngCore, rates: MutationRates) -> Self {
        Self {
            bits: rng.next_u64(),
            rates,
        }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of positions matching an epitope.
    pub fn overlap(&self, epitope: &BitstringEpitope) -> u32 {
        64 - (self.bits ^ epitope.bits).count_ones()
    }
}

impl Receptor for BitstringReceptor {
    type Epitope = BitstringEpitope;

    fn mutate(&self, rng: &mut dyn RngCore) -> Option<Self> {
        let roll: f64 = rng.gen();
        if roll < self.rates.lethal {
            return None;
        }
        if roll < self.rates.lethal + self.rates.silent {
            return Some(self.clone());
        }
        Some(Self {
            bits: self.bits ^ (1u64 << rng.gen_range(0..64)),
            rates: self.rates,
        })
    }
}

/// The reference 64-bit epitope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitstringEpitope {
    bits: u64,
}

impl BitstringEpitope {
    pub fn new(bits: u64) -> Self {
        Self { bits }
    }

    pub fn bits(self) -> u64 {
        self.bits
    }
}

/// Affinity = scale * fraction of matching positions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HammingAffinity {
    /// Affinity of a perfect 64/64 match.
    pub scale: f64,
}

impl HammingAffinity {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for HammingAffinity {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl AffinityModel<BitstringReceptor> for HammingAffinity {
    fn affinity(&self, epitope: &BitstringEpitope, receptor: &BitstringReceptor) -> f64 {
        self.scale * receptor.overlap(epitope) as f64 / 64.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn replacement_mutation_flips_exactly_one_bit() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let receptor = BitstringReceptor::new(0, MutationRates::new(0.0, 0.0));
        for _ in 0..100 {
            let daughter = receptor.mutate(&mut rng).unwrap();
            assert_eq!((daughter.bits() ^ receptor.bits()).count_ones(), 1);
        }
    }

    #[test]
    fn perfect_match_scores_the_full_scale() {
        let receptor = BitstringReceptor::new(u64::MAX, MutationRates::default());
        let epitope = BitstringEpitope::new(u64::MAX);
        let affinity = HammingAffinity::new(8.0).affinity(&epitope, &receptor);
        assert!((affinity - 8.0).abs() < 1e-12);
    }

    #[test]
    fn complement_scores_zero() {
        let receptor = BitstringReceptor::new(u64::MAX, MutationRates::default());
        let epitope = BitstringEpitope::new(0);
        let affinity = HammingAffinity::default().affinity(&epitope, &receptor);
        assert_eq!(affinity, 0.0);
    }
}
