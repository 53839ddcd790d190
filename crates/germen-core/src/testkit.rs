//! Minimal receptor and model stubs shared by the core unit tests.

use crate::models::{AffinityModel, CaptureModel};
use crate::receptor::Receptor;
use rand::{Rng, RngCore};

/// A 64-bit test receptor with fixed mutation-outcome probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct TestReceptor {
    pub bits: u64,
    pub lethal: f64,
    pub silent: f64,
}

impl TestReceptor {
    /// A receptor whose mutations always flip one bit.
    pub fn exact(bits: u64) -> Self {
        Self {
            bits,
            lethal: 0.0,
            silent: 0.0,
        }
    }

    /// A receptor whose mutations never change it.
    pub fn always_silent(bits: u64) -> Self {
        Self {
            bits,
            lethal: 0.0,
            silent: 1.0,
        }
    }

    /// A receptor whose mutations are always lethal.
    pub fn always_lethal(bits: u64) -> Self {
        Self {
            bits,
            lethal: 1.0,
            silent: 0.0,
        }
    }
}

impl Receptor for TestReceptor {
    type Epitope = u64;

    fn mutate(&self, rng: &mut dyn RngCore) -> Option<Self> {
        let roll: f64 = rng.gen();
        if roll < self.lethal {
            None
        } else if roll < self.lethal + self.silent {
            Some(self.clone())
        } else {
            let flipped = self.bits ^ (1u64 << rng.gen_range(0..64));
            Some(Self {
                bits: flipped,
                ..self.clone()
            })
        }
    }
}

/// Affinity = fraction of matching bits between receptor and epitope.
pub struct BitOverlapAffinity;

impl AffinityModel<TestReceptor> for BitOverlapAffinity {
    fn affinity(&self, epitope: &u64, receptor: &TestReceptor) -> f64 {
        (64 - (epitope ^ receptor.bits).count_ones()) as f64 / 64.0
    }
}

/// Capture = affinity * concentration, floored at zero.
pub struct UnitCapture;

impl CaptureModel for UnitCapture {
    fn capture(&self, affinity: f64, concentration: f64) -> f64 {
        (affinity * concentration).max(0.0)
    }
}
