//! Trial configuration.

use germen_core::error::{GermenError, Result};
use germen_core::types::Cycle;
use serde::{Deserialize, Serialize};

/// Tunable parameters of one germinal-center trial.
///
/// Loading these from files is the driver's business; the struct is
/// serde-ready for whichever format the driver speaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcConfig {
    /// Seed of the trial's random stream (default: 0). Two trials with the
    /// same seed and setup replay identically.
    pub seed: u64,
    /// Cycle index at which the trial times out (default: 40).
    pub cycle_limit: Cycle,
    /// Active population above which the center overflows (default: 2000).
    pub resident_capacity: usize,
    /// Antigen half-life in cycles, applied once per light zone
    /// (default: 12.0).
    pub antigen_half_life: f64,
    /// Total concentration at or below which the pool counts as consumed
    /// (default: 0.0, i.e. literal emptiness).
    pub exhaustion_threshold: f64,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cycle_limit: 40,
            resident_capacity: 2000,
            antigen_half_life: 12.0,
            exhaustion_threshold: 0.0,
        }
    }
}

impl GcConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_cycle_limit(mut self, cycle_limit: Cycle) -> Self {
        self.cycle_limit = cycle_limit;
        self
    }

    pub fn with_resident_capacity(mut self, resident_capacity: usize) -> Self {
        self.resident_capacity = resident_capacity;
        self
    }

    pub fn with_antigen_half_life(mut self, antigen_half_life: f64) -> Self {
        self.antigen_half_life = antigen_half_life;
        self
    }

    pub fn with_exhaustion_threshold(mut self, exhaustion_threshold: f64) -> Self {
        self.exhaustion_threshold = exhaustion_threshold;
        self
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if !(self.antigen_half_life > 0.0) || !self.antigen_half_life.is_finite() {
            return Err(GermenError::non_positive(
                "antigen_half_life",
                self.antigen_half_life,
            ));
        }
        if self.resident_capacity == 0 {
            return Err(GermenError::non_positive("resident_capacity", 0.0));
        }
        if self.cycle_limit == 0 {
            return Err(GermenError::non_positive("cycle_limit", 0.0));
        }
        if !(self.exhaustion_threshold >= 0.0) {
            return Err(GermenError::Config(
                germen_core::error::ConfigError::OutOfRange {
                    field: "exhaustion_threshold",
                    min: 0.0,
                    max: f64::INFINITY,
                    value: self.exhaustion_threshold,
                },
            ));
        }
        Ok(())
    }
}
