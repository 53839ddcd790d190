//! Visitation models — the light-zone antigen search.

use germen_core::models::VisitationModel;
use germen_core::pool::AntigenPool;
use germen_core::types::{AntigenId, Cycle};
use rand::RngCore;
use rand_distr::{Distribution, Poisson};

/// Every cell encounters a fixed number of weighted draws per light zone.
///
/// An empty pool yields an empty visit — a cell that finds nothing simply
/// records no binding events.
#[derive(Debug, Clone, Copy)]
pub struct UniformVisitation {
    pub encounters: usize,
}

impl UniformVisitation {
    pub fn new(encounters: usize) -> Self {
        Self { encounters }
    }
}

impl<E> VisitationModel<E> for UniformVisitation {
    fn visit(
        &self,
        _cycle: Cycle,
        pool: &mut AntigenPool<E>,
        rng: &mut dyn RngCore,
    ) -> Vec<AntigenId> {
        let mut visited = Vec::with_capacity(self.encounters);
        for _ in 0..self.encounters {
            match pool.select(rng) {
                Ok(id) => visited.push(id),
                Err(_) => break,
            }
        }
        visited
    }
}

/// Poisson-distributed encounter counts: most cells make a few contacts,
/// a lucky tail makes many.
#[derive(Debug, Clone, Copy)]
pub struct PoissonVisitation {
    mean: f64,
    distribution: Poisson<f64>,
}

impl PoissonVisitation {
    /// Fails on a non-positive mean.
    pub fn new(mean: f64) -> germen_core::error::Result<Self> {
        let distribution = Poisson::new(mean)
            .map_err(|_| germen_core::error::GermenError::non_positive("mean encounters", mean))?;
        Ok(Self { mean, distribution })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl<E> VisitationModel<E> for PoissonVisitation {
    fn visit(
        &self,
        _cycle: Cycle,
        pool: &mut AntigenPool<E>,
        rng: &mut dyn RngCore,
    ) -> Vec<AntigenId> {
        let encounters = self.distribution.sample(rng) as usize;
        let mut visited = Vec::with_capacity(encounters);
        for _ in 0..encounters {
            match pool.select(rng) {
                Ok(id) => visited.push(id),
                Err(_) => break,
            }
        }
        visited
    }
}

/// Occupation-style search: a cell occupies up to `sites` FDC sites, each
/// holding one weighted draw, and never the same antigen twice per pass.
///
/// With fewer distinct antigens than sites, every antigen is visited once.
#[derive(Debug, Clone, Copy)]
pub struct SiteOccupation {
    pub sites: usize,
}

impl SiteOccupation {
    pub fn new(sites: usize) -> Self {
        Self { sites }
    }
}

impl<E> VisitationModel<E> for SiteOccupation {
    fn visit(
        &self,
        _cycle: Cycle,
        pool: &mut AntigenPool<E>,
        rng: &mut dyn RngCore,
    ) -> Vec<AntigenId> {
        let target = self.sites.min(pool.len());
        let mut occupied = Vec::with_capacity(target);
        while occupied.len() < target {
            match pool.select(rng) {
                Ok(id) if !occupied.contains(&id) => occupied.push(id),
                Ok(_) => continue,
                Err(_) => break,
            }
        }
        occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use germen_core::antigen::Antigen;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn uniform_visitation_draws_the_configured_count() {
        let mut pool = AntigenPool::new();
        pool.add(Antigen::with_id(AntigenId::from_seed(1), vec![0u8]), 1.0)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let visited = UniformVisitation::new(5).visit(0, &mut pool, &mut rng);
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn empty_pool_yields_an_empty_visit() {
        let mut pool: AntigenPool<u8> = AntigenPool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(UniformVisitation::new(3)
            .visit(0, &mut pool, &mut rng)
            .is_empty());
    }

    #[test]
    fn site_occupation_never_repeats_an_antigen() {
        let mut pool = AntigenPool::new();
        for seed in 0..3u64 {
            pool.add(Antigen::with_id(AntigenId::from_seed(seed), vec![0u8]), 1.0)
                .unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let occupied = SiteOccupation::new(8).visit(0, &mut pool, &mut rng);
        assert_eq!(occupied.len(), 3, "capped by distinct antigens");
        let mut unique = occupied.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), occupied.len());
    }

    #[test]
    fn poisson_visitation_rejects_non_positive_mean() {
        assert!(PoissonVisitation::new(0.0).is_err());
        assert!(PoissonVisitation::new(2.5).is_ok());
    }

    #[test]
    fn poisson_visitation_mean_tracks_configuration() {
        let mut pool = AntigenPool::new();
        pool.add(Antigen::with_id(AntigenId::from_seed(1), vec![0u8]), 1.0)
            .unwrap();
        let model = PoissonVisitation::new(3.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 20_000;
        let total: usize = (0..trials)
            .map(|_| model.visit(0, &mut pool, &mut rng).len())
            .sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - 3.0).abs() < 0.1, "empirical mean {}", mean);
    }
}
