//! AntigenPool — the contested resource of the light zone.
//!
//! The pool maps antigens to non-negative concentrations. B cells searching
//! the light zone draw antigens from it with probability proportional to
//! concentration, so the weighted draw is the hottest path in a trial: one
//! draw per antigen visit per cell per cycle, millions of times per trial.
//! The pool therefore keeps a cached selection distribution and rebuilds it
//! lazily — any mutation invalidates the cache, and the next draw pays the
//! O(n) rebuild once instead of on every sample.

use crate::antigen::{Antigen, Vaccine};
use crate::error::{PoolError, Result};
use crate::types::AntigenId;
use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;
use std::collections::BTreeMap;

/// An antigen held by the pool, with its current concentration.
#[derive(Debug, Clone)]
struct PoolEntry<E> {
    antigen: Antigen<E>,
    concentration: f64,
}

/// The cached selection distribution: antigen ids in pool order plus the
/// cumulative-weight table backing O(log n) draws.
#[derive(Debug, Clone)]
struct SelectionCache {
    ids: Vec<AntigenId>,
    distribution: WeightedIndex<f64>,
}

/// A mutable multiset of antigens with concentrations.
///
/// Invariants: every concentration is >= 0, and an antigen whose
/// concentration reaches exactly 0 is removed from the mapping rather than
/// stored as a zero entry. Entries are kept in a `BTreeMap` so iteration
/// (and therefore a seeded trial) is deterministic.
#[derive(Debug, Clone)]
pub struct AntigenPool<E> {
    entries: BTreeMap<AntigenId, PoolEntry<E>>,
    selection: Option<SelectionCache>,
}

impl<E> Default for AntigenPool<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> AntigenPool<E> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            selection: None,
        }
    }

    /// Create a pool seeded from a vaccine.
    pub fn from_vaccine(vaccine: Vaccine<E>) -> Result<Self> {
        let mut pool = Self::new();
        pool.merge(vaccine)?;
        Ok(pool)
    }

    /// Merge every dose of a vaccine into the pool, accumulating
    /// concentrations for antigens already present.
    pub fn merge(&mut self, vaccine: Vaccine<E>) -> Result<()> {
        for (antigen, concentration) in vaccine.into_doses() {
            self.add(antigen, concentration)?;
        }
        Ok(())
    }

    /// Add concentration for an antigen, inserting it if absent.
    ///
    /// The delta must be >= 0; adding exactly 0 to an absent antigen does
    /// not create a zero entry.
    pub fn add(&mut self, antigen: Antigen<E>, delta: f64) -> Result<()> {
        if !(delta >= 0.0) {
            return Err(PoolError::NegativeConcentration(delta).into());
        }
        if delta == 0.0 && !self.entries.contains_key(&antigen.id()) {
            return Ok(());
        }
        let entry = self
            .entries
            .entry(antigen.id())
            .or_insert_with(|| PoolEntry {
                antigen,
                concentration: 0.0,
            });
        entry.concentration += delta;
        self.invalidate();
        Ok(())
    }

    /// Overwrite an antigen's concentration. Setting exactly 0 removes the
    /// entry; the antigen must already be in the pool.
    pub fn set_concentration(&mut self, id: AntigenId, value: f64) -> Result<()> {
        if !(value >= 0.0) {
            return Err(PoolError::NegativeConcentration(value).into());
        }
        if !self.entries.contains_key(&id) {
            return Err(PoolError::UnknownAntigen(id).into());
        }
        if value == 0.0 {
            self.entries.remove(&id);
        } else if let Some(entry) = self.entries.get_mut(&id) {
            entry.concentration = value;
        }
        self.invalidate();
        Ok(())
    }

    /// Remove an antigen outright, returning it if it was present.
    pub fn remove(&mut self, id: AntigenId) -> Option<Antigen<E>> {
        let removed = self.entries.remove(&id).map(|entry| entry.antigen);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// Apply one cycle's worth of exponential decay to every antigen.
    ///
    /// `half_life` is expressed in cycles and must be positive: a half-life
    /// of 1.0 exactly halves every concentration. Entries that underflow to
    /// zero are removed.
    pub fn decay(&mut self, half_life: f64) {
        debug_assert!(half_life > 0.0, "half-life must be positive");
        let factor = 0.5_f64.powf(1.0 / half_life);
        for entry in self.entries.values_mut() {
            entry.concentration *= factor;
        }
        self.entries.retain(|_, entry| entry.concentration > 0.0);
        self.invalidate();
    }

    /// Apply one cycle's worth of decay to a single antigen.
    pub fn decay_one(&mut self, id: AntigenId, half_life: f64) -> Result<()> {
        debug_assert!(half_life > 0.0, "half-life must be positive");
        let factor = 0.5_f64.powf(1.0 / half_life);
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(PoolError::UnknownAntigen(id))?;
        entry.concentration *= factor;
        if entry.concentration <= 0.0 {
            self.entries.remove(&id);
        }
        self.invalidate();
        Ok(())
    }

    /// Draw one antigen with probability proportional to its concentration.
    ///
    /// Fails on an empty pool. Repeated draws between mutations reuse the
    /// cached distribution.
    pub fn select(&mut self, rng: &mut dyn RngCore) -> Result<AntigenId> {
        if self.entries.is_empty() {
            return Err(PoolError::Empty.into());
        }
        if self.selection.is_none() {
            let ids: Vec<AntigenId> = self.entries.keys().copied().collect();
            let weights = self.entries.values().map(|entry| entry.concentration);
            let distribution = WeightedIndex::new(weights).map_err(|_| PoolError::Empty)?;
            self.selection = Some(SelectionCache { ids, distribution });
        }
        match &self.selection {
            Some(cache) => {
                let index = cache.distribution.sample(rng);
                Ok(cache.ids[index])
            }
            None => Err(PoolError::Empty.into()),
        }
    }

    /// An independent copy of the pool restricted to the given antigens.
    ///
    /// Fails if any requested antigen is absent. The copy shares no backing
    /// store with the source: decaying the subset never affects the source.
    pub fn subset(&self, ids: &[AntigenId]) -> Result<Self>
    where
        E: Clone,
    {
        let mut entries = BTreeMap::new();
        for &id in ids {
            let entry = self.entries.get(&id).ok_or(PoolError::UnknownAntigen(id))?;
            entries.insert(id, entry.clone());
        }
        Ok(Self {
            entries,
            selection: None,
        })
    }

    /// The antigen behind an id, if the pool holds it.
    pub fn get(&self, id: AntigenId) -> Option<&Antigen<E>> {
        self.entries.get(&id).map(|entry| &entry.antigen)
    }

    /// Current concentration of an antigen; 0.0 if absent.
    pub fn concentration(&self, id: AntigenId) -> f64 {
        self.entries
            .get(&id)
            .map(|entry| entry.concentration)
            .unwrap_or(0.0)
    }

    /// Sum of all concentrations.
    pub fn total_concentration(&self) -> f64 {
        self.entries.values().map(|entry| entry.concentration).sum()
    }

    /// Read-only view of every antigen in the pool.
    pub fn antigens(&self) -> impl Iterator<Item = &Antigen<E>> {
        self.entries.values().map(|entry| &entry.antigen)
    }

    /// Ids of every antigen in the pool, in deterministic order.
    pub fn ids(&self) -> impl Iterator<Item = AntigenId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of distinct antigens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn invalidate(&mut self) {
        self.selection = None;
    }
}
