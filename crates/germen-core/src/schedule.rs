//! VaccinationSchedule — the external antigen supply.
//!
//! The engine never invents antigen: it pulls vaccination events from a
//! schedule owned by the driver. The only hard requirement is a founding
//! event on cycle 0 — a schedule without one is a configuration error, not
//! a recoverable condition.

use crate::antigen::Vaccine;
use crate::types::Cycle;
use std::collections::BTreeMap;

/// The vaccine to merge into the pool on an exact cycle match, if any.
pub trait VaccinationSchedule<E>: Send + Sync {
    fn event_on(&self, cycle: Cycle) -> Option<&Vaccine<E>>;
}

/// A schedule backed by an explicit cycle → vaccine map.
#[derive(Debug, Clone)]
pub struct CycleSchedule<E> {
    events: BTreeMap<Cycle, Vaccine<E>>,
}

impl<E> CycleSchedule<E> {
    pub fn new() -> Self {
        Self {
            events: BTreeMap::new(),
        }
    }

    /// Schedule a vaccine. Doses scheduled twice for the same cycle merge
    /// into one event.
    pub fn with_event(mut self, cycle: Cycle, vaccine: Vaccine<E>) -> Self {
        self.insert(cycle, vaccine);
        self
    }

    pub fn insert(&mut self, cycle: Cycle, vaccine: Vaccine<E>) {
        match self.events.remove(&cycle) {
            Some(existing) => {
                let mut merged = existing;
                for (antigen, concentration) in vaccine.into_doses() {
                    merged = merged.with_dose(antigen, concentration);
                }
                self.events.insert(cycle, merged);
            }
            None => {
                self.events.insert(cycle, vaccine);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<E> Default for CycleSchedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Send + Sync> VaccinationSchedule<E> for CycleSchedule<E> {
    fn event_on(&self, cycle: Cycle) -> Option<&Vaccine<E>> {
        self.events.get(&cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antigen::Antigen;
    use crate::types::AntigenId;

    fn antigen(seed: u64) -> Antigen<u8> {
        Antigen::with_id(AntigenId::from_seed(seed), vec![seed as u8])
    }

    #[test]
    fn events_match_exact_cycles_only() {
        let schedule = CycleSchedule::new()
            .with_event(0, Vaccine::single(antigen(1), 10.0))
            .with_event(5, Vaccine::single(antigen(2), 4.0));
        assert!(schedule.event_on(0).is_some());
        assert!(schedule.event_on(1).is_none());
        assert!(schedule.event_on(5).is_some());
        assert!(schedule.event_on(6).is_none());
    }

    #[test]
    fn same_cycle_events_merge_doses() {
        let schedule = CycleSchedule::new()
            .with_event(2, Vaccine::single(antigen(1), 1.0))
            .with_event(2, Vaccine::single(antigen(2), 2.0));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.event_on(2).unwrap().len(), 2);
    }
}
