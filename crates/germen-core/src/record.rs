//! PopulationRecord — per-cycle population accounting.
//!
//! Each full cycle touches the active population six times, in a fixed
//! order. The record keeps a before/after count for every event plus the
//! cycle-ending count, and exists purely for survival-rate reporting and
//! invariant checking — control flow never reads it.

use crate::types::{Cycle, GcEvent};
use serde::{Deserialize, Serialize};

/// Slots: a before/after pair per event, plus the cycle-ending count.
const SLOTS: usize = 2 * GcEvent::COUNT + 1;

/// Before/after population counts for one cycle's six events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    cycle: Cycle,
    counts: [usize; SLOTS],
}

impl PopulationRecord {
    pub fn new(cycle: Cycle) -> Self {
        Self {
            cycle,
            counts: [0; SLOTS],
        }
    }

    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn record_before(&mut self, event: GcEvent, count: usize) {
        self.counts[2 * event.ordinal()] = count;
    }

    pub fn record_after(&mut self, event: GcEvent, count: usize) {
        self.counts[2 * event.ordinal() + 1] = count;
    }

    /// Population entering the event.
    pub fn before(&self, event: GcEvent) -> usize {
        self.counts[2 * event.ordinal()]
    }

    /// Population leaving the event.
    pub fn after(&self, event: GcEvent) -> usize {
        self.counts[2 * event.ordinal() + 1]
    }

    pub fn set_ending(&mut self, count: usize) {
        self.counts[SLOTS - 1] = count;
    }

    /// Population at the end of the cycle.
    pub fn ending(&self) -> usize {
        self.counts[SLOTS - 1]
    }

    /// Population at the start of the cycle.
    pub fn starting(&self) -> usize {
        self.before(GcEvent::Reentry)
    }

    /// Fraction of the incoming population that survived the event, or
    /// `None` when nothing entered it.
    pub fn survival(&self, event: GcEvent) -> Option<f64> {
        let before = self.before(event);
        if before == 0 {
            return None;
        }
        Some(self.after(event) as f64 / before as f64)
    }

    /// Whether the accounting balances: each event starts from the previous
    /// event's outcome, the ending count equals the last event's outcome,
    /// and only reentry/division grew the population.
    pub fn is_balanced(&self) -> bool {
        for pair in GcEvent::ALL.windows(2) {
            if self.before(pair[1]) != self.after(pair[0]) {
                return false;
            }
        }
        if self.ending() != self.after(GcEvent::PlasmaSelection) {
            return false;
        }
        GcEvent::ALL
            .iter()
            .copied()
            .filter(|event| !matches!(*event, GcEvent::Reentry | GcEvent::Division))
            .all(|event| self.after(event) <= self.before(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_flow(flow: [usize; 7]) -> PopulationRecord {
        let mut record = PopulationRecord::new(3);
        for (i, event) in GcEvent::ALL.iter().enumerate() {
            record.record_before(*event, flow[i]);
            record.record_after(*event, flow[i + 1]);
        }
        record.set_ending(flow[6]);
        record
    }

    #[test]
    fn balanced_flow_is_balanced() {
        let record = record_with_flow([10, 12, 48, 30, 20, 17, 15]);
        assert!(record.is_balanced());
        assert_eq!(record.starting(), 10);
        assert_eq!(record.ending(), 15);
    }

    #[test]
    fn mismatched_handoff_is_unbalanced() {
        let mut record = record_with_flow([10, 12, 48, 30, 20, 17, 15]);
        record.record_before(GcEvent::MemorySelection, 19);
        assert!(!record.is_balanced());
    }

    #[test]
    fn growth_outside_reentry_and_division_is_unbalanced() {
        let mut record = record_with_flow([10, 12, 48, 30, 20, 17, 15]);
        record.record_after(GcEvent::BcrApoptosis, 60);
        record.record_before(GcEvent::CompetitionApoptosis, 60);
        record.record_after(GcEvent::CompetitionApoptosis, 60);
        record.record_before(GcEvent::MemorySelection, 60);
        record.record_after(GcEvent::MemorySelection, 60);
        record.record_before(GcEvent::PlasmaSelection, 60);
        record.record_after(GcEvent::PlasmaSelection, 60);
        record.set_ending(60);
        assert!(!record.is_balanced(), "apoptosis may not grow the population");
    }

    #[test]
    fn survival_is_after_over_before() {
        let record = record_with_flow([10, 12, 48, 30, 20, 17, 15]);
        let survival = record.survival(GcEvent::BcrApoptosis).unwrap();
        assert!((survival - 30.0 / 48.0).abs() < 1e-12);
        assert_eq!(PopulationRecord::new(0).survival(GcEvent::Reentry), None);
    }

    #[test]
    fn records_serialize_round_trip() {
        let record = record_with_flow([10, 12, 48, 30, 20, 17, 15]);
        let json = serde_json::to_string(&record).unwrap();
        let back: PopulationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
