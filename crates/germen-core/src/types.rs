//! Shared types used across all Germen crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an antigen.
///
/// Antigen equality is identity-based: two antigens with identical epitope
/// lists are still distinct resources in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AntigenId(pub Uuid);

impl AntigenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id derived from a seed, for reproducible setups and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(seed, seed))
    }
}

impl Default for AntigenId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a B cell within a trial's lineage arena.
///
/// Ids are monotonically increasing: the arena is append-only, so a cell
/// created later always carries a larger id than every one of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(u32);

impl CellId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// The arena index backing this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell #{}", self.0)
    }
}

/// Index of a germinal-center cycle.
pub type Cycle = u32;

/// The founding cycle: vaccination seeds the pool and germline cells activate.
pub const GERMLINE_CYCLE: Cycle = 0;

/// The expansion cycle: germline cells replicate without mutating, fixing the
/// trial's `initial_size` — the denominator for production-rate statistics.
pub const REPLICATION_CYCLE: Cycle = 1;

/// State of a germinal center. `Active` is the only non-terminal value;
/// every other state is final and halts the cycle loop immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GcState {
    /// The trial is still running.
    Active,
    /// The active population died out.
    Extinguished,
    /// The active population overflowed the resident capacity.
    ExceededCapacity,
    /// The cycle limit was reached.
    ExceededTime,
    /// The antigen pool was consumed.
    AntigenConsumed,
}

impl GcState {
    /// Whether this state halts the trial.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GcState::Active)
    }
}

/// The six chronologically ordered population events of one full cycle.
///
/// `PopulationRecord` keys its before/after counters by this sequence.
/// Only `Reentry` and `Division` may grow the population; the other four
/// only shrink it or leave it unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GcEvent {
    /// Memory cells selected back into the dark zone.
    Reentry,
    /// Dark-zone division with somatic hypermutation.
    Division,
    /// Death by absent or inadequate receptor signaling.
    BcrApoptosis,
    /// Death by losing the competition for T-cell help.
    CompetitionApoptosis,
    /// Exit into the memory compartment.
    MemorySelection,
    /// Exit into the plasma (antibody-secreting) compartment.
    PlasmaSelection,
}

impl GcEvent {
    /// Number of recorded events per cycle.
    pub const COUNT: usize = 6;

    /// All events in chronological order.
    pub const ALL: [GcEvent; GcEvent::COUNT] = [
        GcEvent::Reentry,
        GcEvent::Division,
        GcEvent::BcrApoptosis,
        GcEvent::CompetitionApoptosis,
        GcEvent::MemorySelection,
        GcEvent::PlasmaSelection,
    ];

    /// Position of this event in the chronological order.
    pub fn ordinal(self) -> usize {
        match self {
            GcEvent::Reentry => 0,
            GcEvent::Division => 1,
            GcEvent::BcrApoptosis => 2,
            GcEvent::CompetitionApoptosis => 3,
            GcEvent::MemorySelection => 4,
            GcEvent::PlasmaSelection => 5,
        }
    }
}

/// Dark-zone division count of a B cell.
///
/// The count is written exactly once, by the division model, during the
/// light zone of the cycle the cell survived. A second assignment is a
/// contract violation, surfaced as an error rather than silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivisionCount {
    /// Not yet competed for T-cell help.
    Unassigned,
    /// Number of division rounds granted for the next dark zone.
    Assigned(u32),
}

impl DivisionCount {
    /// The assigned round count, if any.
    pub fn get(self) -> Option<u32> {
        match self {
            DivisionCount::Unassigned => None,
            DivisionCount::Assigned(rounds) => Some(rounds),
        }
    }

    pub fn is_assigned(self) -> bool {
        matches!(self, DivisionCount::Assigned(_))
    }
}

/// Immutable record of one receptor–epitope encounter during a light-zone
/// visit: which epitope of which antigen was engaged, at what affinity, and
/// how much antigen the cell captured at the pool's concentration at the
/// moment of binding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BindingEvent {
    /// The engaged antigen.
    pub antigen: AntigenId,
    /// Index of the engaged epitope within the antigen's epitope list.
    pub epitope: usize,
    /// Binding affinity computed by the affinity model.
    pub affinity: f64,
    /// Captured antigen quantity computed by the capture model. Never negative.
    pub quantity: f64,
}

impl BindingEvent {
    pub fn new(antigen: AntigenId, epitope: usize, affinity: f64, quantity: f64) -> Self {
        debug_assert!(quantity >= 0.0, "capture models must return quantities >= 0");
        Self {
            antigen,
            epitope,
            affinity,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_is_non_terminal() {
        assert!(!GcState::Active.is_terminal());
        assert!(GcState::Extinguished.is_terminal());
        assert!(GcState::ExceededCapacity.is_terminal());
        assert!(GcState::ExceededTime.is_terminal());
        assert!(GcState::AntigenConsumed.is_terminal());
    }

    #[test]
    fn event_ordinals_match_chronological_order() {
        for (i, event) in GcEvent::ALL.iter().enumerate() {
            assert_eq!(event.ordinal(), i);
        }
    }

    #[test]
    fn division_count_transitions() {
        assert_eq!(DivisionCount::Unassigned.get(), None);
        assert_eq!(DivisionCount::Assigned(3).get(), Some(3));
        assert!(DivisionCount::Assigned(0).is_assigned());
    }

    #[test]
    fn antigen_ids_from_same_seed_are_equal() {
        assert_eq!(AntigenId::from_seed(7), AntigenId::from_seed(7));
        assert_ne!(AntigenId::from_seed(7), AntigenId::from_seed(8));
    }
}
