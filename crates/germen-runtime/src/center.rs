//! GerminalCenter — the cycle state machine.
//!
//! One instance runs one trial. The loop body is rigid; all biology hides
//! behind the model set:
//!
//! 1. Cycle 0: merge the founding vaccine (its absence is fatal), activate
//!    germline founders.
//! 2. Cycle 1: replicate the founders; the expanded count becomes
//!    `initial_size`, the denominator for production-rate statistics.
//! 3. Every later cycle, in strict order:
//!    dark zone — reenter selected memory cells, then drain the active set
//!    and refill it with the daughters of every parent's division;
//!    light zone — merge any scheduled vaccine, let every cell visit and
//!    bind antigen, decay the pool, run BCR-signaling apoptosis, run
//!    T-cell competition plus division-count assignment, select memory,
//!    select plasma.
//! 4. Re-evaluate the state; any terminal state halts the loop at once.
//!
//! Population counts are recorded before and after each of the six cycle
//! events; the records feed survival-rate reporting, never control flow.

use crate::config::GcConfig;
use crate::repertoire::Repertoire;
use germen_core::antigen::Vaccine;
use germen_core::error::{GermenError, Result, ScheduleError};
use germen_core::lineage::Lineage;
use germen_core::models::ModelSet;
use germen_core::pool::AntigenPool;
use germen_core::receptor::Receptor;
use germen_core::record::PopulationRecord;
use germen_core::schedule::VaccinationSchedule;
use germen_core::types::{CellId, Cycle, GcEvent, GcState, GERMLINE_CYCLE, REPLICATION_CYCLE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Event emitted by the engine during a trial.
#[derive(Debug, Clone, Serialize)]
pub enum TrialEvent {
    /// A vaccination event was merged into the pool.
    VaccineMerged {
        cycle: Cycle,
        antigens: usize,
        added_concentration: f64,
    },
    /// Germline founders were activated.
    GermlineActivated { founders: usize },
    /// The germline was replicated; the trial's initial size is fixed.
    GermlineReplicated { initial_size: usize },
    /// A cycle finished.
    CycleComplete {
        cycle: Cycle,
        active: usize,
        memory: usize,
        plasma: usize,
        pool_total: f64,
    },
    /// The trial reached a terminal state.
    Terminated { cycle: Cycle, state: GcState },
}

/// Snapshot of a trial's headline numbers.
#[derive(Debug, Clone, Serialize)]
pub struct TrialStats {
    /// Next cycle index (equals the number of executed cycles).
    pub cycle: Cycle,
    pub state: GcState,
    pub active: usize,
    pub memory: usize,
    pub plasma: usize,
    /// Population after germline replication; 0 before cycle 1 ran.
    pub initial_size: usize,
    /// Cells ever created, dead branches included.
    pub lineage_size: usize,
    pub antigens: usize,
    pub total_concentration: f64,
}

/// The germinal-center cycle engine.
pub struct GerminalCenter<R: Receptor> {
    config: GcConfig,
    models: ModelSet<R>,
    schedule: Box<dyn VaccinationSchedule<R::Epitope>>,
    rng: ChaCha8Rng,

    lineage: Lineage<R>,
    pool: AntigenPool<R::Epitope>,
    active: Vec<CellId>,
    memory: Vec<CellId>,
    plasma: Vec<CellId>,
    cycle: Cycle,
    state: GcState,
    initial_size: usize,
    records: Vec<PopulationRecord>,
    history: Vec<TrialEvent>,
}

impl<R: Receptor> GerminalCenter<R> {
    /// Create an engine for one trial. The random stream is seeded from the
    /// config, so an identical setup replays identically.
    pub fn new(
        config: GcConfig,
        models: ModelSet<R>,
        schedule: Box<dyn VaccinationSchedule<R::Epitope>>,
    ) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            models,
            schedule,
            rng,
            lineage: Lineage::new(),
            pool: AntigenPool::new(),
            active: Vec::new(),
            memory: Vec::new(),
            plasma: Vec::new(),
            cycle: GERMLINE_CYCLE,
            state: GcState::Active,
            initial_size: 0,
            records: Vec::new(),
            history: Vec::new(),
        })
    }

    /// Run the trial to its terminal state and return the produced
    /// antibody repertoire.
    pub fn run(&mut self) -> Result<Repertoire<R>> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        self.repertoire()
    }

    /// Execute one cycle. A no-op once a terminal state is reached.
    pub fn step(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }

        let executed = self.cycle;
        match executed {
            GERMLINE_CYCLE => self.germline_cycle()?,
            REPLICATION_CYCLE => self.replication_cycle()?,
            _ => self.maturation_cycle()?,
        }

        self.cycle += 1;
        self.state = self.evaluate_state();
        self.history.push(TrialEvent::CycleComplete {
            cycle: executed,
            active: self.active.len(),
            memory: self.memory.len(),
            plasma: self.plasma.len(),
            pool_total: self.pool.total_concentration(),
        });
        if self.state.is_terminal() {
            self.history.push(TrialEvent::Terminated {
                cycle: executed,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Cycle 0: founding vaccine + germline activation.
    fn germline_cycle(&mut self) -> Result<()> {
        let vaccine = self
            .schedule
            .event_on(GERMLINE_CYCLE)
            .cloned()
            .ok_or_else(GermenError::missing_founding_vaccine)?;
        if vaccine.is_empty() {
            return Err(ScheduleError::EmptyVaccine(GERMLINE_CYCLE).into());
        }
        self.merge_vaccine(GERMLINE_CYCLE, vaccine)?;

        let founders = self
            .models
            .activation
            .activate(&self.pool, &mut self.lineage, &mut self.rng);
        self.history.push(TrialEvent::GermlineActivated {
            founders: founders.len(),
        });
        self.active = founders;
        Ok(())
    }

    /// Cycle 1: germline replication instead of division, then a normal
    /// light zone. The expansion is recorded in the division slot so the
    /// accounting stays uniform across all recorded cycles.
    fn replication_cycle(&mut self) -> Result<()> {
        let mut record = PopulationRecord::new(REPLICATION_CYCLE);

        self.reentry(&mut record);

        record.record_before(GcEvent::Division, self.active.len());
        let founders = std::mem::take(&mut self.active);
        let expanded =
            self.models
                .activation
                .replicate(&founders, &mut self.lineage, &mut self.rng)?;
        self.active = expanded;
        self.initial_size = self.active.len();
        record.record_after(GcEvent::Division, self.active.len());
        self.history.push(TrialEvent::GermlineReplicated {
            initial_size: self.initial_size,
        });

        self.light_zone(&mut record)?;
        self.records.push(record);
        Ok(())
    }

    /// Every cycle from 2 on: full dark zone + light zone.
    fn maturation_cycle(&mut self) -> Result<()> {
        let mut record = PopulationRecord::new(self.cycle);
        self.dark_zone(&mut record)?;
        self.light_zone(&mut record)?;
        self.records.push(record);
        Ok(())
    }

    fn reentry(&mut self, record: &mut PopulationRecord) {
        record.record_before(GcEvent::Reentry, self.active.len());
        let reentrants = self
            .models
            .reentry
            .select(&mut self.memory, &self.lineage, &mut self.rng);
        self.active.extend(reentrants);
        record.record_after(GcEvent::Reentry, self.active.len());
    }

    fn dark_zone(&mut self, record: &mut PopulationRecord) -> Result<()> {
        self.reentry(record);

        record.record_before(GcEvent::Division, self.active.len());
        // Drain the set before producing daughters: every parent is
        // consumed exactly once, and an empty mid-transition set guards
        // against double-processing.
        let parents = std::mem::take(&mut self.active);
        debug_assert!(self.active.is_empty());
        for parent in parents {
            let division = self.lineage.divide(parent, self.cycle, &mut self.rng)?;
            self.active.extend(division.final_round);
        }
        record.record_after(GcEvent::Division, self.active.len());
        Ok(())
    }

    fn light_zone(&mut self, record: &mut PopulationRecord) -> Result<()> {
        let scheduled = self.schedule.event_on(self.cycle).cloned();
        if let Some(vaccine) = scheduled {
            self.merge_vaccine(self.cycle, vaccine)?;
        }

        // Antigen search: every active cell visits, then binds what it
        // found at the pool's current concentrations.
        for index in 0..self.active.len() {
            let id = self.active[index];
            let visited =
                self.models
                    .visitation
                    .visit(self.cycle, &mut self.pool, &mut self.rng);
            self.lineage.cell_mut(id)?.bind(
                &self.pool,
                &visited,
                self.models.affinity.as_ref(),
                self.models.capture.as_ref(),
            )?;
        }

        self.pool.decay(self.config.antigen_half_life);

        record.record_before(GcEvent::BcrApoptosis, self.active.len());
        self.models
            .bcr_apoptosis
            .apoptose(&mut self.active, &self.lineage, &self.pool, &mut self.rng);
        record.record_after(GcEvent::BcrApoptosis, self.active.len());

        record.record_before(GcEvent::CompetitionApoptosis, self.active.len());
        self.models
            .competition
            .apoptose(&mut self.active, &self.lineage, &self.pool, &mut self.rng);
        // Division counts are granted against the same survivor set and
        // pool snapshot the competition just judged.
        self.models
            .division
            .assign(&self.active, &mut self.lineage, &self.pool, &mut self.rng)?;
        record.record_after(GcEvent::CompetitionApoptosis, self.active.len());

        record.record_before(GcEvent::MemorySelection, self.active.len());
        let remembered = self
            .models
            .memory
            .select(&mut self.active, &self.lineage, &mut self.rng);
        self.memory.extend(remembered);
        record.record_after(GcEvent::MemorySelection, self.active.len());

        record.record_before(GcEvent::PlasmaSelection, self.active.len());
        let secreted = self
            .models
            .plasma
            .select(&mut self.active, &self.lineage, &mut self.rng);
        self.plasma.extend(secreted);
        record.record_after(GcEvent::PlasmaSelection, self.active.len());

        record.set_ending(self.active.len());
        Ok(())
    }

    fn merge_vaccine(&mut self, cycle: Cycle, vaccine: Vaccine<R::Epitope>) -> Result<()> {
        let antigens = vaccine.len();
        let added_concentration: f64 = vaccine.doses().iter().map(|(_, c)| *c).sum();
        self.pool.merge(vaccine)?;
        self.history.push(TrialEvent::VaccineMerged {
            cycle,
            antigens,
            added_concentration,
        });
        Ok(())
    }

    /// Transition rule, evaluated once per cycle after light-zone
    /// processing, in fixed priority order.
    fn evaluate_state(&self) -> GcState {
        if self.active.is_empty() {
            GcState::Extinguished
        } else if self.active.len() > self.config.resident_capacity {
            GcState::ExceededCapacity
        } else if self.cycle >= self.config.cycle_limit {
            GcState::ExceededTime
        } else if self.pool.total_concentration() <= self.config.exhaustion_threshold {
            GcState::AntigenConsumed
        } else {
            GcState::Active
        }
    }

    /// The receptor → plasma-cell multimap produced so far.
    pub fn repertoire(&self) -> Result<Repertoire<R>> {
        Repertoire::collect(&self.lineage, &self.plasma)
    }

    // --- Read-only views ---

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub fn state(&self) -> GcState {
        self.state
    }

    /// Next cycle index; equals the number of executed cycles.
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    pub fn active_cells(&self) -> &[CellId] {
        &self.active
    }

    pub fn memory_cells(&self) -> &[CellId] {
        &self.memory
    }

    pub fn plasma_cells(&self) -> &[CellId] {
        &self.plasma
    }

    pub fn lineage(&self) -> &Lineage<R> {
        &self.lineage
    }

    pub fn pool(&self) -> &AntigenPool<R::Epitope> {
        &self.pool
    }

    /// Per-cycle population records, from cycle 1 on.
    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn history(&self) -> &[TrialEvent] {
        &self.history
    }

    pub fn stats(&self) -> TrialStats {
        TrialStats {
            cycle: self.cycle,
            state: self.state,
            active: self.active.len(),
            memory: self.memory.len(),
            plasma: self.plasma.len(),
            initial_size: self.initial_size,
            lineage_size: self.lineage.len(),
            antigens: self.pool.len(),
            total_concentration: self.pool.total_concentration(),
        }
    }
}
