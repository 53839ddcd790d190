//! # Germen Core
//!
//! Core traits and types for the Germen germinal-center simulation engine.
//!
//! A germinal center is the anatomical site of affinity maturation: B cells
//! cycle between a **dark zone**, where they proliferate and hypermutate
//! their receptors, and a **light zone**, where they compete for limited
//! antigen and T-cell help. Cells that bind well are selected into memory
//! or plasma fates; the rest die. Over tens of cycles the surviving
//! repertoire climbs the affinity landscape.
//!
//! This crate defines the entities the cycle engine operates on, along with
//! the pluggable model traits that parameterize each step:
//!
//! - **Antigen / AntigenPool** — the contested resource: a concentration
//!   map with weighted random sampling and exponential decay
//! - **BCell / Lineage** — the clonal forest: an append-only arena of
//!   B-cell records linked by parent and founder references
//! - **BindingEvent** — one receptor–epitope encounter
//! - **PopulationRecord** — per-cycle before/after population accounting
//! - **models** — the extension-point traits (affinity, capture,
//!   visitation, apoptosis, selection, division, activation) and the
//!   `ModelSet` configuration object that carries them into a trial
//! - **VaccinationSchedule** — the external supply of antigen over time
//!
//! The cycle state machine itself lives in `germen-runtime`; reference
//! model implementations live in `germen-models`.

pub mod antigen;
pub mod bcell;
pub mod error;
pub mod lineage;
pub mod models;
pub mod pool;
pub mod prelude;
pub mod receptor;
pub mod record;
pub mod schedule;
pub mod types;

#[cfg(test)]
pub(crate) mod testkit;
