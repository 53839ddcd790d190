//! Error types for Germen operations.
//!
//! Three failure families matter here, and only two of them are errors.
//! Configuration problems (a schedule with no founding vaccine) are fatal and
//! surfaced immediately. Contract violations (re-assigning a division count,
//! subsetting over an absent antigen) are fatal programming errors meant to
//! be caught by tests. Expected stochastic outcomes — lethal mutations,
//! extinction, antigen exhaustion — are ordinary state transitions and never
//! pass through these types.

use crate::types::{AntigenId, CellId, Cycle};
use std::error::Error;
use std::fmt;

/// Result type for Germen operations.
pub type Result<T> = std::result::Result<T, GermenError>;

/// Errors that can occur during Germen operations.
#[derive(Debug, Clone)]
pub enum GermenError {
    /// Antigen-pool errors.
    Pool(PoolError),
    /// Lineage-arena errors.
    Lineage(LineageError),
    /// Vaccination-schedule errors.
    Schedule(ScheduleError),
    /// Configuration errors.
    Config(ConfigError),
}

impl fmt::Display for GermenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GermenError::Pool(e) => write!(f, "Pool error: {}", e),
            GermenError::Lineage(e) => write!(f, "Lineage error: {}", e),
            GermenError::Schedule(e) => write!(f, "Schedule error: {}", e),
            GermenError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl Error for GermenError {}

impl From<PoolError> for GermenError {
    fn from(e: PoolError) -> Self {
        GermenError::Pool(e)
    }
}

impl From<LineageError> for GermenError {
    fn from(e: LineageError) -> Self {
        GermenError::Lineage(e)
    }
}

impl From<ScheduleError> for GermenError {
    fn from(e: ScheduleError) -> Self {
        GermenError::Schedule(e)
    }
}

impl From<ConfigError> for GermenError {
    fn from(e: ConfigError) -> Self {
        GermenError::Config(e)
    }
}

/// Antigen-pool errors.
#[derive(Debug, Clone)]
pub enum PoolError {
    /// A weighted draw was requested from an empty pool.
    Empty,
    /// An operation named an antigen the pool does not hold.
    UnknownAntigen(AntigenId),
    /// A concentration below zero was supplied.
    NegativeConcentration(f64),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Empty => write!(f, "Cannot select from an empty pool"),
            PoolError::UnknownAntigen(id) => write!(f, "Antigen not in pool: {}", id.0),
            PoolError::NegativeConcentration(value) => {
                write!(f, "Concentration must be >= 0, got {}", value)
            }
        }
    }
}

/// Lineage-arena errors.
#[derive(Debug, Clone)]
pub enum LineageError {
    /// The id does not name a cell in this arena.
    UnknownCell(CellId),
    /// The cell's division count was already assigned.
    DivisionCountAssigned(CellId),
    /// The cell was asked to divide before its division count was assigned.
    DivisionCountUnassigned(CellId),
}

impl fmt::Display for LineageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineageError::UnknownCell(id) => write!(f, "Unknown {}", id),
            LineageError::DivisionCountAssigned(id) => {
                write!(f, "Division count already assigned for {}", id)
            }
            LineageError::DivisionCountUnassigned(id) => {
                write!(f, "Division count not yet assigned for {}", id)
            }
        }
    }
}

/// Vaccination-schedule errors.
#[derive(Debug, Clone)]
pub enum ScheduleError {
    /// No vaccination event exists for the founding cycle.
    MissingFoundingVaccine,
    /// A vaccination event carried no doses for the given cycle.
    EmptyVaccine(Cycle),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::MissingFoundingVaccine => {
                write!(f, "No vaccination event scheduled for cycle 0")
            }
            ScheduleError::EmptyVaccine(cycle) => {
                write!(f, "Vaccination event on cycle {} has no doses", cycle)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A required piece of configuration was never supplied.
    Missing { field: &'static str },
    /// A field requiring a strictly positive value was zero or below.
    NonPositive { field: &'static str, value: f64 },
    /// A field fell outside its valid range.
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be > 0, got {}", field, value)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(f, "{} out of range: {} (must be {}-{})", field, value, min, max)
            }
        }
    }
}

// Convenience constructors
impl GermenError {
    pub fn empty_pool() -> Self {
        GermenError::Pool(PoolError::Empty)
    }

    pub fn unknown_antigen(id: AntigenId) -> Self {
        GermenError::Pool(PoolError::UnknownAntigen(id))
    }

    pub fn unknown_cell(id: CellId) -> Self {
        GermenError::Lineage(LineageError::UnknownCell(id))
    }

    pub fn missing_founding_vaccine() -> Self {
        GermenError::Schedule(ScheduleError::MissingFoundingVaccine)
    }

    pub fn non_positive(field: &'static str, value: f64) -> Self {
        GermenError::Config(ConfigError::NonPositive { field, value })
    }

    pub fn missing_config(field: &'static str) -> Self {
        GermenError::Config(ConfigError::Missing { field })
    }
}
