//! Germen Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use germen_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AntigenId, BindingEvent, CellId, Cycle, DivisionCount, GcEvent, GcState, GERMLINE_CYCLE,
    REPLICATION_CYCLE,
};

// Re-export the core entities
pub use crate::antigen::{Antigen, Vaccine};
pub use crate::bcell::{BCell, NO_AFFINITY};
pub use crate::lineage::{Division, Lineage};
pub use crate::pool::AntigenPool;
pub use crate::record::PopulationRecord;

// Re-export the structural seam
pub use crate::receptor::Receptor;

// Re-export the model traits and the model set
pub use crate::models::{
    ActivationModel, AffinityModel, ApoptosisModel, CaptureModel, DivisionModel, ModelSet,
    SelectionModel, Sequential, SequentialApoptosisModel, VisitationModel,
};

// Re-export the schedule contract
pub use crate::schedule::{CycleSchedule, VaccinationSchedule};

// Re-export error types
pub use crate::error::{GermenError, Result};
