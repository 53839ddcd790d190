//! Germen Runtime Prelude — convenient imports for common usage.

pub use crate::builder::GcBuilder;
pub use crate::center::{GerminalCenter, TrialEvent, TrialStats};
pub use crate::config::GcConfig;
pub use crate::repertoire::{ClonalFamily, Repertoire};
