//! # Germen
//!
//! Germinal-center affinity maturation, simulated.
//!
//! A germinal center pits a population of B cells against a limited pool
//! of antigen. Dark-zone cycles divide and hypermutate their receptors;
//! light-zone cycles make them compete for antigen capture and T-cell
//! help. Losers die, winners divide again or exit as memory and plasma
//! cells — and the plasma output, grouped by receptor, is the antibody
//! repertoire the trial produced.
//!
//! ## Quick Start
//!
//! ```rust
//! use germen::prelude::*;
//!
//! // A fully wired reference trial (bitstring chemistry, seed 7).
//! let mut center = GcBuilder::reference(7).build()?;
//!
//! // Run to one of the four terminal states.
//! let repertoire = center.run()?;
//!
//! println!("{:?} after {} cycles", center.state(), center.cycle());
//! println!(
//!     "{} clonal families from {} plasma cells",
//!     repertoire.len(),
//!     repertoire.total_cells()
//! );
//! # Ok::<(), germen::prelude::GermenError>(())
//! ```
//!
//! ## Architecture
//!
//! Germen is organized into three crates:
//!
//! - [`germen_core`] - Entities (antigen pool, B-cell lineage, population
//!   records) and the model traits parameterizing every cycle step
//! - [`germen_models`] - Reference model implementations plus the
//!   bitstring reference receptor encoding
//! - [`germen_runtime`] - The cycle state machine, trial configuration,
//!   and repertoire output

pub use germen_core as core;
pub use germen_models as models;
pub use germen_runtime as runtime;

pub mod prelude {
    //! Everything a trial driver usually needs.
    pub use germen_core::prelude::*;
    pub use germen_models::prelude::*;
    pub use germen_runtime::prelude::*;
}
