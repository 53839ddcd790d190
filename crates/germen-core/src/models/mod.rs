//! The pluggable biological models — the engine's extension points.
//!
//! Each step of the germinal-center cycle delegates its biology to a model
//! trait. The engine fixes WHEN each decision happens and what it may touch;
//! the models decide HOW:
//!
//! - **AFFINITY** — score one receptor against one epitope
//! - **CAPTURE** — turn affinity and concentration into captured antigen
//! - **VISITATION** — which antigens one cell encounters in the light zone
//! - **APOPTOSIS** — which cells die (whole-population or sequential shape)
//! - **SELECTION** — which cells exit into memory, plasma, or reentry
//! - **DIVISION** — how many dark-zone rounds each survivor is granted
//! - **ACTIVATION** — how germline cells found and expand the population
//!
//! Models are plain trait objects carried by a [`ModelSet`] constructed once
//! per trial and handed to the engine — no process-wide registries, so two
//! trials (or two tests) never share mutable configuration.

pub mod activation;
pub mod affinity;
pub mod apoptosis;
pub mod capture;
pub mod division;
pub mod selection;
pub mod visitation;

pub use activation::ActivationModel;
pub use affinity::AffinityModel;
pub use apoptosis::{ApoptosisModel, Sequential, SequentialApoptosisModel};
pub use capture::CaptureModel;
pub use division::DivisionModel;
pub use selection::SelectionModel;
pub use visitation::VisitationModel;

use crate::receptor::Receptor;

/// The complete model configuration of one trial.
///
/// Every extension point is filled exactly once, at construction. The boxes
/// are `Send + Sync` (the traits require it), so a host driver is free to
/// move whole trials across worker threads.
pub struct ModelSet<R: Receptor> {
    /// Germline founding (cycle 0) and replication (cycle 1).
    pub activation: Box<dyn ActivationModel<R>>,
    /// Receptor–epitope scoring.
    pub affinity: Box<dyn AffinityModel<R>>,
    /// Affinity + concentration → captured quantity.
    pub capture: Box<dyn CaptureModel>,
    /// Light-zone antigen search.
    pub visitation: Box<dyn VisitationModel<R::Epitope>>,
    /// Death by absent or weak receptor signaling.
    pub bcr_apoptosis: Box<dyn ApoptosisModel<R>>,
    /// Death by losing the competition for T-cell help.
    pub competition: Box<dyn ApoptosisModel<R>>,
    /// Division-count grants for competition survivors.
    pub division: Box<dyn DivisionModel<R>>,
    /// Memory cells re-entering the dark zone.
    pub reentry: Box<dyn SelectionModel<R>>,
    /// Exit into the memory compartment.
    pub memory: Box<dyn SelectionModel<R>>,
    /// Exit into the plasma compartment.
    pub plasma: Box<dyn SelectionModel<R>>,
}
