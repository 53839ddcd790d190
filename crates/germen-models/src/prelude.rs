//! Germen Models Prelude — convenient imports for common usage.

pub use crate::activation::{GermlineActivation, GermlineGenerator};
pub use crate::apoptosis::{
    AffinityFloorApoptosis, MeanRatioCompetition, NoApoptosis, QuantileCompetition,
    StarvationApoptosis, StochasticRatioCompetition,
};
pub use crate::bitstring::{BitstringEpitope, BitstringReceptor, HammingAffinity, MutationRates};
pub use crate::capture::{LinearCapture, SaturationCapture};
pub use crate::division::{FixedDivision, QuantityProportionalDivision};
pub use crate::selection::{NoSelection, ProbabilisticSelection, TopAffinitySelection};
pub use crate::visitation::{PoissonVisitation, SiteOccupation, UniformVisitation};
