//! # Germen Models
//!
//! Reference implementations of the Germen model traits.
//!
//! Each extension point of the cycle engine gets at least one concrete,
//! well-behaved model here: enough to run full trials and tests without a
//! custom structural layer, and a template for writing serious biophysics
//! behind the same traits. The numeric forms are deliberately simple —
//! the engineering lives in the contracts, not in these one-liners.
//!
//! The crate also carries a minimal reference receptor encoding
//! ([`bitstring::BitstringReceptor`]): a 64-bit string with configurable
//! lethal/silent mutation rates and Hamming-overlap affinity. Real
//! receptor models replace this crate entirely; the engine never looks
//! inside.

pub mod activation;
pub mod apoptosis;
pub mod bitstring;
pub mod capture;
pub mod division;
pub mod prelude;
pub mod selection;
pub mod visitation;
