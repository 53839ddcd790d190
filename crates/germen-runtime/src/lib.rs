//! # Germen Runtime
//!
//! The germinal-center cycle engine: the state machine that advances a
//! B-cell population through dark-zone division and light-zone selection,
//! cycle after cycle, until the trial reaches one of its four terminal
//! states.
//!
//! One [`center::GerminalCenter`] runs one trial, strictly
//! single-threaded, with a per-trial seeded random stream. Independent
//! trials share no mutable state, so a host driver may run as many of
//! them in parallel as it likes.

pub mod builder;
pub mod center;
pub mod config;
pub mod prelude;
pub mod repertoire;
