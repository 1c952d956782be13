//! # fleet-reliability
//!
//! Demonstrated reliability growth curves for a fleet of long-running
//! machines under a time-bounded validation program.
//!
//! Sparse cumulative run-hour observations are extrapolated per unit into a
//! continuous function of time, aggregated across the fleet, and converted
//! into lower-confidence-bound reliability-vs-time curves at a target
//! operating life, using the classical zero-failure Weibull success-run
//! relation (Lipson equality + chi-squared bound at two degrees of freedom).
//! Output is purely numeric — time grids, percentage arrays, and scalar
//! fleet statistics — for hand-off to an external charting layer.
//!
//! ## Modules
//!
//! - [`snapshot`] — immutable per-unit input records, versioned stored form,
//!   replayable [`snapshot::SnapshotSource`]
//! - [`fleet`] — per-unit linear run-hour models and the fleet-level view
//! - [`reliability`] — success-run bounds and curve generation
//! - [`error`] — error types
//!
//! ## Design Philosophy
//!
//! - **Pure computation**: no I/O, no caching, no hidden state; every query
//!   is a function of the snapshots and the parameters, and identical inputs
//!   produce bit-identical outputs
//! - **Explicit failure**: a malformed input is rejected with the unit and
//!   values that caused it, never silently smoothed into a plausible curve
//! - **Assumed shape**: the Weibull shape parameter is supplied by the
//!   caller, not fitted from data

pub mod error;
pub mod fleet;
pub mod reliability;
pub mod snapshot;
