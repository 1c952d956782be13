//! Per-unit run-hour models and the fleet-level view over them.
//!
//! # Contents
//!
//! - [`UnitRuntimeModel`] — linear run-hour inter-/extrapolation per unit
//! - [`FleetView`] — ordered unit set + evaluation instant, with
//!   [`FleetStats`] fleet-leader statistics

mod unit;
mod view;

pub use unit::UnitRuntimeModel;
pub use view::{FleetStats, FleetView};
