//! Demonstrated reliability: zero-failure Weibull success-run bounds and
//! reliability-growth curve generation.
//!
//! # Contents
//!
//! - [`lipson_equality`] / [`success_run_reliability`] — the zero-failure
//!   success-run lower confidence bound on reliability
//! - [`CurveParams`] / [`demonstrated_reliability_curves`] — window
//!   resolution and grid-based curve generation
//!
//! # References
//!
//! - Lipson, C. & Sheth, N.J. (1973). *Statistical Design and Analysis of
//!   Engineering Experiments*, McGraw-Hill.
//! - Abernethy, R.B. (2006). *The New Weibull Handbook*, 5th ed., Ch. 6
//!   (Weibayes and zero-failure testing).

mod curve;
mod success_run;

pub use curve::{
    demonstrated_reliability_curves, CurveParams, DemonstratedReliability, HoursBasis,
    NowMarker, ReliabilityCurve,
};
pub use success_run::{
    chi_squared_quantile_2dof, lipson_equality, lipson_equivalent_units,
    success_run_reliability,
};
