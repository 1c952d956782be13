//! Reliability-growth curve generation over a time grid.
//!
//! Produces one demonstrated-reliability curve per requested confidence
//! level: at each grid timestamp the fleet's extrapolated failure-free
//! run-hours are converted into equivalent zero-failure samples at the
//! target life, and the success-run bound turns those into a reliability
//! percentage. Everything is a pure function of the fleet view and the
//! parameters; generating the same curves twice yields bit-identical arrays.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReliabilityError;
use crate::fleet::{FleetStats, FleetView};
use crate::reliability::success_run::{lipson_equivalent_units, success_run_reliability};

/// Which per-unit rate feeds the accumulated-hours trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursBasis {
    /// Rate measured over each unit's confirmed data-flow interval.
    /// Appropriate for historical curve overlays.
    #[default]
    Observed,
    /// Rate averaged over the full wall-clock interval to the evaluation
    /// instant. Appropriate when silent units should not be extrapolated at
    /// their last known pace.
    Smoothed,
}

/// Parameters for demonstrated-reliability curve generation.
///
/// The plotting window is anchored at `xmin` (default: the fleet's earliest
/// validation start) and closed by exactly one of two paths: an explicit
/// `xmax`, or `factor` times the elapsed-so-far duration projected past the
/// anchor. Supplying both, or neither, is rejected — an ambiguous window
/// must not silently pick a precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParams {
    /// Weibull shape parameter. Assumed, not fitted.
    pub beta_shape: f64,
    /// Demonstration horizon in run-hours.
    pub target_life: f64,
    /// Number of grid points per curve (>= 2).
    pub grid_size: usize,
    /// Confidence levels in percent, each in (0, 100].
    pub confidence_levels: Vec<f64>,
    /// Explicit window start (epoch seconds); defaults to the fleet's
    /// validation start.
    pub xmin: Option<f64>,
    /// Explicit window end (epoch seconds). Mutually exclusive with
    /// `factor`.
    pub xmax: Option<f64>,
    /// Window end as a multiple (>= 1.0, floored) of the elapsed-so-far
    /// duration. Mutually exclusive with `xmax`.
    pub factor: Option<f64>,
    /// Which rate feeds the accumulated-hours trajectory.
    pub basis: HoursBasis,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            beta_shape: 1.21,
            target_life: 30_000.0,
            grid_size: 1000,
            confidence_levels: vec![10.0, 50.0, 90.0],
            xmin: None,
            xmax: None,
            factor: Some(2.0),
            basis: HoursBasis::Observed,
        }
    }
}

impl CurveParams {
    fn validate(&self) -> Result<(), ReliabilityError> {
        if !self.beta_shape.is_finite() || self.beta_shape <= 0.0 {
            return Err(ReliabilityError::InvalidRange(format!(
                "beta_shape must be positive and finite, got {}",
                self.beta_shape
            )));
        }
        if !self.target_life.is_finite() || self.target_life <= 0.0 {
            return Err(ReliabilityError::InvalidRange(format!(
                "target_life must be positive and finite, got {}",
                self.target_life
            )));
        }
        if self.grid_size < 2 {
            return Err(ReliabilityError::InvalidRange(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.confidence_levels.is_empty() {
            return Err(ReliabilityError::InvalidRange(
                "at least one confidence level is required".into(),
            ));
        }
        for &cl in &self.confidence_levels {
            if !cl.is_finite() || cl <= 0.0 || cl > 100.0 {
                return Err(ReliabilityError::InvalidRange(format!(
                    "confidence level must be in (0, 100] percent, got {}",
                    cl
                )));
            }
        }
        Ok(())
    }

    /// Resolves the plotting window against the fleet.
    fn resolve_window(&self, fleet: &FleetView) -> Result<(f64, f64), ReliabilityError> {
        let start = self.xmin.unwrap_or_else(|| fleet.validation_start());
        let end = match (self.xmax, self.factor) {
            (Some(_), Some(_)) => {
                return Err(ReliabilityError::InvalidRange(
                    "xmax and factor are mutually exclusive window specifications".into(),
                ))
            }
            (None, None) => {
                return Err(ReliabilityError::InvalidRange(
                    "window end unresolved: supply either xmax or factor".into(),
                ))
            }
            (Some(xmax), None) => xmax,
            (None, Some(factor)) => {
                let factor = factor.max(1.0);
                start + factor * (fleet.evaluation_timestamp() - start)
            }
        };
        if !(start.is_finite() && end.is_finite()) || end <= start {
            return Err(ReliabilityError::InvalidRange(format!(
                "window end {} must lie after window start {}",
                end, start
            )));
        }
        Ok((start, end))
    }
}

/// One demonstrated-reliability curve at a fixed confidence level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliabilityCurve {
    /// Confidence level as a fraction in (0, 1].
    pub confidence_level: f64,
    /// Grid timestamps (epoch seconds), `grid_size` entries, start to end
    /// inclusive.
    pub time_grid: Vec<f64>,
    /// Demonstrated reliability in percent, one entry per grid timestamp.
    pub reliability_percent: Vec<f64>,
}

/// The "today" annotation: demonstrated reliability at the evaluation
/// instant, at the highest requested confidence level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowMarker {
    /// The evaluation instant (epoch seconds).
    pub timestamp: f64,
    /// Confidence level of the annotated curve, as a fraction.
    pub confidence_level: f64,
    /// Reliability percentage, linearly interpolated between the grid
    /// neighbours of the evaluation instant.
    pub reliability_percent: f64,
}

/// Full output of a curve-generation request: the shared grid, one curve per
/// confidence level, fleet summary statistics, and the "now" marker when the
/// evaluation instant lies inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemonstratedReliability {
    /// Grid timestamps shared by all curves.
    pub time_grid: Vec<f64>,
    /// One curve per requested confidence level, in request order.
    pub curves: Vec<ReliabilityCurve>,
    /// Smoothed fleet-hour statistics at the evaluation instant.
    pub fleet: FleetStats,
    /// Annotation for the evaluation instant, if it falls inside the window.
    pub now: Option<NowMarker>,
}

/// `size` equally spaced timestamps from `start` to `end` inclusive.
fn time_grid(start: f64, end: f64, size: usize) -> Vec<f64> {
    let span = end - start;
    let last = (size - 1) as f64;
    (0..size).map(|i| start + span * i as f64 / last).collect()
}

/// Generates the demonstrated-reliability curve set for a fleet.
///
/// At every grid timestamp the per-unit run-hours (under `params.basis`) are
/// converted into equivalent zero-failure samples at `params.target_life`
/// via the Lipson equality; the success-run bound then gives one reliability
/// percentage per confidence level. Curves grow from 0 % (no evidence at the
/// window start) toward 100 % as the fleet accumulates failure-free hours,
/// and higher confidence levels sit below lower ones.
///
/// # Errors
/// [`ReliabilityError::InvalidRange`] for unusable parameters or an
/// ambiguous/empty window; see [`CurveParams`].
///
/// # Examples
///
/// ```
/// use fleet_reliability::fleet::{FleetView, UnitRuntimeModel};
/// use fleet_reliability::reliability::{demonstrated_reliability_curves, CurveParams};
/// use fleet_reliability::snapshot::{SnapshotRecord, UnitSnapshot};
///
/// let snap = UnitSnapshot::from_live_fetch(SnapshotRecord {
///     serial_number: "1310000".into(),
///     asset_id: "117617".into(),
///     display_name: "Unit A".into(),
///     validation_start_timestamp: 0.0,
///     run_hours_at_validation_start: 0.0,
///     current_run_hours: 4000.0,
///     last_data_flow_timestamp: 20_000_000.0,
/// })
/// .unwrap();
/// let unit = UnitRuntimeModel::new(&snap, 20_000_000.0).unwrap();
/// let fleet = FleetView::new(vec![unit], 20_000_000.0).unwrap();
///
/// let result = demonstrated_reliability_curves(&fleet, &CurveParams::default()).unwrap();
/// assert_eq!(result.curves.len(), 3);
/// assert_eq!(result.time_grid.len(), 1000);
/// ```
pub fn demonstrated_reliability_curves(
    fleet: &FleetView,
    params: &CurveParams,
) -> Result<DemonstratedReliability, ReliabilityError> {
    params.validate()?;
    let (start, end) = params.resolve_window(fleet)?;
    debug!(
        start,
        end,
        grid_size = params.grid_size,
        units = fleet.units().len(),
        beta_shape = params.beta_shape,
        target_life = params.target_life,
        "generating demonstrated reliability curves"
    );

    let grid = time_grid(start, end, params.grid_size);

    // Equivalent zero-failure samples at the target life, per grid point.
    let equivalents: Vec<f64> = grid
        .iter()
        .map(|&t| {
            let hours = match params.basis {
                HoursBasis::Observed => fleet.fleet_hours_at(t),
                HoursBasis::Smoothed => fleet.fleet_hours_at_smoothed(t),
            };
            lipson_equivalent_units(&hours, params.target_life, params.beta_shape)
        })
        .collect();

    let curves: Vec<ReliabilityCurve> = params
        .confidence_levels
        .iter()
        .map(|&cl_percent| {
            let confidence = cl_percent / 100.0;
            let reliability_percent = equivalents
                .iter()
                .map(|&n_eq| 100.0 * success_run_reliability(n_eq, confidence))
                .collect();
            ReliabilityCurve {
                confidence_level: confidence,
                time_grid: grid.clone(),
                reliability_percent,
            }
        })
        .collect();

    let now = now_marker(&curves, start, end, fleet.evaluation_timestamp());

    Ok(DemonstratedReliability {
        time_grid: grid,
        curves,
        fleet: fleet.fleet_leader_hours(),
        now,
    })
}

/// Locates the evaluation instant on the most conservative curve by linear
/// interpolation of `t` between the window bounds. Interpolating (rather
/// than snapping to the nearest grid timestamp) keeps the marker exact even
/// on coarse grids.
fn now_marker(
    curves: &[ReliabilityCurve],
    start: f64,
    end: f64,
    evaluation_timestamp: f64,
) -> Option<NowMarker> {
    let curve = curves
        .iter()
        .max_by(|a, b| a.confidence_level.total_cmp(&b.confidence_level))?;

    let p = (evaluation_timestamp - start) / (end - start);
    if !(0.0..=1.0).contains(&p) {
        return None;
    }
    let pos = p * (curve.reliability_percent.len() - 1) as f64;
    let i0 = pos.floor() as usize;
    let i1 = (i0 + 1).min(curve.reliability_percent.len() - 1);
    let frac = pos - i0 as f64;
    let r0 = curve.reliability_percent[i0];
    let r1 = curve.reliability_percent[i1];
    Some(NowMarker {
        timestamp: evaluation_timestamp,
        confidence_level: curve.confidence_level,
        reliability_percent: r0 + frac * (r1 - r0),
    })
}
