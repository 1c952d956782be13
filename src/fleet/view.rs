//! Fleet-level view over the per-unit runtime models.

use serde::Serialize;
use tracing::info;

use crate::error::ReliabilityError;
use crate::fleet::UnitRuntimeModel;
use crate::snapshot::SnapshotSource;

/// Summary statistics over the fleet's smoothed run-hours at the evaluation
/// instant.
///
/// `max` is the fleet leader; the original dashboards report this block as
/// "N units, max H hours, cumulative C hours, average A hours".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetStats {
    /// Number of units in the fleet.
    pub count: usize,
    /// Fleet-leader hours (maximum over units).
    pub max: f64,
    /// Cumulative hours (sum over units).
    pub sum: f64,
    /// Average hours per unit.
    pub mean: f64,
}

/// Ordered unit set plus the evaluation instant.
///
/// A `FleetView` is a pure, stateless computation context: every query is a
/// function of the unit set and the evaluation timestamp, nothing is cached,
/// and nothing is persisted. Rebuild it whenever fresh snapshots arrive or
/// "now" advances.
#[derive(Debug, Clone)]
pub struct FleetView {
    units: Vec<UnitRuntimeModel>,
    validation_start: f64,
    evaluation_timestamp: f64,
}

impl FleetView {
    /// Builds the view from an ordered collection of unit models and the
    /// evaluation instant (epoch seconds).
    ///
    /// # Errors
    /// [`ReliabilityError::InvalidRange`] when the unit set is empty; an
    /// empty fleet has no validation start to anchor the evaluation window.
    pub fn new(
        units: Vec<UnitRuntimeModel>,
        evaluation_timestamp: f64,
    ) -> Result<Self, ReliabilityError> {
        let validation_start = units
            .iter()
            .map(UnitRuntimeModel::validation_start_timestamp)
            .fold(f64::INFINITY, f64::min);
        if !validation_start.is_finite() {
            return Err(ReliabilityError::InvalidRange(
                "fleet view requires at least one unit".into(),
            ));
        }
        info!(
            units = units.len(),
            validation_start, evaluation_timestamp, "fleet view assembled"
        );
        Ok(Self {
            units,
            validation_start,
            evaluation_timestamp,
        })
    }

    /// Builds unit models for every snapshot in `source` and assembles the
    /// view, preserving the source's order.
    ///
    /// # Errors
    /// Any snapshot-source error, any per-unit
    /// [`ReliabilityError::DegenerateInterval`], or the empty-fleet error of
    /// [`Self::new`]. A degenerate unit fails the whole view rather than
    /// being silently dropped.
    pub fn from_source<S: SnapshotSource>(
        source: &S,
        evaluation_timestamp: f64,
    ) -> Result<Self, ReliabilityError> {
        let units = source
            .snapshots()?
            .iter()
            .map(|snap| UnitRuntimeModel::new(snap, evaluation_timestamp))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(units, evaluation_timestamp)
    }

    /// Earliest validation start across units (epoch seconds); anchors the
    /// default evaluation window.
    pub fn validation_start(&self) -> f64 {
        self.validation_start
    }

    /// The evaluation instant (epoch seconds).
    pub fn evaluation_timestamp(&self) -> f64 {
        self.evaluation_timestamp
    }

    /// The unit models, in construction order.
    pub fn units(&self) -> &[UnitRuntimeModel] {
        &self.units
    }

    /// Per-unit estimated run-hours at `t`, observed rate. One entry per
    /// unit, in unit order; used for overlay curves.
    pub fn fleet_hours_at(&self, t: f64) -> Vec<f64> {
        self.units.iter().map(|u| u.hours_at(t)).collect()
    }

    /// Per-unit estimated run-hours at `t`, smoothed rate.
    pub fn fleet_hours_at_smoothed(&self, t: f64) -> Vec<f64> {
        self.units.iter().map(|u| u.hours_at_smoothed(t)).collect()
    }

    /// Fleet-leader statistics: smoothed run-hours per unit at the
    /// evaluation instant, reduced to max/sum/mean/count.
    pub fn fleet_leader_hours(&self) -> FleetStats {
        let hours = self.fleet_hours_at_smoothed(self.evaluation_timestamp);
        let count = hours.len();
        let sum: f64 = hours.iter().sum();
        let max = hours.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        FleetStats {
            count,
            max,
            sum,
            mean: sum / count as f64,
        }
    }

    /// Wall-clock hours elapsed between the fleet validation start and `t`.
    ///
    /// This is the "possible runtime" orientation line: the hours a unit
    /// would have accrued running continuously since the program began.
    /// Negative before the validation start.
    pub fn wall_clock_hours_since_start(&self, t: f64) -> f64 {
        (t - self.validation_start) / 3600.0
    }
}
