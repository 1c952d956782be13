//! Linear run-hour model for a single unit.
//!
//! Converts one anchor observation (counter reading at validation start,
//! counter reading at last contact, and the two timestamps) into a
//! continuous run-hour function of time. Extrapolation beyond the last known
//! data point is intentional: the validation program reasons about where the
//! fleet is heading, not only where it has been.

use tracing::debug;

use crate::error::ReliabilityError;
use crate::snapshot::UnitSnapshot;

/// Per-unit run-hour inter-/extrapolation model.
///
/// Two independently useful linear rates are derived and both retained:
///
/// ```text
/// k_observed = observed_hours / (last_data_flow - validation_start)
/// k_to_now   = observed_hours / (evaluation    - validation_start)
/// ```
///
/// `k_observed` is measured strictly over the interval with confirmed data
/// flow; `k_to_now` averages over the full wall-clock interval to the
/// evaluation instant. They differ when the unit has been silent since its
/// last data flow. Callers choose: fleet-leader hour totals use the smoothed
/// rate against the evaluation instant, historical curve overlays use the
/// observed rate.
///
/// # Examples
///
/// ```
/// use fleet_reliability::fleet::UnitRuntimeModel;
/// use fleet_reliability::snapshot::{SnapshotRecord, UnitSnapshot};
///
/// let snap = UnitSnapshot::from_live_fetch(SnapshotRecord {
///     serial_number: "1310000".into(),
///     asset_id: "117617".into(),
///     display_name: "Unit A".into(),
///     validation_start_timestamp: 0.0,
///     run_hours_at_validation_start: 0.0,
///     current_run_hours: 1000.0,
///     last_data_flow_timestamp: 3_600_000.0,
/// })
/// .unwrap();
/// let model = UnitRuntimeModel::new(&snap, 3_600_000.0).unwrap();
/// assert!((model.hours_at(1_800_000.0) - 500.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRuntimeModel {
    serial_number: String,
    display_name: String,
    validation_start: f64,
    observed_hours: f64,
    k_observed: f64,
    k_to_now: f64,
}

impl UnitRuntimeModel {
    /// Derives the model from a validated snapshot and the evaluation
    /// instant (epoch seconds).
    ///
    /// # Errors
    /// [`ReliabilityError::DegenerateInterval`] when the observation window
    /// (`last_data_flow - validation_start`) or the evaluation window
    /// (`evaluation - validation_start`) has zero or negative length; either
    /// leaves a rate undefined, and a silently zeroed rate would distort
    /// fleet aggregates.
    pub fn new(
        snapshot: &UnitSnapshot,
        evaluation_timestamp: f64,
    ) -> Result<Self, ReliabilityError> {
        let validation_start = snapshot.validation_start_timestamp();
        let observed_window = snapshot.last_data_flow_timestamp() - validation_start;
        if observed_window <= 0.0 {
            return Err(ReliabilityError::DegenerateInterval {
                serial_number: snapshot.serial_number().to_string(),
                interval_start: validation_start,
                interval_end: snapshot.last_data_flow_timestamp(),
            });
        }

        let evaluation_window = evaluation_timestamp - validation_start;
        if evaluation_window <= 0.0 {
            return Err(ReliabilityError::DegenerateInterval {
                serial_number: snapshot.serial_number().to_string(),
                interval_start: validation_start,
                interval_end: evaluation_timestamp,
            });
        }

        let observed_hours = snapshot.observed_hours();
        let model = Self {
            serial_number: snapshot.serial_number().to_string(),
            display_name: snapshot.display_name().to_string(),
            validation_start,
            observed_hours,
            k_observed: observed_hours / observed_window,
            k_to_now: observed_hours / evaluation_window,
        };
        debug!(
            serial_number = %model.serial_number,
            observed_hours,
            k_observed = model.k_observed,
            k_to_now = model.k_to_now,
            "unit runtime model derived"
        );
        Ok(model)
    }

    /// Estimated cumulative run-hours at timestamp `t`, using the rate
    /// measured over the confirmed data-flow interval.
    ///
    /// Clamped to 0 for `t` before the unit's validation start (no
    /// validation-relevant hours accrue before the unit joins); unclamped
    /// above, so extrapolation past the last data point is permitted.
    pub fn hours_at(&self, t: f64) -> f64 {
        let y = self.k_observed * (t - self.validation_start);
        if y > 0.0 {
            y
        } else {
            0.0
        }
    }

    /// Estimated cumulative run-hours at timestamp `t`, using the rate
    /// averaged over the full wall-clock interval to the evaluation instant.
    ///
    /// Same clamping as [`Self::hours_at`].
    pub fn hours_at_smoothed(&self, t: f64) -> f64 {
        let y = self.k_to_now * (t - self.validation_start);
        if y > 0.0 {
            y
        } else {
            0.0
        }
    }

    /// Serial number of the modelled unit.
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Human-readable unit name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Start of the unit's validation period (epoch seconds).
    pub fn validation_start_timestamp(&self) -> f64 {
        self.validation_start
    }

    /// Run-hours accrued between validation start and the last counter
    /// reading.
    pub fn observed_hours(&self) -> f64 {
        self.observed_hours
    }

    /// Observed linear rate (hours per second) over the confirmed data-flow
    /// interval.
    pub fn k_observed(&self) -> f64 {
        self.k_observed
    }

    /// Smoothed linear rate (hours per second) over the interval to the
    /// evaluation instant.
    pub fn k_to_now(&self) -> f64 {
        self.k_to_now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotRecord;

    fn snapshot(
        validation_start: f64,
        oph_at_start: f64,
        current: f64,
        last_data_flow: f64,
    ) -> UnitSnapshot {
        UnitSnapshot::from_live_fetch(SnapshotRecord {
            serial_number: "1310000".into(),
            asset_id: "117617".into(),
            display_name: "Unit A".into(),
            validation_start_timestamp: validation_start,
            run_hours_at_validation_start: oph_at_start,
            current_run_hours: current,
            last_data_flow_timestamp: last_data_flow,
        })
        .expect("valid record")
    }

    #[test]
    fn test_observed_rate_scenario() {
        // 1000 h accrued over 3_600_000 s of confirmed data flow.
        let snap = snapshot(0.0, 0.0, 1000.0, 3_600_000.0);
        let model = UnitRuntimeModel::new(&snap, 3_600_000.0).expect("valid model");
        assert!(
            (model.k_observed() - 1000.0 / 3_600_000.0).abs() < 1e-15,
            "k_observed = {}",
            model.k_observed()
        );
        assert!(
            (model.hours_at(1_800_000.0) - 500.0).abs() < 1e-9,
            "hours_at(1.8e6) = {}",
            model.hours_at(1_800_000.0)
        );
    }

    #[test]
    fn test_hours_clamped_before_validation_start() {
        let snap = snapshot(1_000_000.0, 200.0, 700.0, 2_000_000.0);
        let model = UnitRuntimeModel::new(&snap, 2_000_000.0).expect("valid model");
        assert_eq!(model.hours_at(0.0), 0.0);
        assert_eq!(model.hours_at(999_999.0), 0.0);
        assert_eq!(model.hours_at_smoothed(500_000.0), 0.0);
    }

    #[test]
    fn test_hours_monotone_non_decreasing() {
        let snap = snapshot(0.0, 0.0, 800.0, 4_000_000.0);
        let model = UnitRuntimeModel::new(&snap, 4_000_000.0).expect("valid model");
        let mut prev = 0.0;
        for i in 0..100 {
            let t = i as f64 * 100_000.0;
            let h = model.hours_at(t);
            assert!(
                h >= prev,
                "hours_at should be non-decreasing: h({}) = {} < {}",
                t,
                h,
                prev
            );
            prev = h;
        }
    }

    #[test]
    fn test_extrapolation_beyond_last_data_point() {
        let snap = snapshot(0.0, 0.0, 1000.0, 3_600_000.0);
        let model = UnitRuntimeModel::new(&snap, 3_600_000.0).expect("valid model");
        // Twice the observed window extrapolates to twice the hours.
        assert!((model.hours_at(7_200_000.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_smoothed_rate_differs_when_unit_silent() {
        // Unit accrued 1000 h over 3_600_000 s, then went silent; the
        // evaluation instant is at 7_200_000 s.
        let snap = snapshot(0.0, 0.0, 1000.0, 3_600_000.0);
        let model = UnitRuntimeModel::new(&snap, 7_200_000.0).expect("valid model");
        assert!((model.k_observed() - 1000.0 / 3_600_000.0).abs() < 1e-15);
        assert!((model.k_to_now() - 1000.0 / 7_200_000.0).abs() < 1e-15);
        // Smoothed hours at the evaluation instant recover the counter.
        assert!((model.hours_at_smoothed(7_200_000.0) - 1000.0).abs() < 1e-9);
        // Observed-rate extrapolation overshoots for the silent period.
        assert!((model.hours_at(7_200_000.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_observation_interval() {
        let snap = snapshot(1_000_000.0, 0.0, 0.0, 1_000_000.0);
        let err = UnitRuntimeModel::new(&snap, 2_000_000.0)
            .expect_err("zero-length observation window");
        assert!(matches!(
            err,
            ReliabilityError::DegenerateInterval { .. }
        ));
    }

    #[test]
    fn test_degenerate_evaluation_window() {
        let snap = snapshot(1_000_000.0, 0.0, 100.0, 2_000_000.0);
        assert!(matches!(
            UnitRuntimeModel::new(&snap, 1_000_000.0),
            Err(ReliabilityError::DegenerateInterval { .. })
        ));
    }

    #[test]
    fn test_nonzero_counter_baseline() {
        // oph@start 500, current 1500: only 1000 h count toward validation.
        let snap = snapshot(0.0, 500.0, 1500.0, 3_600_000.0);
        let model = UnitRuntimeModel::new(&snap, 3_600_000.0).expect("valid model");
        assert!((model.observed_hours() - 1000.0).abs() < 1e-12);
        assert!((model.hours_at(3_600_000.0) - 1000.0).abs() < 1e-9);
    }
}
