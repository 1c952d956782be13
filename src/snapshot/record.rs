//! Versioned snapshot schema with validated construction.
//!
//! Two named construction paths produce the same immutable type:
//! [`UnitSnapshot::from_live_fetch`] for a record already resolved in memory
//! by the external asset-data client, and [`UnitSnapshot::from_stored_snapshot`]
//! for a serialized record replayed from disk. Both run the same validation;
//! there is no back door that skips it.

use serde::{Deserialize, Serialize};

use crate::error::ReliabilityError;

/// Schema version written into stored snapshots and required when reading
/// them back.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Raw per-unit record as delivered by the external snapshot loader.
///
/// This is the wire shape: plain public fields, no invariants enforced.
/// Feed it to [`UnitSnapshot::from_live_fetch`] to obtain a validated,
/// immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Manufacturer serial number of the unit.
    pub serial_number: String,
    /// Asset identifier in the remote asset-data system.
    pub asset_id: String,
    /// Human-readable unit name used in chart legends.
    pub display_name: String,
    /// Start of the unit's validation period (epoch seconds).
    pub validation_start_timestamp: f64,
    /// Run-hour counter reading at validation start.
    pub run_hours_at_validation_start: f64,
    /// Most recent run-hour counter reading.
    pub current_run_hours: f64,
    /// Timestamp of the last confirmed data flow from the unit
    /// (epoch seconds).
    pub last_data_flow_timestamp: f64,
}

/// Stored on-disk form: the record plus an explicit schema version.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    schema_version: u32,
    #[serde(flatten)]
    record: SnapshotRecord,
}

/// Validated, immutable per-unit snapshot.
///
/// Invariants established at construction and held for the lifetime of the
/// value:
///
/// - `last_data_flow_timestamp >= validation_start_timestamp`
/// - `current_run_hours >= run_hours_at_validation_start`
/// - all numeric fields are finite
///
/// # Examples
///
/// ```
/// use fleet_reliability::snapshot::{SnapshotRecord, UnitSnapshot};
///
/// let snap = UnitSnapshot::from_live_fetch(SnapshotRecord {
///     serial_number: "1310000".into(),
///     asset_id: "117617".into(),
///     display_name: "BMW Landshut 4.10".into(),
///     validation_start_timestamp: 0.0,
///     run_hours_at_validation_start: 0.0,
///     current_run_hours: 1000.0,
///     last_data_flow_timestamp: 3_600_000.0,
/// })
/// .unwrap();
/// assert_eq!(snap.observed_hours(), 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSnapshot {
    record: SnapshotRecord,
}

impl UnitSnapshot {
    /// Builds a snapshot from a record resolved by the live asset-data
    /// client.
    ///
    /// # Errors
    /// [`ReliabilityError::DataQuality`] when the record violates a snapshot
    /// invariant (non-finite field, last data flow before validation start,
    /// run-hour counter below its validation-start reading).
    pub fn from_live_fetch(record: SnapshotRecord) -> Result<Self, ReliabilityError> {
        let finite = [
            record.validation_start_timestamp,
            record.run_hours_at_validation_start,
            record.current_run_hours,
            record.last_data_flow_timestamp,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ReliabilityError::DataQuality {
                serial_number: record.serial_number.clone(),
                detail: "snapshot contains non-finite numeric fields".into(),
            });
        }

        if record.last_data_flow_timestamp < record.validation_start_timestamp {
            return Err(ReliabilityError::DataQuality {
                serial_number: record.serial_number.clone(),
                detail: format!(
                    "last data flow {} precedes validation start {}",
                    record.last_data_flow_timestamp, record.validation_start_timestamp
                ),
            });
        }

        if record.current_run_hours < record.run_hours_at_validation_start {
            return Err(ReliabilityError::DataQuality {
                serial_number: record.serial_number.clone(),
                detail: format!(
                    "current run-hours {} below validation-start reading {}",
                    record.current_run_hours, record.run_hours_at_validation_start
                ),
            });
        }

        Ok(Self { record })
    }

    /// Rebuilds a snapshot from its stored serialized form.
    ///
    /// Runs the same validation as [`Self::from_live_fetch`]; a stored
    /// snapshot that would be rejected live is rejected here too.
    ///
    /// # Errors
    /// [`ReliabilityError::SnapshotParse`] on malformed input,
    /// [`ReliabilityError::UnsupportedSchemaVersion`] on a version mismatch,
    /// plus the validation errors of [`Self::from_live_fetch`].
    pub fn from_stored_snapshot(serialized: &str) -> Result<Self, ReliabilityError> {
        let stored: StoredRecord = serde_json::from_str(serialized)?;
        if stored.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(ReliabilityError::UnsupportedSchemaVersion {
                found: stored.schema_version,
                supported: SNAPSHOT_SCHEMA_VERSION,
            });
        }
        Self::from_live_fetch(stored.record)
    }

    /// Serializes the snapshot to its stored form, including the schema
    /// version.
    pub fn to_stored_snapshot(&self) -> Result<String, ReliabilityError> {
        let stored = StoredRecord {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            record: self.record.clone(),
        };
        Ok(serde_json::to_string(&stored)?)
    }

    /// Manufacturer serial number.
    pub fn serial_number(&self) -> &str {
        &self.record.serial_number
    }

    /// Asset identifier in the remote asset-data system.
    pub fn asset_id(&self) -> &str {
        &self.record.asset_id
    }

    /// Human-readable unit name.
    pub fn display_name(&self) -> &str {
        &self.record.display_name
    }

    /// Start of the validation period (epoch seconds).
    pub fn validation_start_timestamp(&self) -> f64 {
        self.record.validation_start_timestamp
    }

    /// Run-hour counter reading at validation start.
    pub fn run_hours_at_validation_start(&self) -> f64 {
        self.record.run_hours_at_validation_start
    }

    /// Most recent run-hour counter reading.
    pub fn current_run_hours(&self) -> f64 {
        self.record.current_run_hours
    }

    /// Timestamp of the last confirmed data flow (epoch seconds).
    pub fn last_data_flow_timestamp(&self) -> f64 {
        self.record.last_data_flow_timestamp
    }

    /// Run-hours accrued since validation start
    /// (`current_run_hours - run_hours_at_validation_start`).
    pub fn observed_hours(&self) -> f64 {
        self.record.current_run_hours - self.record.run_hours_at_validation_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SnapshotRecord {
        SnapshotRecord {
            serial_number: "1310000".into(),
            asset_id: "117617".into(),
            display_name: "Unit A".into(),
            validation_start_timestamp: 1_000.0,
            run_hours_at_validation_start: 50.0,
            current_run_hours: 450.0,
            last_data_flow_timestamp: 2_000_000.0,
        }
    }

    #[test]
    fn test_from_live_fetch_valid() {
        let snap = UnitSnapshot::from_live_fetch(record()).expect("valid record");
        assert_eq!(snap.serial_number(), "1310000");
        assert!((snap.observed_hours() - 400.0).abs() < 1e-12);
    }

    #[test]
    fn test_data_flow_before_validation_start_rejected() {
        let mut r = record();
        r.last_data_flow_timestamp = 500.0;
        let err = UnitSnapshot::from_live_fetch(r).expect_err("invariant violated");
        match err {
            ReliabilityError::DataQuality { serial_number, .. } => {
                assert_eq!(serial_number, "1310000");
            }
            other => panic!("expected DataQuality, got {:?}", other),
        }
    }

    #[test]
    fn test_counter_running_backwards_rejected() {
        let mut r = record();
        r.current_run_hours = 10.0;
        assert!(matches!(
            UnitSnapshot::from_live_fetch(r),
            Err(ReliabilityError::DataQuality { .. })
        ));
    }

    #[test]
    fn test_non_finite_fields_rejected() {
        let mut r = record();
        r.current_run_hours = f64::NAN;
        assert!(matches!(
            UnitSnapshot::from_live_fetch(r),
            Err(ReliabilityError::DataQuality { .. })
        ));
    }

    #[test]
    fn test_stored_snapshot_roundtrip() {
        let snap = UnitSnapshot::from_live_fetch(record()).expect("valid record");
        let serialized = snap.to_stored_snapshot().expect("serializable");
        let restored =
            UnitSnapshot::from_stored_snapshot(&serialized).expect("restorable");
        assert_eq!(snap, restored);
    }

    #[test]
    fn test_stored_snapshot_validates_like_live() {
        // A stored record violating the invariant must be rejected, not
        // smuggled past validation.
        let serialized = r#"{
            "schema_version": 1,
            "serial_number": "X",
            "asset_id": "Y",
            "display_name": "Z",
            "validation_start_timestamp": 1000.0,
            "run_hours_at_validation_start": 0.0,
            "current_run_hours": 10.0,
            "last_data_flow_timestamp": 10.0
        }"#;
        assert!(matches!(
            UnitSnapshot::from_stored_snapshot(serialized),
            Err(ReliabilityError::DataQuality { .. })
        ));
    }

    #[test]
    fn test_unsupported_schema_version() {
        let serialized = r#"{
            "schema_version": 99,
            "serial_number": "X",
            "asset_id": "Y",
            "display_name": "Z",
            "validation_start_timestamp": 0.0,
            "run_hours_at_validation_start": 0.0,
            "current_run_hours": 10.0,
            "last_data_flow_timestamp": 10.0
        }"#;
        assert!(matches!(
            UnitSnapshot::from_stored_snapshot(serialized),
            Err(ReliabilityError::UnsupportedSchemaVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_malformed_stored_snapshot() {
        assert!(matches!(
            UnitSnapshot::from_stored_snapshot("{truncated"),
            Err(ReliabilityError::SnapshotParse(_))
        ));
    }
}
