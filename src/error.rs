//! Error types for fleet reliability computations.

use thiserror::Error;

/// Errors surfaced by snapshot validation, runtime modelling, and curve
/// generation.
///
/// Every variant carries enough context (unit identifier, offending values)
/// to diagnose the input without re-entering the snapshot loader. Nothing
/// here is transient: all computation is pure, so no error is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReliabilityError {
    /// A unit's observation window has zero (or negative) length, which
    /// leaves its run-hour rate undefined. Fatal for that unit's model;
    /// silently defaulting the rate to zero would distort fleet aggregates.
    #[error(
        "degenerate observation interval for unit {serial_number}: \
         {interval_start} .. {interval_end}"
    )]
    DegenerateInterval {
        /// Serial number of the offending unit.
        serial_number: String,
        /// Start of the zero-length interval (epoch seconds).
        interval_start: f64,
        /// End of the zero-length interval (epoch seconds).
        interval_end: f64,
    },

    /// A snapshot violates a data-quality invariant (e.g. last data flow
    /// before validation start, or a run-hour counter going backwards).
    #[error("data quality violation for unit {serial_number}: {detail}")]
    DataQuality {
        /// Serial number of the offending unit.
        serial_number: String,
        /// Description of the violated invariant with the offending values.
        detail: String,
    },

    /// An unusable time window or curve parameter (non-positive range,
    /// target life, shape, or grid size; ambiguous window specification).
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A stored snapshot could not be parsed.
    #[error("stored snapshot parse error: {0}")]
    SnapshotParse(String),

    /// A stored snapshot carries a schema version this library does not
    /// understand.
    #[error("unsupported snapshot schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion {
        /// Version found in the stored record.
        found: u32,
        /// Version this library reads and writes.
        supported: u32,
    },
}

impl From<serde_json::Error> for ReliabilityError {
    fn from(e: serde_json::Error) -> Self {
        ReliabilityError::SnapshotParse(e.to_string())
    }
}
