//! Snapshot source capability.
//!
//! The core never fetches anything itself: it consumes snapshots through the
//! [`SnapshotSource`] trait. A live implementation (HTTP client, disk cache
//! with TTL) belongs to the external loader; [`FrozenSource`] is the pure
//! in-memory replay variant used for offline analysis and tests.

use crate::error::ReliabilityError;
use crate::snapshot::UnitSnapshot;

/// Read access to a set of validated per-unit snapshots.
///
/// Implementations decide where snapshots come from; callers of the
/// reliability core depend only on this trait, never on the concrete
/// variant that produced the data.
pub trait SnapshotSource {
    /// Returns the snapshot set, in a stable caller-visible order.
    ///
    /// # Errors
    /// Implementation-defined; a pure replay source never fails, a live
    /// source may surface fetch or parse errors.
    fn snapshots(&self) -> Result<Vec<UnitSnapshot>, ReliabilityError>;
}

/// Pure in-memory snapshot replay.
///
/// Holds already-validated snapshots and hands them back on request. Does no
/// I/O and never fails once constructed.
#[derive(Debug, Clone)]
pub struct FrozenSource {
    snapshots: Vec<UnitSnapshot>,
}

impl FrozenSource {
    /// Wraps an ordered set of validated snapshots.
    pub fn new(snapshots: Vec<UnitSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Builds a frozen source from stored serialized records.
    ///
    /// # Errors
    /// Any parse, schema-version, or data-quality error from
    /// [`UnitSnapshot::from_stored_snapshot`]; the first offending record
    /// aborts construction.
    pub fn from_stored<S: AsRef<str>>(records: &[S]) -> Result<Self, ReliabilityError> {
        let snapshots = records
            .iter()
            .map(|r| UnitSnapshot::from_stored_snapshot(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { snapshots })
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when no snapshots are held.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotSource for FrozenSource {
    fn snapshots(&self) -> Result<Vec<UnitSnapshot>, ReliabilityError> {
        Ok(self.snapshots.clone())
    }
}
