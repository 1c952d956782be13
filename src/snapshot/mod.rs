//! Immutable per-unit snapshot records and replayable snapshot sources.
//!
//! A [`UnitSnapshot`] is the only input the reliability core accepts about a
//! machine: a serial number, the run-hour counter at validation start, the
//! most recent counter reading, and the timestamps anchoring those readings.
//! Snapshots are produced externally (a live asset-data fetch or a stored
//! replay) and are validated once, at construction — never mutated after.
//!
//! # Contents
//!
//! - [`SnapshotRecord`] / [`UnitSnapshot`] — the versioned snapshot schema
//!   and its two construction paths
//! - [`SnapshotSource`] — the capability trait, with [`FrozenSource`] as the
//!   pure in-memory replay implementation

mod record;
mod source;

pub use record::{SnapshotRecord, UnitSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use source::{FrozenSource, SnapshotSource};
