//! # Park Availability
//!
//! This crate provides the availability data model for the park calendar, along with
//! the snapshot diffing, report rendering and snapshot persistence used by the checker.

/// Availability entries, snapshots and diff entries.
mod types;
pub use types::*;

/// Static lookup of park identifiers to display names.
pub mod parks;
pub use parks::{display_name, park_name};

/// Per-date comparison of two availability snapshots.
mod diff;
pub use diff::*;

/// Human readable rendering of diffs and availability listings.
mod report;
pub use report::*;

/// Reading and writing the last known snapshot.
mod store;
pub use store::*;
