//! # Availability Checker
//!
//! Runs one availability check: fetch the calendar, compare it with the last saved
//! snapshot, email the changes and save the new snapshot.

/// Configuration file loading.
pub mod config;
pub use config::*;

/// The single-run check orchestrating fetch, diff, notify and persist.
pub mod checker;
pub use checker::*;
