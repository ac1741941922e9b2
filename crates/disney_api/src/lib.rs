//! # Disney API
//!
//! This crate provides a client for the Walt Disney World availability calendar API,
//! which reports the parks that can be booked on each date of a range.

/// Client for the availability calendar endpoint.
mod client;
pub use client::*;
