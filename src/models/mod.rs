//! Display models for CLI output
//!
//! Converts API entities into table rows and JSON records.

pub mod display;

pub use display::{DoctorDisplay, DoctorNames, Listing};
