//! # Workflows Module
//!
//! High-level entry points that run a complete analysis.
//!
//! - **Analysis Workflow** ([`analyze`]) - Validates the role assignment against a structure,
//!   resolves it, and returns the report together with the structure augmented by one dummy
//!   atom per ring centroid.

pub mod analyze;
