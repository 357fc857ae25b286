//! # Engine Module
//!
//! Turns a caller's role assignment into a labeled report for one structure.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Bond cutoff, dummy label and other analysis settings
//! - **Topology** ([`topology`]) - Role assignment validation into the two supported shapes
//! - **Resolution** ([`resolver`]) - Centroid placement, metal canonicalization and the
//!   ordered computation of every reported quantity
//! - **Reporting** ([`report`]) - The labeled, ordered results
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! The engine never prints or logs failures; every problem is returned as an
//! [`error::EngineError`] and no partial report is produced.

pub mod config;
pub mod error;
pub mod report;
pub mod resolver;
pub mod topology;
