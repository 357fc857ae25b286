//! Provides input/output functionality for coordinate file formats.
//!
//! The [`traits::MolecularFile`] trait gives every format the same read/write
//! API; [`xyz`] implements it for the plain XYZ format used by the analyzer.

pub mod traits;
pub mod xyz;
