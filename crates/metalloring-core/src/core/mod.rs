//! # Core Module
//!
//! The stateless foundation of the library: structure models, the geometry
//! kernel and coordinate file I/O.
//!
//! - **Structure Representation** ([`models`]) - Atoms and the ordered structure they form
//! - **Geometry Kernel** ([`utils::geometry`]) - Centroids, distances, angles, dihedrals and
//!   bond enumeration over 3D points, with no knowledge of chemistry
//! - **Element Identification** ([`utils::identifiers`]) - Element symbol lookup
//! - **File I/O** ([`io`]) - Reading and writing XYZ coordinate files

pub mod io;
pub mod models;
pub mod utils;
