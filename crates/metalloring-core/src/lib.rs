//! # metalloring Core Library
//!
//! Geometric descriptors for metallocene and inverse sandwich complexes: ring
//! centroids, metal-centroid distances, centroid-metal-centroid angles and, for
//! three-ring complexes, the bond lengths and torsions of the middle ring.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless structure models, the geometry kernel
//!   (`centroid`, `distance`, `angle`, `dihedral`, `pairwise_bonds`) and XYZ file I/O.
//!
//! - **[`engine`]: The Logic Core.** Validates the caller's ring and metal groups into a
//!   [`engine::topology::Topology`], then resolves it: places centroids, relabels metals
//!   canonically and computes every quantity in a fixed order.
//!
//! - **[`workflows`]: The Public API.** Ties the layers together into a single call that
//!   takes a structure plus role assignment and returns the report and augmented structure.

pub mod core;
pub mod engine;
pub mod workflows;
