//! # Core Models Module
//!
//! Data structures describing an input structure: individual [`atom`]s and the
//! ordered [`structure`] they belong to.
//!
//! Atoms are addressed by 1-based serials, matching the numbering of XYZ files
//! and of the ring/metal index groups supplied by users.
//!
//! ```ignore
//! use metalloring::core::models::structure::Structure;
//! use nalgebra::Point3;
//!
//! let mut structure = Structure::new();
//! let fe = structure.push_atom("Fe", Point3::new(0.0, 0.0, 1.65));
//! assert_eq!(structure.atom(fe).unwrap().label(), "Fe1");
//! ```

pub mod atom;
pub mod structure;
