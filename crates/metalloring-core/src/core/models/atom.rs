use nalgebra::Point3;
use serde::Serialize;
use std::fmt;

/// Distinguishes atoms read from input from synthetic markers added during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AtomKind {
    /// An atom present in the input structure.
    #[default]
    Real,
    /// A non-physical marker placed at a ring centroid.
    Dummy,
}

/// Represents one atom of a structure.
///
/// Atoms are immutable once parsed. The `serial` is the 1-based position of the
/// atom in its [`Structure`](super::structure::Structure), matching the
/// numbering used by XYZ files and by user-supplied index groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol or marker label (e.g., "C", "Fe", "X").
    pub symbol: String,
    /// The 1-based external index of the atom.
    pub serial: usize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Whether the atom is real or a synthetic centroid marker.
    pub kind: AtomKind,
}

impl Atom {
    /// Creates a new real atom.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol as written in the input.
    /// * `serial` - The 1-based index of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(symbol: &str, serial: usize, position: Point3<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            serial,
            position,
            kind: AtomKind::Real,
        }
    }

    /// Creates a dummy marker atom, typically placed at a ring centroid.
    pub fn dummy(label: &str, serial: usize, position: Point3<f64>) -> Self {
        Self {
            kind: AtomKind::Dummy,
            ..Self::new(label, serial, position)
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.kind == AtomKind::Dummy
    }

    /// The user-facing label combining symbol and serial, e.g. `Fe11`.
    pub fn label(&self) -> String {
        format!("{}{}", self.symbol, self.serial)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4}, {:.4})",
            self.label(),
            self.position.x,
            self.position.y,
            self.position.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_is_real_with_given_fields() {
        let atom = Atom::new("Fe", 11, Point3::new(0.0, 0.0, 1.65));

        assert_eq!(atom.symbol, "Fe");
        assert_eq!(atom.serial, 11);
        assert_eq!(atom.position, Point3::new(0.0, 0.0, 1.65));
        assert_eq!(atom.kind, AtomKind::Real);
        assert!(!atom.is_dummy());
    }

    #[test]
    fn dummy_atom_is_marked_as_dummy() {
        let atom = Atom::dummy("X", 12, Point3::origin());
        assert_eq!(atom.kind, AtomKind::Dummy);
        assert!(atom.is_dummy());
        assert_eq!(atom.symbol, "X");
    }

    #[test]
    fn label_joins_symbol_and_serial() {
        let atom = Atom::new("C", 7, Point3::origin());
        assert_eq!(atom.label(), "C7");
    }

    #[test]
    fn display_includes_label_and_rounded_coordinates() {
        let atom = Atom::new("Ru", 3, Point3::new(1.0, -2.5, 0.123456));
        assert_eq!(atom.to_string(), "Ru3 (1.0000, -2.5000, 0.1235)");
    }
}
