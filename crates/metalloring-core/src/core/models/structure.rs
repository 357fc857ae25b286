use super::atom::Atom;
use nalgebra::Point3;

/// An ordered list of atoms as read from a coordinate file.
///
/// Order is significant: atom serials are 1-based positions in this list and
/// user-supplied index groups refer to atoms by those positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    atoms: Vec<Atom>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom and returns its 1-based serial.
    ///
    /// The serial is assigned from the atom's position, so callers never
    /// need to track numbering themselves.
    pub fn push_atom(&mut self, symbol: &str, position: Point3<f64>) -> usize {
        let serial = self.atoms.len() + 1;
        self.atoms.push(Atom::new(symbol, serial, position));
        serial
    }

    /// Appends a dummy marker atom and returns its 1-based serial.
    pub fn push_dummy(&mut self, label: &str, position: Point3<f64>) -> usize {
        let serial = self.atoms.len() + 1;
        self.atoms.push(Atom::dummy(label, serial, position));
        serial
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Looks up an atom by its 1-based serial.
    ///
    /// # Return
    ///
    /// Returns `None` for serial `0` or any serial beyond the last atom.
    pub fn atom(&self, serial: usize) -> Option<&Atom> {
        serial.checked_sub(1).and_then(|i| self.atoms.get(i))
    }

    /// Returns the atoms flagged as dummy markers, in structure order.
    pub fn dummy_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(|a| a.is_dummy())
    }

    /// Returns a copy of this structure with one dummy atom per point appended.
    ///
    /// The input structure is left untouched.
    pub fn with_dummy_atoms(&self, label: &str, positions: &[Point3<f64>]) -> Structure {
        let mut augmented = self.clone();
        for position in positions {
            augmented.push_dummy(label, *position);
        }
        augmented
    }
}

impl FromIterator<(String, Point3<f64>)> for Structure {
    fn from_iter<I: IntoIterator<Item = (String, Point3<f64>)>>(iter: I) -> Self {
        let mut structure = Structure::new();
        for (symbol, position) in iter {
            structure.push_atom(&symbol, position);
        }
        structure
    }
}
