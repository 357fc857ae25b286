use super::config::AnalysisConfig;
use super::error::EngineError;
use super::report::{
    MetalAssignment, QuantityKind, Report, ReportEntry, RingSummary, TopologyKind,
};
use super::topology::{RingGroup, Topology};
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use nalgebra::Point3;
use tracing::debug;

/// The outcome of resolving one structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub report: Report,
    /// The input atoms followed by one dummy atom per ring centroid.
    pub augmented: Structure,
}

/// A named point taking part in a quantity: an atom or a ring centroid.
#[derive(Debug, Clone)]
struct Site {
    label: String,
    position: Point3<f64>,
}

impl Site {
    fn from_atom(atom: &Atom) -> Self {
        Self {
            label: atom.label(),
            position: atom.position,
        }
    }
}

/// Orders two metals so the one nearer to `centroid1` comes first.
///
/// Distances within [`geometry::DEGENERACY_EPSILON`] of each other count as a
/// tie, and a tie puts the lower serial first. The result never depends on
/// argument order.
pub fn canonicalize_metals<'a>(
    m_a: &'a Atom,
    m_b: &'a Atom,
    centroid1: &Point3<f64>,
) -> (&'a Atom, &'a Atom) {
    let d_a = geometry::distance(&m_a.position, centroid1);
    let d_b = geometry::distance(&m_b.position, centroid1);
    let b_first = if (d_a - d_b).abs() <= geometry::DEGENERACY_EPSILON {
        m_b.serial < m_a.serial
    } else {
        d_b < d_a
    };
    if b_first { (m_b, m_a) } else { (m_a, m_b) }
}

/// Turns a validated [`Topology`] into a [`Report`] for one structure.
///
/// A resolver is cheap to build and holds no state between calls; nothing is
/// cached, so every call recomputes the centroids from the atom positions.
pub struct TopologyResolver<'a> {
    structure: &'a Structure,
    config: &'a AnalysisConfig,
    entries: Vec<ReportEntry>,
}

impl<'a> TopologyResolver<'a> {
    pub fn new(structure: &'a Structure, config: &'a AnalysisConfig) -> Self {
        Self {
            structure,
            config,
            entries: Vec::new(),
        }
    }

    pub fn resolve(mut self, topology: &Topology) -> Result<Resolution, EngineError> {
        let rings = topology.rings();
        let centroids = self.ring_centroids(&rings)?;

        let metals = match topology {
            Topology::TwoRing { metal1, .. } => {
                let metal1 = Site::from_atom(self.atom(*metal1)?);
                self.distance(&metal1, &centroids[0]);
                self.distance(&metal1, &centroids[1]);
                self.angle(&centroids[0], &metal1, &centroids[1])?;

                MetalAssignment {
                    metal1: metal1.label,
                    metal2: None,
                    swapped: false,
                }
            }
            Topology::ThreeRing {
                ring2,
                metal1,
                metal2,
                ..
            } => {
                let (m_a, m_b) = (self.atom(*metal1)?, self.atom(*metal2)?);
                let (near, far) = canonicalize_metals(m_a, m_b, &centroids[0].position);
                let swapped = near.serial != m_a.serial;
                if swapped {
                    debug!(
                        "Relabeled {} as metal1: it is nearer to the ring1 centroid than {}",
                        near.label(),
                        far.label()
                    );
                }
                let (m1, m2) = (Site::from_atom(near), Site::from_atom(far));
                let (c1, c2, c3) = (&centroids[0], &centroids[1], &centroids[2]);

                self.distance(&m1, c1);
                self.distance(&m1, c2);
                self.distance(&m2, c2);
                self.distance(&m2, c3);
                self.distance(&m1, &m2);
                self.angle(c1, &m1, c2)?;
                self.angle(c1, c2, c3)?;
                self.angle(c2, &m2, c3)?;
                self.angle(&m1, c2, &m2)?;
                self.middle_ring_bonds(ring2)?;
                if self.config.middle_ring_dihedrals {
                    self.middle_ring_dihedrals(ring2)?;
                }

                MetalAssignment {
                    metal1: m1.label,
                    metal2: Some(m2.label),
                    swapped,
                }
            }
        };

        let positions: Vec<Point3<f64>> = centroids.iter().map(|c| c.position).collect();
        let augmented = self
            .structure
            .with_dummy_atoms(&self.config.dummy_label, &positions);

        let ring_summaries = rings
            .iter()
            .zip(&centroids)
            .enumerate()
            .map(|(i, (ring, centroid))| RingSummary {
                name: format!("ring{}", i + 1),
                centroid_label: centroid.label.clone(),
                size: ring.len(),
                centroid: [centroid.position.x, centroid.position.y, centroid.position.z],
                dummy_serial: self.structure.len() + i + 1,
            })
            .collect();

        let kind = match topology {
            Topology::TwoRing { .. } => TopologyKind::TwoRing,
            Topology::ThreeRing { .. } => TopologyKind::ThreeRing,
        };

        Ok(Resolution {
            report: Report {
                topology: kind,
                rings: ring_summaries,
                metals,
                entries: self.entries,
            },
            augmented,
        })
    }

    fn atom(&self, serial: usize) -> Result<&'a Atom, EngineError> {
        self.structure.atom(serial).ok_or_else(|| {
            EngineError::Internal(format!("atom {} missing after validation", serial))
        })
    }

    fn positions(&self, ring: &RingGroup) -> Result<Vec<Point3<f64>>, EngineError> {
        ring.members()
            .iter()
            .map(|&serial| self.atom(serial).map(|a| a.position))
            .collect()
    }

    fn ring_centroids(&self, rings: &[&RingGroup]) -> Result<Vec<Site>, EngineError> {
        rings
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let points = self.positions(ring)?;
                let position = geometry::centroid(&points)
                    .map_err(|e| EngineError::from_geometry(format!("ring{} centroid", i + 1), e))?;
                Ok(Site {
                    label: format!("CoM{}", i + 1),
                    position,
                })
            })
            .collect()
    }

    fn distance(&mut self, a: &Site, b: &Site) {
        let value = geometry::distance(&a.position, &b.position);
        self.entries.push(ReportEntry::new(
            QuantityKind::Distance,
            format!("{}-{} distance", a.label, b.label),
            value,
        ));
    }

    fn angle(&mut self, a: &Site, vertex: &Site, c: &Site) -> Result<(), EngineError> {
        let label = format!("{}-{}-{} angle", a.label, vertex.label, c.label);
        let value = geometry::angle(&a.position, &vertex.position, &c.position)
            .map_err(|e| EngineError::from_geometry(label.as_str(), e))?;
        self.entries
            .push(ReportEntry::new(QuantityKind::Angle, label, value));
        Ok(())
    }

    fn middle_ring_bonds(&mut self, ring: &RingGroup) -> Result<(), EngineError> {
        let points = self.positions(ring)?;
        let labels = ring
            .members()
            .iter()
            .map(|&serial| self.atom(serial).map(Atom::label))
            .collect::<Result<Vec<String>, EngineError>>()?;

        let bonds = geometry::pairwise_bonds(&points, &labels, self.config.bond_cutoff)
            .map_err(|e| EngineError::from_geometry("ring2 bond distances", e))?;
        for bond in bonds {
            self.entries.push(ReportEntry::new(
                QuantityKind::Bond,
                format!("{}-{} bond", bond.first, bond.second),
                bond.distance,
            ));
        }
        Ok(())
    }

    fn middle_ring_dihedrals(&mut self, ring: &RingGroup) -> Result<(), EngineError> {
        for window in ring.torsion_windows() {
            let atoms = [
                self.atom(window[0])?,
                self.atom(window[1])?,
                self.atom(window[2])?,
                self.atom(window[3])?,
            ];
            let label = format!(
                "{}-{}-{}-{} dihedral",
                atoms[0].label(),
                atoms[1].label(),
                atoms[2].label(),
                atoms[3].label()
            );
            let value = geometry::dihedral(
                &atoms[0].position,
                &atoms[1].position,
                &atoms[2].position,
                &atoms[3].position,
            )
            .map_err(|e| EngineError::from_geometry(label.as_str(), e))?;
            self.entries
                .push(ReportEntry::new(QuantityKind::Dihedral, label, value));
        }
        Ok(())
    }
}
