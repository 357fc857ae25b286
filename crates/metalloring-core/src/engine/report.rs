use nalgebra::Point3;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    /// Same length unit as the input coordinates (Ångström for XYZ files).
    Length,
    Degrees,
}

/// What kind of geometric quantity a report entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuantityKind {
    /// Distance between a metal, a centroid or another metal.
    Distance,
    /// Angle at a metal or centroid vertex.
    Angle,
    /// Bond length between two middle-ring atoms.
    Bond,
    /// Torsion angle around the middle ring.
    Dihedral,
}

impl QuantityKind {
    pub fn unit(self) -> Unit {
        match self {
            QuantityKind::Distance | QuantityKind::Bond => Unit::Length,
            QuantityKind::Angle | QuantityKind::Dihedral => Unit::Degrees,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub kind: QuantityKind,
    pub label: String,
    pub value: f64,
    pub unit: Unit,
}

impl ReportEntry {
    pub fn new(kind: QuantityKind, label: impl Into<String>, value: f64) -> Self {
        Self {
            kind,
            label: label.into(),
            value,
            unit: kind.unit(),
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Length => write!(f, "{}: {:.4} Å", self.label, self.value),
            Unit::Degrees => write!(f, "{}: {:.2} degrees", self.label, self.value),
        }
    }
}

/// The ring whose centroid a dummy atom marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingSummary {
    /// Role name, e.g. `ring2`.
    pub name: String,
    /// Label used for the centroid in quantity names, e.g. `CoM2`.
    pub centroid_label: String,
    pub size: usize,
    pub centroid: [f64; 3],
    /// Serial of the dummy atom placed at the centroid in the augmented structure.
    pub dummy_serial: usize,
}

impl RingSummary {
    pub fn centroid_point(&self) -> Point3<f64> {
        Point3::from(self.centroid)
    }
}

/// Metals after canonical relabeling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetalAssignment {
    pub metal1: String,
    pub metal2: Option<String>,
    /// True when the caller's metal order was reversed to satisfy the
    /// nearer-to-ring1 rule.
    pub swapped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopologyKind {
    TwoRing,
    ThreeRing,
}

/// Labeled results of one analysis, in canonical presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub topology: TopologyKind,
    pub rings: Vec<RingSummary>,
    pub metals: MetalAssignment,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Looks up the value of an entry by its exact label.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    pub fn entries_of(&self, kind: QuantityKind) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}
