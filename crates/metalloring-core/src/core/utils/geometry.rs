use nalgebra::{Point3, Vector3};
use serde::Serialize;
use thiserror::Error;

/// Vectors shorter than this are treated as zero-length.
pub const DEGENERACY_EPSILON: f64 = 1e-10;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Cannot compute a centroid over zero points")]
    EmptyInput,
    #[error("Degenerate geometry: {reason}")]
    Degenerate { reason: String },
    #[error("Expected {points} labels for {points} points, got {labels}")]
    LengthMismatch { points: usize, labels: usize },
}

/// A pair of points whose separation fell within the bond cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondDistance {
    pub first: String,
    pub second: String,
    pub distance: f64,
}

pub fn centroid(points: &[Point3<f64>]) -> Result<Point3<f64>, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyInput);
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Ok(Point3::from(sum / points.len() as f64))
}

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// Angle at vertex `b` between the rays `b->a` and `b->c`, in degrees.
pub fn angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Result<f64, GeometryError> {
    let ba = a - b;
    let bc = c - b;
    let (norm_ba, norm_bc) = (ba.norm(), bc.norm());

    if norm_ba < DEGENERACY_EPSILON || norm_bc < DEGENERACY_EPSILON {
        return Err(GeometryError::Degenerate {
            reason: "vertex coincides with one of the end points".to_string(),
        });
    }

    let cos_theta = (ba.dot(&bc) / (norm_ba * norm_bc)).clamp(-1.0, 1.0);
    Ok(cos_theta.acos().to_degrees())
}

/// Signed torsion angle about the `b-c` axis, in degrees within (-180, 180].
pub fn dihedral(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
) -> Result<f64, GeometryError> {
    let b0 = b - a;
    let b1 = c - b;
    let b2 = d - c;

    for (name, bond) in [("a-b", &b0), ("b-c", &b1), ("c-d", &b2)] {
        if bond.norm() < DEGENERACY_EPSILON {
            return Err(GeometryError::Degenerate {
                reason: format!("bond vector {} has zero length", name),
            });
        }
    }

    let n1 = b0.cross(&b1);
    let n2 = b1.cross(&b2);
    let (norm_n1, norm_n2) = (n1.norm(), n2.norm());

    if norm_n1 < DEGENERACY_EPSILON || norm_n2 < DEGENERACY_EPSILON {
        return Err(GeometryError::Degenerate {
            reason: "three consecutive points are colinear".to_string(),
        });
    }

    let cos_theta = (n1.dot(&n2) / (norm_n1 * norm_n2)).clamp(-1.0, 1.0);
    let magnitude = cos_theta.acos().to_degrees();

    let sign_probe = b1.dot(&n1.cross(&n2));
    if sign_probe < 0.0 && magnitude < 180.0 {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Every unordered pair `(i, j)` with `i < j` whose separation is at most
/// `max_distance`, ordered by `i` and then `j`.
pub fn pairwise_bonds<S: AsRef<str>>(
    points: &[Point3<f64>],
    labels: &[S],
    max_distance: f64,
) -> Result<Vec<BondDistance>, GeometryError> {
    if points.len() != labels.len() {
        return Err(GeometryError::LengthMismatch {
            points: points.len(),
            labels: labels.len(),
        });
    }

    let mut bonds = Vec::new();
    for (i, p_i) in points.iter().enumerate() {
        for (j, p_j) in points.iter().enumerate().skip(i + 1) {
            let dist = distance(p_i, p_j);
            if dist <= max_distance {
                bonds.push(BondDistance {
                    first: labels[i].as_ref().to_string(),
                    second: labels[j].as_ref().to_string(),
                    distance: dist,
                });
            }
        }
    }
    Ok(bonds)
}
