use crate::core::models::structure::Structure;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::resolver::{Resolution, TopologyResolver};
use crate::engine::topology::{RoleAssignment, Topology};
use tracing::{debug, info, instrument};

/// Runs one analysis over a single structure.
///
/// # Arguments
///
/// * `structure` - The atoms as read from input.
/// * `roles` - The ring and metal index groups (1-based) supplied by the caller.
/// * `config` - Bond cutoff, dummy label and related settings.
///
/// # Return
///
/// The report, in canonical order, and the structure with one dummy atom per
/// ring appended at its centroid.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTopology`] for malformed role assignments and
/// [`EngineError::DegenerateGeometry`] when coordinates make an angle or
/// dihedral undefined. Nothing is returned on failure.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    structure: &Structure,
    roles: RoleAssignment,
    config: &AnalysisConfig,
) -> Result<Resolution, EngineError> {
    let topology = Topology::from_roles(roles, structure.len())?;
    debug!(
        "Validated topology with {} ring(s) and {} metal(s) over {} atoms.",
        topology.rings().len(),
        topology.metals().len(),
        structure.len()
    );

    let resolution = TopologyResolver::new(structure, config).resolve(&topology)?;
    info!(
        "Computed {} quantities; augmented structure has {} atoms.",
        resolution.report.entries.len(),
        resolution.augmented.len()
    );
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::MolecularFile;
    use crate::core::io::xyz::XyzFile;
    use crate::engine::config::AnalysisConfigBuilder;
    use nalgebra::Point3;
    use std::f64::consts::PI;
    use std::io::Cursor;

    fn ferrocene_xyz() -> String {
        let mut lines = vec!["11".to_string(), "ferrocene, eclipsed".to_string()];
        for z in [0.0, 3.3] {
            for k in 0..5 {
                let theta = 2.0 * PI * k as f64 / 5.0;
                lines.push(format!(
                    "C {:.8} {:.8} {:.8}",
                    1.21 * theta.cos(),
                    1.21 * theta.sin(),
                    z
                ));
            }
        }
        lines.push("Fe 0.0 0.0 1.65".to_string());
        lines.join("\n")
    }

    fn ferrocene_roles() -> RoleAssignment {
        RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 5]),
            ring2: Some(vec![6, 7, 8, 9, 10]),
            metal1: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn run_on_parsed_ferrocene_matches_expected_geometry() {
        let (structure, _) = XyzFile::read_from(&mut Cursor::new(ferrocene_xyz())).unwrap();
        let resolution = run(&structure, ferrocene_roles(), &AnalysisConfig::default()).unwrap();
        let report = resolution.report;

        assert!((report.get("Fe11-CoM1 distance").unwrap() - 1.65).abs() < 1e-3);
        assert!((report.get("Fe11-CoM2 distance").unwrap() - 1.65).abs() < 1e-3);
        assert!((report.get("CoM1-Fe11-CoM2 angle").unwrap() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn run_rejects_missing_middle_ring_without_partial_output() {
        let (structure, _) = XyzFile::read_from(&mut Cursor::new(ferrocene_xyz())).unwrap();
        let roles = RoleAssignment {
            ring1: Some(vec![1, 2, 3, 4, 5]),
            ring3: Some(vec![6, 7, 8, 9, 10]),
            metal1: Some(11),
            ..Default::default()
        };
        let result = run(&structure, roles, &AnalysisConfig::default());
        assert!(matches!(result, Err(EngineError::InvalidTopology(_))));
    }

    #[test]
    fn augmented_structure_round_trips_centroids_through_xyz() {
        let (structure, metadata) =
            XyzFile::read_from(&mut Cursor::new(ferrocene_xyz())).unwrap();
        let config = AnalysisConfigBuilder::new().dummy_label("Xx").build().unwrap();
        let resolution = run(&structure, ferrocene_roles(), &config).unwrap();

        let mut buffer = Vec::new();
        XyzFile::write_to(&resolution.augmented, &metadata, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().next(), Some("13"));

        let (reread, _) = XyzFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(reread.len(), 13);
        for ring in &resolution.report.rings {
            let dummy = reread.atom(ring.dummy_serial).unwrap();
            assert_eq!(dummy.symbol, "Xx");
            assert!((dummy.position - ring.centroid_point()).norm() < 1e-5);
        }
        assert!((reread.atom(13).unwrap().position - Point3::new(0.0, 0.0, 3.3)).norm() < 1e-5);
    }

    #[test]
    fn repeated_runs_produce_identical_results() {
        let (structure, _) = XyzFile::read_from(&mut Cursor::new(ferrocene_xyz())).unwrap();
        let config = AnalysisConfig::default();
        let first = run(&structure, ferrocene_roles(), &config).unwrap();
        let second = run(&structure, ferrocene_roles(), &config).unwrap();
        assert_eq!(first, second);
    }
}
