mod defaults;

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use metalloring::engine::config::{AnalysisConfig, AnalysisConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGeometryConfig {
    #[serde(rename = "bond-cutoff")]
    bond_cutoff: Option<f64>,
    #[serde(rename = "middle-ring-dihedrals")]
    middle_ring_dihedrals: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    #[serde(rename = "dummy-label")]
    dummy_label: Option<String>,
    comment: Option<String>,
}

/// Configuration as read from a TOML file, every field optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    geometry: Option<PartialGeometryConfig>,
    output: Option<PartialOutputConfig>,
}

/// Fully resolved settings for one `analyze` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub analysis: AnalysisConfig,
    /// Comment line written to every augmented XYZ file.
    pub comment: String,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `args.config` when given, otherwise starts from an empty layer.
    pub fn load(args: &AnalyzeArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Layers dedicated flags over `--set` values over the file over defaults.
    pub fn merge_with_cli(mut self, args: &AnalyzeArgs) -> Result<RunConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let geometry = self.geometry.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let bond_cutoff = args
            .bond_cutoff
            .or(geometry.bond_cutoff)
            .unwrap_or(defaults.bond_cutoff);
        let middle_ring_dihedrals = if args.no_dihedrals {
            false
        } else {
            geometry
                .middle_ring_dihedrals
                .unwrap_or(defaults.middle_ring_dihedrals)
        };
        let dummy_label = args
            .dummy_label
            .clone()
            .or(output.dummy_label)
            .unwrap_or(defaults.dummy_label);

        let analysis = AnalysisConfigBuilder::new()
            .bond_cutoff(bond_cutoff)
            .dummy_label(dummy_label)
            .middle_ring_dihedrals(middle_ring_dihedrals)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        debug!("Resolved analysis configuration: {:?}", analysis);

        Ok(RunConfig {
            analysis,
            comment: output.comment.unwrap_or(defaults.comment),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "geometry.bond-cutoff" => {
                    self.geometry
                        .get_or_insert_with(Default::default)
                        .bond_cutoff = Some(parse_value(key, value_str, "float")?);
                }
                "geometry.middle-ring-dihedrals" => {
                    self.geometry
                        .get_or_insert_with(Default::default)
                        .middle_ring_dihedrals = Some(parse_value(key, value_str, "boolean")?);
                }
                "output.dummy-label" => {
                    self.output.get_or_insert_with(Default::default).dummy_label =
                        Some(value_str.to_string());
                }
                "output.comment" => {
                    self.output.get_or_insert_with(Default::default).comment =
                        Some(value_str.to_string());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            kind, key, value_str
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use metalloring::core::io::xyz::DEFAULT_COMMENT;
    use metalloring::engine::config::{DEFAULT_BOND_CUTOFF, DEFAULT_DUMMY_LABEL};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec![
            "metalloring",
            "analyze",
            "in.xyz",
            "--ring1",
            "1",
            "2",
            "3",
            "4",
            "5",
            "--ring2",
            "6",
            "7",
            "8",
            "9",
            "10",
            "--metal1",
            "11",
        ];
        argv.extend_from_slice(extra);
        let Commands::Analyze(args) = Cli::parse_from(argv).command;
        args
    }

    #[test]
    fn defaults_apply_without_file_or_overrides() {
        let args = analyze_args(&[]);
        let config = PartialAnalysisConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.analysis.bond_cutoff, DEFAULT_BOND_CUTOFF);
        assert_eq!(config.analysis.dummy_label, DEFAULT_DUMMY_LABEL);
        assert!(config.analysis.middle_ring_dihedrals);
        assert_eq!(config.comment, DEFAULT_COMMENT);
    }

    #[test]
    fn file_values_replace_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "file.toml",
            r#"
            [geometry]
            bond-cutoff = 1.75
            middle-ring-dihedrals = false

            [output]
            dummy-label = "Q"
            comment = "conformer set"
            "#,
        );
        let args = analyze_args(&["-c", path.to_str().unwrap()]);
        let config = PartialAnalysisConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.analysis.bond_cutoff, 1.75);
        assert_eq!(config.analysis.dummy_label, "Q");
        assert!(!config.analysis.middle_ring_dihedrals);
        assert_eq!(config.comment, "conformer set");
    }

    #[test]
    fn set_values_override_file_and_flags_override_set_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "override.toml",
            r#"
            [geometry]
            bond-cutoff = 1.5 # Will be overridden

            [output]
            dummy-label = "Q" # Will be overridden
            "#,
        );
        let args = analyze_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "geometry.bond-cutoff=2.1",
            "-S",
            "output.dummy-label=Zz",
            "--dummy-label",
            "Du",
        ]);
        let config = PartialAnalysisConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.analysis.bond_cutoff, 2.1);
        assert_eq!(config.analysis.dummy_label, "Du");
    }

    #[test]
    fn no_dihedrals_flag_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "dihedrals.toml",
            "[geometry]\nmiddle-ring-dihedrals = true\n",
        );
        let args = analyze_args(&["-c", path.to_str().unwrap(), "--no-dihedrals"]);
        let config = PartialAnalysisConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        assert!(!config.analysis.middle_ring_dihedrals);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "bad.toml", "[geometry]\nbond-length = 2.0\n");
        let result = PartialAnalysisConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "geometry.bond-cutoff",
            "geometry.bond-cutoff=abc",
            "geometry.middle-ring-dihedrals=maybe",
            "geometry.unknown=1",
        ] {
            let args = analyze_args(&["-S", bad]);
            let result = PartialAnalysisConfig::default().merge_with_cli(&args);
            assert!(matches!(result, Err(CliError::Config(_))), "accepted {bad}");
        }
    }

    #[test]
    fn invalid_merged_values_surface_as_config_errors() {
        let args = analyze_args(&["--bond-cutoff", "0"]);
        let result = PartialAnalysisConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));

        let args = analyze_args(&["--dummy-label", "Fe"]);
        let result = PartialAnalysisConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
