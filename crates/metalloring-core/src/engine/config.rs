use crate::core::utils::identifiers::is_element_symbol;
use thiserror::Error;

/// Default separation below which two middle-ring atoms are reported as bonded.
///
/// Sits between typical ring bond lengths (1.3-1.6 Å) and the shortest
/// non-bonded 1,3 separation in a five-membered ring (~2.2 Å).
pub const DEFAULT_BOND_CUTOFF: f64 = 1.9;

/// Default symbol for dummy atoms placed at ring centroids.
pub const DEFAULT_DUMMY_LABEL: &str = "X";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Bond cutoff must be a positive, finite distance (got {0})")]
    InvalidBondCutoff(f64),
    #[error("Dummy atom label must be non-empty and contain no whitespace (got '{0}')")]
    InvalidDummyLabel(String),
    #[error("Dummy atom label '{0}' collides with a real element symbol")]
    DummyLabelIsElement(String),
}

/// Settings that shape a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Maximum separation (Å) for a middle-ring atom pair to be reported as a bond.
    pub bond_cutoff: f64,
    /// Symbol written for the dummy atoms marking ring centroids.
    pub dummy_label: String,
    /// Whether to report the torsion angles around the middle ring.
    pub middle_ring_dihedrals: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bond_cutoff: DEFAULT_BOND_CUTOFF,
            dummy_label: DEFAULT_DUMMY_LABEL.to_string(),
            middle_ring_dihedrals: true,
        }
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    bond_cutoff: Option<f64>,
    dummy_label: Option<String>,
    middle_ring_dihedrals: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_cutoff(mut self, cutoff: f64) -> Self {
        self.bond_cutoff = Some(cutoff);
        self
    }
    pub fn dummy_label(mut self, label: impl Into<String>) -> Self {
        self.dummy_label = Some(label.into());
        self
    }
    pub fn middle_ring_dihedrals(mut self, enabled: bool) -> Self {
        self.middle_ring_dihedrals = Some(enabled);
        self
    }

    /// Validates the collected settings, filling unset ones with defaults.
    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();

        let bond_cutoff = self.bond_cutoff.unwrap_or(defaults.bond_cutoff);
        if !bond_cutoff.is_finite() || bond_cutoff <= 0.0 {
            return Err(ConfigError::InvalidBondCutoff(bond_cutoff));
        }

        let dummy_label = self.dummy_label.unwrap_or(defaults.dummy_label);
        if dummy_label.is_empty() || dummy_label.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidDummyLabel(dummy_label));
        }
        if is_element_symbol(&dummy_label) {
            return Err(ConfigError::DummyLabelIsElement(dummy_label));
        }

        Ok(AnalysisConfig {
            bond_cutoff,
            dummy_label,
            middle_ring_dihedrals: self
                .middle_ring_dihedrals
                .unwrap_or(defaults.middle_ring_dihedrals),
        })
    }
}
