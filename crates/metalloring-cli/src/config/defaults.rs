use metalloring::core::io::xyz::DEFAULT_COMMENT;
use metalloring::engine::config::{DEFAULT_BOND_CUTOFF, DEFAULT_DUMMY_LABEL};

/// Values used when neither the config file, `--set`, nor a dedicated flag
/// provides one.
pub struct DefaultsConfig {
    pub bond_cutoff: f64,
    pub middle_ring_dihedrals: bool,
    pub dummy_label: String,
    pub comment: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bond_cutoff: DEFAULT_BOND_CUTOFF,
            middle_ring_dihedrals: true,
            dummy_label: DEFAULT_DUMMY_LABEL.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}
