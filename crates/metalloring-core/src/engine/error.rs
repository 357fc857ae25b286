use thiserror::Error;

use super::config::ConfigError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Cannot compute {quantity}: no points supplied")]
    EmptyInput { quantity: String },

    #[error("Cannot compute {quantity}: {reason}")]
    DegenerateGeometry { quantity: String, reason: String },

    #[error("Invalid analysis configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Attaches the name of the quantity being computed to a kernel failure.
    pub(crate) fn from_geometry(quantity: impl Into<String>, err: GeometryError) -> Self {
        let quantity = quantity.into();
        match err {
            GeometryError::EmptyInput => EngineError::EmptyInput { quantity },
            GeometryError::Degenerate { reason } => {
                EngineError::DegenerateGeometry { quantity, reason }
            }
            other @ GeometryError::LengthMismatch { .. } => {
                EngineError::Internal(format!("{quantity}: {other}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_geometry_keeps_quantity_and_reason_for_degenerate_input() {
        let err = EngineError::from_geometry(
            "CoM1-Fe11-CoM2 angle",
            GeometryError::Degenerate {
                reason: "vertex coincides with one of the end points".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Cannot compute CoM1-Fe11-CoM2 angle: vertex coincides with one of the end points"
        );
    }

    #[test]
    fn from_geometry_maps_empty_input() {
        let err = EngineError::from_geometry("ring1 centroid", GeometryError::EmptyInput);
        assert_eq!(
            err,
            EngineError::EmptyInput {
                quantity: "ring1 centroid".into()
            }
        );
    }
}
