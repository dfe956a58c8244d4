use crate::Point;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Layers deeper than this are never reached by propagation
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Errors that can occur while loading a layout configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Spacing parameters of the layered layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Position of the first node of the first layer
    pub origin: Point,

    /// Horizontal distance between two consecutive layer columns
    pub layer_spacing: f32,

    /// Vertical gap between two nodes of the same layer
    pub node_gap: f32,

    /// Exclusive upper bound on the layer index
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(50.0, 50.0),
            layer_spacing: 350.0,
            node_gap: 40.0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LayoutConfig {
    /// Spacing used for script graphs, whose nodes are wide and tall
    pub fn script() -> Self {
        Self {
            layer_spacing: 400.0,
            node_gap: 50.0,
            ..Default::default()
        }
    }

    /// Spacing used for outline boards
    pub fn outline() -> Self {
        Self {
            layer_spacing: 320.0,
            node_gap: 40.0,
            ..Default::default()
        }
    }

    /// Parse a configuration from RON, missing fields take their default
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = read_ron(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that spacings are finite and non-negative and that at least one
    /// layer can be produced
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("origin.x", self.origin.x), ("origin.y", self.origin.y)] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }
        check_length("layer_spacing", self.layer_spacing)?;
        check_length("node_gap", self.node_gap)?;
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

/// Reject lengths that would move the packing cursor backwards
pub fn check_length(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
    }
    Ok(())
}

/// Read and deserialize a RON file
pub fn read_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(ron::from_str(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = LayoutConfig::from_ron_str("(layer_spacing: 120.0)").unwrap();
        assert_eq!(config.layer_spacing, 120.0);
        assert_eq!(config.node_gap, LayoutConfig::default().node_gap);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn rejects_negative_gap() {
        let err = LayoutConfig::from_ron_str("(node_gap: -1.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn rejects_non_finite_lengths() {
        let config = LayoutConfig {
            layer_spacing: f32::NAN,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layer_spacing must be finite"), "{err}");

        assert!(check_length("gap", f32::INFINITY).is_err());
        assert!(check_length("gap", -0.5).is_err());
        assert!(check_length("gap", 0.0).is_ok());
    }

    #[test]
    fn rejects_zero_depth() {
        let err = LayoutConfig::from_ron_str("(max_depth: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn reports_parse_errors() {
        let err = LayoutConfig::from_ron_str("(layer_spacing: \"wide\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(origin: (x: 0.0, y: 10.0), node_gap: 8.0)").unwrap();

        let config = LayoutConfig::load(file.path()).unwrap();
        assert_eq!(config.origin, Point::new(0.0, 10.0));
        assert_eq!(config.node_gap, 8.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LayoutConfig::load(dir.path().join("missing.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "{err}");
    }
}
