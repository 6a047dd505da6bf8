//! Application configuration loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use seating_kernel::{GridDefaults, SeatingConfig};
use serde::Deserialize;

/// Top-level configuration file.
///
/// ```toml
/// store_dir = "seatmaps"
///
/// [grid]
/// rows = 5
/// cols = 8
/// template = "u"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding saved layouts.
    pub store_dir: PathBuf,
    /// Defaults for freshly created layouts.
    pub grid: GridDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("seatmaps"),
            grid: GridDefaults::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse configuration")
    }

    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn seating(&self) -> SeatingConfig {
        SeatingConfig {
            grid: self.grid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seating_kernel::Template;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("seatmaps"));
        assert_eq!(config.grid.rows, 4);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            store_dir = "/tmp/plans"

            [grid]
            cols = 8
            template = "front-rows"
            "#,
        )
        .unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/tmp/plans"));
        let spec = config.seating().grid.spec();
        assert_eq!((spec.rows, spec.cols, spec.template), (4, 8, Template::FrontRows));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/seatmap.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
