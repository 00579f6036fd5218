use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "exoplanet-explorer.toml";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog opened at start-up (archive rows or a saved catalog).
    pub catalog: Option<PathBuf>,

    /// Maximum number of rows rendered in the explorer table.
    pub display_limit: usize,

    /// Number of entries in each top-discoveries list.
    pub top_list_len: usize,

    /// File name suggested by the export dialog, without extension.
    pub export_file_stem: String,

    /// Initial explorer filter spans.
    pub filters: FilterDefaults,
}

/// Initial slider positions in the explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub year: (i32, i32),
    /// Earth radii.
    pub radius: (f64, f64),
    /// Kelvin.
    pub temperature: (f64, f64),
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            year: (1990, 2025),
            radius: (0.0, 25.0),
            temperature: (0.0, 3000.0),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            display_limit: 1000,
            top_list_len: 10,
            export_file_stem: "exoplanets".to_string(),
            filters: FilterDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when it exists, or
    /// fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_limit == 0 {
            bail!("display_limit must be greater than 0");
        }
        if self.top_list_len == 0 {
            bail!("top_list_len must be greater than 0");
        }
        if self.export_file_stem.trim().is_empty() {
            bail!("export_file_stem must not be empty");
        }
        let f = &self.filters;
        if f.year.0 > f.year.1 {
            bail!("filters.year lower bound exceeds upper bound");
        }
        if !(f.radius.0 <= f.radius.1) {
            bail!("filters.radius lower bound exceeds upper bound");
        }
        if !(f.temperature.0 <= f.temperature.1) {
            bail!("filters.temperature lower bound exceeds upper bound");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig {
            catalog: Some(PathBuf::from("data/catalog.parquet")),
            display_limit: 250,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let config = AppConfig::from_toml("display_limit = 50\n[filters]\nyear = [2000, 2010]\n").unwrap();
        assert_eq!(config.display_limit, 50);
        assert_eq!(config.filters.year, (2000, 2010));
        assert_eq!(config.filters.radius, FilterDefaults::default().radius);
        assert_eq!(config.top_list_len, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.display_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.filters.radius = (10.0, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        std::fs::write(&path, "top_list_len = 5\n").unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap().top_list_len, 5);

        std::fs::write(&path, "top_list_len = 0\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
        assert!(AppConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
