//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.launchdash.toml` files.

use crate::error::DashboardError;
use crate::models::SiteCatalog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".launchdash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data source settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Site catalog settings.
    #[serde(default)]
    pub sites: SitesConfig,

    /// Payload slider settings.
    #[serde(default)]
    pub slider: SliderConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the launch records come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the launch records CSV.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("spacex_launch_dash.csv")
}

/// The closed set of sites offered by the dropdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesConfig {
    /// Site names, in dropdown order.
    #[serde(default = "default_sites")]
    pub names: Vec<String>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            names: default_sites(),
        }
    }
}

fn default_sites() -> Vec<String> {
    SiteCatalog::default().sites().to_vec()
}

impl SitesConfig {
    pub fn catalog(&self) -> std::result::Result<SiteCatalog, DashboardError> {
        SiteCatalog::new(self.names.clone())
    }
}

/// Payload range slider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Lower slider bound. Unset means the smallest payload in the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper slider bound. Unset means the largest payload in the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Slider step in kg.
    #[serde(default = "default_step")]
    pub step: f64,

    /// Labelled tick positions in kg.
    #[serde(default = "default_marks")]
    pub marks: Vec<f64>,

    /// Initial slider value.
    #[serde(default = "default_range")]
    pub default_range: [f64; 2],
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: default_step(),
            marks: default_marks(),
            default_range: default_range(),
        }
    }
}

fn default_step() -> f64 {
    1000.0
}

fn default_marks() -> Vec<f64> {
    vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0]
}

fn default_range() -> [f64; 2] {
    [2500.0, 8000.0]
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// List every scatter point in Markdown output.
    #[serde(default = "default_true")]
    pub include_points: bool,

    /// Decimal places for ratios in Markdown output.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_points: true,
            precision: default_precision(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_precision() -> usize {
    1
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings when given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.path = data.clone();
        }

        if let Some(ref sites) = args.sites {
            self.sites.names = sites.clone();
        }

        if args.no_points {
            self.report.include_points = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.sites.names.len(), 4);
        assert!(config.sites.names.contains(&"KSC LC-39A".to_string()));
        assert_eq!(config.slider.step, 1000.0);
        assert_eq!(config.slider.default_range, [2500.0, 8000.0]);
        assert!(config.report.include_points);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[data]
path = "data/launches.csv"

[sites]
names = ["KSC LC-39A", "VAFB SLC-4E"]

[slider]
min = 0.0
max = 10000.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.path, PathBuf::from("data/launches.csv"));
        let catalog = config.sites.catalog().unwrap();
        assert_eq!(catalog.sites().len(), 2);
        assert!(catalog.contains("VAFB SLC-4E"));
        assert_eq!(config.slider.min, Some(0.0));
        assert_eq!(config.slider.max, Some(10000.0));
        assert_eq!(config.slider.marks.len(), 5);
        assert_eq!(config.report.precision, 1);
    }

    #[test]
    fn test_invalid_site_catalogs_rejected() {
        for names in [
            r#"names = ["ALL", "KSC LC-39A"]"#,
            r#"names = ["KSC LC-39A", "KSC LC-39A"]"#,
            r#"names = ["KSC LC-39A", ""]"#,
        ] {
            let config: Config = toml::from_str(&format!("[sites]\n{}\n", names)).unwrap();
            assert!(
                matches!(config.sites.catalog(), Err(DashboardError::InvalidCatalog { .. })),
                "accepted {}",
                names
            );
        }

        assert!(Config::default().sites.catalog().is_ok());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[sites]"));
        assert!(toml_str.contains("[slider]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.slider, SliderConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[report]\ninclude_points = false\nprecision = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.report.include_points);
        assert_eq!(config.report.precision, 3);
        assert_eq!(config.sites.names.len(), 4);
    }
}
