//! CSV loader for launch records.
//!
//! Reads the launch table once at startup. The schema is fixed: the
//! `Launch Site`, `Payload Mass (kg)`, `Booster Version Category` and
//! `class` columns are required, `Flight Number` and `Booster Version`
//! are picked up when present and any other column is ignored.

use crate::error::{DashboardError, Result};
use crate::models::{LaunchRecord, Outcome, PayloadBounds, SiteCatalog};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One CSV row as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawLaunchRow {
    fn into_record(self, line: u64) -> Result<LaunchRecord> {
        let outcome = Outcome::from_class(self.class).ok_or_else(|| {
            DashboardError::MalformedRecord {
                line,
                message: format!("class must be 0 or 1, got {}", self.class),
            }
        })?;

        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(DashboardError::MalformedRecord {
                line,
                message: format!("payload mass must be non-negative, got {}", self.payload_mass_kg),
            });
        }

        if self.launch_site.is_empty() {
            return Err(DashboardError::MalformedRecord {
                line,
                message: "launch site is empty".to_string(),
            });
        }

        Ok(LaunchRecord {
            flight_number: self.flight_number,
            launch_site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            booster_version: self.booster_version.filter(|v| !v.is_empty()),
            booster_category: self.booster_category,
            outcome,
        })
    }
}

/// The loaded launch table plus what was observed while loading it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the records were read from.
    pub source: PathBuf,
    /// All records, in file order.
    pub records: Vec<LaunchRecord>,
    /// Observed payload extremes.
    pub bounds: PayloadBounds,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading launch records from {}", path.display());

        let file = std::fs::File::open(path).map_err(|e| DashboardError::DataLoad {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;

        Self::from_reader(file, path)
    }

    /// Load the dataset from any reader; `source` is only used for messages.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let records = read_records(reader, source)?;

        let bounds = PayloadBounds::from_records(&records)
            .ok_or_else(|| DashboardError::EmptyDataset(source.to_path_buf()))?;

        info!(
            "Loaded {} launch records (payload {} - {} kg)",
            records.len(),
            bounds.min,
            bounds.max
        );

        Ok(Self {
            source: source.to_path_buf(),
            records,
            bounds,
        })
    }

    /// Distinct sites present in the records, sorted.
    pub fn sites(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.launch_site.as_str()).collect()
    }

    /// Sites present in the records that the dropdown does not offer.
    pub fn sites_outside(&self, catalog: &SiteCatalog) -> Vec<&str> {
        self.sites()
            .into_iter()
            .filter(|site| !catalog.contains(site))
            .collect()
    }

    /// Log a warning for every site in the data that the dropdown cannot select.
    pub fn check_catalog(&self, catalog: &SiteCatalog) {
        for site in self.sites_outside(catalog) {
            warn!("Site '{}' is in the data but not in the site catalog", site);
        }
        for site in catalog.sites() {
            if !self.records.iter().any(|r| &r.launch_site == site) {
                warn!("Catalog site '{}' has no recorded launches", site);
            }
        }
    }
}

/// Decode every row of a CSV stream into launch records.
pub fn read_records<R: Read>(reader: R, source: &Path) -> Result<Vec<LaunchRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| row_error(e, source))?
        .clone();

    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row.map_err(|e| row_error(e, source))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let raw: RawLaunchRow =
            row.deserialize(Some(&headers))
                .map_err(|e| DashboardError::MalformedRecord {
                    line,
                    message: e.to_string(),
                })?;
        records.push(raw.into_record(line)?);
    }

    debug!("Decoded {} rows from {}", records.len(), source.display());

    Ok(records)
}

fn row_error(err: csv::Error, source: &Path) -> DashboardError {
    match err.position() {
        Some(pos) if !err.is_io_error() => DashboardError::MalformedRecord {
            line: pos.line(),
            message: err.to_string(),
        },
        _ => DashboardError::DataLoad {
            path: source.to_path_buf(),
            source: err,
        },
    }
}
