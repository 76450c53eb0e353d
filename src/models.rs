//! Data models for the launch dashboard.
//!
//! This module contains the core data structures shared by the loader,
//! the aggregator, the view selector and the report generator.

use crate::error::{DashboardError, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel dropdown value selecting every site.
pub const ALL_SITES: &str = "ALL";

/// Outcome class of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Class 0.
    Failure,
    /// Class 1.
    Success,
}

impl Outcome {
    /// Decode the numeric `class` column.
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Numeric class used as the scatter y value.
    pub fn as_class(&self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

/// One historical launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    /// Flight number, when the dataset carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    /// Launch site name.
    pub launch_site: String,
    /// Payload mass in kilograms (non-negative).
    pub payload_mass_kg: f64,
    /// Full booster version, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
    /// Booster version category (e.g. "FT", "B5").
    pub booster_category: String,
    /// Launch outcome.
    pub outcome: Outcome,
}

/// Site picked in the dropdown: the `ALL` sentinel or a named site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteChoice {
    #[default]
    All,
    Site(String),
}

impl SiteChoice {
    /// Parse a raw dropdown value verbatim. No catalog validation happens here.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteChoice::All
        } else {
            SiteChoice::Site(value.to_string())
        }
    }
}

impl fmt::Display for SiteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteChoice::All => write!(f, "{}", ALL_SITES),
            SiteChoice::Site(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for SiteChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Payload range chosen on the slider, in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Reject `min > max` and non-finite bounds. Bounds are never swapped.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(DashboardError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.min && payload_kg <= self.max
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::new(2500.0, 8000.0)
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} kg", self.min, self.max)
    }
}

/// One user interaction: both control values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub site: SiteChoice,
    pub payload_range: PayloadRange,
}

/// The closed set of sites offered by the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCatalog {
    sites: Vec<String>,
}

impl SiteCatalog {
    /// Build a catalog, rejecting empty names, duplicates and the `ALL` sentinel.
    pub fn new(sites: Vec<String>) -> Result<Self> {
        for (i, site) in sites.iter().enumerate() {
            let reason = if site.trim().is_empty() {
                "site names must not be empty"
            } else if site == ALL_SITES {
                "'ALL' is reserved for the all-sites option"
            } else if sites[..i].contains(site) {
                "site names must be unique"
            } else {
                continue;
            };

            return Err(DashboardError::InvalidCatalog {
                site: site.clone(),
                reason: reason.to_string(),
            });
        }

        Ok(Self { sites })
    }

    pub fn contains(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Check a choice against the catalog. `ALL` is always accepted.
    pub fn validate(&self, choice: &SiteChoice) -> Result<()> {
        match choice {
            SiteChoice::All => Ok(()),
            SiteChoice::Site(name) if self.contains(name) => Ok(()),
            SiteChoice::Site(name) => Err(DashboardError::InvalidSelection { site: name.clone() }),
        }
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }
}

impl Default for SiteCatalog {
    fn default() -> Self {
        Self {
            sites: ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Observed payload extremes in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// Returns `None` for an empty record set.
    pub fn from_records(records: &[LaunchRecord]) -> Option<Self> {
        let mut iter = records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }
}

/// Launch and success counts for one site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub launches: usize,
    pub successes: usize,
}

/// Each site's share of all successful launches in the dataset.
///
/// Values sum to 1 whenever the dataset holds at least one success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalShare(pub BTreeMap<String, f64>);

/// Each site's own success rate: successes over that site's launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SuccessRate(pub BTreeMap<String, f64>);

impl GlobalShare {
    pub fn get(&self, site: &str) -> Option<f64> {
        self.0.get(site).copied()
    }
}

impl SuccessRate {
    pub fn get(&self, site: &str) -> Option<f64> {
        self.0.get(site).copied()
    }
}

/// Both derived tables, computed once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteAggregates {
    pub global_share: GlobalShare,
    pub success_rate: SuccessRate,
    pub stats: BTreeMap<String, SiteStats>,
    pub total_successes: usize,
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// A pie chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    #[allow(dead_code)] // Lookup utility for renderers
    pub fn slice(&self, label: &str) -> Option<&PieSlice> {
        self.slices.iter().find(|s| s.label == label)
    }

    #[allow(dead_code)] // Lookup utility for renderers
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// An axis with an optional display clamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

/// One scatter point: a single launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass in kg.
    pub x: f64,
    /// Outcome class, 0 or 1.
    pub y: u8,
    /// Booster version category, used as the colour key.
    pub category: String,
    pub site: String,
}

/// A scatter chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Points inside the x axis clamp (all points when unclamped).
    pub fn visible_points(&self) -> impl Iterator<Item = &ScatterPoint> {
        let range = self.x_axis.range;
        self.points.iter().filter(move |p| match range {
            Some([lo, hi]) => PayloadRange::new(lo, hi).contains(p.x),
            None => true,
        })
    }

    /// Distinct colour categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.points.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

/// Renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(pie) => &pie.title,
            ChartSpec::Scatter(scatter) => &scatter.title,
        }
    }

    #[allow(dead_code)] // Accessor for renderers
    pub fn as_pie(&self) -> Option<&PieChart> {
        match self {
            ChartSpec::Pie(pie) => Some(pie),
            ChartSpec::Scatter(_) => None,
        }
    }

    #[allow(dead_code)] // Accessor for renderers
    pub fn as_scatter(&self) -> Option<&ScatterChart> {
        match self {
            ChartSpec::Scatter(scatter) => Some(scatter),
            ChartSpec::Pie(_) => None,
        }
    }
}

/// Metadata about a rendered dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ViewMetadata {
    /// Path of the CSV file the records came from.
    pub data_source: String,
    /// Time the view was rendered.
    pub generated_at: DateTime<Utc>,
    /// Number of records loaded.
    pub record_count: usize,
    /// Observed payload extremes.
    pub payload_bounds: PayloadBounds,
}

/// Everything the rendering surface needs for one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub heading: String,
    pub metadata: ViewMetadata,
    pub controls: crate::view::DashboardControls,
    pub selection: Selection,
    pub pie_chart: ChartSpec,
    pub scatter_chart: ChartSpec,
}
