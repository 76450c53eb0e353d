//! Declarative description of the dashboard controls.
//!
//! The rendering surface draws these; the values the user picks come back
//! as a [`Selection`](crate::models::Selection).

use crate::config::SliderConfig;
use crate::models::{PayloadBounds, PayloadRange, SiteCatalog, ALL_SITES};
use serde::Serialize;

pub const DASHBOARD_HEADING: &str = "SpaceX Launch Records Dashboard";

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// The single-choice site selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDropdown {
    pub id: &'static str,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: &'static str,
    pub searchable: bool,
}

impl SiteDropdown {
    pub fn new(catalog: &SiteCatalog) -> Self {
        let mut options = vec![DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(catalog.sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }));

        Self {
            id: "site-dropdown",
            options,
            value: ALL_SITES.to_string(),
            placeholder: "Select a Launch Site here",
            searchable: true,
        }
    }
}

/// A labelled tick on the payload slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

/// The payload range selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: [f64; 2],
}

impl RangeSlider {
    /// Bounds come from the config when set, otherwise from the data.
    pub fn new(config: &SliderConfig, bounds: PayloadBounds) -> Self {
        let [low, high] = config.default_range;

        Self {
            id: "payload-slider",
            min: config.min.unwrap_or(bounds.min),
            max: config.max.unwrap_or(bounds.max),
            step: config.step,
            marks: config
                .marks
                .iter()
                .map(|value| SliderMark {
                    value: *value,
                    label: format_mass_label(*value),
                })
                .collect(),
            value: [low, high],
        }
    }

    pub fn default_range(&self) -> PayloadRange {
        PayloadRange::new(self.value[0], self.value[1])
    }
}

/// Both controls of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardControls {
    pub site_dropdown: SiteDropdown,
    pub payload_slider: RangeSlider,
}

impl DashboardControls {
    pub fn new(catalog: &SiteCatalog, slider: &SliderConfig, bounds: PayloadBounds) -> Self {
        Self {
            site_dropdown: SiteDropdown::new(catalog),
            payload_slider: RangeSlider::new(slider, bounds),
        }
    }
}

/// Format a mass as a tick label, grouping thousands with spaces ("7 500 kg").
pub fn format_mass_label(kg: f64) -> String {
    let whole = kg.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if whole < 0 {
        format!("-{} kg", grouped)
    } else {
        format!("{} kg", grouped)
    }
}
