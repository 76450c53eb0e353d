//! The loaded dashboard: records and aggregates computed once, views built
//! on demand for each selection.

use super::controls::{DashboardControls, DASHBOARD_HEADING};
use super::selector::{select_pie_chart, select_scatter_chart};
use crate::analysis::compute_aggregates;
use crate::config::SliderConfig;
use crate::data::Dataset;
use crate::error::Result;
use crate::models::{DashboardView, Selection, SiteAggregates, SiteCatalog, ViewMetadata};
use chrono::Utc;
use tracing::info;

/// Read-only state shared by every interaction.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    catalog: SiteCatalog,
    aggregates: SiteAggregates,
    controls: DashboardControls,
}

impl Dashboard {
    /// Aggregate the dataset and lay out the controls.
    pub fn new(dataset: Dataset, catalog: SiteCatalog, slider: &SliderConfig) -> Result<Self> {
        dataset.check_catalog(&catalog);

        let aggregates = compute_aggregates(&dataset.records)?;
        let controls = DashboardControls::new(&catalog, slider, dataset.bounds);

        info!(
            "Dashboard ready: {} sites, {} successful launches",
            aggregates.stats.len(),
            aggregates.total_successes
        );

        Ok(Self {
            dataset,
            catalog,
            aggregates,
            controls,
        })
    }

    /// Build both charts for one selection. Nothing is returned if either fails.
    pub fn view(&self, selection: &Selection) -> Result<DashboardView> {
        let pie_chart = select_pie_chart(&selection.site, &self.catalog, &self.aggregates)?;
        let scatter_chart = select_scatter_chart(
            &selection.site,
            selection.payload_range,
            &self.catalog,
            &self.dataset.records,
        )?;

        Ok(DashboardView {
            heading: DASHBOARD_HEADING.to_string(),
            metadata: ViewMetadata {
                data_source: self.dataset.source.display().to_string(),
                generated_at: Utc::now(),
                record_count: self.dataset.records.len(),
                payload_bounds: self.dataset.bounds,
            },
            controls: self.controls.clone(),
            selection: selection.clone(),
            pie_chart,
            scatter_chart,
        })
    }

    /// The selection the controls start with.
    pub fn default_selection(&self) -> Selection {
        Selection {
            site: Default::default(),
            payload_range: self.controls.payload_slider.default_range(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    pub fn aggregates(&self) -> &SiteAggregates {
        &self.aggregates
    }
}
