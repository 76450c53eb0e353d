//! Dashboard rendering.
//!
//! This module renders a [`DashboardView`] as JSON for a chart renderer or
//! as Markdown tables for reading in a terminal.

use crate::analysis::rank_by_success_rate;
use crate::config::ReportConfig;
use crate::models::{
    ChartSpec, DashboardView, PieChart, ScatterChart, SiteAggregates, ViewMetadata,
};
use crate::view::selector::{COLOR_KEY_LABEL, PAYLOAD_AXIS_LABEL};
use crate::view::DashboardControls;
use anyhow::Result;

/// Generate the JSON document handed to the rendering surface.
pub fn generate_json_report(view: &DashboardView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(Into::into)
}

/// Generate a complete Markdown rendering of one view.
pub fn generate_markdown_report(view: &DashboardView, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", view.heading));
    output.push_str(&generate_metadata_section(&view.metadata));
    output.push_str(&generate_controls_section(&view.controls, view));
    output.push_str(&generate_chart_section(&view.pie_chart, config));
    output.push_str(&generate_chart_section(&view.scatter_chart, config));

    output
}

fn generate_metadata_section(metadata: &ViewMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Data Source:** `{}`\n", metadata.data_source));
    section.push_str(&format!("- **Records:** {}\n", metadata.record_count));
    section.push_str(&format!(
        "- **Payload Range in Data:** {} - {} kg\n",
        metadata.payload_bounds.min, metadata.payload_bounds.max
    ));
    section.push_str(&format!(
        "- **Generated:** {}\n\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    section
}

fn generate_controls_section(controls: &DashboardControls, view: &DashboardView) -> String {
    let mut section = String::new();
    let slider = &controls.payload_slider;

    section.push_str("## Selection\n\n");
    section.push_str(&format!("- **Launch Site:** {}\n", view.selection.site));
    section.push_str(&format!(
        "- **Payload Range:** {}\n",
        view.selection.payload_range
    ));
    section.push_str(&format!(
        "- **Available Sites:** {}\n",
        controls
            .site_dropdown
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    section.push_str(&format!(
        "- **Slider:** {} - {} kg, step {} ({})\n\n",
        slider.min,
        slider.max,
        slider.step,
        slider
            .marks
            .iter()
            .map(|m| m.label.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    ));

    section
}

fn generate_chart_section(chart: &ChartSpec, config: &ReportConfig) -> String {
    match chart {
        ChartSpec::Pie(pie) => generate_pie_section(pie, config.precision),
        ChartSpec::Scatter(scatter) => generate_scatter_section(scatter, config.include_points),
    }
}

fn generate_pie_section(pie: &PieChart, precision: usize) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", pie.title));
    section.push_str("| Slice | Share |\n");
    section.push_str("|:---|---:|\n");

    for slice in &pie.slices {
        section.push_str(&format!(
            "| {} | {} |\n",
            slice.label,
            format_percent(slice.value, precision)
        ));
    }
    section.push('\n');

    section
}

fn generate_scatter_section(scatter: &ScatterChart, include_points: bool) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", scatter.title));

    let visible: Vec<_> = scatter.visible_points().collect();
    let visible_successes = visible.iter().filter(|p| p.y == 1).count();

    if let Some([min, max]) = scatter.x_axis.range {
        section.push_str(&format!(
            "*{} axis shown from {} to {} kg*\n\n",
            PAYLOAD_AXIS_LABEL, min, max
        ));
    }
    section.push_str(&format!(
        "- **Launches:** {} ({} within the visible range, {} successful)\n",
        scatter.points.len(),
        visible.len(),
        visible_successes
    ));
    section.push_str(&format!(
        "- **{}:** {}\n\n",
        COLOR_KEY_LABEL,
        scatter.categories().join(", ")
    ));

    if include_points && !visible.is_empty() {
        section.push_str("| Payload (kg) | Class | Booster | Site |\n");
        section.push_str("|---:|:---:|:---|:---|\n");

        let mut rows = visible;
        rows.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        for point in rows {
            section.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                point.x, point.y, point.category, point.site
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the per-site statistics table printed by `--summary`.
pub fn generate_summary(aggregates: &SiteAggregates, precision: usize) -> String {
    let mut output = String::new();

    output.push_str("| Site | Launches | Successes | Success Rate | Share of Successes |\n");
    output.push_str("|:---|---:|---:|---:|---:|\n");

    for (site, rate) in rank_by_success_rate(aggregates) {
        let stats = aggregates.stats.get(site).copied().unwrap_or_default();
        let share = aggregates.global_share.get(site).unwrap_or(0.0);
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            site,
            stats.launches,
            stats.successes,
            format_percent(rate, precision),
            format_percent(share, precision)
        ));
    }

    let launches: usize = aggregates.stats.values().map(|s| s.launches).sum();
    output.push_str(&format!(
        "| **Total** | **{}** | **{}** | | |\n",
        launches, aggregates.total_successes
    ));

    output
}

fn format_percent(ratio: f64, precision: usize) -> String {
    format!("{:.*}%", precision, ratio * 100.0)
}
