//! Chart selection.
//!
//! Each function turns one control state into a chart description. They
//! are pure: the records and aggregates are only read, and every input is
//! validated here rather than trusted from the caller.

use crate::error::{DashboardError, Result};
use crate::models::{
    Axis, ChartSpec, LaunchRecord, PayloadRange, PieChart, PieSlice, ScatterChart, ScatterPoint,
    SiteAggregates, SiteCatalog, SiteChoice,
};
use tracing::debug;

pub const PIE_TITLE_ALL_SITES: &str = "Total successful launches by site";
const PIE_TITLE_SITE_PREFIX: &str = "Total successful launches for site ";
const SCATTER_TITLE_PREFIX: &str = "Correlation between payload and success for ";

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const CLASS_AXIS_LABEL: &str = "class";
pub const COLOR_KEY_LABEL: &str = "Booster Version Category";

pub const FAILURE_LABEL: &str = "Failure";
pub const SUCCESS_LABEL: &str = "Success";

/// Build the success pie for the chosen site.
///
/// `ALL` gives one slice per site holding its share of all successes; with no
/// successes at all there is nothing to share out and the pie is
/// `DegenerateAggregate`. A single site gives a Failure/Success split of that
/// site's own rate.
pub fn select_pie_chart(
    site: &SiteChoice,
    catalog: &SiteCatalog,
    aggregates: &SiteAggregates,
) -> Result<ChartSpec> {
    catalog.validate(site)?;

    let chart = match site {
        SiteChoice::All if aggregates.total_successes == 0 => {
            return Err(DashboardError::DegenerateAggregate {
                site: site.to_string(),
            });
        }
        SiteChoice::All => PieChart {
            title: PIE_TITLE_ALL_SITES.to_string(),
            slices: aggregates
                .global_share
                .0
                .iter()
                .map(|(site, share)| PieSlice {
                    label: site.clone(),
                    value: *share,
                })
                .collect(),
        },
        SiteChoice::Site(name) => {
            let rate = aggregates
                .success_rate
                .get(name)
                .ok_or_else(|| DashboardError::DegenerateAggregate { site: name.clone() })?;

            PieChart {
                title: format!("{}{}", PIE_TITLE_SITE_PREFIX, name),
                slices: vec![
                    PieSlice {
                        label: FAILURE_LABEL.to_string(),
                        value: 1.0 - rate,
                    },
                    PieSlice {
                        label: SUCCESS_LABEL.to_string(),
                        value: rate,
                    },
                ],
            }
        }
    };

    debug!("Pie chart for {}: {} slices", site, chart.slices.len());

    Ok(ChartSpec::Pie(chart))
}

/// Build the payload/outcome scatter for the chosen site.
///
/// The payload range only clamps the x axis; every record at the site
/// still becomes a point.
pub fn select_scatter_chart(
    site: &SiteChoice,
    payload_range: PayloadRange,
    catalog: &SiteCatalog,
    records: &[LaunchRecord],
) -> Result<ChartSpec> {
    payload_range.validate()?;
    catalog.validate(site)?;

    let points: Vec<ScatterPoint> = records
        .iter()
        .filter(|record| match site {
            SiteChoice::All => true,
            SiteChoice::Site(name) => &record.launch_site == name,
        })
        .map(|record| ScatterPoint {
            x: record.payload_mass_kg,
            y: record.outcome.as_class(),
            category: record.booster_category.clone(),
            site: record.launch_site.clone(),
        })
        .collect();

    let subject = match site {
        SiteChoice::All => "all sites".to_string(),
        SiteChoice::Site(name) => format!("site {}", name),
    };

    debug!(
        "Scatter chart for {}: {} points, x range [{}, {}]",
        site,
        points.len(),
        payload_range.min,
        payload_range.max
    );

    Ok(ChartSpec::Scatter(ScatterChart {
        title: format!("{}{}", SCATTER_TITLE_PREFIX, subject),
        x_axis: Axis {
            label: PAYLOAD_AXIS_LABEL.to_string(),
            range: Some([payload_range.min, payload_range.max]),
        },
        y_axis: Axis {
            label: CLASS_AXIS_LABEL.to_string(),
            range: None,
        },
        points,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_aggregates;
    use crate::data::loader::read_records;
    use crate::models::Outcome;
    use std::path::Path;

    fn fixture_records() -> Vec<LaunchRecord> {
        let csv = include_str!("../../fixtures/spacex_launch_dash.csv");
        read_records(csv.as_bytes(), Path::new("fixture.csv")).unwrap()
    }

    fn setup() -> (Vec<LaunchRecord>, SiteAggregates, SiteCatalog) {
        let records = fixture_records();
        let aggregates = compute_aggregates(&records).unwrap();
        (records, aggregates, SiteCatalog::default())
    }

    #[test]
    fn test_pie_all_sites() {
        let (_, aggregates, catalog) = setup();

        let spec = select_pie_chart(&SiteChoice::All, &catalog, &aggregates).unwrap();
        let pie = spec.as_pie().unwrap();

        assert_eq!(pie.title, "Total successful launches by site");
        assert_eq!(pie.slices.len(), 4);
        assert!((pie.total() - 1.0).abs() < 1e-9);

        // 5 of the fixture's 13 successes launched from KSC LC-39A.
        let ksc = pie.slice("KSC LC-39A").unwrap();
        assert!((ksc.value - 5.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_pie_single_site() {
        let (_, aggregates, catalog) = setup();
        let site = SiteChoice::parse("KSC LC-39A");

        let spec = select_pie_chart(&site, &catalog, &aggregates).unwrap();
        let pie = spec.as_pie().unwrap();

        assert_eq!(pie.title, "Total successful launches for site KSC LC-39A");
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].label, "Failure");
        assert_eq!(pie.slices[1].label, "Success");
        assert!((pie.total() - 1.0).abs() < 1e-12);
        assert_eq!(
            pie.slice("Success").unwrap().value,
            aggregates.success_rate.get("KSC LC-39A").unwrap()
        );
        assert!((pie.slice("Success").unwrap().value - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_pie_every_catalog_site_sums_to_one() {
        let (_, aggregates, catalog) = setup();

        for site in catalog.sites() {
            let spec = select_pie_chart(&SiteChoice::parse(site), &catalog, &aggregates).unwrap();
            let pie = spec.as_pie().unwrap();
            assert!(pie.title.ends_with(site.as_str()));
            assert!((pie.total() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pie_rejects_unknown_site() {
        let (_, aggregates, catalog) = setup();

        let err = select_pie_chart(&SiteChoice::parse("NONEXISTENT"), &catalog, &aggregates)
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection { site } if site == "NONEXISTENT"));
    }

    #[test]
    fn test_pie_catalog_site_without_launches() {
        let (records, _, _) = setup();
        let ksc_only: Vec<LaunchRecord> = records
            .into_iter()
            .filter(|r| r.launch_site == "KSC LC-39A")
            .collect();
        let aggregates = compute_aggregates(&ksc_only).unwrap();

        let err = select_pie_chart(
            &SiteChoice::parse("VAFB SLC-4E"),
            &SiteCatalog::default(),
            &aggregates,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::DegenerateAggregate { .. }));
    }

    #[test]
    fn test_pie_all_sites_without_successes() {
        let (records, _, catalog) = setup();
        let failures: Vec<LaunchRecord> = records
            .into_iter()
            .map(|r| LaunchRecord {
                outcome: Outcome::Failure,
                ..r
            })
            .collect();
        let aggregates = compute_aggregates(&failures).unwrap();

        let err = select_pie_chart(&SiteChoice::All, &catalog, &aggregates).unwrap_err();
        assert!(matches!(err, DashboardError::DegenerateAggregate { site } if site == "ALL"));

        // Single-site pies stay well defined: all failure.
        let chart = select_pie_chart(&SiteChoice::parse("KSC LC-39A"), &catalog, &aggregates)
            .unwrap();
        let pie = chart.as_pie().unwrap();
        assert_eq!(pie.slices[0].value, 1.0);
        assert_eq!(pie.slices[1].value, 0.0);
    }

    #[test]
    fn test_pie_site_is_matched_exactly() {
        let (_, aggregates, catalog) = setup();

        let err = select_pie_chart(&SiteChoice::parse("  KSC LC-39A \t"), &catalog, &aggregates)
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection { site } if site == "  KSC LC-39A \t"));
    }

    #[test]
    fn test_scatter_all_sites_keeps_every_record() {
        let (records, _, catalog) = setup();

        let spec = select_scatter_chart(
            &SiteChoice::All,
            PayloadRange::new(0.0, 10000.0),
            &catalog,
            &records,
        )
        .unwrap();
        let scatter = spec.as_scatter().unwrap();

        assert_eq!(scatter.title, "Correlation between payload and success for all sites");
        assert_eq!(scatter.points.len(), records.len());
        assert_eq!(scatter.x_axis.label, "Payload Mass (kg)");
        assert_eq!(scatter.x_axis.range, Some([0.0, 10000.0]));
        assert!(scatter.points.iter().all(|p| p.y <= 1));
    }

    #[test]
    fn test_scatter_single_site_clamps_axis_only() {
        let (records, _, catalog) = setup();

        let spec = select_scatter_chart(
            &SiteChoice::parse("KSC LC-39A"),
            PayloadRange::new(2500.0, 8000.0),
            &catalog,
            &records,
        )
        .unwrap();
        let scatter = spec.as_scatter().unwrap();

        assert_eq!(
            scatter.title,
            "Correlation between payload and success for site KSC LC-39A"
        );
        assert!(scatter.points.iter().all(|p| p.site == "KSC LC-39A"));
        assert_eq!(scatter.points.len(), 6);
        assert_eq!(scatter.x_axis.range, Some([2500.0, 8000.0]));
        // The 2490 kg launch is computed but sits outside the visible range.
        assert_eq!(scatter.visible_points().count(), 5);
    }

    #[test]
    fn test_scatter_point_shape() {
        let (records, _, catalog) = setup();

        let spec = select_scatter_chart(
            &SiteChoice::parse("CCAFS SLC-40"),
            PayloadRange::default(),
            &catalog,
            &records,
        )
        .unwrap();
        let scatter = spec.as_scatter().unwrap();

        let first = &scatter.points[0];
        assert_eq!(first.x, 2205.0);
        assert_eq!(first.y, 1);
        assert_eq!(first.category, "B4");
        assert_eq!(scatter.categories(), vec!["B4", "B5", "FT"]);
    }

    #[test]
    fn test_scatter_rejects_inverted_range() {
        let (records, _, catalog) = setup();

        let err = select_scatter_chart(
            &SiteChoice::All,
            PayloadRange::new(9000.0, 1000.0),
            &catalog,
            &records,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidRange { min, max } if min == 9000.0 && max == 1000.0
        ));
    }

    #[test]
    fn test_scatter_rejects_unknown_site() {
        let (records, _, catalog) = setup();

        let err = select_scatter_chart(
            &SiteChoice::parse("Omelek"),
            PayloadRange::default(),
            &catalog,
            &records,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection { .. }));
    }
}
