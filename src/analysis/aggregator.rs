//! Per-site success aggregation.
//!
//! Computes, once per process, the two derived tables the pie chart reads:
//! each site's share of all successes, and each site's own success rate.

use crate::error::{DashboardError, Result};
use crate::models::{GlobalShare, LaunchRecord, SiteAggregates, SiteStats, SuccessRate};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Group records by launch site and count launches and successes.
pub fn site_stats(records: &[LaunchRecord]) -> BTreeMap<String, SiteStats> {
    let mut grouped: BTreeMap<String, SiteStats> = BTreeMap::new();

    for record in records {
        let stats = grouped.entry(record.launch_site.clone()).or_default();
        stats.launches += 1;
        if record.outcome.is_success() {
            stats.successes += 1;
        }
    }

    grouped
}

/// Compute both aggregate tables from the raw records.
///
/// When the dataset has no successes at all every global share is 0 and the
/// `ALL` pie refuses to render from them.
pub fn compute_aggregates(records: &[LaunchRecord]) -> Result<SiteAggregates> {
    let stats = site_stats(records);
    let total_successes: usize = stats.values().map(|s| s.successes).sum();

    if total_successes == 0 {
        warn!("Dataset has no successful launches; global shares are all zero");
    }

    let mut global_share = BTreeMap::new();
    let mut success_rate = BTreeMap::new();

    for (site, site_stats) in &stats {
        let share = if total_successes == 0 {
            0.0
        } else {
            site_stats.successes as f64 / total_successes as f64
        };
        global_share.insert(site.clone(), share);
        success_rate.insert(site.clone(), rate_for(site, site_stats)?);
    }

    debug!(
        "Aggregated {} records over {} sites ({} successes)",
        records.len(),
        stats.len(),
        total_successes
    );

    Ok(SiteAggregates {
        global_share: GlobalShare(global_share),
        success_rate: SuccessRate(success_rate),
        stats,
        total_successes,
    })
}

fn rate_for(site: &str, stats: &SiteStats) -> Result<f64> {
    if stats.launches == 0 {
        return Err(DashboardError::DegenerateAggregate {
            site: site.to_string(),
        });
    }
    Ok(stats.successes as f64 / stats.launches as f64)
}

/// Sites ordered by success rate (highest first), ties broken by name.
pub fn rank_by_success_rate(aggregates: &SiteAggregates) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = aggregates
        .success_rate
        .0
        .iter()
        .map(|(site, rate)| (site.as_str(), *rate))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    ranked
}
