//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{PayloadRange, SiteChoice};
use clap::Parser;
use std::path::PathBuf;

/// LaunchDash - launch records dashboard
///
/// Loads a CSV of launch records, aggregates success per launch site and
/// prints the pie and scatter chart descriptions for one selection.
///
/// Examples:
///   launchdash --data spacex_launch_dash.csv
///   launchdash --data spacex_launch_dash.csv --site "KSC LC-39A" --payload-range 2500,8000
///   launchdash --site ALL --format markdown --output dashboard.md
///   launchdash --summary
///   launchdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the launch records CSV
    ///
    /// Overrides [data].path from .launchdash.toml.
    #[arg(short, long, value_name = "FILE", env = "LAUNCHDASH_DATA")]
    pub data: Option<PathBuf>,

    /// Launch site to show, or ALL for every site
    #[arg(short, long, default_value = "ALL", value_name = "SITE")]
    pub site: String,

    /// Payload range for the scatter chart, in kg (MIN,MAX)
    ///
    /// Defaults to the slider's initial value (2500,8000).
    #[arg(
        short,
        long,
        value_name = "MIN,MAX",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub payload_range: Option<Vec<f64>>,

    /// Sites offered by the dropdown (comma-separated)
    ///
    /// Example: --sites "KSC LC-39A,VAFB SLC-4E"
    #[arg(long, value_name = "SITES", value_delimiter = ',')]
    pub sites: Option<Vec<String>>,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (json, markdown)
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .launchdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Leave the per-launch point table out of Markdown output
    #[arg(long)]
    pub no_points: bool,

    /// Print per-site launch statistics and exit without building charts
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .launchdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the rendered dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON chart descriptions (default)
    #[default]
    Json,
    /// Markdown tables
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the shape of the parsed arguments.
    ///
    /// Site membership and range ordering are checked by the chart
    /// selectors, not here.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref range) = self.payload_range {
            if range.len() != 2 {
                return Err(format!(
                    "--payload-range takes exactly two values (MIN,MAX), got {}",
                    range.len()
                ));
            }
        }

        if let Some(ref sites) = self.sites {
            if sites.iter().any(|s| s.trim().is_empty()) {
                return Err("--sites must not contain empty names".to_string());
            }
        }

        Ok(())
    }

    /// The site choice with surrounding whitespace removed, not yet
    /// checked against the catalog.
    pub fn site_choice(&self) -> SiteChoice {
        SiteChoice::parse(self.site.trim())
    }

    /// The requested payload range, if one was given.
    pub fn payload_range(&self) -> Option<PayloadRange> {
        match self.payload_range.as_deref() {
            Some([min, max]) => Some(PayloadRange::new(*min, *max)),
            _ => None,
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: Some(PathBuf::from("launches.csv")),
            site: "ALL".to_string(),
            payload_range: None,
            sites: None,
            output: None,
            format: OutputFormat::Json,
            config: None,
            no_points: false,
            summary: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::parse_from([
            "launchdash",
            "--data",
            "launches.csv",
            "--site",
            "KSC LC-39A",
            "--payload-range",
            "2500,8000",
            "--format",
            "markdown",
        ]);

        assert_eq!(args.site_choice(), SiteChoice::Site("KSC LC-39A".to_string()));
        assert_eq!(args.payload_range(), Some(PayloadRange::new(2500.0, 8000.0)));
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_passes_shape_check() {
        let args = Args::parse_from(["launchdash", "--payload-range", "9000,1000"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.payload_range(), Some(PayloadRange::new(9000.0, 1000.0)));
    }

    #[test]
    fn test_validation_range_arity() {
        let mut args = make_args();
        args.payload_range = Some(vec![1000.0]);
        assert!(args.validate().is_err());
        assert_eq!(args.payload_range(), None);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_site_choice_trims_shell_whitespace() {
        let mut args = make_args();
        args.site = "  KSC LC-39A \t".to_string();
        assert_eq!(args.site_choice(), SiteChoice::Site("KSC LC-39A".to_string()));

        args.site = " ALL ".to_string();
        assert_eq!(args.site_choice(), SiteChoice::All);
    }

    #[test]
    fn test_default_site_is_all() {
        let args = make_args();
        assert_eq!(args.site_choice(), SiteChoice::All);
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
