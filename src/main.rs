//! LaunchDash - launch records dashboard
//!
//! A CLI tool that loads a CSV of launch records, aggregates success per
//! launch site and renders the dashboard's pie and scatter chart
//! descriptions for one site/payload selection.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, missing or malformed data file, etc.)
//!   2 - Selection rejected (unknown site, inverted payload range)

mod analysis;
mod cli;
mod config;
mod data;
mod error;
mod models;
mod report;
mod view;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use data::Dataset;
use models::Selection;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use view::Dashboard;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("LaunchDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_dashboard(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Dashboard failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .launchdash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to change the data path, site list and slider.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so JSON on stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load the data, build one view and write it out. Returns exit code (0 or 2).
fn run_dashboard(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let dataset = Dataset::load(&config.data.path)?;
    let catalog = config
        .sites
        .catalog()
        .context("Invalid [sites] configuration")?;
    let dashboard = Dashboard::new(dataset, catalog, &config.slider)?;

    if args.summary {
        return handle_summary(&dashboard, &config);
    }

    let selection = Selection {
        site: args.site_choice(),
        payload_range: args
            .payload_range()
            .unwrap_or_else(|| dashboard.default_selection().payload_range),
    };
    info!(
        "Rendering view for site {} with payload range {}",
        selection.site, selection.payload_range
    );

    let view = match dashboard.view(&selection) {
        Ok(view) => view,
        Err(e) if e.is_rejected_input() => {
            warn!("Selection rejected: {}", e);
            eprintln!("\n⛔ Selection rejected: {}", e);
            eprintln!(
                "   Valid sites: ALL, {}",
                dashboard.catalog().sites().join(", ")
            );
            return Ok(2);
        }
        Err(e) => return Err(e.into()),
    };
    debug!(
        "Built charts '{}' and '{}'",
        view.pie_chart.title(),
        view.scatter_chart.title()
    );

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&view)?,
        OutputFormat::Markdown => report::generate_markdown_report(&view, &config.report),
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write dashboard to {}", path.display()))?;
            if !args.quiet {
                eprintln!("✅ Dashboard saved to: {}", path.display());
            }
        }
        None => println!("{}", output),
    }

    Ok(0)
}

/// Handle --summary: print per-site statistics without building charts.
fn handle_summary(dashboard: &Dashboard, config: &Config) -> Result<i32> {
    let dataset = dashboard.dataset();

    println!(
        "📊 {} launches from {}",
        dataset.records.len(),
        dataset.source.display()
    );
    println!(
        "   Payload range: {} - {} kg\n",
        dataset.bounds.min, dataset.bounds.max
    );
    println!(
        "{}",
        report::generate_summary(dashboard.aggregates(), config.report.precision)
    );

    let outside = dataset.sites_outside(dashboard.catalog());
    if !outside.is_empty() {
        println!("⚠️  Not selectable from the dropdown: {}", outside.join(", "));
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
