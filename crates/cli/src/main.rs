//! SKU Pulse CLI - Portfolio reports and AI business analysis.
//!
//! # Usage
//!
//! ```bash
//! # Full dashboard over the built-in sample dataset
//! sku-pulse report
//!
//! # Dashboard for a weekly export, with a fresh AI analysis
//! sku-pulse report --data week-14.yaml --analyze
//!
//! # Portfolio KPIs as JSON
//! sku-pulse metrics --json
//!
//! # AI analysis only (Ctrl-C cancels the request)
//! sku-pulse analyze --data week-14.json
//! ```
//!
//! # Commands
//!
//! - `report` - KPI cards, top products, SKU table and analysis panel
//! - `metrics` - Portfolio KPIs only
//! - `analyze` - One Gemini analysis of the dataset

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sku_pulse_dashboard::{LogFormat, TelemetryConfig};

mod commands;

#[derive(Parser)]
#[command(name = "sku-pulse")]
#[command(author, version, about = "SKU Pulse eCommerce analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full dashboard
    Report {
        /// SKU dataset (.json, .yaml or .yml); defaults to the sample set
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Request an AI analysis before rendering
        #[arg(short, long)]
        analyze: bool,
    },
    /// Print portfolio KPIs
    Metrics {
        /// SKU dataset (.json, .yaml or .yml); defaults to the sample set
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Request an AI analysis of the dataset
    Analyze {
        /// SKU dataset (.json, .yaml or .yml); defaults to the sample set
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &TelemetryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays clean
/// for reports and JSON output.
fn init_tracing(config: &TelemetryConfig, with_sentry: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    // (target prefix match covers sku_pulse_core and sku_pulse_dashboard)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sku_pulse=info".into());

    let is_json = config.log_format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let sentry_layer =
        with_sentry.then(|| sentry_tracing::layer().event_filter(sentry_event_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Fall back to defaults so a bad LOG_FORMAT is still reported through tracing
    let (telemetry, telemetry_error) = match TelemetryConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (TelemetryConfig::default(), Some(e)),
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&telemetry);
    init_tracing(&telemetry, sentry_guard.is_some());
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    let result: Result<(), Box<dyn std::error::Error>> = match telemetry_error {
        Some(e) => Err(e.into()),
        None => run(cli).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // process::exit skips destructors; flush pending Sentry events first
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Report { data, analyze } => {
            commands::report::run(data.as_deref(), analyze).await?;
        }
        Commands::Metrics { data, json } => {
            commands::metrics::run(data.as_deref(), json).await?;
        }
        Commands::Analyze { data } => {
            commands::analyze::run(data.as_deref()).await?;
        }
    }
    Ok(())
}
