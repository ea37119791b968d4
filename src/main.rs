//! `saw-rank` — rank packages from a CSV file with Simple Additive Weighting.
//!
//! Prints the ranking outcome as JSON on stdout; logs go to stderr.
//! Exits with status 2 when the weights are rejected.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use saw_ranker::config::SawConfig;
use saw_ranker::ingest::{CsvSource, RecordSource};
use saw_ranker::metrics::Metrics;
use saw_ranker::ranker::RankOutcome;
use saw_ranker::weights::{load_weights_file, parse_weights_list};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Npm,
    Quality,
}

#[derive(Debug, Parser)]
#[command(name = "saw-rank", version, about = "Rank packages with Simple Additive Weighting")]
struct Cli {
    /// CSV file with one package per row.
    #[arg(long)]
    data: PathBuf,

    /// TOML config (criteria, default weights, validation policy).
    #[arg(long, env = "SAW_CONFIG_PATH", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in criteria preset, used when no config file is given.
    #[arg(long, value_enum, default_value_t = Preset::Npm)]
    preset: Preset,

    /// Comma separated weights in criteria order, e.g. 0.3,0.3,0.2,0.2
    #[arg(long, conflicts_with = "weights_file")]
    weights: Option<String>,

    /// JSON file with a weight vector.
    #[arg(long)]
    weights_file: Option<PathBuf>,

    /// Skip the "weights sum to 1.0" check.
    #[arg(long)]
    no_sum_check: bool,

    /// Accept negative weights.
    #[arg(long)]
    allow_negative: bool,

    /// Keep only the first N results.
    #[arg(long)]
    limit: Option<usize>,

    /// Print Prometheus metrics to stderr after the run.
    #[arg(long)]
    metrics: bool,
}

/// Compact logs on stderr. `RUST_LOG` overrides the default filter,
/// `SAW_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("saw=info,warn"));
    let json = std::env::var("SAW_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<SawConfig> {
    let mut cfg = match &cli.config {
        Some(path) => SawConfig::from_path(path)?,
        None => {
            let mut cfg = match cli.preset {
                Preset::Npm => SawConfig::npm_packages(),
                Preset::Quality => SawConfig::library_quality(),
            };
            cfg.apply_env();
            cfg
        }
    };
    if cli.no_sum_check {
        cfg.ranking.enforce_weight_sum = false;
    }
    if cli.allow_negative {
        cfg.ranking.reject_negative_weights = false;
    }
    Ok(cfg)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let metrics = if cli.metrics {
        Some(Metrics::init()?)
    } else {
        None
    };

    let cfg = load_config(&cli)?;
    let ranker = cfg.ranker()?;

    let weights = match (&cli.weights, &cli.weights_file) {
        (Some(list), _) => Some(parse_weights_list(list).context("--weights")?),
        (None, Some(path)) => Some(load_weights_file(path)?),
        (None, None) => None,
    };

    let source = CsvSource::new(&cli.data, ranker.criteria().clone(), &cfg.ranking.name_field);
    let records = source.load()?;
    tracing::info!(target: "saw", source = source.name(), records = records.len(), "records loaded");

    let mut outcome: RankOutcome = ranker.rank(&records, weights.as_deref()).into();
    if let (RankOutcome::Results(results), Some(n)) = (&mut outcome, cli.limit) {
        results.truncate(n);
    }

    let json = serde_json::to_string_pretty(&outcome)?;
    println!("{json}");

    if let Some(m) = metrics {
        eprintln!("{}", m.render());
    }

    Ok(if outcome.is_error() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(target: "saw", error = ?e, "saw-rank failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
