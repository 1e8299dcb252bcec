//! MACDLab CLI: MACD trend signals for a list of symbols.
//!
//! Commands:
//! - `analyze`: fetch each symbol, label MACD crossovers, print the report
//! - `config`: print the effective configuration as TOML

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use macdlab_core::data::Lookback;
use macdlab_runner::{
    analyze_symbols, dedup_symbols, export_batch_json, render_result, save_exports,
    AnalysisConfig, AnalysisRequest, ProviderKind, ReportOptions, StderrProgress,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "macdlab",
    about = "MACDLab CLI: MACD crossover signals for stocks"
)]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze symbols and print signals plus the final status of each.
    Analyze {
        /// Symbols to analyze (e.g., PETR4.SA VALE3.SA). Adds to the config's list.
        symbols: Vec<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data source: yahoo, csv, synthetic.
        #[arg(long)]
        source: Option<ProviderKind>,

        /// Directory of <SYMBOL>.csv files (csv source).
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Window ending at --end, e.g. 30d, 1mo, 1y. Defaults to 1mo.
        #[arg(long)]
        lookback: Option<Lookback>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show every labeled bar, not only entries.
        #[arg(long, default_value_t = false)]
        all_events: bool,

        /// Include daily returns, variation and candles.
        #[arg(long, default_value_t = false)]
        views: bool,

        /// Also write batch.json and per-symbol signal CSVs here.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Path to a TOML config file. Without one, prints the defaults.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Analyze {
            symbols,
            config,
            source,
            csv_dir,
            lookback,
            end,
            format,
            all_events,
            views,
            output_dir,
        } => {
            let mut cfg = load_config(config.as_ref())?;
            if let Some(kind) = source {
                cfg.provider.kind = kind;
            }
            if let Some(dir) = csv_dir {
                cfg.provider.csv_dir = dir;
            }
            if let Some(lookback) = lookback {
                cfg.lookback = lookback;
            }
            cfg.symbols = dedup_symbols(cfg.symbols.iter().chain(&symbols));
            cfg.validate()?;

            let options = ReportOptions { all_events, views };
            run_analyze(cfg, end, format, options, output_dir)
        }
        Commands::Config { config } => {
            let cfg = load_config(config.as_ref())?;
            print!("{}", cfg.to_toml()?);
            Ok(())
        }
    }
}

/// RUST_LOG wins; otherwise the --log-level flag. Logs go to stderr.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn parse_end(end: Option<&str>) -> Result<NaiveDate> {
    end.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("--end must be YYYY-MM-DD")
        .map(|d| d.unwrap_or_else(|| chrono::Local::now().date_naive()))
}

fn run_analyze(
    cfg: AnalysisConfig,
    end: Option<String>,
    format: OutputFormat,
    options: ReportOptions,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if cfg.symbols.is_empty() {
        bail!("no symbols given: pass them as arguments or list them in the config");
    }

    let request = AnalysisRequest {
        end: parse_end(end.as_deref())?,
        lookback: cfg.lookback,
        params: cfg.macd,
    };
    let provider = cfg
        .provider
        .build()
        .context("failed to construct data provider")?;
    debug!(provider = provider.name(), start = %request.start(), "provider ready");

    let results = analyze_symbols(
        provider.as_ref(),
        &cfg.symbols,
        &request,
        Some(&StderrProgress),
    );

    match format {
        OutputFormat::Text => {
            let blocks: Vec<String> = results.iter().map(|r| render_result(r, options)).collect();
            print!("{}", blocks.join("\n"));
        }
        OutputFormat::Json => println!("{}", export_batch_json(&results)?),
    }

    if let Some(dir) = output_dir {
        let written = save_exports(&results, &dir)?;
        info!(files = written.len(), dir = %dir.display(), "exports written");
    }

    if results.iter().any(|r| !r.is_ok()) {
        std::process::exit(1);
    }

    Ok(())
}
