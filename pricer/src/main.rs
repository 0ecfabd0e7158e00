//! bsm-pricer - command line front end for the Black-Scholes-Merton engine
//!
//! # Commands
//!
//! - `bsm-pricer price` - prices, greeks and the put-call parity check
//! - `bsm-pricer curve` - call/put prices across a sweep of underlying prices

use std::path::PathBuf;

use bsm_pricing::CurveSettings;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod format;

pub use error::{CliError, Result};

use commands::curve::CurveFormat;
use commands::price::PriceFormat;
use commands::ParameterArgs;
use config::{LogLevel, PricerConfig};

#[derive(Parser)]
#[command(name = "bsm-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Configuration file path (defaults to ./bsm-pricer.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one option and show its greeks
    Price {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = PriceFormat::Table)]
        format: PriceFormat,
    },

    /// Sample call and put prices across underlying prices
    Curve {
        #[command(flatten)]
        params: ParameterArgs,

        /// Half-width of the price window, in price units
        #[arg(long)]
        price_range: Option<f64>,

        /// Number of samples
        #[arg(short = 'n', long)]
        num_points: Option<usize>,

        /// Price the samples on all cores
        #[arg(long)]
        parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = CurveFormat::Csv)]
        format: CurveFormat,
    },
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PricerConfig::resolve(cli.config.as_deref())?;

    let level = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => level.parse::<LogLevel>()?,
        (None, true) => LogLevel::Debug,
        (None, false) => config.log_level,
    };
    init_tracing(level);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Price { params, format } => {
            let params = params.resolve(&config.defaults)?;
            commands::price::run(&params, format)
        }
        Commands::Curve {
            params,
            price_range,
            num_points,
            parallel,
            format,
        } => {
            let params = params.resolve(&config.defaults)?;
            let settings = CurveSettings {
                price_range: price_range.unwrap_or(config.curve.price_range),
                num_points: num_points.unwrap_or(config.curve.num_points),
            };
            commands::curve::run(&params, settings, parallel, format)
        }
    }
}
