#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! `Homefinder` CLI - home search over a CSV dataset
//!
//! Usage:
//!   `homefinder build ./homes.csv`
//!   `homefinder query ./homes.csv --beds 3 --min-baths 2 --max-price 400000`
//!   `homefinder stats ./homes.csv`

mod dataset;
mod filters;
mod home;
mod output;
mod search;

use anyhow::Context;
use clap::{Parser, Subcommand};
use homefinder_core::{HomefinderConfig, PriceRange, PropertyQuery};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dataset::Dataset;
use filters::{CallerFilters, Features, YearBuilt};
use output::OutputFormat;
use search::{Indexes, Method, SearchRequest};

#[derive(Parser)]
#[command(name = "homefinder")]
#[command(author, version, about = "Homefinder CLI - filter homes by beds, baths and price")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "HOMEFINDER_CONFIG", default_value = "homefinder.toml")]
    config: PathBuf,

    /// Price bin width (overrides configuration)
    #[arg(long, global = true)]
    price_bin: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build both indexes and report their shape
    Build {
        /// Path to CSV dataset
        file: PathBuf,
    },

    /// Search homes
    Query {
        /// Path to CSV dataset
        file: PathBuf,

        /// Exact number of bedrooms
        #[arg(long)]
        beds: Option<u32>,

        /// Minimum number of full baths
        #[arg(long)]
        min_baths: Option<u32>,

        /// Lower price bound
        #[arg(long)]
        min_price: Option<f64>,

        /// Upper price bound
        #[arg(long)]
        max_price: Option<f64>,

        /// Year-built band: "After 2020", "2010-2020", "2000-2009", "1990-1999", "Before 1990"
        #[arg(long)]
        year_built: Option<String>,

        /// Require a basement
        #[arg(long)]
        basement: bool,

        /// Require a fireplace
        #[arg(long)]
        fireplace: bool,

        /// Require an attic
        #[arg(long)]
        attic: bool,

        /// Require a garage
        #[arg(long)]
        garage: bool,

        /// Posting store(s) to query
        #[arg(long, value_enum, default_value = "both")]
        method: Method,

        /// Maximum homes to print (defaults to query.max_results)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print posting key counts and maxima as JSON
    Stats {
        /// Path to CSV dataset
        file: PathBuf,
    },
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: &Path, price_bin: Option<u64>) -> anyhow::Result<HomefinderConfig> {
    let mut config = HomefinderConfig::load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    if let Some(bin) = price_bin {
        config.index.price_bin = bin;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn open(file: &Path, config: &HomefinderConfig) -> anyhow::Result<(Dataset, Indexes)> {
    let dataset = Dataset::load(file, &config.columns)?;
    let indexes = Indexes::build(&dataset, &config.index)?;
    Ok((dataset, indexes))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config, cli.price_bin)?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Build { file } => {
            let (dataset, indexes) = open(&file, &config)?;
            output::print_build(dataset.len(), &indexes.reports);
        }
        Commands::Query {
            file,
            beds,
            min_baths,
            min_price,
            max_price,
            year_built,
            basement,
            fireplace,
            attic,
            garage,
            method,
            limit,
            format,
        } => {
            let price = PriceRange::new(
                min_price.unwrap_or(config.query.price_min),
                max_price.unwrap_or_else(|| config.effective_price_max()),
            );
            let mut query = PropertyQuery::new().price(price);
            query.bedrooms = beds;
            query.min_fullbaths = min_baths;

            let request = SearchRequest {
                query,
                filters: CallerFilters {
                    year_built: year_built.as_deref().and_then(YearBuilt::from_label),
                    features: Features {
                        basement,
                        fireplace,
                        attic,
                        garage,
                    },
                },
                method,
                limit: limit.unwrap_or(config.query.max_results),
                year_label: year_built,
            };

            let (dataset, indexes) = open(&file, &config)?;
            let response = search::search(&dataset, &indexes, &request)?;
            output::print_search(&response, format)?;
        }
        Commands::Stats { file } => {
            let (dataset, indexes) = open(&file, &config)?;
            output::print_stats(dataset.len(), &indexes)?;
        }
    }

    Ok(())
}
