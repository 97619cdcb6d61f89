//! CLI argument definitions for assetq.
//!
//! # Commands
//!
//! | Command | Operation |
//! |---------|-----------|
//! | `price` | `getAssetPrice` |
//! | `classification` | `getAssetClassification` |
//! | `research` | `getAssetResearchData` |
//! | `baskets` | `getAssetBaskets` |
//! | `batch` | NDJSON stream of any of the above |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--universe` | `$ASSETQ_UNIVERSE_PATH` | Universe snapshot file |
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--no-negative-growth` | `false` | Reject `--min-growth` below zero |
//!
//! # Examples
//!
//! ```bash
//! assetq --universe fixtures/universe.json price AAPL
//! assetq --universe fixtures/universe.json baskets --sector Technology --min-growth 20
//! assetq --universe fixtures/universe.json baskets --price-range '<100'
//! echo '{"operation":"getAssetPrice","payload":{"assetId":"MSFT"}}' | assetq batch
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Asset query backend: price, classification, research and basket search
/// over a universe snapshot file.
#[derive(Debug, Parser)]
#[command(name = "assetq", author, version, about = "Asset price, classification, research and basket queries")]
pub struct Cli {
    /// Universe snapshot file (JSON). Falls back to ASSETQ_UNIVERSE_PATH.
    #[arg(long, global = true)]
    pub universe: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Reject negative --min-growth bounds.
    #[arg(long, global = true, default_value_t = false)]
    pub no_negative_growth: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current price snapshot for one asset.
    ///
    ///   assetq price AAPL
    Price(AssetArgs),

    /// Sector, industry, market cap, geography and type for one asset.
    ///
    ///   assetq classification MSFT
    Classification(AssetArgs),

    /// Fundamentals and analyst consensus for one asset.
    ///
    ///   assetq research NVDA --pretty
    Research(AssetArgs),

    /// Assets matching every supplied criterion.
    ///
    ///   assetq baskets --sector Technology --market-cap "Large Cap"
    ///   assetq baskets --price-range 50-200 --min-growth 10
    Baskets(BasketArgs),

    /// Answer newline-delimited JSON requests, one envelope per line.
    ///
    /// Each line is {"operation": "<name>", "payload": {...}}.
    Batch(BatchArgs),
}

/// Arguments for single-asset lookups.
#[derive(Debug, Args)]
pub struct AssetArgs {
    /// Asset identifier (ticker).
    pub asset_id: String,
}

/// Arguments for the `baskets` command.
#[derive(Debug, Args)]
pub struct BasketArgs {
    /// Exact sector name, e.g. "Technology".
    #[arg(long)]
    pub sector: Option<String>,

    /// Exact industry name, e.g. "Software".
    #[arg(long)]
    pub industry: Option<String>,

    /// Market-cap bucket, e.g. "Large Cap".
    #[arg(long)]
    pub market_cap: Option<String>,

    /// Price bound: LOW-HIGH, <X, <=X, >X or >=X.
    #[arg(long, allow_hyphen_values = true)]
    pub price_range: Option<String>,

    /// Minimum revenue growth in percent.
    #[arg(long, allow_hyphen_values = true)]
    pub min_growth: Option<f64>,
}

/// Arguments for the `batch` command.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// NDJSON request file; reads stdin when omitted.
    pub input: Option<PathBuf>,
}
