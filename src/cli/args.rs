use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analytics::CampaignFilter;
use crate::core::types::Platform;
use crate::export::ExportFormat;

/// Main CLI structure for campaign-pulse.
///
/// Reads a campaign/performance dataset and prints the dashboard
/// analytics (summary, alerts, recommendations, rankings, comparisons) or
/// exports them, and replays recorded live-update streams.
///
/// # Examples
///
/// ```bash
/// # Full dashboard report for the last 7 days
/// campaign-pulse report --data dataset.json --days 7
///
/// # Daily totals as CSV
/// campaign-pulse export --data dataset.json --view daily --format csv -o daily.csv
///
/// # Replay a captured stream
/// campaign-pulse stream --input updates.ndjson
/// ```
#[derive(Parser)]
#[command(name = "campaign-pulse")]
#[command(about = "Real-time advertising performance analytics")]
#[command(version)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./.campaign-pulse.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Dataset selection shared by the analytics commands
#[derive(Args, Clone, Debug)]
pub struct DataArgs {
    /// JSON dataset with `campaigns` and `performance` arrays
    #[arg(short, long)]
    pub data: PathBuf,

    /// Look-back window in days (default from configuration)
    #[arg(long)]
    pub days: Option<u32>,
}

/// Campaign selection for exports
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Only campaigns on this platform (google_ads or facebook_ads)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Only campaigns whose name contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
}

impl From<FilterArgs> for CampaignFilter {
    fn from(args: FilterArgs) -> Self {
        CampaignFilter {
            platform: args.platform,
            search: args.search,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full dashboard report as JSON
    Report {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Evaluate alert rules against the dataset summary
    Alerts {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Generate optimization recommendations
    Recommend {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Rank campaigns by ROI
    Top {
        #[command(flatten)]
        data: DataArgs,

        /// Number of campaigns to show (default from configuration)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Compare two campaigns by id
    Compare {
        #[command(flatten)]
        data: DataArgs,

        /// First campaign id
        campaign1: String,

        /// Second campaign id
        campaign2: String,
    },

    /// Export records or aggregates as CSV or JSON
    Export {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// What to export
        #[arg(long, value_enum, default_value = "records")]
        view: ExportView,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay newline-delimited stream messages and print the update buffer
    Stream {
        /// File with one message per line, or `-` for stdin
        #[arg(short, long)]
        input: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone, Copy, Debug)]
pub enum ConfigAction {
    /// Write the default configuration
    Init,

    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportView {
    /// Raw performance records
    Records,
    /// Totals per date
    Daily,
    /// Spend per platform
    Platforms,
    /// Totals and tier per campaign
    Campaigns,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}
