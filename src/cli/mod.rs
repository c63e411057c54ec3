pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, DataArgs, ExportView, FilterArgs, OutputFormat};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::config::{resolve_config_path, PulseConfig};
use commands::analytics::{AlertsCommand, CompareCommand, RecommendCommand, TopCommand};
use commands::config::ConfigCommand;
use commands::export::ExportCommand;
use commands::report::ReportCommand;
use commands::stream::StreamCommand;
use commands::Command;

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("campaign_pulse={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    let working_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let config_path = resolve_config_path(cli.config.as_deref(), &working_dir);
    let config = PulseConfig::load_or_default(&config_path)
        .await
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    debug!("Using configuration {}", config_path.display());

    let command: Box<dyn Command + Send + Sync> = match cli.command {
        Commands::Report { data } => Box::new(ReportCommand::new(data, config)),
        Commands::Alerts { data } => Box::new(AlertsCommand::new(data, config)),
        Commands::Recommend { data } => Box::new(RecommendCommand::new(data, config)),
        Commands::Top { data, limit } => Box::new(TopCommand::new(data, limit, config)),
        Commands::Compare {
            data,
            campaign1,
            campaign2,
        } => Box::new(CompareCommand::new(data, campaign1, campaign2, config)),
        Commands::Export {
            data,
            filter,
            view,
            format,
            output,
        } => Box::new(ExportCommand::new(
            data,
            filter.into(),
            view,
            format,
            output,
            config,
        )),
        Commands::Stream { input } => Box::new(StreamCommand::new(input, config)),
        Commands::Config { action } => Box::new(ConfigCommand::new(action, config_path, config)),
    };

    command.execute().await
}
