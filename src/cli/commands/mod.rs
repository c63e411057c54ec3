use anyhow::Result;
use async_trait::async_trait;

pub mod analytics;
pub mod config;
pub mod export;
pub mod report;
pub mod stream;

/// Trait for CLI command implementations
#[async_trait]
pub trait Command {
    /// Execute the command
    async fn execute(&self) -> Result<()>;
}

/// Common utilities for command implementations
pub mod utils {
    use anyhow::{Context, Result};
    use serde::Serialize;
    use std::sync::Arc;

    use crate::cli::args::DataArgs;
    use crate::config::PulseConfig;
    use crate::source::{AnalyticsData, DashboardLoader, FileSource, OverviewData};

    pub async fn open_loader(data: &DataArgs) -> Result<DashboardLoader<FileSource>> {
        let source = FileSource::open(&data.data)
            .await
            .with_context(|| format!("Failed to open dataset {}", data.data.display()))?;
        Ok(DashboardLoader::new(Arc::new(source)))
    }

    pub fn window(data: &DataArgs, config: &PulseConfig) -> u32 {
        data.days.unwrap_or(config.analytics.default_days)
    }

    pub async fn load_overview(data: &DataArgs, config: &PulseConfig) -> Result<OverviewData> {
        let loader = open_loader(data).await?;
        loader
            .load_overview(window(data, config))
            .await
            .context("Failed to load overview data")
    }

    pub async fn load_analytics(data: &DataArgs, config: &PulseConfig) -> Result<AnalyticsData> {
        let loader = open_loader(data).await?;
        loader
            .load_analytics(window(data, config))
            .await
            .context("Failed to load analytics data")
    }

    pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
