use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::analytics::{campaign_insights, filter_campaigns, CampaignFilter, MetricsAggregator};
use crate::cli::args::{DataArgs, ExportView, OutputFormat};
use crate::cli::commands::utils::load_analytics;
use crate::cli::commands::Command;
use crate::config::PulseConfig;
use crate::export::{ExportFormat, ExportService};
use crate::core::types::{Campaign, PerformanceRecord};
use std::collections::HashSet;
use std::path::PathBuf;

pub struct ExportCommand {
    data: DataArgs,
    filter: CampaignFilter,
    view: ExportView,
    format: ExportFormat,
    output: Option<PathBuf>,
    config: PulseConfig,
}

impl ExportCommand {
    pub fn new(
        data: DataArgs,
        filter: CampaignFilter,
        view: ExportView,
        format: OutputFormat,
        output: Option<PathBuf>,
        config: PulseConfig,
    ) -> Self {
        Self {
            data,
            filter,
            view,
            format: format.into(),
            output,
            config,
        }
    }
}

#[async_trait]
impl Command for ExportCommand {
    async fn execute(&self) -> Result<()> {
        let analytics = load_analytics(&self.data, &self.config).await?;
        let (campaigns, records) =
            select_campaigns(&self.filter, analytics.campaigns, analytics.performance);
        let service = ExportService::new();
        let records = &records;

        let content = match self.view {
            ExportView::Records => service.export(records, self.format),
            ExportView::Daily => {
                service.export(&MetricsAggregator::aggregate_by_date(records), self.format)
            }
            ExportView::Platforms => {
                service.export(&MetricsAggregator::aggregate_by_platform(records), self.format)
            }
            ExportView::Campaigns => service.export(
                &campaign_insights(&campaigns, records),
                self.format,
            ),
        }
        .context("Failed to render export")?;

        match &self.output {
            Some(path) => {
                service.write_to_file(&content, path).await?;
                info!("Exported {:?} view as {} to {}", self.view, self.format, path.display());
            }
            None => println!("{content}"),
        }
        Ok(())
    }
}

/// Keep the campaigns matching `filter` and only the records that belong to them.
fn select_campaigns(
    filter: &CampaignFilter,
    campaigns: Vec<Campaign>,
    records: Vec<PerformanceRecord>,
) -> (Vec<Campaign>, Vec<PerformanceRecord>) {
    if filter.is_empty() {
        return (campaigns, records);
    }

    let selected: Vec<Campaign> = filter_campaigns(&campaigns, filter)
        .into_iter()
        .cloned()
        .collect();
    let ids: HashSet<&str> = selected.iter().map(|c| c.id.as_str()).collect();
    let records = records
        .into_iter()
        .filter(|r| ids.contains(r.campaign_id.as_str()))
        .collect();
    debug!(
        "Filter kept {} of {} campaigns",
        selected.len(),
        campaigns.len()
    );
    (selected, records)
}
