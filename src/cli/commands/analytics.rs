use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::analytics::{
    AlertNotifier, AlertRulesEngine, ComparisonEngine, MetricsAggregator, RecommendationEngine,
};
use crate::cli::args::DataArgs;
use crate::cli::commands::utils::{load_analytics, load_overview, print_json};
use crate::cli::commands::Command;
use crate::config::PulseConfig;

pub struct AlertsCommand {
    data: DataArgs,
    config: PulseConfig,
}

impl AlertsCommand {
    pub fn new(data: DataArgs, config: PulseConfig) -> Self {
        Self { data, config }
    }
}

#[async_trait]
impl Command for AlertsCommand {
    async fn execute(&self) -> Result<()> {
        let overview = load_overview(&self.data, &self.config).await?;
        let alerts = AlertRulesEngine::new(self.config.alert_thresholds()).evaluate(&overview.summary);
        if alerts.is_empty() {
            info!("No alerts for the current summary");
        }
        AlertNotifier::notify_alerts(&alerts);
        print_json(&alerts)
    }
}

pub struct RecommendCommand {
    data: DataArgs,
    config: PulseConfig,
}

impl RecommendCommand {
    pub fn new(data: DataArgs, config: PulseConfig) -> Self {
        Self { data, config }
    }
}

#[async_trait]
impl Command for RecommendCommand {
    async fn execute(&self) -> Result<()> {
        let overview = load_overview(&self.data, &self.config).await?;
        let recommendations = RecommendationEngine::new(self.config.recommendation_thresholds())
            .generate(&overview.summary, &overview.performance);
        print_json(&recommendations)
    }
}

pub struct TopCommand {
    data: DataArgs,
    limit: Option<usize>,
    config: PulseConfig,
}

impl TopCommand {
    pub fn new(data: DataArgs, limit: Option<usize>, config: PulseConfig) -> Self {
        Self { data, limit, config }
    }
}

#[async_trait]
impl Command for TopCommand {
    async fn execute(&self) -> Result<()> {
        let analytics = load_analytics(&self.data, &self.config).await?;
        let limit = self.limit.unwrap_or(self.config.analytics.top_campaigns_limit);
        print_json(&MetricsAggregator::top_campaigns_by_roi(&analytics.performance, limit))
    }
}

pub struct CompareCommand {
    data: DataArgs,
    campaign1: String,
    campaign2: String,
    config: PulseConfig,
}

impl CompareCommand {
    pub fn new(data: DataArgs, campaign1: String, campaign2: String, config: PulseConfig) -> Self {
        Self {
            data,
            campaign1,
            campaign2,
            config,
        }
    }
}

#[async_trait]
impl Command for CompareCommand {
    async fn execute(&self) -> Result<()> {
        let analytics = load_analytics(&self.data, &self.config).await?;
        for id in [&self.campaign1, &self.campaign2] {
            if !analytics.campaigns.iter().any(|c| &c.id == id) {
                info!("Campaign {} is not in the dataset, comparing as zero", id);
            }
        }
        let comparison =
            ComparisonEngine::compare(&self.campaign1, &self.campaign2, &analytics.performance);
        print_json(&comparison)
    }
}
