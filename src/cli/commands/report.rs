use anyhow::Result;
use async_trait::async_trait;

use crate::analytics::{AlertNotifier, DashboardReport};
use crate::cli::args::DataArgs;
use crate::cli::commands::utils::{load_overview, print_json};
use crate::cli::commands::Command;
use crate::config::PulseConfig;

pub struct ReportCommand {
    data: DataArgs,
    config: PulseConfig,
}

impl ReportCommand {
    pub fn new(data: DataArgs, config: PulseConfig) -> Self {
        Self { data, config }
    }
}

#[async_trait]
impl Command for ReportCommand {
    async fn execute(&self) -> Result<()> {
        let overview = load_overview(&self.data, &self.config).await?;
        let report = DashboardReport::build(overview.summary, &overview.performance, &self.config);
        AlertNotifier::notify_alerts(&report.alerts);
        print_json(&report)
    }
}
