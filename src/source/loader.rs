use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::errors::FetchError;
use crate::core::traits::PerformanceSource;
use crate::core::types::{Campaign, PerformanceQuery, PerformanceRecord, Summary, SyncReport};

/// Data behind the overview page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewData {
    pub summary: Summary,
    pub performance: Vec<PerformanceRecord>,
}

/// Data behind the analytics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub campaigns: Vec<Campaign>,
    pub performance: Vec<PerformanceRecord>,
}

/// Issues the paired fetches a dashboard view needs.
///
/// Both requests of a pair run concurrently. If either fails, that error is
/// returned on its own and the other result is discarded.
pub struct DashboardLoader<S: PerformanceSource + ?Sized> {
    source: Arc<S>,
}

impl<S: PerformanceSource + ?Sized> DashboardLoader<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub async fn load_overview(&self, days: u32) -> Result<OverviewData, FetchError> {
        let query = PerformanceQuery::last_days(days);
        let (summary, performance) =
            tokio::try_join!(self.source.summary(), self.source.performance(&query))
                .inspect_err(|e| warn!("Overview load failed: {}", e))?;

        debug!("Overview loaded with {} records", performance.len());
        Ok(OverviewData {
            summary,
            performance,
        })
    }

    pub async fn load_analytics(&self, days: u32) -> Result<AnalyticsData, FetchError> {
        let query = PerformanceQuery::last_days(days);
        let (campaigns, performance) =
            tokio::try_join!(self.source.campaigns(None), self.source.performance(&query))
                .inspect_err(|e| warn!("Analytics load failed: {}", e))?;

        debug!(
            "Analytics loaded with {} campaigns and {} records",
            campaigns.len(),
            performance.len()
        );
        Ok(AnalyticsData {
            campaigns,
            performance,
        })
    }

    /// Pull fresh data from the platforms, then reload the overview
    pub async fn sync_and_reload(&self, days: u32) -> Result<(SyncReport, OverviewData), FetchError> {
        let report = self.source.sync().await?;
        let overview = self.load_overview(days).await?;
        Ok((report, overview))
    }
}
