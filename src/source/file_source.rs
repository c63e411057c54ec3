use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::errors::FetchError;
use crate::core::traits::PerformanceSource;
use crate::core::types::{Campaign, PerformanceQuery, PerformanceRecord, Platform, Summary, SyncReport};

/// On-disk dataset: `{"campaigns": [...], "performance": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub performance: Vec<PerformanceRecord>,
}

impl Dataset {
    pub fn parse(content: &str, origin: &Path) -> Result<Self, FetchError> {
        serde_json::from_str(content).map_err(|source| FetchError::Decode {
            endpoint: origin.display().to_string(),
            source,
        })
    }
}

/// [`PerformanceSource`] backed by a JSON dataset file.
///
/// `sync()` re-reads the file, standing in for a pull from the ad networks.
pub struct FileSource {
    path: PathBuf,
    dataset: RwLock<Dataset>,
    today: Option<NaiveDate>,
}

impl FileSource {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, FetchError> {
        let path = path.into();
        let dataset = Self::read(&path).await?;
        info!(
            "Loaded {} campaigns and {} performance records from {}",
            dataset.campaigns.len(),
            dataset.performance.len(),
            path.display()
        );
        Ok(Self {
            path,
            dataset: RwLock::new(dataset),
            today: None,
        })
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            path: PathBuf::new(),
            dataset: RwLock::new(dataset),
            today: None,
        }
    }

    /// Pin the day `days` windows are measured from
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(path: &Path) -> Result<Dataset, FetchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Dataset {
                path: path.to_path_buf(),
                source,
            })?;
        Dataset::parse(&content, path)
    }

    fn cutoff(&self, days: u32) -> String {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        (today - Duration::days(i64::from(days)))
            .format("%Y-%m-%d")
            .to_string()
    }
}

#[async_trait]
impl PerformanceSource for FileSource {
    async fn campaigns(&self, platform: Option<Platform>) -> Result<Vec<Campaign>, FetchError> {
        let dataset = self.dataset.read().await;
        Ok(dataset
            .campaigns
            .iter()
            .filter(|c| platform.map_or(true, |p| c.platform == p))
            .cloned()
            .collect())
    }

    async fn summary(&self) -> Result<Summary, FetchError> {
        let dataset = self.dataset.read().await;
        Ok(Summary::from_parts(&dataset.campaigns, &dataset.performance))
    }

    async fn performance(
        &self,
        query: &PerformanceQuery,
    ) -> Result<Vec<PerformanceRecord>, FetchError> {
        let cutoff = query.days.map(|days| self.cutoff(days));
        let dataset = self.dataset.read().await;

        let records: Vec<PerformanceRecord> = dataset
            .performance
            .iter()
            .filter(|r| match (&query.campaign_id, query.platform) {
                (Some(id), _) => &r.campaign_id == id,
                (None, Some(platform)) => r.platform == platform,
                (None, None) => true,
            })
            .filter(|r| cutoff.as_deref().map_or(true, |c| r.date.as_str() >= c))
            .cloned()
            .collect();

        debug!("Performance query {:?} matched {} records", query, records.len());
        Ok(records)
    }

    async fn sync(&self) -> Result<SyncReport, FetchError> {
        if self.path.as_os_str().is_empty() {
            let dataset = self.dataset.read().await;
            return Ok(SyncReport {
                campaigns_synced: dataset.campaigns.len() as u64,
                metrics_synced: dataset.performance.len() as u64,
            });
        }

        let fresh = Self::read(&self.path).await?;
        let report = SyncReport {
            campaigns_synced: fresh.campaigns.len() as u64,
            metrics_synced: fresh.performance.len() as u64,
        };
        *self.dataset.write().await = fresh;
        info!(
            "Synced {} campaigns and {} metrics",
            report.campaigns_synced, report.metrics_synced
        );
        Ok(report)
    }
}
