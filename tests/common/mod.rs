use anyhow::Result;
use campaign_pulse::core::types::{Campaign, CampaignStatus, PerformanceRecord, Platform};
use campaign_pulse::source::Dataset;
use std::path::PathBuf;
use tempfile::TempDir;

/// Shared test utilities to reduce duplication across test files
pub mod test_helpers {
    use super::*;

    pub fn campaign(id: &str, name: &str, platform: Platform, status: CampaignStatus) -> Campaign {
        Campaign {
            id: id.to_string(),
            external_id: format!("ext-{id}"),
            name: name.to_string(),
            platform,
            status,
            budget: 1_000.0,
            created_at: None,
        }
    }

    /// Record with fixed delivery counts; only money and identity vary
    pub fn record(
        campaign_id: &str,
        campaign_name: &str,
        platform: Platform,
        date: &str,
        cost: f64,
        revenue: f64,
    ) -> PerformanceRecord {
        PerformanceRecord {
            id: None,
            campaign_id: campaign_id.to_string(),
            campaign_name: campaign_name.to_string(),
            platform,
            date: date.to_string(),
            impressions: 10_000,
            clicks: 200,
            conversions: 20,
            cost,
            revenue,
        }
    }

    /// Two Google and one Facebook campaign over three days
    pub fn sample_dataset() -> Dataset {
        Dataset {
            campaigns: vec![
                campaign("g-brand", "Brand Search", Platform::GoogleAds, CampaignStatus::Enabled),
                campaign("g-promo", "Spring Promo", Platform::GoogleAds, CampaignStatus::Paused),
                campaign("f-retarget", "Retargeting", Platform::FacebookAds, CampaignStatus::Active),
            ],
            performance: vec![
                record("g-brand", "Brand Search", Platform::GoogleAds, "2024-03-01", 100.0, 400.0),
                record("g-promo", "Spring Promo", Platform::GoogleAds, "2024-03-01", 200.0, 260.0),
                record("f-retarget", "Retargeting", Platform::FacebookAds, "2024-03-02", 150.0, 120.0),
                record("g-brand", "Brand Search", Platform::GoogleAds, "2024-03-03", 50.0, 150.0),
            ],
        }
    }

    /// Write a dataset into a fresh temp dir. Keep the `TempDir` alive while
    /// the path is in use.
    pub async fn write_dataset(dataset: &Dataset) -> Result<(TempDir, PathBuf)> {
        let dir = TempDir::new()?;
        let path = dir.path().join("dataset.json");
        tokio::fs::write(&path, serde_json::to_string_pretty(dataset)?).await?;
        Ok((dir, path))
    }

    /// One `performance_update` frame
    pub fn update_frame(campaign_id: &str, cost: f64, revenue: f64) -> String {
        serde_json::json!({
            "type": "performance_update",
            "data": {
                "campaign_id": campaign_id,
                "campaign_name": format!("Campaign {campaign_id}"),
                "platform": "google_ads",
                "timestamp": "2024-03-05T10:15:00+00:00",
                "impressions": 1200,
                "clicks": 60,
                "conversions": 4,
                "cost": cost,
                "revenue": revenue,
                "roas": 9.99
            }
        })
        .to_string()
    }
}
