use anyhow::Result;
use campaign_pulse::core::traits::PerformanceSource;
use campaign_pulse::core::types::{PerformanceQuery, Platform};
use campaign_pulse::source::{DashboardLoader, FileSource};
use chrono::NaiveDate;
use std::sync::Arc;

use super::common::test_helpers::{sample_dataset, write_dataset};

fn march_4th() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
}

#[tokio::test]
async fn test_loader_over_file_source() -> Result<()> {
    let (_dir, path) = write_dataset(&sample_dataset()).await?;
    let source = FileSource::open(&path).await?.with_today(march_4th());
    let loader = DashboardLoader::new(Arc::new(source));

    let overview = loader.load_overview(2).await?;
    assert_eq!(overview.summary.total_campaigns, 3);
    assert_eq!(overview.summary.google_ads_campaigns, 2);
    let dates: Vec<&str> = overview.performance.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-02", "2024-03-03"]);

    let analytics = loader.load_analytics(30).await?;
    assert_eq!(analytics.campaigns.len(), 3);
    assert_eq!(analytics.performance.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_platform_and_campaign_queries() -> Result<()> {
    let source = FileSource::from_dataset(sample_dataset()).with_today(march_4th());

    let facebook = PerformanceQuery {
        platform: Some(Platform::FacebookAds),
        ..Default::default()
    };
    let records = source.performance(&facebook).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].campaign_id, "f-retarget");

    let brand = source
        .performance(&PerformanceQuery::default().for_campaign("g-brand"))
        .await?;
    assert_eq!(brand.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_broken_dataset_fails_the_whole_load() -> Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{\"campaigns\": [").await?;

    let err = match FileSource::open(&path).await {
        Ok(_) => panic!("broken dataset must not load"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("could not be decoded"));
    Ok(())
}
