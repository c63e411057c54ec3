use anyhow::Result;
use campaign_pulse::analytics::{campaign_insights, MetricsAggregator};
use campaign_pulse::export::{ExportFormat, ExportService};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::common::test_helpers::sample_dataset;

#[test]
fn test_records_csv_header_follows_field_order() -> Result<()> {
    let dataset = sample_dataset();
    let csv = ExportService::new().export(&dataset.performance, ExportFormat::Csv)?;

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("campaign_id,campaign_name,platform,date,impressions,clicks,conversions,cost,revenue")
    );
    assert_eq!(
        lines.next(),
        Some("\"g-brand\",\"Brand Search\",\"google_ads\",\"2024-03-01\",10000,200,20,100.0,400.0")
    );
    assert_eq!(csv.lines().count(), dataset.performance.len() + 1);
    Ok(())
}

#[test]
fn test_csv_and_json_carry_the_same_rows() -> Result<()> {
    let dataset = sample_dataset();
    let daily = MetricsAggregator::aggregate_by_date(&dataset.performance);
    let service = ExportService::new();

    let json: Vec<serde_json::Value> =
        serde_json::from_str(&service.export(&daily, ExportFormat::Json)?)?;
    let csv = service.export(&daily, ExportFormat::Csv)?;

    assert_eq!(json.len(), csv.lines().count() - 1);
    assert_eq!(
        csv.lines().next(),
        Some("date,impressions,clicks,conversions,cost,revenue")
    );
    assert_eq!(json[0]["date"], "2024-03-01");
    assert_eq!(json[0]["cost"], 300.0);
    Ok(())
}

#[tokio::test]
async fn test_campaign_insights_export_to_file() -> Result<()> {
    let dataset = sample_dataset();
    let insights = campaign_insights(&dataset.campaigns, &dataset.performance);
    let service = ExportService::new();
    let content = service.export(&insights, ExportFormat::Csv)?;

    let dir = TempDir::new()?;
    let path = dir.path().join(ExportFormat::Csv.file_name("campaigns"));
    service.write_to_file(&content, &path).await?;

    let written = tokio::fs::read_to_string(&path).await?;
    assert!(written.starts_with("campaign_id,name,platform,status,"));
    assert!(written.contains("\"excellent\""));
    Ok(())
}
