use anyhow::Result;
use campaign_pulse::analytics::{
    AlertKind, AlertRulesEngine, ComparisonEngine, DashboardReport, MetricsAggregator, Priority,
    RecommendationEngine, RecommendationKind,
};
use campaign_pulse::config::PulseConfig;
use campaign_pulse::core::types::{Platform, Summary};
use pretty_assertions::assert_eq;

use super::common::test_helpers::{record, sample_dataset};

#[test]
fn test_two_records_roll_up_to_roas_two_without_alert() {
    let records = vec![
        record("a", "A", Platform::GoogleAds, "2024-03-01", 100.0, 250.0),
        record("b", "B", Platform::FacebookAds, "2024-03-01", 50.0, 50.0),
    ];

    let totals = MetricsAggregator::totals(&records);
    assert_eq!(totals.cost, 150.0);
    assert_eq!(totals.revenue, 300.0);
    assert_eq!(totals.ratios().roas, 2.0);

    let summary = Summary::from_parts(&[], &records);
    let alerts = AlertRulesEngine::default().evaluate(&summary);
    assert!(alerts.iter().all(|a| !a.message.starts_with("Low ROAS")));
}

#[test]
fn test_low_roas_and_high_spend_emit_two_ordered_alerts() {
    let summary = Summary {
        total_roas: 1.2,
        total_spend: 150_000.0,
        ..Default::default()
    };

    let alerts = AlertRulesEngine::default().evaluate(&summary);
    let shape: Vec<(AlertKind, Priority)> = alerts.iter().map(|a| (a.kind, a.priority)).collect();
    assert_eq!(
        shape,
        vec![
            (AlertKind::Warning, Priority::High),
            (AlertKind::Info, Priority::Medium)
        ]
    );
}

#[test]
fn test_comparison_worked_example() {
    let records = vec![
        record("a", "A", Platform::GoogleAds, "2024-03-01", 200.0, 200.0),
        record("b", "B", Platform::GoogleAds, "2024-03-01", 100.0, 300.0),
    ];

    let comparison = ComparisonEngine::compare("a", "b", &records);
    let roas = comparison.delta("roas").expect("roas delta");
    assert_eq!(roas.value1, 1.0);
    assert_eq!(roas.value2, 3.0);
    assert!(!roas.better);
    assert_eq!((roas.percent_diff * 10.0).round() / 10.0, -66.7);
}

#[test]
fn test_sample_dataset_recommendations() {
    let dataset = sample_dataset();
    let summary = Summary::from_parts(&dataset.campaigns, &dataset.performance);
    assert!((summary.total_roas - 1.86).abs() < 1e-9);

    let recs = RecommendationEngine::default().generate(&summary, &dataset.performance);
    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Low ROAS Alert", "Facebook Ads Underperforming"]);
    assert_eq!(recs[0].kind, RecommendationKind::Warning);
    assert_eq!(recs[1].priority, Priority::Medium);
}

#[test]
fn test_report_over_sample_dataset() -> Result<()> {
    let dataset = sample_dataset();
    let summary = Summary::from_parts(&dataset.campaigns, &dataset.performance);
    let report = DashboardReport::build(summary, &dataset.performance, &PulseConfig::default());

    assert!(report.alerts.is_empty());
    let dates: Vec<&str> = report.daily.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-03-02", "2024-03-03"]);

    let names: Vec<&str> = report.top_campaigns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Brand Search", "Spring Promo", "Retargeting"]);

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["summary"]["total_campaigns"], 3);
    assert_eq!(json["platform_spend"][1]["platform"], "facebook_ads");
    Ok(())
}
