use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::aggregator::{
    CampaignRoi, DailySpend, DailyTotals, MetricsAggregator, PlatformRoi, PlatformSpend,
};
use crate::analytics::alerts::AlertRulesEngine;
use crate::analytics::recommendations::RecommendationEngine;
use crate::analytics::types::{Alert, Recommendation};
use crate::config::PulseConfig;
use crate::core::types::{PerformanceRecord, Summary};

/// Everything the dashboard shows for one record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
    pub daily: Vec<DailyTotals>,
    pub spend_trend: Vec<DailySpend>,
    pub platform_spend: Vec<PlatformSpend>,
    pub platform_roi: Vec<PlatformRoi>,
    pub top_campaigns: Vec<CampaignRoi>,
}

impl DashboardReport {
    pub fn build(summary: Summary, records: &[PerformanceRecord], config: &PulseConfig) -> Self {
        let alerts = AlertRulesEngine::new(config.alert_thresholds()).evaluate(&summary);
        let recommendations =
            RecommendationEngine::new(config.recommendation_thresholds()).generate(&summary, records);

        Self {
            generated_at: Utc::now(),
            alerts,
            recommendations,
            daily: MetricsAggregator::aggregate_by_date(records),
            spend_trend: MetricsAggregator::spend_trend_by_date(records),
            platform_spend: MetricsAggregator::aggregate_by_platform(records),
            platform_roi: MetricsAggregator::roi_by_platform(records),
            top_campaigns: MetricsAggregator::top_campaigns_by_roi(
                records,
                config.analytics.top_campaigns_limit,
            ),
            summary,
        }
    }
}
