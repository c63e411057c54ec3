use serde::{Deserialize, Serialize};

use crate::analytics::aggregator::MetricsAggregator;
use crate::analytics::ratios::{DerivedRatios, RecordTotals};
use crate::core::types::PerformanceRecord;

/// Totals plus derived ratios for one side of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetrics {
    #[serde(flatten)]
    pub totals: RecordTotals,
    #[serde(flatten)]
    pub ratios: DerivedRatios,
}

impl CampaignMetrics {
    pub fn from_records(records: &[PerformanceRecord], campaign_id: &str) -> Self {
        let totals = MetricsAggregator::campaign_totals(records, campaign_id);
        Self {
            totals,
            ratios: totals.ratios(),
        }
    }

    fn values(&self) -> [(&'static str, f64); 9] {
        [
            ("cost", self.totals.cost),
            ("revenue", self.totals.revenue),
            ("conversions", self.totals.conversions as f64),
            ("clicks", self.totals.clicks as f64),
            ("impressions", self.totals.impressions as f64),
            ("roas", self.ratios.roas),
            ("ctr", self.ratios.ctr),
            ("conversion_rate", self.ratios.conversion_rate),
            ("cpc", self.ratios.cpc),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub metric: String,
    pub value1: f64,
    pub value2: f64,
    /// (value1 - value2) / value2 * 100, or 0 when value2 is 0
    pub percent_diff: f64,
    /// value1 > value2, for every metric including cost
    pub better: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignComparison {
    pub campaign1: String,
    pub campaign2: String,
    pub metrics1: CampaignMetrics,
    pub metrics2: CampaignMetrics,
    pub deltas: Vec<MetricDelta>,
}

impl CampaignComparison {
    pub fn delta(&self, metric: &str) -> Option<&MetricDelta> {
        self.deltas.iter().find(|d| d.metric == metric)
    }
}

pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Compare two campaigns by id over the given records.
    ///
    /// A campaign with no matching records compares as all zeros.
    pub fn compare(
        campaign1: &str,
        campaign2: &str,
        records: &[PerformanceRecord],
    ) -> CampaignComparison {
        let metrics1 = CampaignMetrics::from_records(records, campaign1);
        let metrics2 = CampaignMetrics::from_records(records, campaign2);

        let deltas = metrics1
            .values()
            .into_iter()
            .zip(metrics2.values())
            .map(|((metric, value1), (_, value2))| MetricDelta {
                metric: metric.to_string(),
                value1,
                value2,
                percent_diff: percent_diff(value1, value2),
                better: value1 > value2,
            })
            .collect();

        CampaignComparison {
            campaign1: campaign1.to_string(),
            campaign2: campaign2.to_string(),
            metrics1,
            metrics2,
            deltas,
        }
    }
}

fn percent_diff(value1: f64, value2: f64) -> f64 {
    if value2 != 0.0 {
        (value1 - value2) / value2 * 100.0
    } else {
        0.0
    }
}
