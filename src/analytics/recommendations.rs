//! Rule-based optimization recommendations.
//!
//! Rules run in a fixed order (global ROAS, per platform, per campaign,
//! fallback) and every match is appended. The list is cut to
//! `max_recommendations` afterwards without re-sorting by priority.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::aggregator::MetricsAggregator;
use crate::analytics::types::{Priority, Recommendation, RecommendationKind};
use crate::core::constants::recommendations;
use crate::core::types::{PerformanceRecord, Summary};
use crate::core::utils::DisplayUtils;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    pub low_roas: f64,
    pub excellent_roas: f64,
    pub platform_low_roas: f64,
    /// Percent
    pub min_conversion_rate: f64,
    pub min_clicks: u64,
    pub strong_roas: f64,
    pub max_recommendations: usize,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            low_roas: recommendations::LOW_ROAS,
            excellent_roas: recommendations::EXCELLENT_ROAS,
            platform_low_roas: recommendations::PLATFORM_LOW_ROAS,
            min_conversion_rate: recommendations::MIN_CONVERSION_RATE,
            min_clicks: recommendations::MIN_CLICKS,
            strong_roas: recommendations::STRONG_ROAS,
            max_recommendations: recommendations::MAX_RECOMMENDATIONS,
        }
    }
}

#[derive(Default)]
pub struct RecommendationEngine {
    thresholds: RecommendationThresholds,
}

impl RecommendationEngine {
    pub fn new(thresholds: RecommendationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn generate(&self, summary: &Summary, records: &[PerformanceRecord]) -> Vec<Recommendation> {
        let mut out = Vec::new();

        self.check_global_roas(summary, &mut out);
        self.check_platforms(records, &mut out);
        self.check_campaigns(records, &mut out);

        if out.is_empty() && summary.total_roas > self.thresholds.strong_roas {
            out.push(Recommendation {
                kind: RecommendationKind::Success,
                title: "Strong Overall Performance".to_string(),
                description: "Your campaigns are performing well across all metrics. Continue \
                              monitoring and consider incrementally increasing budgets on top \
                              performers."
                    .to_string(),
                priority: Priority::Low,
            });
        }

        if out.len() > self.thresholds.max_recommendations {
            debug!(
                "Truncating {} recommendations to {}",
                out.len(),
                self.thresholds.max_recommendations
            );
            out.truncate(self.thresholds.max_recommendations);
        }
        out
    }

    fn check_global_roas(&self, summary: &Summary, out: &mut Vec<Recommendation>) {
        let roas = DisplayUtils::format_multiplier(summary.total_roas);

        if summary.total_roas < self.thresholds.low_roas {
            out.push(Recommendation {
                kind: RecommendationKind::Warning,
                title: "Low ROAS Alert".to_string(),
                description: format!(
                    "Current ROAS is {roas}. Consider optimizing ad targeting and bidding \
                     strategies to improve return on ad spend."
                ),
                priority: Priority::High,
            });
        } else if summary.total_roas > self.thresholds.excellent_roas {
            out.push(Recommendation {
                kind: RecommendationKind::Success,
                title: "Excellent ROAS Performance".to_string(),
                description: format!(
                    "Current ROAS is {roas}. Your campaigns are performing well. Consider \
                     scaling up budget on top performers."
                ),
                priority: Priority::Low,
            });
        }
    }

    fn check_platforms(&self, records: &[PerformanceRecord], out: &mut Vec<Recommendation>) {
        for rollup in MetricsAggregator::platform_rollups(records) {
            let roas = rollup.totals.ratios().roas;
            if roas < self.thresholds.platform_low_roas {
                let name = rollup.platform.label();
                out.push(Recommendation {
                    kind: RecommendationKind::Warning,
                    title: format!("{name} Underperforming"),
                    description: format!(
                        "{name} ROAS is {}. Review ad creatives, audience targeting, and \
                         bidding strategies for this platform.",
                        DisplayUtils::format_multiplier(roas)
                    ),
                    priority: Priority::Medium,
                });
            }
        }
    }

    fn check_campaigns(&self, records: &[PerformanceRecord], out: &mut Vec<Recommendation>) {
        for rollup in MetricsAggregator::campaign_rollups(records) {
            let conversion_rate = rollup.totals.ratios().conversion_rate;
            if conversion_rate < self.thresholds.min_conversion_rate
                && rollup.totals.clicks > self.thresholds.min_clicks
            {
                out.push(Recommendation {
                    kind: RecommendationKind::Info,
                    title: format!("Optimize {}", rollup.campaign_name),
                    description: format!(
                        "Conversion rate is {conversion_rate:.2}%. Consider improving landing \
                         page experience and ad relevance."
                    ),
                    priority: Priority::Medium,
                });
            }
        }
    }
}
