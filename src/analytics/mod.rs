//! Pure analytics over performance records.
//!
//! Nothing in here performs I/O or holds state; every function reads its
//! inputs and allocates new outputs, so it is safe to call from any task.

pub mod aggregator;
pub mod alerts;
pub mod comparison;
pub mod insights;
pub mod ratios;
pub mod recommendations;
pub mod report;
pub mod types;

pub use aggregator::{
    CampaignRoi, CampaignRollup, DailySpend, DailyTotals, MetricsAggregator, PlatformRoi,
    PlatformRollup, PlatformSpend,
};
pub use alerts::{AlertNotifier, AlertRulesEngine, AlertThresholds};
pub use comparison::{CampaignComparison, CampaignMetrics, ComparisonEngine, MetricDelta};
pub use insights::{campaign_insights, filter_campaigns, CampaignFilter, CampaignInsight, PerformanceTier};
pub use ratios::{derived_ratios, roi, DerivedRatios, RecordTotals};
pub use recommendations::{RecommendationEngine, RecommendationThresholds};
pub use report::DashboardReport;
pub use types::{Alert, AlertKind, Priority, Recommendation, RecommendationKind};
