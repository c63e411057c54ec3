use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::aggregator::MetricsAggregator;
use crate::analytics::ratios::{DerivedRatios, RecordTotals};
use crate::core::types::{Campaign, CampaignStatus, PerformanceRecord, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl PerformanceTier {
    pub fn from_roas(roas: f64) -> Self {
        if roas > 2.0 {
            PerformanceTier::Excellent
        } else if roas > 1.5 {
            PerformanceTier::Good
        } else if roas > 1.0 {
            PerformanceTier::Average
        } else {
            PerformanceTier::Poor
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::Average => "average",
            PerformanceTier::Poor => "poor",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignInsight {
    pub campaign_id: String,
    pub name: String,
    pub platform: Platform,
    pub status: CampaignStatus,
    #[serde(flatten)]
    pub totals: RecordTotals,
    #[serde(flatten)]
    pub ratios: DerivedRatios,
    pub tier: PerformanceTier,
}

/// Per-campaign totals and tier, best ROAS first.
///
/// Every campaign in `campaigns` appears, even without records.
pub fn campaign_insights(
    campaigns: &[Campaign],
    records: &[PerformanceRecord],
) -> Vec<CampaignInsight> {
    let mut insights: Vec<CampaignInsight> = campaigns
        .iter()
        .map(|campaign| {
            let totals = MetricsAggregator::campaign_totals(records, &campaign.id);
            let ratios = totals.ratios();
            CampaignInsight {
                campaign_id: campaign.id.clone(),
                name: campaign.name.clone(),
                platform: campaign.platform,
                status: campaign.status.clone(),
                totals,
                ratios,
                tier: PerformanceTier::from_roas(ratios.roas),
            }
        })
        .collect();

    insights.sort_by(|a, b| b.ratios.roas.total_cmp(&a.ratios.roas));
    insights
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFilter {
    pub platform: Option<Platform>,
    /// Case-insensitive substring of the campaign name
    pub search: Option<String>,
}

impl CampaignFilter {
    /// True when neither a platform nor a non-blank search term is set
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.search.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    pub fn matches(&self, campaign: &Campaign) -> bool {
        if self.platform.is_some_and(|p| p != campaign.platform) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => campaign
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

pub fn filter_campaigns<'a>(campaigns: &'a [Campaign], filter: &CampaignFilter) -> Vec<&'a Campaign> {
    campaigns.iter().filter(|c| filter.matches(c)).collect()
}
