use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::analytics::ratios::{roi, RecordTotals};
use crate::core::types::{Campaign, PerformanceRecord, Platform, Summary};

/// Totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: String,
    #[serde(flatten)]
    pub totals: RecordTotals,
}

/// Spend for one calendar day split by platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySpend {
    pub date: String,
    pub google_ads: f64,
    pub facebook_ads: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpend {
    pub platform: Platform,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRoi {
    pub platform: Platform,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRoi {
    pub name: String,
    pub revenue: f64,
    pub cost: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRollup {
    pub platform: Platform,
    #[serde(flatten)]
    pub totals: RecordTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRollup {
    pub campaign_id: String,
    pub campaign_name: String,
    #[serde(flatten)]
    pub totals: RecordTotals,
}

/// Group records by `key`, keeping groups in first-encountered order.
fn group_in_order<K, V>(
    records: &[PerformanceRecord],
    key: impl Fn(&PerformanceRecord) -> K,
    mut init: impl FnMut(&PerformanceRecord) -> V,
    mut fold: impl FnMut(&mut V, &PerformanceRecord),
) -> Vec<V>
where
    K: Eq + Hash,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<V> = Vec::new();

    for record in records {
        let slot = *index.entry(key(record)).or_insert_with(|| {
            groups.push(init(record));
            groups.len() - 1
        });
        fold(&mut groups[slot], record);
    }

    groups
}

/// Stateless reductions over performance records.
pub struct MetricsAggregator;

impl MetricsAggregator {
    pub fn totals(records: &[PerformanceRecord]) -> RecordTotals {
        records.iter().collect()
    }

    /// Per-date totals sorted ascending by date.
    ///
    /// ISO dates sort lexicographically in chronological order.
    pub fn aggregate_by_date(records: &[PerformanceRecord]) -> Vec<DailyTotals> {
        let mut by_date: BTreeMap<&str, RecordTotals> = BTreeMap::new();
        for record in records {
            by_date.entry(record.date.as_str()).or_default().add(record);
        }

        by_date
            .into_iter()
            .map(|(date, totals)| DailyTotals {
                date: date.to_string(),
                totals,
            })
            .collect()
    }

    /// Per-date spend with a column per platform, sorted ascending by date
    pub fn spend_trend_by_date(records: &[PerformanceRecord]) -> Vec<DailySpend> {
        let mut by_date: BTreeMap<&str, DailySpend> = BTreeMap::new();
        for record in records {
            let day = by_date
                .entry(record.date.as_str())
                .or_insert_with(|| DailySpend {
                    date: record.date.clone(),
                    google_ads: 0.0,
                    facebook_ads: 0.0,
                    total: 0.0,
                });
            match record.platform {
                Platform::GoogleAds => day.google_ads += record.cost,
                Platform::FacebookAds => day.facebook_ads += record.cost,
            }
            day.total += record.cost;
        }

        by_date.into_values().collect()
    }

    /// Spend per platform. Both platforms are always present, zero if unused.
    pub fn aggregate_by_platform(records: &[PerformanceRecord]) -> Vec<PlatformSpend> {
        Platform::ALL
            .iter()
            .map(|&platform| PlatformSpend {
                platform,
                cost: records
                    .iter()
                    .filter(|r| r.platform == platform)
                    .map(|r| r.cost)
                    .sum(),
            })
            .collect()
    }

    /// Totals per platform present in the input, in first-encountered order
    pub fn platform_rollups(records: &[PerformanceRecord]) -> Vec<PlatformRollup> {
        group_in_order(
            records,
            |r| r.platform,
            |r| PlatformRollup {
                platform: r.platform,
                totals: RecordTotals::default(),
            },
            |group, r| group.totals.add(r),
        )
    }

    pub fn roi_by_platform(records: &[PerformanceRecord]) -> Vec<PlatformRoi> {
        Self::platform_rollups(records)
            .into_iter()
            .map(|rollup| PlatformRoi {
                platform: rollup.platform,
                roi: rollup.totals.roi(),
            })
            .collect()
    }

    /// Totals per campaign id, in first-encountered order
    pub fn campaign_rollups(records: &[PerformanceRecord]) -> Vec<CampaignRollup> {
        group_in_order(
            records,
            |r| r.campaign_id.clone(),
            |r| CampaignRollup {
                campaign_id: r.campaign_id.clone(),
                campaign_name: r.campaign_name.clone(),
                totals: RecordTotals::default(),
            },
            |group, r| group.totals.add(r),
        )
    }

    /// Campaigns (grouped by name) ranked by ROI, best first.
    ///
    /// The sort is stable, so equal ROI keeps first-encountered order.
    pub fn top_campaigns_by_roi(records: &[PerformanceRecord], limit: usize) -> Vec<CampaignRoi> {
        let mut campaigns = group_in_order(
            records,
            |r| r.campaign_name.clone(),
            |r| CampaignRoi {
                name: r.campaign_name.clone(),
                revenue: 0.0,
                cost: 0.0,
                roi: 0.0,
            },
            |group, r| {
                group.revenue += r.revenue;
                group.cost += r.cost;
            },
        );

        for campaign in &mut campaigns {
            campaign.roi = roi(campaign.revenue, campaign.cost);
        }
        campaigns.sort_by(|a, b| b.roi.total_cmp(&a.roi));
        campaigns.truncate(limit);
        campaigns
    }

    pub fn records_for_campaign<'a>(
        records: &'a [PerformanceRecord],
        campaign_id: &str,
    ) -> Vec<&'a PerformanceRecord> {
        records
            .iter()
            .filter(|r| r.campaign_id == campaign_id)
            .collect()
    }

    pub fn campaign_totals(records: &[PerformanceRecord], campaign_id: &str) -> RecordTotals {
        Self::records_for_campaign(records, campaign_id)
            .into_iter()
            .collect()
    }
}

impl Summary {
    /// Build a summary locally from a campaign list and its records
    pub fn from_parts(campaigns: &[Campaign], records: &[PerformanceRecord]) -> Self {
        let count = |platform: Platform| {
            campaigns.iter().filter(|c| c.platform == platform).count() as u64
        };
        let totals = MetricsAggregator::totals(records);

        Summary {
            total_campaigns: campaigns.len() as u64,
            google_ads_campaigns: count(Platform::GoogleAds),
            facebook_ads_campaigns: count(Platform::FacebookAds),
            total_spend: totals.cost,
            total_revenue: totals.revenue,
            total_roas: totals.ratios().roas,
            total_conversions: totals.conversions,
            total_clicks: totals.clicks,
            total_impressions: totals.impressions,
        }
    }
}
