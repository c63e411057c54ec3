//! Universal properties of the aggregation layer and update buffer.

use campaign_pulse::analytics::{derived_ratios, MetricsAggregator, RecordTotals};
use campaign_pulse::core::types::{PerformanceRecord, Platform};
use campaign_pulse::stream::UpdateBuffer;
use proptest::prelude::*;

fn platform() -> impl Strategy<Value = Platform> {
    prop_oneof![Just(Platform::GoogleAds), Just(Platform::FacebookAds)]
}

prop_compose! {
    fn performance_record()(
        campaign in 0u8..6,
        platform in platform(),
        day in 1u8..=28,
        impressions in 0u64..100_000,
        clicks in 0u64..5_000,
        conversions in 0u64..500,
        cost in 0.0f64..10_000.0,
        revenue in 0.0f64..50_000.0,
    ) -> PerformanceRecord {
        PerformanceRecord {
            id: None,
            campaign_id: format!("c{campaign}"),
            campaign_name: format!("Campaign {campaign}"),
            platform,
            date: format!("2024-02-{day:02}"),
            impressions,
            clicks,
            conversions,
            cost,
            revenue,
        }
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn platform_spend_has_both_keys_and_matches_daily_cost(
        records in prop::collection::vec(performance_record(), 0..60)
    ) {
        let by_platform = MetricsAggregator::aggregate_by_platform(&records);
        prop_assert_eq!(by_platform.len(), 2);
        prop_assert_eq!(by_platform[0].platform, Platform::GoogleAds);
        prop_assert_eq!(by_platform[1].platform, Platform::FacebookAds);

        let platform_total: f64 = by_platform.iter().map(|p| p.cost).sum();
        let daily_total: f64 = MetricsAggregator::aggregate_by_date(&records)
            .iter()
            .map(|d| d.totals.cost)
            .sum();
        prop_assert!(close(platform_total, daily_total));
    }

    #[test]
    fn daily_totals_are_sorted_by_date(
        records in prop::collection::vec(performance_record(), 0..60)
    ) {
        let days = MetricsAggregator::aggregate_by_date(&records);
        prop_assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn ratios_are_finite_and_non_negative(
        impressions in 0u64..1_000_000,
        clicks in 0u64..100_000,
        conversions in 0u64..10_000,
        cost in prop_oneof![Just(0.0f64), 0.0f64..1e9],
        revenue in prop_oneof![Just(0.0f64), 0.0f64..1e9],
    ) {
        let totals = RecordTotals { impressions, clicks, conversions, cost, revenue };
        let ratios = derived_ratios(&totals);
        for value in [ratios.roas, ratios.ctr, ratios.conversion_rate, ratios.cpc] {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
        if cost == 0.0 {
            prop_assert_eq!(ratios.roas, 0.0);
        }
        if impressions == 0 {
            prop_assert_eq!(ratios.ctr, 0.0);
        }
        if clicks == 0 {
            prop_assert_eq!(ratios.conversion_rate, 0.0);
            prop_assert_eq!(ratios.cpc, 0.0);
        }
    }

    #[test]
    fn top_campaigns_bounded_sorted_and_stable(
        records in prop::collection::vec(performance_record(), 0..60),
        limit in 0usize..8,
    ) {
        let top = MetricsAggregator::top_campaigns_by_roi(&records, limit);
        prop_assert!(top.len() <= limit);
        prop_assert!(top.windows(2).all(|w| w[0].roi >= w[1].roi));

        // Re-ranking an already ranked set changes nothing
        let ranked_records: Vec<PerformanceRecord> = top
            .iter()
            .map(|c| PerformanceRecord {
                id: None,
                campaign_id: c.name.clone(),
                campaign_name: c.name.clone(),
                platform: Platform::GoogleAds,
                date: "2024-02-01".to_string(),
                impressions: 0,
                clicks: 0,
                conversions: 0,
                cost: c.cost,
                revenue: c.revenue,
            })
            .collect();
        let again = MetricsAggregator::top_campaigns_by_roi(&ranked_records, limit);
        let names = |list: &[campaign_pulse::analytics::CampaignRoi]| {
            list.iter().map(|c| c.name.clone()).collect::<Vec<_>>()
        };
        prop_assert_eq!(names(&again), names(&top));
    }

    #[test]
    fn buffer_keeps_newest_ten(pushes in 0usize..40) {
        let mut buffer = UpdateBuffer::with_defaults();
        for n in 0..pushes {
            buffer.push(PerformanceRecord {
                id: Some(n.to_string()),
                campaign_id: "c".to_string(),
                campaign_name: "c".to_string(),
                platform: Platform::FacebookAds,
                date: "2024-02-01".to_string(),
                impressions: n as u64,
                clicks: 0,
                conversions: 0,
                cost: 0.0,
                revenue: 0.0,
            });
        }
        let kept: Vec<u64> = buffer.snapshot().iter().map(|e| e.record.impressions).collect();
        let expected: Vec<u64> = (pushes.saturating_sub(10)..pushes).rev().map(|n| n as u64).collect();
        prop_assert_eq!(kept, expected);
    }
}
