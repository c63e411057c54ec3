//! The one place ratio metrics are computed.
//!
//! Alerts, recommendations, comparisons and insights all go through
//! [`derived_ratios`] and [`roi`] so the same inputs can never produce two
//! different numbers. A zero denominator always yields `0.0`.

use serde::{Deserialize, Serialize};

use crate::core::types::PerformanceRecord;

/// Summed raw counters over a set of performance records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTotals {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub cost: f64,
    pub revenue: f64,
}

impl RecordTotals {
    pub fn add(&mut self, record: &PerformanceRecord) {
        self.impressions = self.impressions.saturating_add(record.impressions);
        self.clicks = self.clicks.saturating_add(record.clicks);
        self.conversions = self.conversions.saturating_add(record.conversions);
        self.cost += record.cost;
        self.revenue += record.revenue;
    }

    pub fn merge(&mut self, other: &RecordTotals) {
        self.impressions = self.impressions.saturating_add(other.impressions);
        self.clicks = self.clicks.saturating_add(other.clicks);
        self.conversions = self.conversions.saturating_add(other.conversions);
        self.cost += other.cost;
        self.revenue += other.revenue;
    }

    pub fn ratios(&self) -> DerivedRatios {
        derived_ratios(self)
    }

    pub fn roi(&self) -> f64 {
        roi(self.revenue, self.cost)
    }
}

impl<'a> FromIterator<&'a PerformanceRecord> for RecordTotals {
    fn from_iter<I: IntoIterator<Item = &'a PerformanceRecord>>(iter: I) -> Self {
        let mut totals = RecordTotals::default();
        for record in iter {
            totals.add(record);
        }
        totals
    }
}

/// Ratio metrics derived from [`RecordTotals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatios {
    /// revenue / cost
    pub roas: f64,
    /// clicks / impressions * 100
    pub ctr: f64,
    /// conversions / clicks * 100
    pub conversion_rate: f64,
    /// cost / clicks
    pub cpc: f64,
}

/// Division that never produces NaN or infinity.
fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        let value = numerator / denominator;
        if value.is_finite() {
            return value;
        }
    }
    0.0
}

pub fn derived_ratios(totals: &RecordTotals) -> DerivedRatios {
    let clicks = totals.clicks as f64;
    let impressions = totals.impressions as f64;
    let conversions = totals.conversions as f64;

    DerivedRatios {
        roas: guarded_div(totals.revenue, totals.cost),
        ctr: guarded_div(clicks, impressions) * 100.0,
        conversion_rate: guarded_div(conversions, clicks) * 100.0,
        cpc: guarded_div(totals.cost, clicks),
    }
}

/// Return on investment in percent: (revenue - cost) / cost * 100.
pub fn roi(revenue: f64, cost: f64) -> f64 {
    guarded_div(revenue - cost, cost) * 100.0
}
