use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::constants::{platforms, statuses};
use crate::core::errors::MessageError;

/// Advertising channel a campaign runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    GoogleAds,
    FacebookAds,
}

impl Platform {
    /// Every supported platform, in reporting order.
    pub const ALL: [Platform; 2] = [Platform::GoogleAds, Platform::FacebookAds];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GoogleAds => platforms::GOOGLE_ADS,
            Platform::FacebookAds => platforms::FACEBOOK_ADS,
        }
    }

    /// Human readable name used in alert and recommendation text
    pub fn label(&self) -> &'static str {
        match self {
            Platform::GoogleAds => platforms::GOOGLE_ADS_LABEL,
            Platform::FacebookAds => platforms::FACEBOOK_ADS_LABEL,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            platforms::GOOGLE_ADS | "google" => Ok(Platform::GoogleAds),
            platforms::FACEBOOK_ADS | "facebook" => Ok(Platform::FacebookAds),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Delivery status reported by the ad network. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
    Active,
    Enabled,
    Paused,
    Other(String),
}

impl CampaignStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CampaignStatus::Active => statuses::ACTIVE,
            CampaignStatus::Enabled => statuses::ENABLED,
            CampaignStatus::Paused => statuses::PAUSED,
            CampaignStatus::Other(raw) => raw,
        }
    }

    /// Google reports live campaigns as `ENABLED`, Facebook as `ACTIVE`.
    pub fn is_running(&self) -> bool {
        matches!(self, CampaignStatus::Active | CampaignStatus::Enabled)
    }
}

impl From<String> for CampaignStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            statuses::ACTIVE => CampaignStatus::Active,
            statuses::ENABLED => CampaignStatus::Enabled,
            statuses::PAUSED => CampaignStatus::Paused,
            _ => CampaignStatus::Other(raw),
        }
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day of delivery for one campaign.
///
/// Extra fields sent by the data source (`ctr`, `cpc`, `cpa`, `roas`) are
/// ignored on purpose: ratios are always recomputed from the raw counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub campaign_id: String,
    pub campaign_name: String,
    pub platform: Platform,
    /// ISO date, day granularity (`YYYY-MM-DD`)
    pub date: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub cost: f64,
    pub revenue: f64,
}

impl PerformanceRecord {
    /// Reject monetary values the data model does not allow.
    pub fn validate(&self) -> Result<(), MessageError> {
        for (field, value) in [("cost", self.cost), ("revenue", self.revenue)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MessageError::InvalidMetric {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub external_id: String,
    pub name: String,
    pub platform: Platform,
    pub status: CampaignStatus,
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregated totals over a campaign and record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_campaigns: u64,
    pub google_ads_campaigns: u64,
    pub facebook_ads_campaigns: u64,
    pub total_spend: f64,
    pub total_revenue: f64,
    pub total_roas: f64,
    pub total_conversions: u64,
    pub total_clicks: u64,
    pub total_impressions: u64,
}

/// A live performance record as it sat in the update buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: PerformanceRecord,
}

impl UpdateEvent {
    pub fn new(record: PerformanceRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            record,
        }
    }
}

/// Lifecycle of the streaming connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

impl ConnectionState {
    /// Whether a new `connect()` must be ignored in this state
    pub fn is_attempt_in_flight(&self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
        };
        f.write_str(name)
    }
}

/// Filter for a historical performance fetch (`GET /performance`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceQuery {
    /// Look-back window in days
    pub days: Option<u32>,
    pub campaign_id: Option<String>,
    /// Ignored by the data source when `campaign_id` is set
    pub platform: Option<Platform>,
}

impl PerformanceQuery {
    pub fn last_days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Default::default()
        }
    }

    pub fn for_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }
}

/// Outcome of a `POST /sync` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub campaigns_synced: u64,
    pub metrics_synced: u64,
}
