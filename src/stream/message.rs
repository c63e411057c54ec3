//! Decoding of inbound streaming messages.
//!
//! Every server message is a JSON object `{"type": ..., "data": ...}`.
//! Only `performance_update` carries a record; other types (for example
//! `connection_established` or `echo`) are parsed but not acted upon.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::constants::stream::PERFORMANCE_UPDATE;
use crate::core::errors::MessageError;
use crate::core::types::{PerformanceRecord, Platform};

/// A parsed server message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    /// Any other top-level fields (`message`, `timestamp`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InboundMessage {
    pub fn parse(text: &str) -> Result<Self, MessageError> {
        serde_json::from_str(text).map_err(MessageError::Malformed)
    }

    pub fn is_performance_update(&self) -> bool {
        self.kind == PERFORMANCE_UPDATE
    }

    /// Decode `data` as a performance record.
    ///
    /// `arrival` supplies the date when the payload has neither `date` nor a
    /// usable `timestamp`.
    pub fn performance_record(
        &self,
        arrival: DateTime<Utc>,
    ) -> Result<PerformanceRecord, MessageError> {
        let payload: LivePayload =
            serde_json::from_value(self.data.clone()).map_err(|source| {
                MessageError::InvalidPayload {
                    kind: self.kind.clone(),
                    source,
                }
            })?;
        let record = payload.into_record(arrival);
        record.validate()?;
        Ok(record)
    }
}

/// Record shape as sent on the live stream. The server stamps updates with
/// `timestamp` rather than `date`.
#[derive(Debug, Deserialize)]
struct LivePayload {
    #[serde(default)]
    id: Option<String>,
    campaign_id: String,
    campaign_name: String,
    platform: Platform,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    impressions: u64,
    clicks: u64,
    conversions: u64,
    cost: f64,
    revenue: f64,
}

impl LivePayload {
    fn record_date(&self, arrival: DateTime<Utc>) -> String {
        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            return date.to_string();
        }

        let day: NaiveDate = self
            .timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc).date_naive())
            .unwrap_or_else(|| arrival.date_naive());
        day.format("%Y-%m-%d").to_string()
    }

    fn into_record(self, arrival: DateTime<Utc>) -> PerformanceRecord {
        let date = self.record_date(arrival);
        PerformanceRecord {
            id: self.id,
            campaign_id: self.campaign_id,
            campaign_name: self.campaign_name,
            platform: self.platform,
            date,
            impressions: self.impressions,
            clicks: self.clicks,
            conversions: self.conversions,
            cost: self.cost,
            revenue: self.revenue,
        }
    }
}
