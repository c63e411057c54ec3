use serde::{Deserialize, Serialize};

use crate::analytics::types::{Alert, AlertKind, Priority};
use crate::core::constants::alerts;
use crate::core::types::Summary;
use crate::core::utils::DisplayUtils;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Alert when overall ROAS drops below this
    pub low_roas: f64,
    /// Alert when total spend rises above this
    pub high_spend: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_roas: alerts::LOW_ROAS,
            high_spend: alerts::HIGH_SPEND,
        }
    }
}

pub struct AlertRulesEngine {
    thresholds: AlertThresholds,
}

impl AlertRulesEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Check a summary against the thresholds.
    ///
    /// Rules run in a fixed order and never suppress each other.
    pub fn evaluate(&self, summary: &Summary) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if summary.total_roas < self.thresholds.low_roas {
            alerts.push(Alert {
                kind: AlertKind::Warning,
                message: format!(
                    "Low ROAS Alert: Current ROAS is {}. Consider optimizing campaigns.",
                    DisplayUtils::format_multiplier(summary.total_roas)
                ),
                priority: Priority::High,
            });
        }

        if summary.total_spend > self.thresholds.high_spend {
            alerts.push(Alert {
                kind: AlertKind::Info,
                message: format!(
                    "High spend detected: ${} in the period.",
                    DisplayUtils::format_amount(summary.total_spend)
                ),
                priority: Priority::Medium,
            });
        }

        alerts
    }
}

impl Default for AlertRulesEngine {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}
