//! Configuration validation for campaign-pulse

use crate::config::PulseConfig;
use crate::core::constants::stream;
use crate::core::errors::ConfigError;

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a non-negative number, got {value}")))
    }
}

/// Check every field of a loaded configuration
pub fn validate_config(config: &PulseConfig) -> Result<(), ConfigError> {
    let capacity = config.stream.buffer_capacity;
    if capacity == 0 || capacity > stream::UPDATE_BUFFER_CAPACITY {
        return Err(invalid(
            "stream.buffer_capacity",
            format!(
                "must be between 1 and {}, got {capacity}",
                stream::UPDATE_BUFFER_CAPACITY
            ),
        ));
    }
    if config.stream.base_url.trim().is_empty() {
        return Err(invalid("stream.base_url", "must not be empty"));
    }

    non_negative("alerts.low_roas_threshold", config.alerts.low_roas_threshold)?;
    non_negative("alerts.high_spend_threshold", config.alerts.high_spend_threshold)?;

    let recs = &config.recommendations;
    non_negative("recommendations.low_roas", recs.low_roas)?;
    non_negative("recommendations.excellent_roas", recs.excellent_roas)?;
    non_negative("recommendations.platform_low_roas", recs.platform_low_roas)?;
    non_negative("recommendations.min_conversion_rate", recs.min_conversion_rate)?;
    non_negative("recommendations.strong_roas", recs.strong_roas)?;
    if recs.max_recommendations == 0 {
        return Err(invalid("recommendations.max_recommendations", "must be at least 1"));
    }

    if config.analytics.top_campaigns_limit == 0 {
        return Err(invalid("analytics.top_campaigns_limit", "must be at least 1"));
    }
    if config.analytics.default_days == 0 {
        return Err(invalid("analytics.default_days", "must be at least 1"));
    }

    Ok(())
}
