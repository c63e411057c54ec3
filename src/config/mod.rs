//! Configuration for campaign-pulse
//!
//! Settings live in a TOML file. Every field has a default, so a missing
//! file (or a missing section) yields the stock thresholds.

pub mod paths;
pub mod validation;

pub use paths::{config_dir, global_config_path, local_config_path, resolve_config_path};
pub use validation::validate_config;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::analytics::alerts::AlertThresholds;
use crate::analytics::recommendations::RecommendationThresholds;
use crate::core::constants::{alerts, analytics, recommendations, stream};
use crate::core::errors::ConfigError;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PulseConfig {
    pub stream: StreamConfig,
    pub alerts: AlertsConfig,
    pub recommendations: RecommendationsConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Backend base URL; `http(s)` is rewritten to `ws(s)` for streaming
    pub base_url: String,
    pub reconnect_delay_secs: u64,
    pub buffer_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            reconnect_delay_secs: stream::RECONNECT_DELAY.as_secs(),
            buffer_capacity: stream::UPDATE_BUFFER_CAPACITY,
        }
    }
}

impl StreamConfig {
    /// Streaming endpoint derived from the base URL (`<base>/ws`)
    pub fn ws_endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{base}{}", stream::WS_PATH)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub low_roas_threshold: f64,
    pub high_spend_threshold: f64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            low_roas_threshold: alerts::LOW_ROAS,
            high_spend_threshold: alerts::HIGH_SPEND,
        }
    }
}

impl From<&AlertsConfig> for AlertThresholds {
    fn from(config: &AlertsConfig) -> Self {
        AlertThresholds {
            low_roas: config.low_roas_threshold,
            high_spend: config.high_spend_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationsConfig {
    pub low_roas: f64,
    pub excellent_roas: f64,
    pub platform_low_roas: f64,
    pub min_conversion_rate: f64,
    pub min_clicks: u64,
    pub strong_roas: f64,
    pub max_recommendations: usize,
}

impl Default for RecommendationsConfig {
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

impl From<&RecommendationsConfig> for RecommendationThresholds {
    fn from(config: &RecommendationsConfig) -> Self {
        RecommendationThresholds {
            low_roas: config.low_roas,
            excellent_roas: config.excellent_roas,
            platform_low_roas: config.platform_low_roas,
            min_conversion_rate: config.min_conversion_rate,
            min_clicks: config.min_clicks,
            strong_roas: config.strong_roas,
            max_recommendations: config.max_recommendations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub top_campaigns_limit: usize,
    pub default_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_campaigns_limit: analytics::TOP_CAMPAIGNS_LIMIT,
            default_days: analytics::DEFAULT_DAYS,
        }
    }
}

impl PulseConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: PulseConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load config from file
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content, path)
    }

    /// Load config from file, falling back to defaults if it doesn't exist
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path).await
        } else {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate and write config to file
    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        validate_config(self)?;
        let content = self.to_toml_string()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        tokio::fs::write(path, content).await.map_err(write_err)
    }

    pub fn alert_thresholds(&self) -> AlertThresholds {
        AlertThresholds::from(&self.alerts)
    }

    pub fn recommendation_thresholds(&self) -> RecommendationThresholds {
        RecommendationThresholds::from(&self.recommendations)
    }
}
