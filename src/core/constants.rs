//! Wire and threshold constants shared across the crate.
//!
//! String literals that appear on the wire are kept here so the streaming
//! decoder, the data types and the exporters agree on spelling.

/// Platform identifiers and display labels
pub mod platforms {
    pub const GOOGLE_ADS: &str = "google_ads";
    pub const FACEBOOK_ADS: &str = "facebook_ads";
    pub const GOOGLE_ADS_LABEL: &str = "Google Ads";
    pub const FACEBOOK_ADS_LABEL: &str = "Facebook Ads";
}

/// Campaign delivery statuses reported by the ad networks
pub mod statuses {
    pub const ACTIVE: &str = "ACTIVE";
    pub const ENABLED: &str = "ENABLED";
    pub const PAUSED: &str = "PAUSED";
}

/// Streaming protocol constants
pub mod stream {
    use std::time::Duration;

    /// Path appended to the base URL to reach the streaming endpoint
    pub const WS_PATH: &str = "/ws";
    /// Message type carrying a performance record
    pub const PERFORMANCE_UPDATE: &str = "performance_update";
    /// Maximum number of live updates kept for display
    pub const UPDATE_BUFFER_CAPACITY: usize = 10;
    /// Fixed delay before a reconnect attempt
    pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);
}

/// Alert thresholds
pub mod alerts {
    pub const LOW_ROAS: f64 = 1.5;
    pub const HIGH_SPEND: f64 = 100_000.0;
}

/// Recommendation thresholds
pub mod recommendations {
    pub const LOW_ROAS: f64 = 2.0;
    pub const EXCELLENT_ROAS: f64 = 3.0;
    pub const PLATFORM_LOW_ROAS: f64 = 1.5;
    pub const MIN_CONVERSION_RATE: f64 = 5.0;
    pub const MIN_CLICKS: u64 = 100;
    pub const STRONG_ROAS: f64 = 2.5;
    pub const MAX_RECOMMENDATIONS: usize = 5;
}

/// Analytics defaults
pub mod analytics {
    pub const TOP_CAMPAIGNS_LIMIT: usize = 5;
    pub const DEFAULT_DAYS: u32 = 7;
}

/// Configuration file names
pub mod config_files {
    pub const LOCAL_CONFIG: &str = ".campaign-pulse.toml";
    pub const APP_DIR: &str = "campaign-pulse";
    pub const GLOBAL_CONFIG: &str = "config.toml";
}
