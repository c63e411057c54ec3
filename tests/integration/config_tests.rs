use anyhow::Result;
use campaign_pulse::config::{resolve_config_path, PulseConfig};
use campaign_pulse::core::errors::ConfigError;
use campaign_pulse::stream::ConnectionOptions;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_local_config_drives_engines() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join(".campaign-pulse.toml");
    tokio::fs::write(
        &path,
        r#"
[stream]
base_url = "https://ads.example.com"
reconnect_delay_secs = 2
buffer_capacity = 5

[alerts]
low_roas_threshold = 2.5

[recommendations]
max_recommendations = 3
"#,
    )
    .await?;

    let resolved = resolve_config_path(None, dir.path());
    assert_eq!(resolved, path);

    let config = PulseConfig::load_or_default(&resolved).await?;
    assert_eq!(config.stream.ws_endpoint(), "wss://ads.example.com/ws");
    assert_eq!(config.alert_thresholds().low_roas, 2.5);
    assert_eq!(config.alert_thresholds().high_spend, 100_000.0);
    assert_eq!(config.recommendation_thresholds().max_recommendations, 3);

    let options = ConnectionOptions::from(&config.stream);
    assert_eq!(options.reconnect_delay, Duration::from_secs(2));
    assert_eq!(options.buffer_capacity, 5);
    Ok(())
}

#[tokio::test]
async fn test_negative_threshold_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.toml");
    tokio::fs::write(&path, "[alerts]\nhigh_spend_threshold = -1.0\n").await?;

    let result = PulseConfig::load(&path).await;
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    Ok(())
}
