use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::commands::utils::print_json;
use crate::cli::commands::Command;
use crate::config::PulseConfig;
use crate::core::types::ConnectionState;
use crate::stream::{ConnectionManager, ConnectionOptions, ReplayTransport};

pub struct StreamCommand {
    input: String,
    config: PulseConfig,
}

impl StreamCommand {
    pub fn new(input: String, config: PulseConfig) -> Self {
        Self { input, config }
    }

    async fn read_input(&self) -> Result<String> {
        if self.input == "-" {
            if atty::is(atty::Stream::Stdin) {
                bail!("No stream piped on stdin");
            }
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read stream from stdin")?;
            Ok(content)
        } else {
            tokio::fs::read_to_string(&self.input)
                .await
                .with_context(|| format!("Failed to read stream file {}", self.input))
        }
    }
}

#[async_trait]
impl Command for StreamCommand {
    async fn execute(&self) -> Result<()> {
        let content = self.read_input().await?;
        let manager = ConnectionManager::new(
            self.config.stream.ws_endpoint(),
            ReplayTransport::from_lines(&content),
            ConnectionOptions::from(&self.config.stream),
        );
        manager
            .subscribe(|updates| {
                if let Some(latest) = updates.first() {
                    debug!(
                        "Buffered update for {} ({} held)",
                        latest.record.campaign_name,
                        updates.len()
                    );
                }
            })
            .await;

        let mut states = manager.watch_state();
        manager.connect();
        // The replay session ends by reporting the peer as closed.
        states
            .wait_for(|state| *state == ConnectionState::Reconnecting)
            .await
            .context("Connection manager went away during replay")?;
        manager.close().await;

        let updates = manager.updates().await;
        info!("Replay finished with {} buffered updates", updates.len());
        print_json(&updates)
    }
}
