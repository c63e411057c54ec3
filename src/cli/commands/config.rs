use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::cli::args::ConfigAction;
use crate::cli::commands::Command;
use crate::config::PulseConfig;

pub struct ConfigCommand {
    action: ConfigAction,
    path: PathBuf,
    config: PulseConfig,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, path: PathBuf, config: PulseConfig) -> Self {
        Self {
            action,
            path,
            config,
        }
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        match self.action {
            ConfigAction::Init => {
                PulseConfig::default()
                    .save(&self.path)
                    .await
                    .context("Failed to write default configuration")?;
                println!("Configuration initialized at {}", self.path.display());
            }

            ConfigAction::Show => {
                if !self.path.exists() {
                    println!("# No configuration file found, showing defaults. Use 'config init' to create one.");
                } else {
                    println!("# {}", self.path.display());
                }
                println!("{}", self.config.to_toml_string()?);
            }
        }

        Ok(())
    }
}
