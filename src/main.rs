use anyhow::Result;
use campaign_pulse::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run_cli().await
}
