use anyhow::{Context, Result};
use crypto_assistant::{logging, AppConfig, AssistantSystem};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init_tracing("warn");

    let config = AppConfig::from_env().context("invalid configuration")?;
    let mut system = AssistantSystem::from_config(&config)?;

    system.run().await
}
