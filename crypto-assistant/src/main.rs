use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use crypto_assistant::{
    logging, middleware::cors_middleware, routes, AppConfig, CoinGeckoClient, CommandInterpreter,
};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init_tracing("info");

    let config = AppConfig::from_env().context("invalid configuration")?;

    if config.voice.is_enabled() {
        info!("Voice transport credentials found");
    } else {
        warn!(
            "Voice transport disabled, missing {}",
            config.voice.missing().join(", ")
        );
    }

    let client = CoinGeckoClient::from_config(&config).context("failed to build CoinGecko client")?;
    let interpreter = web::Data::new(CommandInterpreter::new(Arc::new(client)));

    let (host, port) = config.bind_address();
    info!("🚀 Starting crypto assistant on http://{}:{}", host, port);

    let cors_origin = config.cors_allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(cors_origin.as_deref()))
            .wrap(Logger::default())
            .app_data(interpreter.clone())
            .configure(routes::config)
    })
    .bind((host.as_str(), port))
    .map_err(|e| {
        error!("Could not bind {}:{}: {}", host, port, e);
        e
    })
    .with_context(|| format!("failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}
