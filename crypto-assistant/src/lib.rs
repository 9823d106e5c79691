pub mod api;
pub mod config;
pub mod interpreter;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod system;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main components
pub use api::{CoinGeckoClient, MarketDataSource};
pub use config::{AppConfig, ConfigError};
pub use interpreter::{CommandInterpreter, Failure, Intent, Interpretation};
pub use models::{ConversationMessage, FetchError, Role};
pub use system::AssistantSystem;
