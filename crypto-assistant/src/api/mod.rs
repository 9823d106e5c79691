pub mod aliases;
pub mod coingecko;

pub use aliases::{resolve_coin_id, resolve_coin_id_longest, COIN_ALIASES};
pub use coingecko::{CoinGeckoClient, JsonFetcher, MarketDataSource, ReqwestFetcher};
