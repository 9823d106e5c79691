use crate::config::AppConfig;
use crate::models::{
    CoinDetail, FetchError, GlobalMarket, GlobalMarketResponse, PriceSnapshot, TrendingCoin,
    TrendingResponse,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Duration;
use common::ResponseCache;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

pub const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub type PayloadCache = ResponseCache<Arc<Value>, FetchError>;

/// Performs a single GET and hands back the JSON body.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url = %url, "requesting");

        let request_failed = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(request_failed)?;
        if text.trim().is_empty() {
            return Err(FetchError::Decode {
                url: url.to_string(),
                message: "empty response body".to_string(),
            });
        }

        serde_json::from_str(&text).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Market data the interpreter can ask for.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Full detail for one coin, market data included.
    async fn fetch_coin_detail(&self, id: &str) -> Result<CoinDetail, FetchError>;

    /// USD price snapshot (with 24h change, volume and market cap) for several coins.
    async fn fetch_prices(&self, ids: &[&str]) -> Result<PriceSnapshot, FetchError>;

    /// Whole-market aggregates.
    async fn fetch_global_market(&self) -> Result<GlobalMarket, FetchError>;

    /// Coins currently trending in search, most popular first.
    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, FetchError>;
}

/// CoinGecko client; every GET goes through a URL-keyed response cache.
pub struct CoinGeckoClient {
    fetcher: Arc<dyn JsonFetcher>,
    cache: PayloadCache,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(
            BASE_URL,
            Arc::new(ReqwestFetcher::new()?),
            PayloadCache::new(Duration::seconds(common::DEFAULT_TTL_SECS)),
        ))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        info!(
            "CoinGecko client for {} (cache ttl {}s)",
            config.coingecko_api_url, config.cache_ttl_secs
        );
        Ok(Self::with_fetcher(
            &config.coingecko_api_url,
            Arc::new(ReqwestFetcher::new()?),
            PayloadCache::new(config.cache_ttl()),
        ))
    }

    pub fn with_fetcher(base_url: &str, fetcher: Arc<dyn JsonFetcher>, cache: PayloadCache) -> Self {
        Self {
            fetcher,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn coin_detail_url(&self, id: &str) -> String {
        format!(
            "{}/coins/{}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false",
            self.base_url, id
        )
    }

    pub fn prices_url(&self, ids: &[&str]) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
            self.base_url,
            ids.join(",")
        )
    }

    pub fn global_url(&self) -> String {
        format!("{}/global", self.base_url)
    }

    pub fn trending_url(&self) -> String {
        format!("{}/search/trending", self.base_url)
    }

    /// Query is percent-encoded, spaces as `%20`.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?query={}", self.base_url, urlencoding::encode(query))
    }

    pub fn coin_list_url(&self) -> String {
        format!("{}/coins/list", self.base_url)
    }

    /// Cached GET of an arbitrary URL.
    pub async fn fetch_cached(&self, url: &str) -> Result<Arc<Value>, FetchError> {
        let fetcher = self.fetcher.clone();
        let request_url = url.to_string();
        self.cache
            .get_or_fetch(url, move || async move {
                fetcher.get_json(&request_url).await.map(Arc::new)
            })
            .await
    }

    async fn fetch_typed<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let payload = self.fetch_cached(url).await?;
        T::deserialize(&*payload).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Raw `/search` results for a coin name or symbol.
    pub async fn search_coins(&self, query: &str) -> Result<Arc<Value>, FetchError> {
        self.fetch_cached(&self.search_url(query)).await
    }

    /// Raw `/coins/list` (id, symbol, name for every listed coin).
    pub async fn fetch_coin_list(&self) -> Result<Arc<Value>, FetchError> {
        self.fetch_cached(&self.coin_list_url()).await
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn fetch_coin_detail(&self, id: &str) -> Result<CoinDetail, FetchError> {
        self.fetch_typed(&self.coin_detail_url(id)).await
    }

    async fn fetch_prices(&self, ids: &[&str]) -> Result<PriceSnapshot, FetchError> {
        self.fetch_typed(&self.prices_url(ids)).await
    }

    async fn fetch_global_market(&self) -> Result<GlobalMarket, FetchError> {
        let response: GlobalMarketResponse = self.fetch_typed(&self.global_url()).await?;
        Ok(response.data)
    }

    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, FetchError> {
        let response: TrendingResponse = self.fetch_typed(&self.trending_url()).await?;
        Ok(response.coins.into_iter().map(|entry| entry.item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Clock, ManualClock};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::VecDeque;

    /// Replays queued responses and records every URL it was asked for.
    #[derive(Default)]
    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<Value, FetchError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn push(&self, response: Result<Value, FetchError>) {
            self.responses.lock().push_back(response);
        }

        fn request_count(&self) -> usize {
            self.requests.lock().len()
        }
    }

    #[async_trait]
    impl JsonFetcher for ScriptedFetcher {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.requests.lock().push(url.to_string());
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Status { url: url.to_string(), status: 503 }))
        }
    }

    fn bitcoin_payload(price: f64) -> Value {
        json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "market_cap_rank": 1,
            "market_data": {
                "current_price": { "usd": price },
                "market_cap": { "usd": 1.3e12 },
                "total_volume": { "usd": 3.0e10 },
                "price_change_percentage_24h": 2.5
            }
        })
    }

    fn client() -> (CoinGeckoClient, Arc<ScriptedFetcher>, Arc<ManualClock>) {
        let fetcher = Arc::new(ScriptedFetcher::default());
        let clock = Arc::new(ManualClock::default());
        let cache = PayloadCache::with_clock(Duration::seconds(60), clock.clone() as Arc<dyn Clock>);
        let client = CoinGeckoClient::with_fetcher(BASE_URL, fetcher.clone(), cache);
        (client, fetcher, clock)
    }

    #[tokio::test]
    async fn second_fetch_within_ttl_is_served_from_cache() {
        let (client, fetcher, clock) = client();
        fetcher.push(Ok(bitcoin_payload(65000.0)));

        let first = client.fetch_coin_detail("bitcoin").await.unwrap();
        clock.advance(Duration::seconds(59));
        let second = client.fetch_coin_detail("bitcoin").await.unwrap();

        assert_eq!(fetcher.request_count(), 1);
        assert_eq!(first.market_data.current_price, second.market_data.current_price);

        let url = client.coin_detail_url("bitcoin");
        let raw_a = client.fetch_cached(&url).await.unwrap();
        let raw_b = client.fetch_cached(&url).await.unwrap();
        assert!(Arc::ptr_eq(&raw_a, &raw_b));
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn fetch_after_ttl_hits_the_network_again() {
        let (client, fetcher, clock) = client();
        fetcher.push(Ok(bitcoin_payload(65000.0)));
        fetcher.push(Ok(bitcoin_payload(66000.0)));

        client.fetch_coin_detail("bitcoin").await.unwrap();
        clock.advance(Duration::seconds(61));
        let refreshed = client.fetch_coin_detail("bitcoin").await.unwrap();

        assert_eq!(fetcher.request_count(), 2);
        assert_eq!(refreshed.market_data.current_price.usd, 66000.0);
    }

    #[tokio::test]
    async fn failed_request_does_not_populate_cache() {
        let (client, fetcher, _clock) = client();
        let url = client.global_url();
        fetcher.push(Err(FetchError::Status { url: url.clone(), status: 429 }));

        let err = client.fetch_global_market().await.unwrap_err();
        assert_eq!(err, FetchError::Status { url, status: 429 });
        assert_eq!(client.cache_len(), 0);

        fetcher.push(Ok(json!({
            "data": {
                "total_market_cap": { "usd": 2.4e12 },
                "total_volume": { "usd": 9.0e10 },
                "market_cap_percentage": { "btc": 52.1, "eth": 16.9 },
                "market_cap_change_percentage_24h_usd": -1.2
            }
        })));
        let global = client.fetch_global_market().await.unwrap();
        assert_eq!(global.market_cap_percentage.btc, 52.1);
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn payload_missing_market_data_is_a_decode_error() {
        let (client, fetcher, _clock) = client();
        fetcher.push(Ok(json!({ "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" })));

        let err = client.fetch_coin_detail("bitcoin").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn trending_unwraps_items_in_order() {
        let (client, fetcher, _clock) = client();
        fetcher.push(Ok(json!({
            "coins": [
                { "item": { "id": "pepe", "symbol": "PEPE", "name": "Pepe", "market_cap_rank": 30 } },
                { "item": { "id": "sui", "symbol": "SUI", "name": "Sui" } }
            ]
        })));

        let trending = client.fetch_trending().await.unwrap();
        let names: Vec<_> = trending.iter().map(|coin| coin.name.as_str()).collect();
        assert_eq!(names, ["Pepe", "Sui"]);
    }

    #[tokio::test]
    async fn search_results_are_cached_per_query() {
        let (client, fetcher, _clock) = client();
        fetcher.push(Ok(json!({ "coins": [{ "id": "shiba-inu", "symbol": "SHIB" }] })));
        fetcher.push(Ok(json!({ "coins": [] })));

        let first = client.search_coins("shiba").await.unwrap();
        let again = client.search_coins("shiba").await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first["coins"][0]["id"], "shiba-inu");

        client.search_coins("pepe").await.unwrap();
        assert_eq!(fetcher.request_count(), 2);
        assert_eq!(client.cache_len(), 2);

        client.clear_cache();
        assert_eq!(client.cache_len(), 0);
    }

    #[test]
    fn urls_are_deterministic() {
        let (client, _fetcher, _clock) = client();
        assert_eq!(
            client.prices_url(&["bitcoin", "ethereum"]),
            "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true"
        );
        assert_eq!(client.global_url(), "https://api.coingecko.com/api/v3/global");
        assert_eq!(
            client.search_url("shiba inu"),
            "https://api.coingecko.com/api/v3/search?query=shiba%20inu"
        );
        assert_eq!(
            client.search_url("a&b=c"),
            "https://api.coingecko.com/api/v3/search?query=a%26b%3Dc"
        );
    }
}
