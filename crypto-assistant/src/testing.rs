//! In-memory market data for interpreter, route and REPL tests.

use crate::api::MarketDataSource;
use crate::models::{
    CoinDescription, CoinDetail, CoinMarketData, Dominance, FetchError, GlobalMarket,
    PriceSnapshot, SimplePrice, TrendingCoin, UsdValue,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub(crate) struct CallCount(Arc<AtomicUsize>);

impl CallCount {
    pub(crate) fn total(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Answers every request with fixed data, or fails every request with a 503.
pub(crate) struct StaticSource {
    failing: bool,
    calls: CallCount,
}

impl StaticSource {
    pub(crate) fn healthy() -> Self {
        Self {
            failing: false,
            calls: CallCount::default(),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            calls: CallCount::default(),
        }
    }

    pub(crate) fn calls(&self) -> CallCount {
        self.calls.clone()
    }

    fn check(&self, path: &str) -> Result<(), FetchError> {
        self.calls.bump();
        if self.failing {
            return Err(FetchError::Status {
                url: format!("https://example.test{}", path),
                status: 503,
            });
        }
        Ok(())
    }
}

fn price(usd: f64, change: f64) -> SimplePrice {
    SimplePrice {
        usd,
        usd_market_cap: None,
        usd_24h_vol: None,
        usd_24h_change: Some(change),
    }
}

#[async_trait]
impl MarketDataSource for StaticSource {
    async fn fetch_coin_detail(&self, id: &str) -> Result<CoinDetail, FetchError> {
        self.check(&format!("/coins/{}", id))?;
        Ok(CoinDetail {
            id: "bitcoin".into(),
            symbol: "btc".into(),
            name: "Bitcoin".into(),
            market_cap_rank: Some(1),
            genesis_date: Some("2009-01-03".into()),
            description: Some(CoinDescription {
                en: Some("Bitcoin is the first decentralized cryptocurrency. It launched in 2009.".into()),
            }),
            market_data: CoinMarketData {
                current_price: UsdValue { usd: 65000.0 },
                market_cap: UsdValue { usd: 1.3e12 },
                total_volume: UsdValue { usd: 3.0e10 },
                price_change_percentage_24h: Some(2.5),
            },
        })
    }

    async fn fetch_prices(&self, ids: &[&str]) -> Result<PriceSnapshot, FetchError> {
        self.check("/simple/price")?;
        let known = [
            ("bitcoin", price(65000.0, 2.5)),
            ("ethereum", price(3500.0, -1.0)),
            ("binancecoin", price(600.0, 0.5)),
            ("solana", price(150.0, 6.75)),
            ("ripple", price(0.6, 3.1)),
        ];
        Ok(known
            .into_iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, p)| (id.to_string(), p))
            .collect())
    }

    async fn fetch_global_market(&self) -> Result<GlobalMarket, FetchError> {
        self.check("/global")?;
        Ok(GlobalMarket {
            total_market_cap: UsdValue { usd: 2.5e12 },
            total_volume: UsdValue { usd: 1.0e11 },
            market_cap_percentage: Dominance { btc: 52.0, eth: 17.0 },
            market_cap_change_percentage_24h_usd: 1.25,
            active_cryptocurrencies: Some(10000),
        })
    }

    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, FetchError> {
        self.check("/search/trending")?;
        Ok(["Pepe", "Sui", "Bonk", "Jupiter"]
            .iter()
            .map(|name| TrendingCoin {
                id: name.to_lowercase(),
                symbol: name.to_uppercase(),
                name: name.to_string(),
                price_btc: None,
                market_cap_rank: None,
            })
            .collect())
    }
}
