use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single `{"usd": ...}` amount as CoinGecko nests them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsdValue {
    pub usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub genesis_date: Option<String>,
    #[serde(default)]
    pub description: Option<CoinDescription>,
    pub market_data: CoinMarketData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinDescription {
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarketData {
    pub current_price: UsdValue,
    pub market_cap: UsdValue,
    pub total_volume: UsdValue,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinDetail {
    /// First sentence of the English description, if there is one.
    pub fn summary_sentence(&self) -> Option<String> {
        let text = self.description.as_ref()?.en.as_deref()?.trim();
        let first = text.split(". ").next()?.trim().trim_end_matches('.');
        if first.is_empty() {
            None
        } else {
            Some(format!("{}.", first))
        }
    }
}

/// One entry of `/simple/price` with the 24h extras switched on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplePrice {
    pub usd: f64,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
    #[serde(default)]
    pub usd_24h_vol: Option<f64>,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
}

/// Coin id -> price entry.
pub type PriceSnapshot = HashMap<String, SimplePrice>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalMarketResponse {
    pub data: GlobalMarket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalMarket {
    pub total_market_cap: UsdValue,
    pub total_volume: UsdValue,
    pub market_cap_percentage: Dominance,
    pub market_cap_change_percentage_24h_usd: f64,
    #[serde(default)]
    pub active_cryptocurrencies: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dominance {
    pub btc: f64,
    pub eth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub coins: Vec<TrendingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub item: TrendingCoin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub price_btc: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the visible transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

pub const WELCOME_MESSAGE: &str = "Hello! I'm your crypto voice assistant. You can ask me about cryptocurrency prices, market trends, or general information. How can I help you today?";

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn welcome() -> Self {
        Self {
            id: "welcome".to_string(),
            role: Role::Assistant,
            content: WELCOME_MESSAGE.to_string(),
        }
    }
}

/// Failure talking to the market-data API.
///
/// Kept `Clone` so one result can be handed to every caller waiting on the
/// same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coin_detail_reads_nested_usd_fields() {
        let payload = json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "market_cap_rank": 1,
            "genesis_date": "2009-01-03",
            "description": { "en": "Bitcoin is the first decentralized cryptocurrency. It was created in 2009." },
            "market_data": {
                "current_price": { "usd": 65000.0, "eur": 60000.0 },
                "market_cap": { "usd": 1.3e12 },
                "total_volume": { "usd": 3.0e10 },
                "price_change_percentage_24h": 2.5
            }
        });

        let coin: CoinDetail = serde_json::from_value(payload).unwrap();
        assert_eq!(coin.market_data.current_price.usd, 65000.0);
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(
            coin.summary_sentence().as_deref(),
            Some("Bitcoin is the first decentralized cryptocurrency.")
        );
    }

    #[test]
    fn summary_sentence_skips_blank_descriptions() {
        let payload = json!({
            "id": "x", "symbol": "x", "name": "X",
            "description": { "en": "" },
            "market_data": {
                "current_price": { "usd": 1.0 },
                "market_cap": { "usd": 1.0 },
                "total_volume": { "usd": 1.0 },
                "price_change_percentage_24h": null
            }
        });
        let coin: CoinDetail = serde_json::from_value(payload).unwrap();
        assert_eq!(coin.summary_sentence(), None);
        assert_eq!(coin.market_data.price_change_percentage_24h, None);
    }

    #[test]
    fn welcome_message_is_first_class_assistant_line() {
        let welcome = ConversationMessage::welcome();
        assert_eq!(welcome.id, "welcome");
        assert_eq!(welcome.role, Role::Assistant);

        let json = serde_json::to_value(ConversationMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
    }
}
