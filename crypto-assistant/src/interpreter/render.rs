use super::format::{direction, format_percentage, format_usd};
use crate::models::{CoinDetail, GlobalMarket, PriceSnapshot, SimplePrice, TrendingCoin};
use std::cmp::Ordering;

/// Coins compared for "top performers", in display order before sorting.
pub const TOP_COIN_BASKET: &[&str] = &["bitcoin", "ethereum", "binancecoin", "solana", "ripple"];

const TRENDING_SHOWN: usize = 3;
const TOP_PERFORMERS_SHOWN: usize = 3;

pub fn price_sentence(coin: &CoinDetail) -> String {
    let market = &coin.market_data;
    let change = market.price_change_percentage_24h.unwrap_or_default();
    format!(
        "The current price of {} ({}) is {}. It has {} by {} in the last 24 hours. The market cap is {} with a 24-hour trading volume of {}.",
        coin.name,
        coin.symbol.to_uppercase(),
        format_usd(market.current_price.usd),
        direction(change, "increased", "decreased"),
        format_percentage(change.abs()),
        format_usd(market.market_cap.usd),
        format_usd(market.total_volume.usd),
    )
}

pub fn market_overview(global: &GlobalMarket, trending: &[TrendingCoin]) -> String {
    let change = global.market_cap_change_percentage_24h_usd;
    let mut text = format!(
        "The global crypto market cap is currently {}, a {} of {} in the last 24 hours. The 24-hour trading volume is {}. Bitcoin dominance is at {} and Ethereum at {}.",
        format_usd(global.total_market_cap.usd),
        direction(change, "gain", "loss"),
        format_percentage(change.abs()),
        format_usd(global.total_volume.usd),
        format_percentage(global.market_cap_percentage.btc),
        format_percentage(global.market_cap_percentage.eth),
    );

    let names: Vec<&str> = trending
        .iter()
        .take(TRENDING_SHOWN)
        .map(|coin| coin.name.as_str())
        .collect();
    if !names.is_empty() {
        text.push_str(&format!(" Trending coins right now include {}.", names.join(", ")));
    }
    text
}

/// Name shown for a basket coin id.
pub fn display_name(id: &str) -> String {
    match id {
        "binancecoin" => "Binance Coin".to_string(),
        "ripple" => "XRP".to_string(),
        _ => {
            let mut chars = id.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Basket coins present in the snapshot, best 24h change first.
///
/// Ties keep basket order; a missing change counts as zero.
pub fn rank_by_change<'a>(basket: &[&'a str], snapshot: &PriceSnapshot) -> Vec<(&'a str, SimplePrice)> {
    let mut ranked: Vec<(&str, SimplePrice)> = basket
        .iter()
        .filter_map(|id| snapshot.get(*id).map(|price| (*id, *price)))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| {
        let a = a.usd_24h_change.unwrap_or_default();
        let b = b.usd_24h_change.unwrap_or_default();
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    ranked
}

/// `None` when the snapshot has none of the basket coins.
pub fn top_performers(basket: &[&str], snapshot: &PriceSnapshot) -> Option<String> {
    let ranked = rank_by_change(basket, snapshot);
    if ranked.is_empty() {
        return None;
    }

    let listed: Vec<String> = ranked
        .iter()
        .take(TOP_PERFORMERS_SHOWN)
        .map(|(id, price)| {
            format!(
                "{} at {} ({})",
                display_name(id),
                format_usd(price.usd),
                format_percentage(price.usd_24h_change.unwrap_or_default()),
            )
        })
        .collect();

    Some(format!(
        "The top performing major cryptocurrencies in the last 24 hours are: {}.",
        listed.join(", ")
    ))
}

/// Live profile for a coin without a curated description.
pub fn coin_profile(coin: &CoinDetail) -> String {
    let mut parts = Vec::with_capacity(4);

    parts.push(match coin.market_cap_rank {
        Some(rank) => format!(
            "{} ({}) is currently ranked #{} by market cap.",
            coin.name,
            coin.symbol.to_uppercase(),
            rank
        ),
        None => format!(
            "{} ({}) is not currently ranked by market cap.",
            coin.name,
            coin.symbol.to_uppercase()
        ),
    });

    if let Some(genesis) = coin.genesis_date.as_deref().filter(|date| !date.is_empty()) {
        parts.push(format!("It was created on {}.", genesis));
    }
    if let Some(summary) = coin.summary_sentence() {
        parts.push(summary);
    }

    parts.push(format!(
        "The current price is {} with a market cap of {}.",
        format_usd(coin.market_data.current_price.usd),
        format_usd(coin.market_data.market_cap.usd),
    ));

    parts.join(" ")
}
