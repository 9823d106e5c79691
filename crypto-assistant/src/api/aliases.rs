//! Free-text coin names and tickers mapped to CoinGecko ids.

use std::cmp::Reverse;

/// Alias -> CoinGecko id, in lookup order.
///
/// Order matters for [`resolve_coin_id`]: the scan stops at the first alias
/// contained in the input, so "tether" resolves through "eth" before it ever
/// reaches its own entry.
pub const COIN_ALIASES: &[(&str, &str)] = &[
    ("bitcoin", "bitcoin"),
    ("btc", "bitcoin"),
    ("ethereum", "ethereum"),
    ("eth", "ethereum"),
    ("solana", "solana"),
    ("sol", "solana"),
    ("cardano", "cardano"),
    ("ada", "cardano"),
    ("dogecoin", "dogecoin"),
    ("doge", "dogecoin"),
    ("polkadot", "polkadot"),
    ("dot", "polkadot"),
    ("chainlink", "chainlink"),
    ("link", "chainlink"),
    ("avalanche", "avalanche-2"),
    ("avax", "avalanche-2"),
    ("polygon", "polygon"),
    ("matic", "polygon"),
    ("uniswap", "uniswap"),
    ("uni", "uniswap"),
    ("binance", "binancecoin"),
    ("bnb", "binancecoin"),
    ("xrp", "ripple"),
    ("ripple", "ripple"),
    ("litecoin", "litecoin"),
    ("ltc", "litecoin"),
    ("tether", "tether"),
    ("usdt", "tether"),
    ("usdc", "usd-coin"),
    ("shiba", "shiba-inu"),
    ("shib", "shiba-inu"),
];

fn exact_alias(input: &str) -> Option<&'static str> {
    COIN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == input)
        .map(|(_, id)| *id)
}

/// Resolve the coin a piece of text refers to.
///
/// An input that is exactly an alias wins outright. Otherwise the first alias
/// in [`COIN_ALIASES`] order that occurs anywhere in the input is used, which
/// is neither the longest nor the left-most mention.
pub fn resolve_coin_id(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    exact_alias(&input).or_else(|| {
        COIN_ALIASES
            .iter()
            .find(|(alias, _)| input.contains(alias))
            .map(|(_, id)| *id)
    })
}

/// Like [`resolve_coin_id`] but prefers the longest alias found in the input;
/// equal lengths fall back to table order.
pub fn resolve_coin_id_longest(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    exact_alias(&input).or_else(|| {
        COIN_ALIASES
            .iter()
            .filter(|(alias, _)| input.contains(alias))
            .min_by_key(|(alias, _)| Reverse(alias.len()))
            .map(|(_, id)| *id)
    })
}
