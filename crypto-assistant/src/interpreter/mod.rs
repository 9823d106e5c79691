//! Rule-based command interpreter.
//!
//! A command is classified by [`intent::classify`], then answered either from
//! a template bank or from live market data. Whatever goes wrong upstream, the
//! caller gets a non-empty reply; the reason for a degraded answer travels
//! alongside it in [`Interpretation::failure`].

pub mod format;
pub mod intent;
pub mod render;
pub mod templates;

use crate::api::{resolve_coin_id, MarketDataSource};
use crate::models::FetchError;
use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub use intent::{classify, Intent, IntentRule, INTENT_RULES};
use templates::*;
pub use templates::{FixedSelector, RandomSelector, TemplateSelector, GENERIC_APOLOGY};

/// Why a reply fell back to an apology or guidance text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("no known coin mentioned in {0:?}")]
    UnknownCoin(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("upstream returned no usable data: {0}")]
    MissingData(String),

    #[error("handler panicked")]
    Panicked,
}

/// A reply plus what produced it.
#[derive(Debug, Clone)]
pub struct Interpretation {
    pub intent: Intent,
    pub response: String,
    pub failure: Option<Failure>,
}

#[derive(Debug, Serialize)]
pub struct InterpretationSummary<'a> {
    pub intent: Intent,
    pub degraded: bool,
    pub reason: Option<String>,
    pub response: &'a str,
}

impl Interpretation {
    pub fn summary(&self) -> InterpretationSummary<'_> {
        InterpretationSummary {
            intent: self.intent,
            degraded: self.failure.is_some(),
            reason: self.failure.as_ref().map(|failure| failure.to_string()),
            response: &self.response,
        }
    }
}

struct Reply {
    text: String,
    failure: Option<Failure>,
}

impl Reply {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    fn degraded(text: impl Into<String>, failure: Failure) -> Self {
        Self {
            text: text.into(),
            failure: Some(failure),
        }
    }
}

pub struct CommandInterpreter {
    source: Arc<dyn MarketDataSource>,
    selector: Arc<dyn TemplateSelector>,
}

impl CommandInterpreter {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            selector: Arc::new(RandomSelector::from_entropy()),
        }
    }

    pub fn with_selector(mut self, selector: Arc<dyn TemplateSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Answer a command. Never fails and never returns an empty string.
    pub async fn interpret(&self, command: &str) -> String {
        self.interpret_with_diagnostics(command).await.response
    }

    pub async fn interpret_with_diagnostics(&self, command: &str) -> Interpretation {
        let lowered = intent::normalize(command);
        let intent = intent::matching_rule(&lowered)
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Fallback);
        debug!(%intent, live = intent.needs_market_data(), "classified command");

        let reply = match AssertUnwindSafe(self.respond(intent, &lowered))
            .catch_unwind()
            .await
        {
            Ok(reply) => reply,
            Err(_) => {
                error!(%intent, "handler panicked, answering with generic apology");
                Reply::degraded(GENERIC_APOLOGY, Failure::Panicked)
            }
        };

        if let Some(failure) = &reply.failure {
            warn!(%intent, reason = %failure, "answered without live data");
        }

        let response = if reply.text.trim().is_empty() {
            GENERIC_APOLOGY.to_string()
        } else {
            reply.text
        };

        Interpretation {
            intent,
            response,
            failure: reply.failure,
        }
    }

    fn pick(&self, bank: TemplateBank) -> &'static str {
        let index = self.selector.select(bank.len());
        bank[index.min(bank.len() - 1)]
    }

    fn fallback(&self) -> String {
        format!("{} {}", self.pick(FALLBACK), self.pick(SUGGESTED_QUESTIONS))
    }

    async fn respond(&self, intent: Intent, lowered: &str) -> Reply {
        match intent {
            Intent::Greeting => Reply::ok(self.pick(GREETINGS)),
            Intent::HowAreYou => Reply::ok(self.pick(HOW_ARE_YOU)),
            Intent::Thanks => Reply::ok(self.pick(THANKS)),
            Intent::PriceQuery => self.price_query(lowered).await,
            Intent::MarketOverview => self.market_overview().await,
            Intent::TopPerformers => self.top_performers().await,
            Intent::TradingAdviceRefusal => Reply::ok(self.pick(TRADING_ADVICE)),
            Intent::WhatIsCrypto => Reply::ok(self.pick(WHAT_IS_CRYPTO)),
            Intent::WhatIsBlockchain => Reply::ok(self.pick(BLOCKCHAIN)),
            Intent::InvestmentStrategy => Reply::ok(self.pick(INVESTMENT_STRATEGY)),
            Intent::NftInfo => Reply::ok(self.pick(NFT)),
            Intent::DefiInfo => Reply::ok(self.pick(DEFI)),
            Intent::StakingInfo => Reply::ok(self.pick(STAKING)),
            Intent::EntityLookup => self.entity_lookup(lowered).await,
            Intent::Fallback => Reply::ok(self.fallback()),
        }
    }

    async fn price_query(&self, lowered: &str) -> Reply {
        let Some(coin_id) = resolve_coin_id(lowered) else {
            return Reply::degraded(UNKNOWN_COIN_PRICE, Failure::UnknownCoin(lowered.to_string()));
        };

        match self.source.fetch_coin_detail(coin_id).await {
            Ok(coin) => Reply::ok(render::price_sentence(&coin)),
            Err(e) => Reply::degraded(PRICE_UNAVAILABLE, e.into()),
        }
    }

    async fn market_overview(&self) -> Reply {
        let global = match self.source.fetch_global_market().await {
            Ok(global) => global,
            Err(e) => return Reply::degraded(MARKET_UNAVAILABLE, e.into()),
        };
        match self.source.fetch_trending().await {
            Ok(trending) => Reply::ok(render::market_overview(&global, &trending)),
            Err(e) => Reply::degraded(MARKET_UNAVAILABLE, e.into()),
        }
    }

    async fn top_performers(&self) -> Reply {
        let snapshot = match self.source.fetch_prices(render::TOP_COIN_BASKET).await {
            Ok(snapshot) => snapshot,
            Err(e) => return Reply::degraded(TOP_COINS_UNAVAILABLE, e.into()),
        };
        match render::top_performers(render::TOP_COIN_BASKET, &snapshot) {
            Some(text) => Reply::ok(text),
            None => Reply::degraded(
                TOP_COINS_UNAVAILABLE,
                Failure::MissingData("price snapshot has none of the tracked coins".to_string()),
            ),
        }
    }

    async fn entity_lookup(&self, lowered: &str) -> Reply {
        if let Some(bank) = curated_description(lowered) {
            return Reply::ok(self.pick(bank));
        }

        let Some(coin_id) = resolve_coin_id(lowered) else {
            return Reply::degraded(self.fallback(), Failure::UnknownCoin(lowered.to_string()));
        };

        match self.source.fetch_coin_detail(coin_id).await {
            Ok(coin) => Reply::ok(render::coin_profile(&coin)),
            Err(e) => Reply::degraded(
                format!("{} {}", COIN_DETAIL_UNAVAILABLE, self.pick(SUGGESTED_QUESTIONS)),
                e.into(),
            ),
        }
    }
}
