use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    HowAreYou,
    Thanks,
    PriceQuery,
    MarketOverview,
    TopPerformers,
    TradingAdviceRefusal,
    WhatIsCrypto,
    WhatIsBlockchain,
    InvestmentStrategy,
    NftInfo,
    DefiInfo,
    StakingInfo,
    EntityLookup,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::HowAreYou => "how_are_you",
            Intent::Thanks => "thanks",
            Intent::PriceQuery => "price_query",
            Intent::MarketOverview => "market_overview",
            Intent::TopPerformers => "top_performers",
            Intent::TradingAdviceRefusal => "trading_advice_refusal",
            Intent::WhatIsCrypto => "what_is_crypto",
            Intent::WhatIsBlockchain => "what_is_blockchain",
            Intent::InvestmentStrategy => "investment_strategy",
            Intent::NftInfo => "nft_info",
            Intent::DefiInfo => "defi_info",
            Intent::StakingInfo => "staking_info",
            Intent::EntityLookup => "entity_lookup",
            Intent::Fallback => "fallback",
        }
    }

    /// Whether answering needs live market data.
    pub fn needs_market_data(&self) -> bool {
        matches!(
            self,
            Intent::PriceQuery
                | Intent::MarketOverview
                | Intent::TopPerformers
                | Intent::EntityLookup
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phrases that select an intent. Input is lowercased before matching.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    /// Matches when any of these occurs anywhere in the input.
    pub contains: &'static [&'static str],
    /// Matches when the whole input equals one of these.
    pub exact: &'static [&'static str],
}

impl IntentRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.exact.iter().any(|phrase| lowered == *phrase)
            || self.contains.iter().any(|phrase| lowered.contains(phrase))
    }
}

/// Evaluated top to bottom; the first matching rule decides. Anything that
/// matches nothing is [`Intent::Fallback`].
///
/// Matching is plain substring search, so short phrases fire inside longer
/// words ("hi" in "this", "cost" in "costume").
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        contains: &["hello", "hi", "greetings"],
        exact: &["hey"],
    },
    IntentRule {
        intent: Intent::HowAreYou,
        contains: &["how are you", "how's it going", "how are things", "what's up"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::Thanks,
        contains: &["thank you", "thanks", "appreciate it"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::PriceQuery,
        contains: &[
            "price of",
            "how much is",
            "what is the price",
            "value of",
            "worth",
            "how much does",
            "cost",
        ],
        exact: &[],
    },
    IntentRule {
        intent: Intent::MarketOverview,
        contains: &["market", "overview", "market update", "crypto market"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::TopPerformers,
        contains: &["top coins", "best performing", "top crypto", "top performing"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::TradingAdviceRefusal,
        contains: &[
            "should i buy",
            "should i sell",
            "trading advice",
            "good investment",
            "invest in",
        ],
        exact: &[],
    },
    IntentRule {
        intent: Intent::WhatIsCrypto,
        contains: &["what is crypto", "what are cryptocurrencies", "explain crypto"],
        exact: &["what is cryptocurrency"],
    },
    IntentRule {
        intent: Intent::WhatIsBlockchain,
        contains: &["blockchain"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::InvestmentStrategy,
        contains: &[
            "investment strategy",
            "how to invest",
            "investment tips",
            "investing in crypto",
        ],
        exact: &[],
    },
    IntentRule {
        intent: Intent::NftInfo,
        contains: &["nft", "non-fungible", "digital art"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::DefiInfo,
        contains: &["defi", "decentralized finance"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::StakingInfo,
        contains: &["staking", "stake crypto"],
        exact: &[],
    },
    IntentRule {
        intent: Intent::EntityLookup,
        contains: &["tell me about", "what is"],
        exact: &[],
    },
];

/// Normalised form every rule is matched against.
pub fn normalize(command: &str) -> String {
    command.trim().to_lowercase()
}

/// The rule that fires for already-normalised input, if any.
pub fn matching_rule(lowered: &str) -> Option<&'static IntentRule> {
    INTENT_RULES.iter().find(|rule| rule.matches(lowered))
}

pub fn classify(command: &str) -> Intent {
    matching_rule(&normalize(command))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}
