//! Canned replies. Every bank is picked from through a [`TemplateSelector`].

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub type TemplateBank = &'static [&'static str];

/// Chooses which entry of a bank to use.
pub trait TemplateSelector: Send + Sync {
    /// Index in `0..len`; `len` is never zero.
    fn select(&self, len: usize) -> usize;
}

/// Uniformly random choice, seedable for reproducible runs.
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplateSelector for RandomSelector {
    fn select(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// Always the same slot, clamped to the bank size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn select(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

pub const GREETINGS: TemplateBank = &[
    "Hello! How can I help you with crypto information today?",
    "Hi there! What would you like to know about cryptocurrencies?",
    "Hey! I'm here to help with your crypto questions. What's on your mind?",
    "Greetings! How can I assist you with cryptocurrency information today?",
];

pub const HOW_ARE_YOU: TemplateBank = &[
    "I'm doing well, thank you for asking! I'm ready to help you with cryptocurrency information. What would you like to know?",
    "I'm great! Always ready to discuss crypto. What can I help you with today?",
    "I'm functioning perfectly! What crypto information are you looking for?",
    "All systems operational and ready to assist with your crypto queries!",
];

pub const THANKS: TemplateBank = &[
    "You're welcome! Is there anything else you'd like to know about cryptocurrencies?",
    "Happy to help! Let me know if you have any other crypto questions.",
    "Anytime! I'm here whenever you need crypto information.",
    "My pleasure! Feel free to ask if you need more information about the crypto world.",
];

pub const WHAT_IS_CRYPTO: TemplateBank = &[
    "Cryptocurrency is a digital or virtual currency that uses cryptography for security and operates on decentralized networks based on blockchain technology. Bitcoin, created in 2009, was the first cryptocurrency, and thousands of alternatives have been created since.",
    "Cryptocurrencies are digital assets designed to work as a medium of exchange using cryptography to secure transactions and control the creation of additional units. They operate on decentralized systems called blockchains.",
    "Crypto refers to digital currencies that use encryption techniques to regulate the generation of units and verify the transfer of funds. They operate independently of central banks and use distributed ledger technology.",
];

pub const BLOCKCHAIN: TemplateBank = &[
    "Blockchain is a distributed ledger technology that records transactions across many computers so that the record cannot be altered retroactively. It's the underlying technology behind cryptocurrencies, providing security, transparency, and decentralization.",
    "A blockchain is a continuously growing list of records, called blocks, which are linked and secured using cryptography. Each block contains a timestamp and transaction data, making it resistant to modification and creating a transparent, verifiable record.",
    "Blockchain technology is a decentralized, distributed ledger that records transactions across multiple computers. This ensures that records cannot be altered retroactively without altering all subsequent blocks, which provides security and transparency.",
];

pub const INVESTMENT_STRATEGY: TemplateBank = &[
    "Some common crypto investment strategies include dollar-cost averaging (regular small investments), diversification (investing in multiple cryptocurrencies), and long-term holding. Remember that all investments carry risk, and it's important to only invest what you can afford to lose.",
    "When investing in crypto, consider strategies like dollar-cost averaging to mitigate volatility, diversifying your portfolio across different assets, and conducting thorough research before investing. Always be aware of the risks involved.",
    "Successful crypto investors often employ strategies such as setting clear investment goals, staying informed about market trends, diversifying their portfolios, and being prepared for volatility. Remember that past performance doesn't guarantee future results.",
];

pub const NFT: TemplateBank = &[
    "NFTs (Non-Fungible Tokens) are unique digital assets that represent ownership of specific items like art, collectibles, or music. Unlike cryptocurrencies, each NFT has distinct value and cannot be exchanged on a one-to-one basis.",
    "Non-Fungible Tokens (NFTs) are digital certificates of authenticity built on blockchain technology. They verify ownership of a unique digital or physical asset, such as artwork, music, videos, or virtual real estate.",
    "NFTs are blockchain-based tokens that represent ownership of unique items. They've gained popularity in digital art, gaming, and collectibles markets, allowing creators to tokenize their work and buyers to verify authenticity and ownership.",
];

pub const DEFI: TemplateBank = &[
    "DeFi (Decentralized Finance) refers to financial services built on blockchain technology that operate without traditional intermediaries like banks. It includes lending, borrowing, trading, and earning interest on crypto assets.",
    "Decentralized Finance (DeFi) is an ecosystem of financial applications built on blockchain networks. It aims to create an open, permissionless financial system that operates without central authorities, offering services like lending, borrowing, and trading.",
    "DeFi represents a shift from traditional, centralized financial systems to peer-to-peer finance enabled by decentralized technologies built on blockchains. It includes applications for lending, borrowing, trading derivatives, and more.",
];

pub const STAKING: TemplateBank = &[
    "Staking is the process of actively participating in transaction validation on a proof-of-stake blockchain. It involves locking up crypto assets to support network operations in exchange for rewards, similar to earning interest.",
    "Crypto staking involves holding funds in a cryptocurrency wallet to support the security and operations of a blockchain network. In return for locking up coins and validating transactions, participants receive staking rewards.",
    "Staking is a way to earn passive income with your cryptocurrency by participating in the network's consensus mechanism. By locking up your coins, you help secure the network and receive rewards in return.",
];

pub const TRADING_ADVICE: TemplateBank = &[
    "I cannot provide specific financial advice. It's important to do your own research and consider consulting with a financial advisor before making investment decisions.",
    "While I can provide information about cryptocurrencies, I'm not qualified to give personalized trading advice. Consider researching thoroughly and possibly consulting with a financial professional.",
    "Trading cryptocurrencies involves significant risk. Rather than following specific advice, consider learning about risk management, technical analysis, and fundamental analysis to make informed decisions.",
];

pub const FALLBACK: TemplateBank = &[
    "Error: I don't have any information about this topic. You might want to try asking about specific cryptocurrencies like Bitcoin or Ethereum, or general topics like 'What is blockchain?' or 'How does staking work?'",
    "Error: I don't have data on this subject. Try asking about cryptocurrency prices, market trends, or questions like 'What is DeFi?' or 'Tell me about NFTs.'",
    "Error: I don't have enough information to answer that question. You could ask about the current crypto market, specific coins like Bitcoin or Solana, or concepts like smart contracts and decentralized finance.",
];

pub const SUGGESTED_QUESTIONS: TemplateBank = &[
    "Here are some questions you might want to ask: 'What's the price of Bitcoin?', 'Tell me about Ethereum', 'How is the crypto market doing?', or 'What is blockchain technology?'",
    "You could try asking: 'What are NFTs?', 'Explain DeFi', 'How does staking work?', or 'What's the current price of Solana?'",
    "Some questions I can help with: 'What are the top performing cryptocurrencies?', 'Tell me about Cardano', 'What is a smart contract?', or 'How does Bitcoin mining work?'",
];

pub const UNKNOWN_COIN_PRICE: &str = "Error: I couldn't identify which cryptocurrency you're asking about. You can ask about Bitcoin, Ethereum, Solana, and many other major cryptocurrencies. Try questions like 'What's the price of Bitcoin?' or 'How much is Ethereum worth?'";

pub const PRICE_UNAVAILABLE: &str = "Error: I'm having trouble getting the latest price information right now. Please try again later. You can try asking about market trends or general information about cryptocurrencies instead.";

pub const MARKET_UNAVAILABLE: &str = "Error: I'm having trouble getting the latest market information right now. Please try again later. You can try asking about specific cryptocurrencies like Bitcoin or Ethereum instead.";

pub const TOP_COINS_UNAVAILABLE: &str = "Error: I'm having trouble getting information about top coins right now. Please try again later. You can ask about specific cryptocurrencies like 'Tell me about Bitcoin' or 'What is Ethereum?'";

pub const COIN_DETAIL_UNAVAILABLE: &str =
    "Error: I don't have detailed information about that cryptocurrency right now.";

pub const GENERIC_APOLOGY: &str = "Error: I encountered a problem processing your request. You can try asking about cryptocurrency prices like \"What's the price of Bitcoin?\", market information like \"How is the crypto market doing?\", or general questions like \"What is blockchain?\"";

/// Hand-written descriptions, checked in this order by name.
pub const COIN_DESCRIPTIONS: &[(&str, TemplateBank)] = &[
    ("bitcoin", &[
        "Bitcoin (BTC) is the first cryptocurrency, created in 2009 by an anonymous person or group known as Satoshi Nakamoto. It introduced blockchain technology and operates as a decentralized digital currency without a central authority.",
        "Bitcoin (BTC) is often referred to as digital gold due to its limited supply of 21 million coins. It uses a proof-of-work consensus mechanism and has become a store of value and inflation hedge for many investors.",
        "Bitcoin (BTC) was the first cryptocurrency and remains the largest by market capitalization. It introduced the concept of a decentralized ledger (blockchain) and has inspired thousands of other cryptocurrencies.",
    ]),
    ("ethereum", &[
        "Ethereum (ETH) is a decentralized platform that enables smart contracts and decentralized applications (dApps). Created by Vitalik Buterin in 2015, it's the second-largest cryptocurrency by market cap.",
        "Ethereum (ETH) revolutionized blockchain technology by introducing smart contracts - self-executing contracts with the terms directly written into code. This innovation enabled the development of DeFi, NFTs, and thousands of dApps.",
        "Ethereum (ETH) is transitioning from proof-of-work to proof-of-stake through a series of upgrades, significantly reducing its energy consumption and improving scalability. It serves as the foundation for much of the crypto ecosystem.",
    ]),
    ("solana", &[
        "Solana (SOL) is a high-performance blockchain supporting smart contracts and decentralized applications. Known for its high speed and low transaction costs, it uses a unique proof-of-history consensus mechanism.",
        "Solana (SOL) is designed for scalability, capable of processing thousands of transactions per second with low fees. It's popular for DeFi applications, NFT marketplaces, and Web3 projects requiring high throughput.",
        "Solana (SOL) combines proof-of-stake with proof-of-history to achieve high throughput and low latency. It has gained popularity for NFT projects and DeFi applications due to its speed and low transaction costs.",
    ]),
    ("cardano", &[
        "Cardano (ADA) is a blockchain platform built on peer-reviewed research and developed through evidence-based methods. Founded by Charles Hoskinson, co-founder of Ethereum, it focuses on sustainability, scalability, and transparency.",
        "Cardano (ADA) takes a research-first approach to blockchain development, with a strong focus on security, scalability, and interoperability. It uses a proof-of-stake consensus mechanism called Ouroboros.",
        "Cardano (ADA) is developed in phases, each focusing on different functionalities. It aims to provide financial services to unbanked populations and create a more secure and sustainable blockchain ecosystem.",
    ]),
    ("dogecoin", &[
        "Dogecoin (DOGE) started as a meme cryptocurrency featuring the Shiba Inu dog from the 'Doge' meme. Created in 2013 by Billy Markus and Jackson Palmer, it has gained popularity and has been endorsed by figures like Elon Musk.",
        "Dogecoin (DOGE) began as a joke but has evolved into a popular cryptocurrency with a strong community. Unlike Bitcoin, it has no supply cap and uses a proof-of-work consensus mechanism similar to Litecoin.",
        "Dogecoin (DOGE) has gained mainstream attention through celebrity endorsements, particularly from Elon Musk. Despite starting as a meme, it's now used for tipping content creators and charitable donations.",
    ]),
    ("avalanche", &[
        "Avalanche (AVAX) is a layer-1 blockchain platform focused on speed, low costs, and eco-friendliness. It uses a novel consensus protocol that allows for high throughput and quick finality of transactions.",
        "Avalanche (AVAX) features a unique architecture with three built-in blockchains designed for different purposes. It's EVM-compatible, allowing Ethereum developers to easily port their applications to the platform.",
        "Avalanche (AVAX) aims to be the fastest smart contract platform in terms of time-to-finality. It uses a proof-of-stake consensus mechanism and has become popular for DeFi applications and subnets (custom blockchains).",
    ]),
    ("polkadot", &[
        "Polkadot (DOT) is a multi-chain network that enables different blockchains to transfer messages and value in a trust-free fashion. Created by Ethereum co-founder Gavin Wood, it aims to solve blockchain interoperability.",
        "Polkadot (DOT) allows specialized blockchains to communicate with each other, creating an interconnected internet of blockchains. Its relay chain provides shared security for all connected parachains.",
        "Polkadot (DOT) uses a nominated proof-of-stake consensus mechanism and allows developers to create custom blockchains (parachains) that can interact with other networks while maintaining their own governance.",
    ]),
    ("aptos", &[
        "Aptos (APT) is a layer-1 blockchain focused on security, scalability, and upgradeability. Developed by former Meta (Facebook) employees who worked on the Diem project, it uses the Move programming language.",
        "Aptos (APT) features a novel Block-STM parallel execution engine that processes transactions concurrently, achieving high throughput. It emphasizes safety and reliability through its Move programming language.",
        "Aptos (APT) launched in 2022 and quickly gained attention due to its technical innovations and team's background from Meta's Diem project. It uses a proof-of-stake consensus mechanism and focuses on developer experience.",
    ]),
    ("chainlink", &[
        "Chainlink (LINK) is a decentralized oracle network that enables smart contracts to securely interact with real-world data, events, and payments. It bridges the gap between blockchain and external systems.",
        "Chainlink (LINK) solves the 'oracle problem' by providing reliable data feeds to smart contracts. It's widely used in DeFi for price feeds, weather data, sports results, and connecting blockchains to traditional systems.",
        "Chainlink (LINK) uses a network of node operators who stake LINK tokens to provide data to smart contracts. It's blockchain-agnostic and works with multiple networks including Ethereum, Solana, and Avalanche.",
    ]),
    ("polygon", &[
        "Polygon (MATIC) is a layer-2 scaling solution for Ethereum that aims to provide faster and cheaper transactions. It offers a framework for building and connecting Ethereum-compatible blockchain networks.",
        "Polygon (MATIC) has evolved from a simple scaling solution to a full-fledged multi-chain system. It supports various scaling solutions including Polygon PoS, Polygon zkEVM, and Polygon Supernets.",
        "Polygon (MATIC) helps address Ethereum's limitations by offering lower transaction fees and higher throughput. It's popular for gaming, NFTs, and DeFi applications that require faster and cheaper transactions.",
    ]),
    ("ripple", &[
        "XRP is the native cryptocurrency of the XRP Ledger, created by Ripple. It's designed for fast, low-cost international payments and serves as a bridge currency in Ripple's payment network.",
        "XRP can settle transactions in 3-5 seconds with minimal fees, making it suitable for cross-border payments. Unlike many cryptocurrencies, XRP is pre-mined with a total supply of 100 billion tokens.",
        "XRP and Ripple have focused on partnering with financial institutions to improve the efficiency of international money transfers. The company has faced regulatory challenges, particularly from the SEC in the United States.",
    ]),
    ("binancecoin", &[
        "Binance Coin (BNB) is the native cryptocurrency of the Binance ecosystem, including the Binance exchange and Binance Smart Chain. It was initially created as an ERC-20 token before migrating to its own blockchain.",
        "BNB is used for trading fee discounts, participation in token sales, payments, and as gas for transactions on the BNB Chain (formerly Binance Smart Chain). Binance conducts regular token burns to reduce supply.",
        "BNB has evolved from a simple exchange token to the backbone of a comprehensive ecosystem including a smart contract platform, decentralized exchange, and various financial services.",
    ]),
    ("litecoin", &[
        "Litecoin (LTC) is one of the earliest Bitcoin alternatives, created in 2011 by Charlie Lee. Often called 'silver to Bitcoin's gold,' it features faster block generation and a different hashing algorithm.",
        "Litecoin (LTC) processes blocks every 2.5 minutes (compared to Bitcoin's 10 minutes) and uses the memory-intensive Scrypt algorithm instead of SHA-256. It has a maximum supply of 84 million coins.",
        "Litecoin (LTC) has served as a testbed for Bitcoin upgrades, implementing technologies like SegWit and the Lightning Network before Bitcoin. It aims to be a lighter, faster alternative to Bitcoin for everyday transactions.",
    ]),
    ("uniswap", &[
        "Uniswap (UNI) is the governance token of the Uniswap protocol, one of the largest decentralized exchanges (DEX) on Ethereum. The protocol uses automated market makers instead of traditional order books.",
        "The Uniswap protocol revolutionized decentralized trading with its automated market maker model, allowing users to swap tokens without intermediaries. UNI token holders can vote on protocol changes and upgrades.",
        "Uniswap pioneered the concept of liquidity pools in DeFi, where users provide token pairs to earn trading fees. The protocol has gone through multiple versions, each adding new features and efficiencies.",
    ]),
];

/// Curated description bank for the first coin name mentioned in `lowered`.
pub fn curated_description(lowered: &str) -> Option<TemplateBank> {
    COIN_DESCRIPTIONS
        .iter()
        .find(|(coin, _)| lowered.contains(coin))
        .map(|(_, bank)| *bank)
}
