//! Token symbols and the immutable reference catalogue.
//!
//! Prices and liquidity depths are fixed teaching data, not a market feed.
//! Every simulation in one session reads the same catalogue.

use std::fmt;
use std::str::FromStr;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("unknown token symbol: {symbol}")]
pub struct UnknownSymbolError {
    pub symbol: String,
}

/// Supported token symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenSymbol {
    Eth,
    Wbtc,
    Usdc,
    Dai,
}

impl TokenSymbol {
    pub const ALL: [TokenSymbol; 4] = [
        TokenSymbol::Eth,
        TokenSymbol::Wbtc,
        TokenSymbol::Usdc,
        TokenSymbol::Dai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenSymbol::Eth => "ETH",
            TokenSymbol::Wbtc => "WBTC",
            TokenSymbol::Usdc => "USDC",
            TokenSymbol::Dai => "DAI",
        }
    }
}

impl fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenSymbol {
    type Err = UnknownSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETH" => Ok(TokenSymbol::Eth),
            "WBTC" => Ok(TokenSymbol::Wbtc),
            "USDC" => Ok(TokenSymbol::Usdc),
            "DAI" => Ok(TokenSymbol::Dai),
            _ => Err(UnknownSymbolError {
                symbol: s.to_string(),
            }),
        }
    }
}

/// Immutable per-session reference data for one token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub symbol: TokenSymbol,
    pub name: &'static str,
    /// Reference price in USD.
    pub price_usd: f64,
    /// Decimal precision of the underlying asset.
    pub decimals: u8,
    /// Pool liquidity depth, denominated in the token itself.
    pub liquidity: f64,
}

impl Token {
    /// Reference data for a symbol.
    pub fn reference(symbol: TokenSymbol) -> Self {
        match symbol {
            TokenSymbol::Eth => Token {
                symbol,
                name: "Ethereum",
                price_usd: 2_000.0,
                decimals: 18,
                liquidity: 50_000.0,
            },
            TokenSymbol::Wbtc => Token {
                symbol,
                name: "Wrapped Bitcoin",
                price_usd: 45_000.0,
                decimals: 8,
                liquidity: 2_000.0,
            },
            TokenSymbol::Usdc => Token {
                symbol,
                name: "USD Coin",
                price_usd: 1.0,
                decimals: 6,
                liquidity: 100_000_000.0,
            },
            TokenSymbol::Dai => Token {
                symbol,
                name: "Dai Stablecoin",
                price_usd: 1.0,
                decimals: 18,
                liquidity: 80_000_000.0,
            },
        }
    }

    /// The full reference catalogue.
    pub fn catalogue() -> impl Iterator<Item = Token> {
        TokenSymbol::ALL.into_iter().map(Token::reference)
    }
}
