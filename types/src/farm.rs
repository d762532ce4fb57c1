//! Yield-farm pair configuration and history records.

use crate::constants::{DEFAULT_PAIR_VOLATILITY, VOLATILE_PAIR_VOLATILITY};
use crate::token::{Token, TokenSymbol};

/// Configuration for one farmed liquidity pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PairConfig {
    pub token_a: TokenSymbol,
    pub token_b: TokenSymbol,
    pub apy_pct: f64,
}

impl PairConfig {
    pub fn new(token_a: TokenSymbol, token_b: TokenSymbol, apy_pct: f64) -> Self {
        Self {
            token_a,
            token_b,
            apy_pct,
        }
    }

    /// The selectable preset pairs with their advertised APYs.
    pub fn presets() -> Vec<PairConfig> {
        vec![
            PairConfig::new(TokenSymbol::Eth, TokenSymbol::Usdc, 12.5),
            PairConfig::new(TokenSymbol::Eth, TokenSymbol::Dai, 15.2),
            PairConfig::new(TokenSymbol::Wbtc, TokenSymbol::Eth, 18.7),
            PairConfig::new(TokenSymbol::Usdc, TokenSymbol::Dai, 8.3),
        ]
    }

    /// Look up a preset by its pair of symbols.
    pub fn preset(token_a: TokenSymbol, token_b: TokenSymbol) -> Option<PairConfig> {
        Self::presets()
            .into_iter()
            .find(|pair| pair.token_a == token_a && pair.token_b == token_b)
    }

    /// Per-tick price volatility. The ETH/USDC pair swings harder than the
    /// rest of the catalogue.
    pub fn volatility(&self) -> f64 {
        if self.token_a == TokenSymbol::Eth && self.token_b == TokenSymbol::Usdc {
            VOLATILE_PAIR_VOLATILITY
        } else {
            DEFAULT_PAIR_VOLATILITY
        }
    }

    /// Seed amount deposited on the A side.
    pub fn seed_amount_a(&self) -> f64 {
        match self.token_a {
            TokenSymbol::Eth => 1.0,
            TokenSymbol::Wbtc => 0.05,
            _ => 1_000.0,
        }
    }

    /// Seed amount deposited on the B side.
    pub fn seed_amount_b(&self) -> f64 {
        match self.token_b {
            TokenSymbol::Usdc | TokenSymbol::Dai => 2_000.0,
            _ => 1.0,
        }
    }

    /// Reference starting price of the A side.
    pub fn seed_price_a(&self) -> f64 {
        Token::reference(self.token_a).price_usd
    }

    /// Reference starting price of the B side.
    pub fn seed_price_b(&self) -> f64 {
        Token::reference(self.token_b).price_usd
    }
}

/// One point of the farm's rolling history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FarmPoint {
    /// Simulated day, starting at 0 for the seed point.
    pub day: u32,
    pub price_a: f64,
    pub pool_value: f64,
    pub il_pct: f64,
    pub rewards: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_resolve_reference_prices() {
        for pair in PairConfig::presets() {
            assert!(pair.seed_price_a() > 0.0);
            assert!(pair.seed_price_b() > 0.0);
            assert!(pair.apy_pct > 0.0);
        }
    }

    #[test]
    fn test_eth_usdc_is_the_volatile_pair() {
        let eth_usdc = PairConfig::preset(TokenSymbol::Eth, TokenSymbol::Usdc).unwrap();
        let usdc_dai = PairConfig::preset(TokenSymbol::Usdc, TokenSymbol::Dai).unwrap();
        assert_eq!(eth_usdc.volatility(), VOLATILE_PAIR_VOLATILITY);
        assert_eq!(usdc_dai.volatility(), DEFAULT_PAIR_VOLATILITY);
    }

    #[test]
    fn test_seed_amounts_follow_symbol_class() {
        let wbtc_eth = PairConfig::preset(TokenSymbol::Wbtc, TokenSymbol::Eth).unwrap();
        assert_eq!(wbtc_eth.seed_amount_a(), 0.05);
        assert_eq!(wbtc_eth.seed_amount_b(), 1.0);

        let usdc_dai = PairConfig::preset(TokenSymbol::Usdc, TokenSymbol::Dai).unwrap();
        assert_eq!(usdc_dai.seed_amount_a(), 1_000.0);
        assert_eq!(usdc_dai.seed_amount_b(), 2_000.0);
    }
}
