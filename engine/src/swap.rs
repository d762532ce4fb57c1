//! Constant-product swap quoting.
//!
//! Output follows `dy = y * dx / (x + dx)` against the tokens' liquidity
//! depths, with the liquidity-provider fee taken from the output side.

use tutorhub_types::constants::SWAP_FEE_RATE;
use tutorhub_types::{SwapQuote, Token};

use crate::error::EngineError;

/// Quote a swap of `input_amount` of `from` into `to`.
///
/// Missing or non-positive input yields the all-zero quote. A pool with no
/// liquidity on either side is a configuration error and is rejected.
///
/// Price impact compares the quoted output against the no-slippage reference
/// `input * price_from / price_to`, floored at zero. Minimum received applies
/// the caller's slippage tolerance (in percent) to the quoted output.
pub fn quote_swap(
    input_amount: f64,
    from: &Token,
    to: &Token,
    slippage_tolerance_pct: f64,
) -> Result<SwapQuote, EngineError> {
    if !input_amount.is_finite() || input_amount <= 0.0 {
        return Ok(SwapQuote::zero(from.symbol, to.symbol));
    }
    if from.liquidity <= 0.0 {
        return Err(EngineError::ZeroLiquidity {
            symbol: from.symbol,
        });
    }
    if to.liquidity <= 0.0 {
        return Err(EngineError::ZeroLiquidity { symbol: to.symbol });
    }

    let raw_output = (to.liquidity * input_amount) / (from.liquidity + input_amount);
    let fee = raw_output * SWAP_FEE_RATE;
    let output = raw_output - fee;

    let reference_output = input_amount * (from.price_usd / to.price_usd);
    let price_impact_pct = if reference_output > 0.0 {
        ((reference_output - output) / reference_output * 100.0).max(0.0)
    } else {
        0.0
    };

    let minimum_received = output * (1.0 - slippage_tolerance_pct / 100.0);

    Ok(SwapQuote {
        input_amount,
        from: from.symbol,
        to: to.symbol,
        output_amount: output,
        fee,
        price_impact_pct,
        minimum_received,
        route: vec![from.symbol, to.symbol],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tutorhub_types::TokenSymbol;

    fn eth() -> Token {
        Token::reference(TokenSymbol::Eth)
    }

    fn usdc() -> Token {
        Token::reference(TokenSymbol::Usdc)
    }

    #[test]
    fn test_zero_input_yields_zero_quote() {
        for amount in [0.0, -1.0, f64::NAN] {
            let quote = quote_swap(amount, &eth(), &usdc(), 0.5).unwrap();
            assert_eq!(quote.output_amount, 0.0);
            assert_eq!(quote.fee, 0.0);
            assert_eq!(quote.price_impact_pct, 0.0);
            assert_eq!(quote.minimum_received, 0.0);
            assert!(quote.route.is_empty());
        }
    }

    #[test]
    fn test_zero_liquidity_is_rejected() {
        let mut dry = eth();
        dry.liquidity = 0.0;
        let err = quote_swap(1.0, &dry, &usdc(), 0.5).unwrap_err();
        assert_eq!(
            err,
            EngineError::ZeroLiquidity {
                symbol: TokenSymbol::Eth
            }
        );
        let err = quote_swap(1.0, &usdc(), &dry, 0.5).unwrap_err();
        assert_eq!(
            err,
            EngineError::ZeroLiquidity {
                symbol: TokenSymbol::Eth
            }
        );
    }

    #[test]
    fn test_one_eth_quotes_near_reference() {
        // 1 ETH into a deep USDC pool: output lands just under the 2000
        // reference, with the 0.3% fee taken from the output side.
        let quote = quote_swap(1.0, &eth(), &usdc(), 0.5).unwrap();
        let raw = (usdc().liquidity * 1.0) / (eth().liquidity + 1.0);
        assert!(quote.output_amount > 1_900.0 && quote.output_amount < 2_000.0);
        assert!((quote.fee - raw * 0.003).abs() < 1e-9);
        assert!(quote.price_impact_pct > 0.0);
        assert_eq!(quote.route, vec![TokenSymbol::Eth, TokenSymbol::Usdc]);
    }

    #[test]
    fn test_minimum_received_scales_with_tolerance() {
        let tight = quote_swap(1.0, &eth(), &usdc(), 0.1).unwrap();
        let loose = quote_swap(1.0, &eth(), &usdc(), 5.0).unwrap();
        assert_eq!(tight.output_amount, loose.output_amount);
        assert!(tight.minimum_received > loose.minimum_received);
        assert!((loose.minimum_received - loose.output_amount * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_larger_trades_take_more_impact() {
        let small = quote_swap(1.0, &eth(), &usdc(), 0.5).unwrap();
        let large = quote_swap(1_000.0, &eth(), &usdc(), 0.5).unwrap();
        assert!(large.price_impact_pct > small.price_impact_pct);
    }

    proptest! {
        // Fee conservation: raw output splits exactly into output + fee, and
        // the fee strictly reduces what the trader receives.
        #[test]
        fn prop_fee_conservation(input in 1e-6f64..1e6) {
            let quote = quote_swap(input, &eth(), &usdc(), 0.5).unwrap();
            let raw = (usdc().liquidity * input) / (eth().liquidity + input);
            prop_assert!(quote.output_amount > 0.0);
            prop_assert!(quote.output_amount < raw);
            prop_assert!((quote.output_amount + quote.fee - raw).abs() <= raw * 1e-12);
        }
    }
}
