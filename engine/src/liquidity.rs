//! Impermanent-loss math and liquidity-position evaluation.

use tutorhub_types::constants::{LP_BASE_FEE_APR, LP_UTILIZATION_BONUS_CAP};
use tutorhub_types::LiquidityPosition;

use crate::error::EngineError;

/// Impermanent loss for a pool price ratio, as a non-negative percentage.
///
/// `|2 * sqrt(r) / (1 + r) - 1| * 100`
pub fn impermanent_loss_from_ratio(price_ratio: f64) -> f64 {
    let il = 2.0 * price_ratio.sqrt() / (1.0 + price_ratio) - 1.0;
    il.abs() * 100.0
}

/// Impermanent loss for a percentage price shift (e.g. `12.0` for +12%).
///
/// The shift maps to a ratio of `(100 + s) / 100`, so shifts at or below
/// -100% have no defined ratio and are rejected. Gains and losses are not
/// treated symmetrically; that asymmetry is inherited behavior and is kept
/// as-is.
pub fn impermanent_loss_pct(price_shift_pct: f64) -> Result<f64, EngineError> {
    if !price_shift_pct.is_finite() || price_shift_pct <= -100.0 {
        return Err(EngineError::PriceShiftOutOfRange {
            got: price_shift_pct,
        });
    }
    let ratio = (100.0 + price_shift_pct) / 100.0;
    Ok(impermanent_loss_from_ratio(ratio))
}

/// Evaluate a two-legged position against a pool of `pool_liquidity` USD
/// depth and a hypothetical shift of the A-side price.
///
/// LP value is the sum of `amount * price` over both legs. Pool share is
/// capped at 100%, and a zero-depth pool contributes a zero share rather
/// than dividing by zero. The projected fee APR scales the base APR plus a
/// shift-driven utilization bonus by the position's share.
pub fn evaluate_position(
    amount_a: f64,
    price_a: f64,
    amount_b: f64,
    price_b: f64,
    pool_liquidity: f64,
    price_shift_pct: f64,
) -> Result<LiquidityPosition, EngineError> {
    let lp_value = amount_a * price_a + amount_b * price_b;
    let pool_share_pct = if pool_liquidity > 0.0 {
        (lp_value / pool_liquidity * 100.0).min(100.0)
    } else {
        0.0
    };
    let impermanent_loss = impermanent_loss_pct(price_shift_pct)?;
    let utilization_bonus = (price_shift_pct / 4.0).min(LP_UTILIZATION_BONUS_CAP);
    let projected_fee_apr = (pool_share_pct / 100.0) * (LP_BASE_FEE_APR + utilization_bonus);

    Ok(LiquidityPosition {
        amount_a,
        price_a,
        amount_b,
        price_b,
        lp_value,
        pool_share_pct,
        impermanent_loss_pct: impermanent_loss,
        projected_fee_apr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_shift_means_no_loss() {
        assert_eq!(impermanent_loss_pct(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_worked_example_twelve_percent() {
        // ratio 1.12: 2*sqrt(1.12)/(1+1.12) - 1 ~ -0.00403
        let il = impermanent_loss_pct(12.0).unwrap();
        assert!((il - 0.403).abs() < 0.001, "got {il}");
    }

    #[test]
    fn test_shift_below_floor_is_rejected() {
        assert!(matches!(
            impermanent_loss_pct(-100.0),
            Err(EngineError::PriceShiftOutOfRange { .. })
        ));
        assert!(matches!(
            impermanent_loss_pct(-150.0),
            Err(EngineError::PriceShiftOutOfRange { .. })
        ));
        // Just above the floor is still defined.
        assert!(impermanent_loss_pct(-99.9).is_ok());
    }

    #[test]
    fn test_loss_grows_with_divergence() {
        let small = impermanent_loss_pct(10.0).unwrap();
        let large = impermanent_loss_pct(100.0).unwrap();
        assert!(large > small);
        // The classic 4x divergence figure: ~5.72%.
        let quadruple = impermanent_loss_pct(300.0).unwrap();
        assert!((quadruple - 5.72).abs() < 0.01, "got {quadruple}");
    }

    #[test]
    fn test_position_metrics() {
        // 1.5 ETH at 2000 plus 3000 USDC at par against a 2.5M pool.
        let position = evaluate_position(1.5, 2_000.0, 3_000.0, 1.0, 2_500_000.0, 12.0).unwrap();
        assert_eq!(position.lp_value, 6_000.0);
        assert!((position.pool_share_pct - 0.24).abs() < 1e-9);
        assert!((position.impermanent_loss_pct - 0.403).abs() < 0.001);
        // 0.24% share of (18 + 3)% APR.
        assert!((position.projected_fee_apr - 0.0024 * 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_pool_share_caps_at_hundred() {
        let position = evaluate_position(10.0, 2_000.0, 0.0, 1.0, 100.0, 0.0).unwrap();
        assert_eq!(position.pool_share_pct, 100.0);
    }

    #[test]
    fn test_zero_depth_pool_contributes_zero_share() {
        let position = evaluate_position(1.0, 2_000.0, 2_000.0, 1.0, 0.0, 0.0).unwrap();
        assert_eq!(position.pool_share_pct, 0.0);
        assert_eq!(position.projected_fee_apr, 0.0);
        assert!(position.pool_share_pct.is_finite());
    }

    #[test]
    fn test_utilization_bonus_caps_at_six() {
        let modest = evaluate_position(1.0, 1_000.0, 0.0, 1.0, 10_000.0, 8.0).unwrap();
        let extreme = evaluate_position(1.0, 1_000.0, 0.0, 1.0, 10_000.0, 80.0).unwrap();
        // shift 8 -> bonus 2; shift 80 -> bonus capped at 6.
        assert!((modest.projected_fee_apr - 0.1 * 20.0).abs() < 1e-9);
        assert!((extreme.projected_fee_apr - 0.1 * 24.0).abs() < 1e-9);
    }
}
