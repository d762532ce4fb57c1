//! Derived market records: swap quotes, liquidity positions, and yield
//! projections. All of these are recomputed on demand and never persisted.

use std::str::FromStr;

use thiserror::Error as ThisError;

use crate::constants::DAYS_PER_YEAR;
use crate::token::TokenSymbol;

/// A swap quote derived from the constant-product formula.
///
/// Recomputed on every input change. `route` is the ordered list of symbols
/// the swap passes through (always direct today, so two entries, or empty for
/// the zero quote).
#[derive(Clone, Debug, PartialEq)]
pub struct SwapQuote {
    pub input_amount: f64,
    pub from: TokenSymbol,
    pub to: TokenSymbol,
    pub output_amount: f64,
    /// Liquidity-provider fee, denominated in the output token.
    pub fee: f64,
    pub price_impact_pct: f64,
    /// Worst acceptable output under the caller's slippage tolerance.
    pub minimum_received: f64,
    pub route: Vec<TokenSymbol>,
}

impl SwapQuote {
    /// The all-zero quote returned for missing or non-positive input.
    pub fn zero(from: TokenSymbol, to: TokenSymbol) -> Self {
        Self {
            input_amount: 0.0,
            from,
            to,
            output_amount: 0.0,
            fee: 0.0,
            price_impact_pct: 0.0,
            minimum_received: 0.0,
            route: Vec::new(),
        }
    }
}

/// A two-legged liquidity position and its derived metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct LiquidityPosition {
    pub amount_a: f64,
    pub price_a: f64,
    pub amount_b: f64,
    pub price_b: f64,
    /// Sum of `amount * price` over both legs.
    pub lp_value: f64,
    /// Share of the pool's liquidity depth, capped at 100%.
    pub pool_share_pct: f64,
    /// Impermanent loss for the hypothetical price shift, as a percentage.
    pub impermanent_loss_pct: f64,
    /// Projected fee APR for this share of the pool.
    pub projected_fee_apr: f64,
}

/// How often rewards compound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl CompoundingFrequency {
    /// Compounding periods per year.
    pub fn periods_per_year(self) -> f64 {
        match self {
            CompoundingFrequency::Daily => 365.0,
            CompoundingFrequency::Weekly => 52.0,
            CompoundingFrequency::Monthly => 12.0,
        }
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("unknown compounding frequency: {value}")]
pub struct UnknownFrequencyError {
    pub value: String,
}

impl FromStr for CompoundingFrequency {
    type Err = UnknownFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(CompoundingFrequency::Daily),
            "weekly" => Ok(CompoundingFrequency::Weekly),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            _ => Err(UnknownFrequencyError {
                value: s.to_string(),
            }),
        }
    }
}

/// A compound-interest projection.
#[derive(Clone, Debug, PartialEq)]
pub struct YieldProjection {
    pub principal: f64,
    pub apy_pct: f64,
    pub duration_days: f64,
    pub frequency: CompoundingFrequency,
    pub projected_value: f64,
    pub total_rewards: f64,
    /// Annualized realized rate; zero when principal or duration is zero.
    pub effective_apy_pct: f64,
}

impl YieldProjection {
    /// The zero projection returned for missing or non-positive principal.
    pub fn zero(apy_pct: f64, duration_days: f64, frequency: CompoundingFrequency) -> Self {
        Self {
            principal: 0.0,
            apy_pct,
            duration_days,
            frequency,
            projected_value: 0.0,
            total_rewards: 0.0,
            effective_apy_pct: 0.0,
        }
    }

    /// Duration expressed in years.
    pub fn years(&self) -> f64 {
        self.duration_days / DAYS_PER_YEAR
    }
}
