//! Fixed constants for the simulation core.

/// Liquidity-provider fee charged on every swap (0.3%).
pub const SWAP_FEE_RATE: f64 = 0.003;

/// Simulated seconds added per gas-game tick.
pub const GAS_TICK_SECONDS: f64 = 1.5;

/// Rolling gas-fee history retained for charting.
pub const GAS_HISTORY_SAMPLES: usize = 20;

/// Base fee bounds in gwei.
pub const BASE_FEE_MIN: f64 = 10.0;
pub const BASE_FEE_MAX: f64 = 100.0;

/// Priority fee bounds in gwei.
pub const PRIORITY_FEE_MIN: f64 = 1.0;
pub const PRIORITY_FEE_MAX: f64 = 20.0;

/// Base fee seeded into a fresh gas game (gwei).
pub const INITIAL_BASE_FEE: f64 = 20.0;

/// Priority fee seeded into a fresh gas game (gwei).
pub const INITIAL_PRIORITY_FEE: f64 = 5.0;

/// Points deducted when a transaction executes above the target price.
pub const FAILED_EXECUTION_PENALTY: i64 = 50;

/// Bonus points per gwei of headroom under the target at execution time.
pub const SAVINGS_BONUS_PER_GWEI: f64 = 10.0;

/// Reference ETH price used for USD cost displays.
pub const REFERENCE_ETH_PRICE_USD: f64 = 2_000.0;

/// Gwei per ETH, for converting `gas_limit * gas_price` into ETH.
pub const GWEI_PER_ETH: f64 = 1e9;

/// Simulated days covered by one yield-farm run.
pub const FARM_RUN_DAYS: u32 = 30;

/// Rolling yield-farm history retained for charting.
pub const FARM_HISTORY_POINTS: usize = 30;

/// Price floor applied to token A after each farm tick.
pub const FARM_PRICE_FLOOR: f64 = 100.0;

/// Per-tick volatility for the ETH/USDC pair.
pub const VOLATILE_PAIR_VOLATILITY: f64 = 0.05;

/// Per-tick volatility for every other pair.
pub const DEFAULT_PAIR_VOLATILITY: f64 = 0.03;

/// Days per year used for APY proration.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Base fee APR credited to a liquidity position before the utilization bonus.
pub const LP_BASE_FEE_APR: f64 = 18.0;

/// Cap on the utilization bonus added to the base fee APR.
pub const LP_UTILIZATION_BONUS_CAP: f64 = 6.0;

/// Points awarded per correct quiz answer.
pub const QUIZ_POINTS_PER_CORRECT: u32 = 10;
