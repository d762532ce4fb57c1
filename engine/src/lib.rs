//! Tutor Hub simulation engine.
//!
//! This crate contains the DeFi calculators and the tick-driven game state
//! machines behind the simulator pages: constant-product swap quoting,
//! impermanent-loss math, compound-interest projection, the gas-price
//! optimization game, the yield-farming market walk, and the security quiz.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time inside the engine; simulated time advances
//!   only through `tick` calls.
//! - Do not use ambient randomness; every walk draws from the injected
//!   [`MarketRng`], so a seeded source replays the exact same run.
//! - Tick functions are synchronous and scheduler-agnostic: a real timer, a
//!   test harness, and a headless replay all drive them the same way.
//!
//! ## Forgiving-input contract
//! Calculators mirror the UI's tolerance for junk input: missing or
//! non-positive amounts produce all-zero results rather than errors, and
//! every division is guarded so no path returns `NaN` or infinity.
//! Typed errors are reserved for genuine misuse (zero-liquidity pools,
//! out-of-range price shifts, acting on a finished game).

mod error;

pub mod farm;
pub mod gas;
pub mod liquidity;
pub mod quiz;
pub mod rewards;
pub mod rng;
pub mod swap;

pub use error::EngineError;
pub use farm::{FarmTick, YieldFarm};
pub use gas::{spot_gas_price, ExecutionReport, GasGame, GasTick};
pub use liquidity::{evaluate_position, impermanent_loss_from_ratio, impermanent_loss_pct};
pub use quiz::Quiz;
pub use rewards::project_yield;
pub use rng::MarketRng;
pub use swap::quote_swap;
