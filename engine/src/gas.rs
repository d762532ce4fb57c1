//! Gas-price stochastic walk and the optimization-game state machine.
//!
//! One round: pick an objective for the current level, watch the simulated
//! fee market walk, and execute a transaction below the target price before
//! the clock runs out. Fees follow a bounded random walk whose volatility
//! breathes with a sinusoidal congestion cycle.
//!
//! The game owns no timer. A host scheduler calls [`GasGame::tick`] once per
//! 1.5 simulated seconds; ticking a game that is not running changes
//! nothing, so a stray callback after stop is harmless.

use tracing::{debug, info};

use tutorhub_types::constants::{
    BASE_FEE_MAX, BASE_FEE_MIN, FAILED_EXECUTION_PENALTY, GAS_HISTORY_SAMPLES, GAS_TICK_SECONDS,
    GWEI_PER_ETH, INITIAL_BASE_FEE, INITIAL_PRIORITY_FEE, PRIORITY_FEE_MAX, PRIORITY_FEE_MIN,
    REFERENCE_ETH_PRICE_USD, SAVINGS_BONUS_PER_GWEI,
};
use tutorhub_types::{ExecutedTx, GasObjective, GasPhase, GasSample, TxKind};

use crate::error::EngineError;
use crate::rng::MarketRng;

/// Result of one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GasTick {
    /// Tick applied; the round continues.
    Sampled(GasSample),
    /// The time limit was reached before execution; the round is lost.
    TimedOut(GasSample),
    /// The game is not running; nothing changed.
    Idle,
}

/// Outcome of an executed transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionReport {
    pub success: bool,
    pub final_gas_price: f64,
    pub elapsed_secs: f64,
    pub score: i64,
    /// Percentage saved under the target price; zero on failure.
    pub savings_pct: f64,
}

/// The gas-optimization game.
#[derive(Clone, Debug)]
pub struct GasGame {
    pub phase: GasPhase,
    pub base_fee: f64,
    pub priority_fee: f64,
    pub elapsed_secs: f64,
    pub score: i64,
    /// 1-based level into the objective ladder.
    pub level: u32,
    pub objective: Option<GasObjective>,
    /// Transaction kind queued for execution.
    pub tx_kind: TxKind,
    /// Estimated cost of the queued transaction at the current price (ETH).
    pub estimated_cost_eth: f64,
    /// Rolling fee history, capped at the charting window.
    pub history: Vec<GasSample>,
    /// Append-only log of executed transactions.
    pub transactions: Vec<ExecutedTx>,
    objectives: Vec<GasObjective>,
}

impl Default for GasGame {
    fn default() -> Self {
        // The standard ladder is never empty.
        Self::new(GasObjective::default_levels()).expect("default objectives")
    }
}

impl GasGame {
    /// Create a game over an ordered objective ladder.
    pub fn new(objectives: Vec<GasObjective>) -> Result<Self, EngineError> {
        if objectives.is_empty() {
            return Err(EngineError::EmptyObjectives);
        }
        Ok(Self {
            phase: GasPhase::Idle,
            base_fee: INITIAL_BASE_FEE,
            priority_fee: INITIAL_PRIORITY_FEE,
            elapsed_secs: 0.0,
            score: 0,
            level: 1,
            objective: None,
            tx_kind: TxKind::default(),
            estimated_cost_eth: 0.0,
            history: Vec::new(),
            transactions: Vec::new(),
            objectives,
        })
    }

    /// Current combined gas price in gwei.
    pub fn gas_price(&self) -> f64 {
        self.base_fee + self.priority_fee
    }

    /// Estimated cost of the queued transaction in USD at the reference
    /// ETH price.
    pub fn estimated_cost_usd(&self) -> f64 {
        self.estimated_cost_eth * REFERENCE_ETH_PRICE_USD
    }

    /// The objective ladder this game was configured with.
    pub fn objectives(&self) -> &[GasObjective] {
        &self.objectives
    }

    /// Queue a different transaction kind. Ignored mid-round; the queued
    /// kind is part of what the player committed to when starting.
    pub fn select_tx_kind(&mut self, kind: TxKind) {
        if self.phase != GasPhase::Running {
            self.tx_kind = kind;
        }
    }

    /// Begin a round at the current level.
    ///
    /// No-op while a round is already running. Elapsed time and score reset,
    /// the history and transaction log clear, and fees carry over from
    /// wherever the market left them.
    pub fn start(&mut self) {
        if self.phase == GasPhase::Running {
            return;
        }
        let index = (self.level as usize).saturating_sub(1);
        let objective = self
            .objectives
            .get(index)
            .unwrap_or(&self.objectives[0])
            .clone();
        debug!(level = self.level, objective = %objective.title, "round started");
        self.phase = GasPhase::Running;
        self.elapsed_secs = 0.0;
        self.score = 0;
        self.objective = Some(objective);
        self.history.clear();
        self.transactions.clear();
    }

    /// Advance the simulated market by one 1.5-second tick.
    pub fn tick(&mut self, rng: &mut MarketRng) -> GasTick {
        if self.phase != GasPhase::Running {
            return GasTick::Idle;
        }

        self.elapsed_secs += GAS_TICK_SECONDS;

        // Congestion breathes on a ~63-second cycle and drives volatility.
        let congestion = (self.elapsed_secs / 10.0).sin() * 0.5 + 0.5;
        let volatility = 0.3 + congestion * 0.4;

        let base_step = rng.jitter() * volatility * self.base_fee;
        self.base_fee = (self.base_fee + base_step).clamp(BASE_FEE_MIN, BASE_FEE_MAX);

        let priority_step = rng.jitter() * 0.2 * self.priority_fee;
        self.priority_fee =
            (self.priority_fee + priority_step).clamp(PRIORITY_FEE_MIN, PRIORITY_FEE_MAX);

        let gas_price = self.gas_price();
        self.estimated_cost_eth = self.tx_kind.gas_limit() as f64 * gas_price / GWEI_PER_ETH;

        let sample = GasSample {
            at_secs: self.elapsed_secs,
            gas_price,
            base_fee: self.base_fee,
            priority_fee: self.priority_fee,
            congestion,
        };
        if self.history.len() == GAS_HISTORY_SAMPLES {
            self.history.remove(0);
        }
        self.history.push(sample);

        if let Some(objective) = &self.objective {
            if self.elapsed_secs >= objective.time_limit_secs {
                info!(
                    elapsed = self.elapsed_secs,
                    gas_price, "time limit exceeded"
                );
                self.phase = GasPhase::Lost;
                return GasTick::TimedOut(sample);
            }
        }

        GasTick::Sampled(sample)
    }

    /// Execute the queued transaction at the current gas price.
    ///
    /// Succeeds iff the price is at or below the objective's target. Success
    /// banks the objective reward plus a timing bonus per gwei of headroom;
    /// failure costs a flat penalty. Either way the round ends and the
    /// transaction is appended to the log.
    pub fn execute_transaction(&mut self) -> Result<ExecutionReport, EngineError> {
        if self.phase != GasPhase::Running {
            return Err(EngineError::RoundNotRunning);
        }
        let objective = self.objective.clone().ok_or(EngineError::RoundNotRunning)?;

        let gas_price = self.gas_price();
        let success = gas_price <= objective.target_gas_price;
        let gas_used = self.tx_kind.gas_limit();
        let cost_eth = gas_used as f64 * gas_price / GWEI_PER_ETH;

        self.transactions.push(ExecutedTx {
            kind: self.tx_kind,
            gas_price,
            gas_used,
            cost_eth,
            success,
            at_secs: self.elapsed_secs,
        });

        if success {
            let bonus =
                ((objective.target_gas_price - gas_price) * SAVINGS_BONUS_PER_GWEI).max(0.0);
            self.score += objective.reward + bonus as i64;
            self.phase = GasPhase::Won;
        } else {
            self.score -= FAILED_EXECUTION_PENALTY;
            self.phase = GasPhase::Lost;
        }

        let savings_pct = if success {
            (objective.target_gas_price - gas_price) / objective.target_gas_price * 100.0
        } else {
            0.0
        };
        info!(
            success,
            gas_price,
            score = self.score,
            elapsed = self.elapsed_secs,
            "transaction executed"
        );

        Ok(ExecutionReport {
            success,
            final_gas_price: gas_price,
            elapsed_secs: self.elapsed_secs,
            score: self.score,
            savings_pct,
        })
    }

    /// Halt the round without ending it in a result. State stays on screen;
    /// only the phase returns to idle.
    pub fn stop(&mut self) {
        if self.phase == GasPhase::Running {
            debug!(elapsed = self.elapsed_secs, "round stopped");
            self.phase = GasPhase::Idle;
        }
    }

    /// Restore the fresh-start defaults: level 1, seeded fees, empty logs.
    /// The objective ladder is kept.
    pub fn reset(&mut self) {
        debug!("game reset");
        self.phase = GasPhase::Idle;
        self.base_fee = INITIAL_BASE_FEE;
        self.priority_fee = INITIAL_PRIORITY_FEE;
        self.elapsed_secs = 0.0;
        self.score = 0;
        self.level = 1;
        self.objective = None;
        self.estimated_cost_eth = 0.0;
        self.history.clear();
        self.transactions.clear();
    }

    /// Move to the next level, clamped to the last objective.
    pub fn advance_level(&mut self) {
        self.level = (self.level + 1).min(self.objectives.len() as u32);
    }
}

/// One-off spot gas price for catalogue displays: 20 gwei base plus up to
/// 50 gwei of congestion noise, floored to a whole gwei.
pub fn spot_gas_price(rng: &mut MarketRng) -> u64 {
    (20.0 + rng.unit() * 50.0).floor() as u64
}
