//! Tokio-interval loops that drive the engine's tick state machines.
//!
//! Each loop owns one interval inside one task. The interval dies with the
//! task, so stopping a loop (or letting it finish) deterministically clears
//! the pending tick; there is no path that leaves a timer running.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use tutorhub_engine::{FarmTick, GasGame, GasTick, MarketRng, YieldFarm};

/// Handle for requesting a loop to stop from elsewhere (e.g. a ctrl-c
/// watcher) without consuming the loop itself.
#[derive(Clone)]
pub struct StopSignal(Arc<watch::Sender<bool>>);

impl StopSignal {
    pub fn stop(&self) {
        let _ = self.0.send(true);
    }
}

/// A running simulation loop; resolves to the final state.
pub struct SimLoop<T> {
    handle: JoinHandle<T>,
    stop: Arc<watch::Sender<bool>>,
}

impl<T> SimLoop<T> {
    pub fn stopper(&self) -> StopSignal {
        StopSignal(Arc::clone(&self.stop))
    }

    /// Wait for the loop to end on its own.
    pub async fn join(self) -> Result<T> {
        self.handle.await.context("simulation task panicked")
    }

    /// Request a stop and wait for the final state.
    pub async fn stop(self) -> Result<T> {
        let _ = self.stop.send(true);
        self.join().await
    }
}

fn sim_interval(tick_every: Duration) -> time::Interval {
    // First tick lands one full period out, and late host wakeups must not
    // double-apply ticks.
    let mut interval = time::interval_at(Instant::now() + tick_every, tick_every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Start a gas-game round and drive it on a real timer.
///
/// With `auto_execute` the loop plays the obvious policy: execute the moment
/// the price reaches the objective's target. Otherwise the round runs until
/// timeout or an external [`StopSignal`].
pub fn spawn_gas_loop(
    mut game: GasGame,
    mut rng: MarketRng,
    tick_every: Duration,
    auto_execute: bool,
) -> SimLoop<GasGame> {
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let stop = Arc::new(stop_tx);
    let handle = tokio::spawn(async move {
        let mut interval = sim_interval(tick_every);
        game.start();
        loop {
            tokio::select! {
                _ = stop_rx.changed() => {
                    game.stop();
                    break;
                }
                _ = interval.tick() => match game.tick(&mut rng) {
                    GasTick::Sampled(sample) => {
                        debug!(
                            at_secs = sample.at_secs,
                            gas_price = sample.gas_price,
                            congestion = sample.congestion,
                            "gas sample"
                        );
                        let target = game
                            .objective
                            .as_ref()
                            .map(|objective| objective.target_gas_price);
                        if auto_execute && target.is_some_and(|t| sample.gas_price <= t) {
                            // Target hit on a fresh sample; take it.
                            let _ = game.execute_transaction();
                            break;
                        }
                    }
                    GasTick::TimedOut(_) | GasTick::Idle => break,
                },
            }
        }
        game
    });
    SimLoop { handle, stop }
}

/// Drive a yield-farm walk to completion on a real timer.
pub fn spawn_farm_loop(
    mut farm: YieldFarm,
    mut rng: MarketRng,
    tick_every: Duration,
) -> SimLoop<YieldFarm> {
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let stop = Arc::new(stop_tx);
    let handle = tokio::spawn(async move {
        let mut interval = sim_interval(tick_every);
        loop {
            tokio::select! {
                _ = stop_rx.changed() => break,
                _ = interval.tick() => match farm.tick(&mut rng) {
                    FarmTick::Advanced(point) => {
                        debug!(
                            day = point.day,
                            price_a = point.price_a,
                            pool_value = point.pool_value,
                            il_pct = point.il_pct,
                            "farm day"
                        );
                    }
                    FarmTick::Complete => {
                        info!(days = farm.day, "farm walk finished");
                        break;
                    }
                },
            }
        }
        farm
    });
    SimLoop { handle, stop }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorhub_types::constants::FARM_RUN_DAYS;
    use tutorhub_types::{GasPhase, PairConfig, TokenSymbol};

    fn pair() -> PairConfig {
        PairConfig::preset(TokenSymbol::Eth, TokenSymbol::Usdc).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_gas_loop_plays_to_a_result() {
        let sim = spawn_gas_loop(
            GasGame::default(),
            MarketRng::with_seed(42),
            Duration::from_millis(1_500),
            true,
        );
        let game = sim.join().await.unwrap();
        // Auto-execution or timeout; either way the round ended.
        assert!(matches!(game.phase, GasPhase::Won | GasPhase::Lost));
        if game.phase == GasPhase::Won {
            assert_eq!(game.transactions.len(), 1);
            assert!(game.transactions[0].success);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_farm_loop_covers_the_horizon() {
        let sim = spawn_farm_loop(
            YieldFarm::new(pair()),
            MarketRng::with_seed(7),
            Duration::from_millis(500),
        );
        let farm = sim.join().await.unwrap();
        assert!(farm.is_complete());
        assert_eq!(farm.day, FARM_RUN_DAYS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_the_loop_and_clears_the_timer() {
        let sim = spawn_gas_loop(
            GasGame::default(),
            MarketRng::with_seed(3),
            Duration::from_millis(1_500),
            false,
        );
        let stopper = sim.stopper();

        // Let a few ticks land, then stop.
        time::sleep(Duration::from_millis(5_000)).await;
        stopper.stop();
        let game = sim.stop().await.unwrap();

        // The task is joined: its interval is gone, and the state we hold is
        // the final one. The round paused rather than finishing.
        assert_eq!(game.phase, GasPhase::Idle);
        assert!(game.elapsed_secs > 0.0);
        let snapshot = game.history.len();

        // Real time marching on cannot touch the returned state.
        time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(game.history.len(), snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_farm_keeps_partial_history() {
        let sim = spawn_farm_loop(
            YieldFarm::new(pair()),
            MarketRng::with_seed(11),
            Duration::from_millis(500),
        );
        let stopper = sim.stopper();
        time::sleep(Duration::from_millis(2_600)).await;
        stopper.stop();
        let farm = sim.stop().await.unwrap();
        assert!(!farm.is_complete());
        assert!(farm.day >= 1);
        assert!((farm.day as usize) < FARM_RUN_DAYS as usize);
    }
}
