use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use tutorhub_engine::{GasGame, MarketRng, YieldFarm};
use tutorhub_simulator::{spawn_farm_loop, spawn_gas_loop};
use tutorhub_types::{GasPhase, PairConfig, TokenSymbol};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Gas-optimization game, played by an execute-at-target policy.
    Gas,
    /// 30-day yield-farming market walk.
    Farm,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario to run headlessly.
    #[arg(long, value_enum, default_value_t = Scenario::Gas)]
    scenario: Scenario,

    /// Seed for deterministic replay (OS entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Gas game level to play (1-based, clamped to the objective ladder).
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Liquidity pair for the farm scenario, e.g. "ETH/USDC".
    #[arg(long, default_value = "ETH/USDC")]
    pair: String,

    /// Tick interval override in milliseconds (defaults: gas 1500, farm 500).
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}

fn build_rng(seed: Option<u64>) -> MarketRng {
    match seed {
        Some(seed) => MarketRng::with_seed(seed),
        None => MarketRng::from_entropy(),
    }
}

fn parse_pair(value: &str) -> Result<PairConfig> {
    let (a, b) = value
        .split_once('/')
        .with_context(|| format!("pair must look like ETH/USDC, got {value}"))?;
    let token_a: TokenSymbol = a
        .trim()
        .parse()
        .with_context(|| format!("unknown token {a}"))?;
    let token_b: TokenSymbol = b
        .trim()
        .parse()
        .with_context(|| format!("unknown token {b}"))?;
    match PairConfig::preset(token_a, token_b) {
        Some(pair) => Ok(pair),
        None => {
            let available = PairConfig::presets()
                .iter()
                .map(|pair| format!("{}/{}", pair.token_a, pair.token_b))
                .collect::<Vec<_>>()
                .join(", ");
            bail!("no preset for {token_a}/{token_b}; available: {available}")
        }
    }
}

async fn run_gas(args: &Args) -> Result<()> {
    let mut game = GasGame::default();
    for _ in 1..args.level {
        game.advance_level();
    }
    let tick = Duration::from_millis(args.tick_ms.unwrap_or(1_500));
    let sim = spawn_gas_loop(game, build_rng(args.seed), tick, true);

    let stopper = sim.stopper();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.stop();
        }
    });

    let game = sim.join().await?;
    let outcome = match game.phase {
        GasPhase::Won => "won",
        GasPhase::Lost => "lost",
        _ => "stopped",
    };
    info!(
        outcome,
        level = game.level,
        score = game.score,
        elapsed_secs = game.elapsed_secs,
        transactions = game.transactions.len(),
        "gas round over"
    );
    if let Some(tx) = game.transactions.last() {
        info!(
            kind = tx.kind.name(),
            gas_price = tx.gas_price,
            cost_eth = tx.cost_eth,
            success = tx.success,
            "executed transaction"
        );
    }
    Ok(())
}

async fn run_farm(args: &Args) -> Result<()> {
    let pair = parse_pair(&args.pair)?;
    let tick = Duration::from_millis(args.tick_ms.unwrap_or(500));
    let sim = spawn_farm_loop(YieldFarm::new(pair), build_rng(args.seed), tick);

    let stopper = sim.stopper();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.stop();
        }
    });

    let farm = sim.join().await?;
    info!(
        pair = %format!("{}/{}", farm.config.token_a, farm.config.token_b),
        days = farm.day,
        initial_value = farm.initial_value,
        pool_value = farm.pool_value,
        rewards = farm.rewards,
        il_pct = farm.il_pct,
        net_return = farm.net_return,
        "farm walk over"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    match args.scenario {
        Scenario::Gas => run_gas(&args).await,
        Scenario::Farm => run_farm(&args).await,
    }
}
