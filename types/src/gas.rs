//! Gas-game reference data: objectives, transaction kinds, and the records
//! the game appends as it runs.

/// Phases of one gas-game round.
///
/// `Idle -> Running -> {Won, Lost}`, with `reset` returning to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GasPhase {
    #[default]
    Idle,
    Running,
    Won,
    Lost,
}

/// One level's objective: execute below the target before the clock runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct GasObjective {
    pub title: String,
    pub description: String,
    /// Execution succeeds at or below this gas price (gwei).
    pub target_gas_price: f64,
    pub time_limit_secs: f64,
    pub reward: i64,
}

impl GasObjective {
    /// The standard three-tier objective ladder: the target drops while the
    /// time limit and reward grow.
    pub fn default_levels() -> Vec<GasObjective> {
        vec![
            GasObjective {
                title: "Execute under 30 gwei".into(),
                description: "Wait for gas to drop below 30 gwei and execute your transaction"
                    .into(),
                target_gas_price: 30.0,
                time_limit_secs: 30.0,
                reward: 100,
            },
            GasObjective {
                title: "Perfect timing - under 25 gwei".into(),
                description: "Execute when gas is at 25 gwei or lower for maximum savings".into(),
                target_gas_price: 25.0,
                time_limit_secs: 45.0,
                reward: 200,
            },
            GasObjective {
                title: "Network congestion challenge".into(),
                description: "Execute during low congestion (under 20 gwei) in volatile conditions"
                    .into(),
                target_gas_price: 20.0,
                time_limit_secs: 60.0,
                reward: 300,
            },
        ]
    }
}

/// Transaction kinds the player can queue, with their fixed gas limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TxKind {
    #[default]
    SimpleTransfer,
    TokenSwap,
    DefiInteraction,
    NftMint,
}

impl TxKind {
    pub const ALL: [TxKind; 4] = [
        TxKind::SimpleTransfer,
        TxKind::TokenSwap,
        TxKind::DefiInteraction,
        TxKind::NftMint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TxKind::SimpleTransfer => "Simple Transfer",
            TxKind::TokenSwap => "Token Swap",
            TxKind::DefiInteraction => "DeFi Interaction",
            TxKind::NftMint => "NFT Mint",
        }
    }

    /// Gas units consumed by this kind of transaction.
    pub fn gas_limit(self) -> u64 {
        match self {
            TxKind::SimpleTransfer => 21_000,
            TxKind::TokenSwap => 150_000,
            TxKind::DefiInteraction => 300_000,
            TxKind::NftMint => 200_000,
        }
    }
}

/// One point of the rolling fee history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasSample {
    pub at_secs: f64,
    pub gas_price: f64,
    pub base_fee: f64,
    pub priority_fee: f64,
    /// Congestion factor in `[0, 1]` at sample time.
    pub congestion: f64,
}

/// An executed transaction, appended to the round's log.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutedTx {
    pub kind: TxKind,
    pub gas_price: f64,
    pub gas_used: u64,
    /// Total cost in ETH at execution time.
    pub cost_eth: f64,
    pub success: bool,
    pub at_secs: f64,
}
