use thiserror::Error as ThisError;
use tutorhub_types::TokenSymbol;

/// Errors returned by the simulation engine.
///
/// Forgiving paths (non-positive amounts, zero deposits) return zero-valued
/// results instead; these variants cover genuine misuse only.
#[derive(Debug, ThisError, PartialEq)]
pub enum EngineError {
    #[error("pool for {symbol} has no liquidity")]
    ZeroLiquidity { symbol: TokenSymbol },
    #[error("price shift must be greater than -100% (got {got})")]
    PriceShiftOutOfRange { got: f64 },
    #[error("objective list is empty")]
    EmptyObjectives,
    #[error("no round is running")]
    RoundNotRunning,
    #[error("question list is empty")]
    EmptyQuiz,
    #[error("quiz is already complete")]
    QuizFinished,
    #[error("choice out of range (got={got}, max={max})")]
    ChoiceOutOfRange { got: usize, max: usize },
    #[error("current question was already answered")]
    AlreadyAnswered,
}
