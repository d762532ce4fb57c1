//! Compound-interest yield projection.

use tutorhub_types::constants::DAYS_PER_YEAR;
use tutorhub_types::{CompoundingFrequency, YieldProjection};

/// Project the value of `deposit` after `duration_days` at `apy_pct`,
/// compounding at `frequency`.
///
/// `projected = deposit * (1 + rate/n) ^ (n * years)`
///
/// Missing or non-positive deposits produce the zero projection, and the
/// effective APY is defined as zero when the deposit or the duration is
/// zero, never `NaN`. Negative durations are treated as zero.
pub fn project_yield(
    deposit: f64,
    apy_pct: f64,
    duration_days: f64,
    frequency: CompoundingFrequency,
) -> YieldProjection {
    if !deposit.is_finite() || deposit <= 0.0 {
        return YieldProjection::zero(apy_pct, duration_days.max(0.0), frequency);
    }
    let duration_days = if duration_days.is_finite() {
        duration_days.max(0.0)
    } else {
        0.0
    };

    let years = duration_days / DAYS_PER_YEAR;
    let rate = apy_pct / 100.0;
    let periods = frequency.periods_per_year();
    let projected_value = deposit * (1.0 + rate / periods).powf(periods * years);
    let total_rewards = projected_value - deposit;
    let effective_apy_pct = if years > 0.0 {
        total_rewards / deposit / years * 100.0
    } else {
        0.0
    };

    YieldProjection {
        principal: deposit,
        apy_pct,
        duration_days,
        frequency,
        projected_value,
        total_rewards,
        effective_apy_pct,
    }
}
