//! The level curve.
//!
//! Level 1 is free. Advancing from level `L-1` to `L` costs
//! `base * scale^(L-2)` XP. With the default base of 100 and scale of 1.2
//! the cumulative thresholds are 100, 220, 364, 536.8, 744.16, ...
//!
//! Thresholds are summed exactly with [`Decimal`] and never rounded, so a
//! total of 536 XP is still level 4. Functions that answer in whole XP round
//! the threshold up: 537 is the smallest total that reaches level 5.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::ProgressionConfig;
use crate::error::ProgressionError;

fn next_step(step: Decimal, config: &ProgressionConfig) -> Result<Decimal, ProgressionError> {
    step.checked_mul(config.xp_scaling_factor)
        .ok_or_else(|| ProgressionError::overflow("xp curve step"))
}

/// Exact cumulative threshold for `level`.
fn exact_threshold(level: u32, config: &ProgressionConfig) -> Result<Decimal, ProgressionError> {
    let mut total = Decimal::ZERO;
    let mut step = Decimal::from(config.base_xp_per_level);
    for current in 2..=level {
        if current > 2 {
            step = next_step(step, config)?;
        }
        total = total
            .checked_add(step)
            .ok_or_else(|| ProgressionError::overflow("cumulative xp"))?;
    }
    Ok(total)
}

/// XP needed to advance from `level - 1` to `level`. Zero for level 1 and
/// below. The value is exact and may be fractional (172.8 for level 5).
pub fn xp_required_for_level(
    level: u32,
    config: &ProgressionConfig,
) -> Result<Decimal, ProgressionError> {
    if level <= 1 {
        return Ok(Decimal::ZERO);
    }
    let mut step = Decimal::from(config.base_xp_per_level);
    for _ in 2..level {
        step = next_step(step, config)?;
    }
    Ok(step)
}

/// Smallest whole total XP that reaches `level`.
pub fn cumulative_xp_for_level(
    level: u32,
    config: &ProgressionConfig,
) -> Result<u64, ProgressionError> {
    exact_threshold(level, config)?
        .ceil()
        .to_u64()
        .ok_or_else(|| ProgressionError::overflow("xp threshold exceeds u64"))
}

/// The highest level whose cumulative threshold is at most `total_xp`,
/// capped at `max_level`.
///
/// Levels whose threshold cannot be represented are unreachable, so this
/// never fails.
pub fn level_from_total_xp(total_xp: u64, config: &ProgressionConfig) -> u32 {
    let total = Decimal::from(total_xp);
    let mut level: u32 = 1;
    let mut step = Decimal::from(config.base_xp_per_level);
    let mut threshold = step;

    while level < config.max_level && total >= threshold {
        level = level.saturating_add(1);
        let Some(scaled) = step.checked_mul(config.xp_scaling_factor) else {
            break;
        };
        let Some(next) = threshold.checked_add(scaled) else {
            break;
        };
        step = scaled;
        threshold = next;
    }
    level
}

/// Whole XP earned past the current level's threshold.
pub fn xp_into_level(total_xp: u64, config: &ProgressionConfig) -> Result<u64, ProgressionError> {
    let level = level_from_total_xp(total_xp, config);
    let floor = cumulative_xp_for_level(level, config)?;
    Ok(total_xp.saturating_sub(floor))
}

/// Whole XP still missing for the next level. Zero at the level cap.
pub fn xp_to_next_level(
    total_xp: u64,
    config: &ProgressionConfig,
) -> Result<u64, ProgressionError> {
    let level = level_from_total_xp(total_xp, config);
    if level >= config.max_level {
        return Ok(0);
    }
    let next_level = level
        .checked_add(1)
        .ok_or_else(|| ProgressionError::overflow("next level"))?;
    let ceiling = cumulative_xp_for_level(next_level, config)?;
    Ok(ceiling.saturating_sub(total_xp))
}

/// Integer percent (0--100) of the way through the current level. 100 at
/// the level cap.
pub fn progress_to_next(
    total_xp: u64,
    config: &ProgressionConfig,
) -> Result<u32, ProgressionError> {
    let level = level_from_total_xp(total_xp, config);
    if level >= config.max_level {
        return Ok(100);
    }
    let next_level = level
        .checked_add(1)
        .ok_or_else(|| ProgressionError::overflow("next level"))?;
    let span = xp_required_for_level(next_level, config)?;
    if span <= Decimal::ZERO {
        return Ok(100);
    }
    let into = Decimal::from(total_xp)
        .checked_sub(exact_threshold(level, config)?)
        .ok_or_else(|| ProgressionError::overflow("level progress"))?;
    let pct = into
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(span))
        .ok_or_else(|| ProgressionError::overflow("level progress"))?;
    Ok(pct.floor().to_u32().unwrap_or(100).min(100))
}
