//! XP, quest completion, and streak transitions on the player profile.
//!
//! Every transition either commits in full or leaves the player and pet
//! untouched: new values are computed first and written only after all
//! checked arithmetic has succeeded.

use posturemon_types::{PetEvolution, PetState, PlayerStats};

use crate::config::ProgressionConfig;
use crate::curve::{cumulative_xp_for_level, level_from_total_xp};
use crate::error::ProgressionError;
use crate::evolution::evolution_for_level;
use crate::pet::raise_gauge;

/// A level increase caused by an XP award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// Level before the award.
    pub previous_level: u32,
    /// Level after the award.
    pub new_level: u32,
    /// Evolution stage before the award.
    pub previous_evolution: PetEvolution,
    /// Evolution stage after the award.
    pub new_evolution: PetEvolution,
}

impl LevelUp {
    /// Whether the pet reached a new evolution stage.
    pub fn evolved(&self) -> bool {
        self.new_evolution != self.previous_evolution
    }
}

/// Outcome of a completed quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestCompletion {
    /// XP granted for the quest.
    pub xp_awarded: u64,
    /// Level increase caused by the XP, if any.
    pub level_up: Option<LevelUp>,
}

/// Award `amount` XP.
///
/// An `amount` of zero is a no-op and returns `Ok(None)`. On a level
/// increase the pet's level mirrors the player's, its evolution is
/// recomputed (never regressing), and its happiness is set to
/// `level_up_happiness`.
///
/// # Errors
///
/// Returns [`ProgressionError::ArithmeticOverflow`] if `total_xp` would
/// overflow; nothing is modified in that case.
pub fn add_xp(
    player: &mut PlayerStats,
    pet: &mut PetState,
    amount: u64,
    config: &ProgressionConfig,
) -> Result<Option<LevelUp>, ProgressionError> {
    if amount == 0 {
        return Ok(None);
    }

    let total_xp = player
        .total_xp
        .checked_add(amount)
        .ok_or_else(|| ProgressionError::overflow("total_xp increment"))?;
    let new_level = level_from_total_xp(total_xp, config).max(player.level);
    let level_floor = cumulative_xp_for_level(new_level, config)?;
    let xp = total_xp.saturating_sub(level_floor);

    let previous_level = player.level;
    player.total_xp = total_xp;
    player.xp = xp;
    player.level = new_level;
    pet.level = new_level;

    if new_level <= previous_level {
        return Ok(None);
    }

    let previous_evolution = pet.evolution;
    let new_evolution = previous_evolution.max(evolution_for_level(new_level));
    pet.evolution = new_evolution;
    pet.happiness = raise_gauge(0, config.level_up_happiness);

    tracing::debug!(
        previous_level,
        new_level,
        total_xp,
        evolution = new_evolution.as_str(),
        "level up"
    );

    Ok(Some(LevelUp {
        previous_level,
        new_level,
        previous_evolution,
        new_evolution,
    }))
}

/// Apply a quest completion worth `xp_earned`.
///
/// Increments `quests_completed`, raises happiness and energy by the
/// configured gains, then awards the XP. The transition is computed on
/// copies and committed together.
///
/// # Errors
///
/// Returns [`ProgressionError::ArithmeticOverflow`] if a counter would
/// overflow; the player and pet are unchanged in that case.
pub fn complete_quest(
    player: &mut PlayerStats,
    pet: &mut PetState,
    xp_earned: u64,
    config: &ProgressionConfig,
) -> Result<QuestCompletion, ProgressionError> {
    let mut next_player = player.clone();
    let mut next_pet = pet.clone();

    next_player.quests_completed = next_player
        .quests_completed
        .checked_add(1)
        .ok_or_else(|| ProgressionError::overflow("quests_completed increment"))?;
    next_pet.happiness = raise_gauge(next_pet.happiness, config.happiness_gain_quest);
    next_pet.energy = raise_gauge(next_pet.energy, config.energy_gain_break);

    let level_up = add_xp(&mut next_player, &mut next_pet, xp_earned, config)?;

    *player = next_player;
    *pet = next_pet;

    Ok(QuestCompletion {
        xp_awarded: xp_earned,
        level_up,
    })
}

/// Extend the streak by one day. Returns the new streak.
pub fn increment_streak(player: &mut PlayerStats) -> Result<u32, ProgressionError> {
    player.streak = player
        .streak
        .checked_add(1)
        .ok_or_else(|| ProgressionError::overflow("streak increment"))?;
    player.longest_streak = player.longest_streak.max(player.streak);
    Ok(player.streak)
}

/// Restart the streak at `value` (0 after a lapse, 1 for a fresh
/// qualifying day).
pub fn reset_streak(player: &mut PlayerStats, value: u32) {
    player.streak = value;
    player.longest_streak = player.longest_streak.max(value);
}

/// A stored level that disagrees with the stored `total_xp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelMismatch {
    /// Level found on the record.
    pub stored_level: u32,
    /// Level implied by `total_xp`.
    pub derived_level: u32,
    /// In-level XP found on the record.
    pub stored_xp: u64,
    /// In-level XP implied by `total_xp`.
    pub derived_xp: u64,
}

/// Check that `level` and `xp` follow from `total_xp`.
pub fn verify_consistency(
    player: &PlayerStats,
    config: &ProgressionConfig,
) -> Result<Option<LevelMismatch>, ProgressionError> {
    let derived_level = level_from_total_xp(player.total_xp, config);
    let derived_xp = player
        .total_xp
        .saturating_sub(cumulative_xp_for_level(derived_level, config)?);
    if derived_level == player.level && derived_xp == player.xp {
        return Ok(None);
    }
    Ok(Some(LevelMismatch {
        stored_level: player.level,
        derived_level,
        stored_xp: player.xp,
        derived_xp,
    }))
}

/// Rewrite `level` and `xp` from `total_xp`.
pub fn normalize_level(player: &mut PlayerStats, mismatch: &LevelMismatch) {
    player.level = mismatch.derived_level;
    player.xp = mismatch.derived_xp;
}
