//! Quest XP calculation.
//!
//! Multipliers apply before flat bonuses; the result is floored once at
//! the end. With the stock catalog:
//!
//! - micro-break, no options: 50
//! - micro-break with the speed bonus: 60
//! - full-reset with a perfect score: `floor(80 * 1.5)` = 120

use posturemon_types::{BonusType, QuestDefinition};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// How a quest was completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardOptions {
    /// Posture held perfectly throughout.
    pub perfect_score: bool,
    /// Finished faster than expected.
    pub speed_bonus: bool,
    /// Current streak length in days.
    pub streak_bonus: u32,
}

/// Flat bonus amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// XP added for a speed bonus (default: 10).
    pub speed_bonus_xp: u32,
    /// XP added for a long streak (default: 5).
    pub streak_bonus_xp: u32,
    /// Streak length that earns the streak bonus (default: 5).
    pub streak_bonus_threshold: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            speed_bonus_xp: 10,
            streak_bonus_xp: 5,
            streak_bonus_threshold: 5,
        }
    }
}

/// XP earned for completing `quest`.
///
/// The perfect-score multiplier applies only when the quest carries a
/// [`BonusType::PerfectScore`] bonus. Results too large for `u32`
/// saturate.
pub fn calculate_quest_xp(
    quest: &QuestDefinition,
    options: &RewardOptions,
    config: &RewardConfig,
) -> u32 {
    let mut total = Decimal::from(quest.rewards.xp);

    if options.perfect_score
        && let Some(bonus) = quest.rewards.bonus
        && bonus.bonus_type == BonusType::PerfectScore
    {
        total = total.checked_mul(bonus.multiplier).unwrap_or(Decimal::MAX);
    }

    if options.speed_bonus {
        total = total.saturating_add(Decimal::from(config.speed_bonus_xp));
    }

    if options.streak_bonus >= config.streak_bonus_threshold {
        total = total.saturating_add(Decimal::from(config.streak_bonus_xp));
    }

    let floored = total.floor();
    if floored.is_sign_negative() {
        return 0;
    }
    floored.to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use posturemon_types::{QuestBonus, QuestId};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::{FULL_RESET, MICRO_BREAK, QuestCatalog};

    fn quest(id: &str) -> QuestDefinition {
        QuestCatalog::builtin()
            .get(&QuestId::new(id))
            .cloned()
            .unwrap_or_else(|| panic!("missing stock quest {id}"))
    }

    #[test]
    fn base_xp_without_options() {
        let xp = calculate_quest_xp(
            &quest(MICRO_BREAK),
            &RewardOptions::default(),
            &RewardConfig::default(),
        );
        assert_eq!(xp, 50);
    }

    #[test]
    fn speed_bonus_adds_ten() {
        let options = RewardOptions {
            speed_bonus: true,
            ..RewardOptions::default()
        };
        let xp = calculate_quest_xp(&quest(MICRO_BREAK), &options, &RewardConfig::default());
        assert_eq!(xp, 60);
    }

    #[test]
    fn perfect_score_multiplies_full_reset() {
        let options = RewardOptions {
            perfect_score: true,
            ..RewardOptions::default()
        };
        let xp = calculate_quest_xp(&quest(FULL_RESET), &options, &RewardConfig::default());
        assert_eq!(xp, 120);
    }

    #[test]
    fn perfect_score_ignored_without_bonus() {
        let options = RewardOptions {
            perfect_score: true,
            ..RewardOptions::default()
        };
        let xp = calculate_quest_xp(&quest(MICRO_BREAK), &options, &RewardConfig::default());
        assert_eq!(xp, 50);
    }

    #[test]
    fn streak_bonus_needs_five_days() {
        let config = RewardConfig::default();
        let four = RewardOptions {
            streak_bonus: 4,
            ..RewardOptions::default()
        };
        let five = RewardOptions {
            streak_bonus: 5,
            ..RewardOptions::default()
        };
        assert_eq!(calculate_quest_xp(&quest(MICRO_BREAK), &four, &config), 50);
        assert_eq!(calculate_quest_xp(&quest(MICRO_BREAK), &five, &config), 55);
    }

    #[test]
    fn multiplier_applies_before_flat_bonuses() {
        let options = RewardOptions {
            perfect_score: true,
            speed_bonus: true,
            streak_bonus: 7,
        };
        let xp = calculate_quest_xp(&quest(FULL_RESET), &options, &RewardConfig::default());
        assert_eq!(xp, 135);
    }

    #[test]
    fn fractional_result_is_floored() {
        let mut odd = quest(FULL_RESET);
        odd.rewards.xp = 45;
        odd.rewards.bonus = Some(QuestBonus {
            bonus_type: BonusType::PerfectScore,
            multiplier: dec!(1.5),
        });
        let options = RewardOptions {
            perfect_score: true,
            ..RewardOptions::default()
        };
        assert_eq!(calculate_quest_xp(&odd, &options, &RewardConfig::default()), 67);
    }
}
