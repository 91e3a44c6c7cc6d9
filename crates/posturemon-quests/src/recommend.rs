//! Next-quest suggestion by experience tier.
//!
//! | Completed quests | Suggestion                                  |
//! |------------------|---------------------------------------------|
//! | 0--2             | micro-break                                 |
//! | 3--9             | breathing                                   |
//! | 10--19           | neck-relief or shoulder-openers (coin flip) |
//! | 20+              | full-reset                                  |
//!
//! A suggestion the player's level does not yet allow falls back to the
//! next easier tier.

use posturemon_types::QuestDefinition;
use rand::Rng;

use crate::catalog::{
    BREATHING, FULL_RESET, MICRO_BREAK, NECK_RELIEF, QuestCatalog, SHOULDER_OPENERS,
};

const fn tier_for(completed_count: u32) -> u8 {
    match completed_count {
        0..3 => 0,
        3..10 => 1,
        10..20 => 2,
        _ => 3,
    }
}

fn slug_for(tier: u8, rng: &mut impl Rng) -> &'static str {
    match tier {
        0 => MICRO_BREAK,
        1 => BREATHING,
        2 if rng.random_bool(0.5) => NECK_RELIEF,
        2 => SHOULDER_OPENERS,
        _ => FULL_RESET,
    }
}

fn level_allows(quest: &QuestDefinition, player_level: u32) -> bool {
    quest
        .requirements
        .as_ref()
        .and_then(|requirements| requirements.min_level)
        .is_none_or(|min_level| player_level >= min_level)
}

/// Suggest the next quest for a player at `player_level` with
/// `completed_count` completions. `None` if no tier at or below the
/// player's has a quest in the catalog they may start.
pub fn next_quest<'a>(
    catalog: &'a QuestCatalog,
    player_level: u32,
    completed_count: u32,
    rng: &mut impl Rng,
) -> Option<&'a QuestDefinition> {
    (0..=tier_for(completed_count)).rev().find_map(|tier| {
        catalog
            .get_str(slug_for(tier, rng))
            .filter(|quest| level_allows(quest, player_level))
    })
}
