//! Store observer that writes committed events to the log.

use posturemon_core::{GameEvent, GameState, StoreObserver};
use tracing::{debug, info};

/// Observer that bridges store events to `tracing`.
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent, state: &GameState) {
        match event {
            GameEvent::MoodChanged { previous, current } => debug!(
                previous = previous.as_str(),
                current = current.as_str(),
                "Pet mood changed"
            ),
            GameEvent::LevelUp {
                previous_level,
                new_level,
            } => info!(
                previous_level,
                new_level,
                total_xp = state.player.total_xp,
                "Level up"
            ),
            GameEvent::EvolutionChanged { previous, current } => info!(
                previous = previous.as_str(),
                current = current.as_str(),
                pet = %state.pet.name,
                "Pet evolved"
            ),
            GameEvent::XpAwarded { amount, source } => {
                debug!(amount, source = ?source, "XP awarded");
            }
            GameEvent::QuestStarted { quest_id } => info!(quest_id = %quest_id, "Quest started"),
            GameEvent::QuestCompleted {
                quest_id,
                xp_awarded,
            } => info!(
                quest_id = %quest_id,
                xp_awarded,
                quests_completed = state.player.quests_completed,
                "Quest completed"
            ),
            GameEvent::QuestEnded { quest_id } => info!(quest_id = %quest_id, "Quest ended"),
            GameEvent::AchievementUnlocked {
                achievement_id,
                reward_xp,
            } => info!(
                achievement_id = %achievement_id,
                reward_xp,
                "Achievement unlocked"
            ),
            GameEvent::StreakExtended { streak } => info!(
                streak,
                longest_streak = state.player.longest_streak,
                "Streak extended"
            ),
            GameEvent::CalibrationChanged { calibrated } => {
                info!(calibrated, "Calibration changed");
            }
        }
    }
}
