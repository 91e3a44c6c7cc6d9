//! The game store: one user's aggregate state and the commands that move it.
//!
//! [`GameStore`] is the single writer for a user's progression. Every
//! command follows the same shape:
//!
//! 1. Validate inputs against the current state
//! 2. Apply the transition to a draft copy
//! 3. Commit the draft in one assignment
//! 4. Dispatch the resulting [`GameEvent`]s to observers
//!
//! A command that fails leaves the state untouched and emits nothing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use posturemon_achievements::{AchievementCatalog, AchievementTracker, UnlockedAchievement};
use posturemon_progression::activity::record_quest_activity;
use posturemon_progression::evolution::evolution_for_level;
use posturemon_progression::pet::{clamp_gauges, feed, initial_pet, set_mood};
use posturemon_progression::player::normalize_level;
use posturemon_progression::{
    LevelUp, ProgressionConfig, ProgressionError, StreakTracker, add_xp, complete_quest,
    increment_streak, progress_to_next, reset_streak, verify_consistency,
};
use posturemon_quests::{
    QuestCatalog, QuestError, QuestLog, QuestSession, RewardOptions, calculate_quest_xp,
    check_requirements, next_quest,
};
use posturemon_scoring::{HistorySummary, PostureHistory, alerts_for_label, score_from_signal};
use posturemon_types::{
    GameSnapshot, PetEvolution, PetMood, PetState, PlayerStats, PostureReading, PostureSnapshot,
    PostureStatus, QuestDefinition, QuestId, SNAPSHOT_VERSION, StreakState, UserId,
};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::CoreError;
use crate::observer::{GameEvent, StoreObserver, XpSource};

/// Everything the store knows about one user.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Owner of this state.
    pub user_id: UserId,
    /// Whether the detector has a baseline.
    pub is_calibrated: bool,
    /// Whether the camera feed is connected.
    pub camera_connected: bool,
    /// The pet.
    pub pet: PetState,
    /// Player counters.
    pub player: PlayerStats,
    /// The most recent scored reading.
    pub current_posture: Option<PostureSnapshot>,
    /// Recent scored readings.
    pub history: PostureHistory,
    /// Achievement progress.
    pub achievements: AchievementTracker,
    /// Quest completion history.
    pub quest_log: QuestLog,
    /// The quest being played, if any.
    pub active_quest: Option<QuestSession>,
    /// Daily good-posture tally.
    pub streak: StreakTracker,
}

impl GameState {
    fn fresh(
        user_id: UserId,
        config: &GameConfig,
        achievements: Arc<AchievementCatalog>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            is_calibrated: false,
            camera_connected: false,
            pet: initial_pet(now.timestamp_millis()),
            player: PlayerStats::default(),
            current_posture: None,
            history: PostureHistory::new(config.scoring.history_capacity),
            achievements: AchievementTracker::new(achievements),
            quest_log: QuestLog::new(),
            active_quest: None,
            streak: StreakTracker::new(StreakState::default(), &config.progression),
        }
    }
}

/// Result of [`GameStore::complete_quest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestOutcome {
    /// The completed quest.
    pub quest_id: QuestId,
    /// XP granted by the quest itself.
    pub xp_awarded: u64,
    /// XP granted by achievements unlocked along the way.
    pub achievement_xp: u64,
    /// Net level change across quest and achievement XP.
    pub level_up: Option<LevelUp>,
    /// Achievements unlocked by this completion, in unlock order.
    pub unlocked: Vec<UnlockedAchievement>,
}

/// Single-writer owner of one user's game state.
pub struct GameStore {
    config: GameConfig,
    quests: Arc<QuestCatalog>,
    achievement_catalog: Arc<AchievementCatalog>,
    state: GameState,
    observers: Vec<Box<dyn StoreObserver>>,
    absent_readings: u32,
}

impl GameStore {
    /// A new player with the stock quest and achievement catalogs.
    pub fn new(config: GameConfig, now: DateTime<Utc>) -> Self {
        Self::with_catalogs(
            config,
            Arc::new(QuestCatalog::builtin()),
            Arc::new(AchievementCatalog::builtin()),
            now,
        )
    }

    /// A new player over the given catalogs.
    pub fn with_catalogs(
        config: GameConfig,
        quests: Arc<QuestCatalog>,
        achievements: Arc<AchievementCatalog>,
        now: DateTime<Utc>,
    ) -> Self {
        let state = GameState::fresh(UserId::new(), &config, Arc::clone(&achievements), now);
        Self {
            config,
            quests,
            achievement_catalog: achievements,
            state,
            observers: Vec::new(),
            absent_readings: 0,
        }
    }

    /// Restore a player from a snapshot.
    ///
    /// A stored level that disagrees with `total_xp` is logged and
    /// rewritten from `total_xp`. Achievement records for ids missing from
    /// the catalog are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedSnapshotVersion`] for snapshots
    /// written by a newer schema.
    pub fn from_snapshot(
        config: GameConfig,
        quests: Arc<QuestCatalog>,
        achievements: Arc<AchievementCatalog>,
        snapshot: GameSnapshot,
    ) -> Result<Self, CoreError> {
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(CoreError::UnsupportedSnapshotVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut player = snapshot.player;
        if let Some(mismatch) = verify_consistency(&player, &config.progression)? {
            warn!(
                stored_level = mismatch.stored_level,
                derived_level = mismatch.derived_level,
                stored_xp = mismatch.stored_xp,
                derived_xp = mismatch.derived_xp,
                total_xp = player.total_xp,
                "snapshot level disagrees with total_xp, normalizing"
            );
            normalize_level(&mut player, &mismatch);
        }

        let mut pet = snapshot.pet;
        pet.level = player.level;
        pet.evolution = pet.evolution.max(evolution_for_level(player.level));
        clamp_gauges(&mut pet);

        let state = GameState {
            user_id: snapshot.user_id,
            is_calibrated: snapshot.is_calibrated,
            camera_connected: false,
            pet,
            player,
            current_posture: None,
            history: PostureHistory::new(config.scoring.history_capacity),
            achievements: AchievementTracker::from_records(
                Arc::clone(&achievements),
                snapshot.achievements,
            ),
            quest_log: QuestLog::from_records(snapshot.quest_log),
            active_quest: None,
            streak: StreakTracker::new(snapshot.streak, &config.progression),
        };

        info!(
            user_id = %state.user_id.into_inner(),
            level = state.player.level,
            total_xp = state.player.total_xp,
            "game state restored"
        );

        Ok(Self {
            config,
            quests,
            achievement_catalog: achievements,
            state,
            observers: Vec::new(),
            absent_readings: 0,
        })
    }

    /// The persistable subset of the state.
    pub fn snapshot(&self, now: DateTime<Utc>) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            user_id: self.state.user_id,
            is_calibrated: self.state.is_calibrated,
            pet: self.state.pet.clone(),
            player: self.state.player.clone(),
            achievements: self.state.achievements.records(),
            quest_log: self.state.quest_log.records(),
            streak: self.state.streak.state().clone(),
            saved_at: Some(now),
        }
    }

    /// Register an observer for committed events.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Score a raw reading and apply it.
    ///
    /// Readings without a person are ignored; after
    /// `store.sleep_after_absent_readings` of them in a row the pet falls
    /// asleep. Returns the scored snapshot, or `None` if ignored.
    pub fn ingest_reading(
        &mut self,
        reading: &PostureReading,
    ) -> Result<Option<PostureSnapshot>, CoreError> {
        if !reading.person_detected {
            self.absent_readings = self.absent_readings.saturating_add(1);
            debug!(
                absent_readings = self.absent_readings,
                "no person detected, reading ignored"
            );
            let limit = self.config.store.sleep_after_absent_readings;
            if limit > 0
                && self.absent_readings >= limit
                && let Some(previous) = set_mood(&mut self.state.pet, PetMood::Sleeping)
            {
                self.dispatch(&[GameEvent::MoodChanged {
                    previous,
                    current: PetMood::Sleeping,
                }]);
            }
            return Ok(None);
        }
        self.absent_readings = 0;

        let distance = if reading.distance.is_finite() {
            reading.distance.max(0.0)
        } else {
            0.0
        };
        let snapshot = PostureSnapshot {
            timestamp_ms: reading.timestamp_ms,
            score: score_from_signal(&reading.status_label, distance),
            distance,
            alerts: alerts_for_label(&reading.status_label),
        };
        self.apply_posture(snapshot.clone(), reading.calibrated)?;
        Ok(Some(snapshot))
    }

    /// Apply an already scored snapshot: mood, history, and streak.
    ///
    /// The gap since the previous snapshot counts as good-posture time
    /// when the previous snapshot was good, capped at
    /// `scoring.max_sample_gap_ms`.
    pub fn update_posture(&mut self, snapshot: PostureSnapshot) -> Result<(), CoreError> {
        self.apply_posture(snapshot, false)
    }

    /// Shared by [`Self::update_posture`] and [`Self::ingest_reading`].
    /// A reading that reports calibration latches the flag on; only
    /// [`Self::set_calibrated`] clears it.
    fn apply_posture(
        &mut self,
        snapshot: PostureSnapshot,
        calibrated: bool,
    ) -> Result<(), CoreError> {
        let mood = self.config.scoring.mood.mood_for_posture(&snapshot.score);
        let good_ms = self.good_time_since_latest(&snapshot);
        let mut draft = self.draft();

        let latched = calibrated && !draft.is_calibrated;
        if latched {
            draft.is_calibrated = true;
            draft.events.push(GameEvent::CalibrationChanged { calibrated: true });
        }

        if let Some(previous) = set_mood(&mut draft.pet, mood) {
            draft.events.push(GameEvent::MoodChanged {
                previous,
                current: mood,
            });
        }

        match DateTime::from_timestamp_millis(snapshot.timestamp_ms) {
            Some(at) => self.advance_streak(&mut draft, at, good_ms)?,
            None => warn!(
                timestamp_ms = snapshot.timestamp_ms,
                "reading timestamp out of range, streak not credited"
            ),
        }

        debug!(
            overall = snapshot.score.overall,
            status = ?snapshot.score.status,
            mood = mood.as_str(),
            good_ms,
            "posture updated"
        );

        let events = self.commit(draft);
        if latched {
            info!(calibrated = true, "calibration changed");
        }
        self.state.history.push(snapshot.clone());
        self.state.current_posture = Some(snapshot);
        self.dispatch(&events);
        Ok(())
    }

    /// Award XP directly, then settle any achievements it unlocks.
    pub fn add_xp(
        &mut self,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<LevelUp>, CoreError> {
        let mut draft = self.draft();
        let start = (draft.player.level, draft.pet.evolution);
        draft.award_xp(amount, XpSource::Direct, &self.config.progression)?;
        draft.settle_achievements(now, &self.config)?;
        let level_up = draft.net_level_up(start);
        let events = self.commit(draft);
        self.dispatch(&events);
        Ok(level_up)
    }

    /// Complete a quest and apply every consequence as one transition:
    /// reward XP, level and evolution, quest log, time-of-day activity,
    /// achievement unlocks and their XP.
    ///
    /// # Errors
    ///
    /// Returns a [`QuestError`] for unknown or gated quests and a
    /// [`ProgressionError`] on counter overflow. The state is unchanged
    /// on error.
    pub fn complete_quest(
        &mut self,
        quest_id: &QuestId,
        options: &RewardOptions,
        now: DateTime<Utc>,
    ) -> Result<QuestOutcome, CoreError> {
        let quest = self
            .quests
            .get(quest_id)
            .ok_or_else(|| QuestError::NotFound(quest_id.clone()))?;
        check_requirements(
            quest,
            self.state.player.level,
            &self.state.quest_log.completed_ids(),
        )?;
        let xp_awarded = u64::from(calculate_quest_xp(quest, options, &self.config.rewards));

        let mut draft = self.draft();
        let mut quest_log = self.state.quest_log.clone();
        let start = (draft.player.level, draft.pet.evolution);

        let completion = complete_quest(
            &mut draft.player,
            &mut draft.pet,
            xp_awarded,
            &self.config.progression,
        )?;
        if xp_awarded > 0 {
            draft.events.push(GameEvent::XpAwarded {
                amount: xp_awarded,
                source: XpSource::Quest,
            });
        }
        if let Some(level_up) = completion.level_up {
            draft.push_level_up(level_up);
        }
        record_quest_activity(&mut draft.player.activity, now);
        let times_completed = quest_log.record_completion(quest_id, now);
        draft.events.push(GameEvent::QuestCompleted {
            quest_id: quest_id.clone(),
            xp_awarded,
        });

        let unlocked = draft.settle_achievements(now, &self.config)?;
        let achievement_xp = if self.config.store.award_achievement_xp {
            unlocked.iter().fold(0_u64, |acc, u| {
                acc.saturating_add(u64::from(u.definition.rewards.xp))
            })
        } else {
            0
        };
        let level_up = draft.net_level_up(start);

        self.state.quest_log = quest_log;
        if self
            .state
            .active_quest
            .as_ref()
            .is_some_and(|session| session.quest_id() == quest_id)
        {
            self.state.active_quest = None;
        }
        let events = self.commit(draft);

        info!(
            quest_id = %quest_id,
            xp_awarded,
            achievement_xp,
            times_completed,
            unlocked = unlocked.len(),
            level = self.state.player.level,
            "quest completed"
        );
        self.dispatch(&events);

        Ok(QuestOutcome {
            quest_id: quest_id.clone(),
            xp_awarded,
            achievement_xp,
            level_up,
            unlocked,
        })
    }

    /// Extend the streak by one day. Returns the new streak.
    pub fn increment_streak(&mut self, now: DateTime<Utc>) -> Result<u32, CoreError> {
        let mut draft = self.draft();
        let streak = increment_streak(&mut draft.player)?;
        draft.events.push(GameEvent::StreakExtended { streak });
        draft.settle_achievements(now, &self.config)?;
        let events = self.commit(draft);
        self.dispatch(&events);
        Ok(streak)
    }

    /// Feed the pet.
    pub fn feed_pet(&mut self, now: DateTime<Utc>) {
        feed(
            &mut self.state.pet,
            &self.config.progression,
            now.timestamp_millis(),
        );
        debug!(
            happiness = self.state.pet.happiness,
            interactions = self.state.pet.interactions,
            "pet fed"
        );
    }

    /// Begin playing a quest.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::AlreadyActive`] while another quest runs,
    /// [`QuestError::NotFound`] for unknown ids, and
    /// [`QuestError::NotEligible`] for gated quests.
    pub fn start_quest(&mut self, quest_id: &QuestId, now: DateTime<Utc>) -> Result<(), CoreError> {
        if let Some(active) = &self.state.active_quest {
            return Err(QuestError::AlreadyActive(active.quest_id().clone()).into());
        }
        let quest = self
            .quests
            .get(quest_id)
            .ok_or_else(|| QuestError::NotFound(quest_id.clone()))?;
        check_requirements(
            quest,
            self.state.player.level,
            &self.state.quest_log.completed_ids(),
        )?;
        self.state.active_quest = Some(QuestSession::start(quest, now.timestamp_millis()));
        self.dispatch(&[GameEvent::QuestStarted {
            quest_id: quest_id.clone(),
        }]);
        Ok(())
    }

    /// Set the active quest's progress. Returns the clamped percent.
    pub fn update_quest_progress(&mut self, percent: u32) -> Result<u32, CoreError> {
        let session = self
            .state
            .active_quest
            .as_mut()
            .ok_or(QuestError::NoActiveQuest)?;
        session.set_progress(percent);
        Ok(session.progress())
    }

    /// Abandon the active quest.
    pub fn end_quest(&mut self) -> Result<QuestSession, CoreError> {
        let session = self
            .state
            .active_quest
            .take()
            .ok_or(QuestError::NoActiveQuest)?;
        self.dispatch(&[GameEvent::QuestEnded {
            quest_id: session.quest_id().clone(),
        }]);
        Ok(session)
    }

    /// Record the detector's calibration flag.
    pub fn set_calibrated(&mut self, calibrated: bool) {
        if self.state.is_calibrated == calibrated {
            return;
        }
        self.state.is_calibrated = calibrated;
        info!(calibrated, "calibration changed");
        self.dispatch(&[GameEvent::CalibrationChanged { calibrated }]);
    }

    /// Mark the camera feed as connected.
    pub const fn connect_camera(&mut self) {
        self.state.camera_connected = true;
    }

    /// Mark the camera feed as disconnected.
    pub const fn disconnect_camera(&mut self) {
        self.state.camera_connected = false;
        self.absent_readings = 0;
    }

    /// Drop the posture history and the current reading.
    pub fn clear_history(&mut self) {
        self.state.history.clear();
        self.state.current_posture = None;
    }

    /// Start over with a fresh pet and profile for the same user.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.state = GameState::fresh(
            self.state.user_id,
            &self.config,
            Arc::clone(&self.achievement_catalog),
            now,
        );
        self.absent_readings = 0;
        info!(user_id = %self.state.user_id.into_inner(), "game state reset");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The whole state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The configuration in use.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Player counters.
    pub const fn player(&self) -> &PlayerStats {
        &self.state.player
    }

    /// The pet.
    pub const fn pet(&self) -> &PetState {
        &self.state.pet
    }

    /// Recent scored readings.
    pub const fn history(&self) -> &PostureHistory {
        &self.state.history
    }

    /// Aggregates over the retained history.
    pub fn history_summary(&self) -> HistorySummary {
        self.state
            .history
            .summary(self.config.scoring.max_sample_gap_ms)
    }

    /// The most recent scored reading.
    pub const fn current_posture(&self) -> Option<&PostureSnapshot> {
        self.state.current_posture.as_ref()
    }

    /// Achievement progress.
    pub const fn achievements(&self) -> &AchievementTracker {
        &self.state.achievements
    }

    /// The quest catalog.
    pub fn quests(&self) -> &QuestCatalog {
        &self.quests
    }

    /// Quest completion history.
    pub const fn quest_log(&self) -> &QuestLog {
        &self.state.quest_log
    }

    /// The quest being played, if any.
    pub const fn active_quest(&self) -> Option<&QuestSession> {
        self.state.active_quest.as_ref()
    }

    /// Whether the detector has a baseline.
    pub const fn is_calibrated(&self) -> bool {
        self.state.is_calibrated
    }

    /// Suggested next quest for this player.
    pub fn next_quest(&self, rng: &mut impl Rng) -> Option<&QuestDefinition> {
        next_quest(
            &self.quests,
            self.state.player.level,
            self.state.player.quests_completed,
            rng,
        )
    }

    /// Integer percent through the current level.
    pub fn level_progress(&self) -> Result<u32, CoreError> {
        Ok(progress_to_next(
            self.state.player.total_xp,
            &self.config.progression,
        )?)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn draft(&self) -> Draft {
        Draft {
            player: self.state.player.clone(),
            pet: self.state.pet.clone(),
            achievements: self.state.achievements.clone(),
            streak: self.state.streak.clone(),
            is_calibrated: self.state.is_calibrated,
            events: Vec::new(),
        }
    }

    fn commit(&mut self, draft: Draft) -> Vec<GameEvent> {
        self.state.player = draft.player;
        self.state.pet = draft.pet;
        self.state.achievements = draft.achievements;
        self.state.streak = draft.streak;
        self.state.is_calibrated = draft.is_calibrated;
        draft.events
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event, &self.state);
            }
        }
    }

    fn good_time_since_latest(&self, snapshot: &PostureSnapshot) -> u64 {
        let Some(previous) = self.state.history.latest() else {
            return 0;
        };
        if previous.score.status != PostureStatus::Good {
            return 0;
        }
        let gap = snapshot.timestamp_ms.saturating_sub(previous.timestamp_ms);
        u64::try_from(gap)
            .unwrap_or(0)
            .min(self.config.scoring.max_sample_gap_ms)
    }

    fn advance_streak(
        &self,
        draft: &mut Draft,
        at: DateTime<Utc>,
        good_ms: u64,
    ) -> Result<(), CoreError> {
        let today = at.date_naive();
        if draft.player.streak > 0 && draft.streak.is_lapsed(today) {
            info!(streak = draft.player.streak, day = %today, "streak lapsed");
            reset_streak(&mut draft.player, 0);
        }
        if good_ms == 0 {
            return Ok(());
        }
        let Some(qualified) = draft.streak.record_good_time(today, good_ms) else {
            return Ok(());
        };

        let streak = if qualified.continues {
            increment_streak(&mut draft.player)?
        } else {
            reset_streak(&mut draft.player, 1);
            1
        };
        info!(day = %qualified.day, streak, "qualifying posture day");
        draft.events.push(GameEvent::StreakExtended { streak });
        draft.settle_achievements(at, &self.config)?;
        Ok(())
    }
}

/// Working copy of the mutable aggregate parts during one command.
struct Draft {
    player: PlayerStats,
    pet: PetState,
    achievements: AchievementTracker,
    streak: StreakTracker,
    is_calibrated: bool,
    events: Vec<GameEvent>,
}

impl Draft {
    fn award_xp(
        &mut self,
        amount: u64,
        source: XpSource,
        config: &ProgressionConfig,
    ) -> Result<Option<LevelUp>, ProgressionError> {
        if amount == 0 {
            return Ok(None);
        }
        let level_up = add_xp(&mut self.player, &mut self.pet, amount, config)?;
        self.events.push(GameEvent::XpAwarded { amount, source });
        if let Some(level_up) = level_up {
            self.push_level_up(level_up);
        }
        Ok(level_up)
    }

    fn push_level_up(&mut self, level_up: LevelUp) {
        self.events.push(GameEvent::LevelUp {
            previous_level: level_up.previous_level,
            new_level: level_up.new_level,
        });
        if level_up.evolved() {
            self.events.push(GameEvent::EvolutionChanged {
                previous: level_up.previous_evolution,
                current: level_up.new_evolution,
            });
        }
    }

    /// Unlock every achievement the draft now satisfies. Reward XP can
    /// unlock further level achievements, so evaluation repeats until a
    /// pass unlocks nothing; each pass unlocks at least one entry, which
    /// bounds the loop by the catalog size.
    fn settle_achievements(
        &mut self,
        now: DateTime<Utc>,
        config: &GameConfig,
    ) -> Result<Vec<UnlockedAchievement>, ProgressionError> {
        let mut unlocked = Vec::new();
        let passes = self.achievements.catalog().len().saturating_add(1);
        for _ in 0..passes {
            let batch = self.achievements.check_all(&self.player, now);
            if batch.is_empty() {
                break;
            }
            for achievement in &batch {
                let reward_xp = achievement.definition.rewards.xp;
                self.events.push(GameEvent::AchievementUnlocked {
                    achievement_id: achievement.definition.achievement_id.clone(),
                    reward_xp,
                });
                if config.store.award_achievement_xp {
                    self.award_xp(
                        u64::from(reward_xp),
                        XpSource::Achievement,
                        &config.progression,
                    )?;
                }
            }
            unlocked.extend(batch);
        }
        Ok(unlocked)
    }

    fn net_level_up(&self, start: (u32, PetEvolution)) -> Option<LevelUp> {
        let (previous_level, previous_evolution) = start;
        (self.player.level > previous_level).then_some(LevelUp {
            previous_level,
            new_level: self.player.level,
            previous_evolution,
            new_evolution: self.pet.evolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use posturemon_types::AchievementId;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, m, 0)
            .single()
            .unwrap_or_default()
    }

    fn store() -> GameStore {
        GameStore::new(GameConfig::default(), at(2, 12, 0))
    }

    fn reading(label: &str, distance: f64, timestamp_ms: i64) -> PostureReading {
        PostureReading {
            status_label: String::from(label),
            distance,
            person_detected: true,
            calibrated: true,
            timestamp_ms,
        }
    }

    fn quest(slug: &str) -> QuestId {
        QuestId::new(slug)
    }

    fn complete(
        store: &mut GameStore,
        slug: &str,
        when: DateTime<Utc>,
    ) -> Result<QuestOutcome, CoreError> {
        store.complete_quest(&quest(slug), &RewardOptions::default(), when)
    }

    struct Recorder(Arc<Mutex<Vec<GameEvent>>>);

    impl StoreObserver for Recorder {
        fn on_event(&mut self, event: &GameEvent, _state: &GameState) {
            if let Ok(mut events) = self.0.lock() {
                events.push(event.clone());
            }
        }
    }

    fn recorded(store: &mut GameStore) -> Arc<Mutex<Vec<GameEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        store.subscribe(Box::new(Recorder(Arc::clone(&events))));
        events
    }

    fn drain(events: &Arc<Mutex<Vec<GameEvent>>>) -> Vec<GameEvent> {
        events.lock().map(|mut e| e.drain(..).collect()).unwrap_or_default()
    }

    #[test]
    fn new_store_starts_at_level_one() {
        let store = store();
        assert_eq!(store.player().level, 1);
        assert_eq!(store.pet().happiness, 80);
        assert_eq!(store.achievements().unlocked().len(), 0);
        assert!(store.active_quest().is_none());
    }

    #[test]
    fn good_reading_makes_pet_cheerful() {
        let mut store = store();
        let events = recorded(&mut store);
        let snapshot = store.ingest_reading(&reading("GOOD POSTURE", 5.0, 1_000));
        let overall = snapshot.ok().flatten().map(|s| s.score.overall);
        assert!(overall.is_some_and(|o| (o - 90.0).abs() < 1e-9));
        assert_eq!(store.pet().mood, PetMood::Cheerful);
        assert_eq!(store.history().len(), 1);
        assert_eq!(
            drain(&events),
            vec![
                GameEvent::CalibrationChanged { calibrated: true },
                GameEvent::MoodChanged {
                    previous: PetMood::Neutral,
                    current: PetMood::Cheerful,
                },
            ]
        );
    }

    #[test]
    fn calibration_latches_on() {
        let mut store = store();
        let events = recorded(&mut store);
        let uncalibrated = PostureReading {
            calibrated: false,
            ..reading("GOOD POSTURE", 1.0, 1_000)
        };
        assert!(store.ingest_reading(&uncalibrated).is_ok());
        assert!(!store.is_calibrated());

        assert!(store.ingest_reading(&reading("GOOD POSTURE", 1.0, 2_000)).is_ok());
        assert!(store.is_calibrated());
        let later = PostureReading {
            calibrated: false,
            ..reading("GOOD POSTURE", 1.0, 3_000)
        };
        assert!(store.ingest_reading(&later).is_ok());
        assert!(store.is_calibrated());

        let changes = drain(&events)
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CalibrationChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn failed_reading_does_not_calibrate() {
        let now = at(2, 12, 0);
        let mut snapshot = store().snapshot(now);
        snapshot.player.streak = u32::MAX;
        snapshot.streak.last_qualifying_day = Some(at(1, 12, 0).date_naive());
        snapshot.streak.tally_day = Some(now.date_naive());
        snapshot.streak.tally_good_ms = 14_399_000;
        let restored = GameStore::from_snapshot(
            GameConfig::default(),
            Arc::new(QuestCatalog::builtin()),
            Arc::new(AchievementCatalog::builtin()),
            snapshot,
        );
        let Ok(mut store) = restored else {
            panic!("snapshot should restore");
        };
        let events = recorded(&mut store);
        let t0 = now.timestamp_millis();
        let first = PostureReading {
            calibrated: false,
            ..reading("GOOD POSTURE", 1.0, t0)
        };
        assert!(store.ingest_reading(&first).is_ok());
        let _ = drain(&events);
        let before = store.state().clone();

        // Completes the day, but the streak cannot grow past u32::MAX.
        let result = store.ingest_reading(&reading("GOOD POSTURE", 1.0, t0.saturating_add(5_000)));
        assert!(matches!(result, Err(CoreError::Progression { .. })));
        assert!(!store.is_calibrated());
        assert_eq!(store.state(), &before);
        assert!(drain(&events).is_empty());
    }

    #[test]
    fn slouching_reading_makes_pet_sad() {
        let mut store = store();
        let snapshot = store.ingest_reading(&reading("SLOUCHING", 40.0, 1_000));
        let alerts = snapshot.ok().flatten().map(|s| s.alerts.len());
        assert_eq!(alerts, Some(2));
        assert_eq!(store.pet().mood, PetMood::Sad);
    }

    #[test]
    fn absent_readings_are_ignored() {
        let mut store = store();
        let mut absent = reading("GOOD POSTURE", 0.0, 1_000);
        absent.person_detected = false;
        assert!(matches!(store.ingest_reading(&absent), Ok(None)));
        assert!(store.history().is_empty());
        assert_eq!(store.pet().mood, PetMood::Neutral);
    }

    #[test]
    fn pet_sleeps_after_configured_absences() {
        let mut config = GameConfig::default();
        config.store.sleep_after_absent_readings = 3;
        let mut store = GameStore::new(config, at(2, 12, 0));
        let mut absent = reading("GOOD POSTURE", 0.0, 1_000);
        absent.person_detected = false;
        for _ in 0..2 {
            let _ = store.ingest_reading(&absent);
        }
        assert_eq!(store.pet().mood, PetMood::Neutral);
        let _ = store.ingest_reading(&absent);
        assert_eq!(store.pet().mood, PetMood::Sleeping);
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, 2_000));
        assert_eq!(store.pet().mood, PetMood::Cheerful);
    }

    #[test]
    fn first_quest_unlocks_and_pays_out() {
        let mut store = store();
        let events = recorded(&mut store);
        let outcome = complete(&mut store, "micro-break", at(2, 12, 0));
        assert!(outcome.is_ok());
        let outcome = outcome.unwrap_or_else(|e| panic!("quest failed: {e}"));
        assert_eq!(outcome.xp_awarded, 50);
        assert_eq!(outcome.achievement_xp, 50);
        assert_eq!(store.player().quests_completed, 1);
        assert_eq!(store.player().total_xp, 100);
        assert_eq!(store.player().level, 2);
        assert_eq!(store.pet().evolution, PetEvolution::Baby);
        assert_eq!(store.pet().happiness, 100);
        assert_eq!(store.quest_log().times_completed(&quest("micro-break")), 1);
        let unlocked: Vec<&str> = outcome
            .unlocked
            .iter()
            .map(|u| u.definition.achievement_id.as_str())
            .collect();
        assert_eq!(unlocked, vec!["first-quest"]);
        assert_eq!(
            drain(&events),
            vec![
                GameEvent::XpAwarded {
                    amount: 50,
                    source: XpSource::Quest,
                },
                GameEvent::QuestCompleted {
                    quest_id: quest("micro-break"),
                    xp_awarded: 50,
                },
                GameEvent::AchievementUnlocked {
                    achievement_id: AchievementId::new("first-quest"),
                    reward_xp: 50,
                },
                GameEvent::XpAwarded {
                    amount: 50,
                    source: XpSource::Achievement,
                },
                GameEvent::LevelUp {
                    previous_level: 1,
                    new_level: 2,
                },
                GameEvent::EvolutionChanged {
                    previous: PetEvolution::Egg,
                    current: PetEvolution::Baby,
                },
            ]
        );
    }

    #[test]
    fn achievement_xp_can_be_disabled() {
        let mut config = GameConfig::default();
        config.store.award_achievement_xp = false;
        let mut store = GameStore::new(config, at(2, 12, 0));
        let outcome = complete(&mut store, "micro-break", at(2, 12, 0));
        assert_eq!(outcome.map(|o| o.achievement_xp).ok(), Some(0));
        assert_eq!(store.player().total_xp, 50);
        assert_eq!(store.player().level, 1);
    }

    #[test]
    fn early_morning_quest_unlocks_early_bird() {
        let mut store = store();
        let outcome = complete(&mut store, "breathing", at(2, 7, 30));
        let unlocked: Vec<String> = outcome
            .map(|o| {
                o.unlocked
                    .iter()
                    .map(|u| u.definition.achievement_id.to_string())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(unlocked, vec!["first-quest", "early-bird"]);
    }

    #[test]
    fn unknown_quest_changes_nothing() {
        let mut store = store();
        let before = store.state().clone();
        let result = complete(&mut store, "moonwalk", at(2, 12, 0));
        assert!(matches!(
            result,
            Err(CoreError::Quest {
                source: QuestError::NotFound(_)
            })
        ));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn completing_active_quest_clears_session() {
        let mut store = store();
        assert!(store.start_quest(&quest("micro-break"), at(2, 12, 0)).is_ok());
        assert_eq!(store.update_quest_progress(150).ok(), Some(100));
        let result = complete(&mut store, "micro-break", at(2, 12, 1));
        assert!(result.is_ok());
        assert!(store.active_quest().is_none());
    }

    #[test]
    fn second_start_is_rejected() {
        let mut store = store();
        assert!(store.start_quest(&quest("micro-break"), at(2, 12, 0)).is_ok());
        let again = store.start_quest(&quest("breathing"), at(2, 12, 0));
        assert!(matches!(
            again,
            Err(CoreError::Quest {
                source: QuestError::AlreadyActive(_)
            })
        ));
        let ended = store.end_quest().map(|s| s.quest_id().clone()).ok();
        assert_eq!(ended, Some(quest("micro-break")));
        assert!(matches!(
            store.end_quest(),
            Err(CoreError::Quest {
                source: QuestError::NoActiveQuest
            })
        ));
    }

    #[test]
    fn increment_streak_unlocks_streak_achievements() {
        let mut store = store();
        for _ in 0..2 {
            let _ = store.increment_streak(at(2, 12, 0));
        }
        assert!(store.achievements().unlocked().is_empty());
        assert_eq!(store.increment_streak(at(2, 12, 0)).ok(), Some(3));
        let unlocked: Vec<&str> = store
            .achievements()
            .unlocked()
            .iter()
            .map(|v| v.definition.achievement_id.as_str())
            .collect();
        assert_eq!(unlocked, vec!["3-day-streak"]);
        assert_eq!(store.player().total_xp, 100);
        assert_eq!(store.player().longest_streak, 3);
    }

    #[test]
    fn direct_xp_cascades_through_level_achievements() {
        let mut store = store();
        let level_up = store.add_xp(537, at(2, 12, 0));
        // Level 5 starts at 536.8 XP; the level-5 reward stops short of 744.16.
        assert_eq!(level_up.ok().flatten().map(|l| l.new_level), Some(5));
        let level_five = store.achievements().get(&AchievementId::new("level-5"));
        assert!(level_five.is_some_and(|v| v.progress.unlocked));
        assert_eq!(store.player().total_xp, 637);
    }

    #[test]
    fn add_zero_xp_is_noop() {
        let mut store = store();
        let events = recorded(&mut store);
        assert!(matches!(store.add_xp(0, at(2, 12, 0)), Ok(None)));
        assert_eq!(store.player().total_xp, 0);
        assert!(drain(&events).is_empty());
    }

    #[test]
    fn good_posture_day_extends_streak() {
        let mut config = GameConfig::default();
        config.progression.streak_threshold_hours = 0;
        let mut store = GameStore::new(config, at(2, 12, 0));
        let base = at(2, 12, 0).timestamp_millis();
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, base));
        assert_eq!(store.player().streak, 0);
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, base.saturating_add(1_000)));
        assert_eq!(store.player().streak, 1);

        let next_day = at(3, 12, 0).timestamp_millis();
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, next_day));
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, next_day.saturating_add(1_000)));
        assert_eq!(store.player().streak, 2);
    }

    #[test]
    fn lapsed_streak_resets_to_zero() {
        let mut config = GameConfig::default();
        config.progression.streak_threshold_hours = 0;
        let mut store = GameStore::new(config, at(2, 12, 0));
        let base = at(2, 12, 0).timestamp_millis();
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, base));
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, base.saturating_add(1_000)));
        assert_eq!(store.player().streak, 1);
        let _ = store.ingest_reading(&reading("SLOUCHING", 20.0, base.saturating_add(2_000)));

        let later = at(6, 12, 0).timestamp_millis();
        let _ = store.ingest_reading(&reading("SLOUCHING", 20.0, later));
        assert_eq!(store.player().streak, 0);
        assert_eq!(store.player().longest_streak, 1);
    }

    #[test]
    fn next_quest_follows_completion_count() {
        let store = store();
        let mut rng = SmallRng::seed_from_u64(7);
        let suggested = store.next_quest(&mut rng).map(|q| q.quest_id.to_string());
        assert_eq!(suggested.as_deref(), Some("micro-break"));
    }

    #[test]
    fn reset_keeps_user() {
        let mut store = store();
        let user = store.state().user_id;
        let _ = complete(&mut store, "micro-break", at(2, 12, 0));
        store.reset(at(2, 13, 0));
        assert_eq!(store.state().user_id, user);
        assert_eq!(store.player().total_xp, 0);
        assert!(store.quest_log().completed_ids().is_empty());
    }

    #[test]
    fn feed_raises_happiness() {
        let mut store = store();
        store.feed_pet(at(2, 12, 5));
        assert_eq!(store.pet().happiness, 90);
        assert_eq!(store.pet().interactions, 1);
        store.feed_pet(at(2, 12, 6));
        assert_eq!(store.pet().happiness, 100);
    }

    #[test]
    fn camera_and_history_toggles() {
        let mut store = store();
        store.connect_camera();
        assert!(store.state().camera_connected);
        let _ = store.ingest_reading(&reading("GOOD POSTURE", 0.0, 1_000));
        store.clear_history();
        assert!(store.history().is_empty());
        assert!(store.current_posture().is_none());
        store.disconnect_camera();
        assert!(!store.state().camera_connected);
    }
}
