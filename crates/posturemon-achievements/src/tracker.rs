//! Per-user achievement progress.
//!
//! Each achievement moves through `locked` (hidden or visible) to
//! `unlocked`, and never back. Definitions are shared and read-only; the
//! tracker owns only the per-user [`AchievementProgress`] records.
//!
//! # Measured statistics
//!
//! | Requirement        | Statistic                                     |
//! |--------------------|-----------------------------------------------|
//! | `quests-completed` | `PlayerStats::quests_completed`               |
//! | `streak`           | `PlayerStats::streak`                         |
//! | `level`            | `PlayerStats::level`                          |
//! | `quest-time`       | completions inside the definition's hour window |
//! | `weekend-quests`   | most days of one weekend with a completion    |
//!
//! `perfect-hour` and `perfect-day` need long-horizon posture history that
//! the tracker does not receive; they report
//! [`AchievementError::UnsupportedRequirement`] and are skipped by
//! [`AchievementTracker::check_all`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use posturemon_progression::activity::{completions_in_window, weekend_days_covered};
use posturemon_types::{
    AchievementCategory, AchievementDefinition, AchievementId, AchievementProgress, PlayerStats,
    RequirementType,
};

use crate::catalog::AchievementCatalog;
use crate::error::AchievementError;

/// An achievement that unlocked during the current evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedAchievement {
    /// The achievement's definition.
    pub definition: AchievementDefinition,
    /// When it unlocked.
    pub unlocked_at: DateTime<Utc>,
}

/// A definition paired with the player's progress on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementView<'a> {
    /// The shared definition.
    pub definition: &'a AchievementDefinition,
    /// The player's progress.
    pub progress: &'a AchievementProgress,
}

/// Per-user progress over a shared catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementTracker {
    catalog: Arc<AchievementCatalog>,
    progress: BTreeMap<AchievementId, AchievementProgress>,
}

impl AchievementTracker {
    /// A tracker with every achievement locked.
    pub fn new(catalog: Arc<AchievementCatalog>) -> Self {
        let progress = catalog
            .all()
            .iter()
            .map(|d| {
                (
                    d.achievement_id.clone(),
                    AchievementProgress::locked(d.achievement_id.clone()),
                )
            })
            .collect();
        Self { catalog, progress }
    }

    /// Rebuild from persisted records.
    ///
    /// Records for ids missing from the catalog are dropped; catalog
    /// entries without a record start locked.
    pub fn from_records(
        catalog: Arc<AchievementCatalog>,
        records: Vec<AchievementProgress>,
    ) -> Self {
        let mut tracker = Self::new(catalog);
        for mut record in records {
            match tracker.progress.get_mut(&record.achievement_id) {
                Some(slot) => {
                    record.progress = record.progress.min(100);
                    *slot = record;
                }
                None => {
                    tracing::warn!(
                        achievement_id = %record.achievement_id,
                        "dropping progress for unknown achievement"
                    );
                }
            }
        }
        tracker
    }

    /// Persistable records in catalog order.
    pub fn records(&self) -> Vec<AchievementProgress> {
        self.catalog
            .all()
            .iter()
            .filter_map(|d| self.progress.get(&d.achievement_id).cloned())
            .collect()
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// Re-measure one achievement against `stats`.
    ///
    /// Returns the unlock when this call crosses the target. An already
    /// unlocked achievement is left untouched and yields `Ok(None)`.
    pub fn update_progress(
        &mut self,
        achievement_id: &AchievementId,
        stats: &PlayerStats,
        now: DateTime<Utc>,
    ) -> Result<Option<UnlockedAchievement>, AchievementError> {
        let definition = self
            .catalog
            .get(achievement_id)
            .ok_or_else(|| AchievementError::NotFound(achievement_id.clone()))?;
        let record = self
            .progress
            .entry(achievement_id.clone())
            .or_insert_with(|| AchievementProgress::locked(achievement_id.clone()));

        if record.unlocked {
            return Ok(None);
        }

        let observed = measure(definition, stats)?;
        let target = definition.requirement.target;
        record.current = record.current.max(observed);
        record.progress = percent(record.current, target).max(record.progress);

        if record.current < target {
            return Ok(None);
        }

        record.unlocked = true;
        record.unlocked_at = Some(now);
        record.progress = 100;
        tracing::info!(
            achievement_id = %achievement_id,
            reward_xp = definition.rewards.xp,
            "achievement unlocked"
        );
        Ok(Some(UnlockedAchievement {
            definition: definition.clone(),
            unlocked_at: now,
        }))
    }

    /// Evaluate every locked, supported achievement once. Returns the new
    /// unlocks in catalog order.
    pub fn check_all(
        &mut self,
        stats: &PlayerStats,
        now: DateTime<Utc>,
    ) -> Vec<UnlockedAchievement> {
        let ids: Vec<AchievementId> = self
            .catalog
            .all()
            .iter()
            .filter(|d| is_supported(d.requirement.requirement_type))
            .map(|d| d.achievement_id.clone())
            .collect();

        ids.iter()
            .filter_map(|id| self.update_progress(id, stats, now).ok().flatten())
            .collect()
    }

    /// One achievement with its progress.
    pub fn get(&self, achievement_id: &AchievementId) -> Option<AchievementView<'_>> {
        let definition = self.catalog.get(achievement_id)?;
        let progress = self.progress.get(achievement_id)?;
        Some(AchievementView {
            definition,
            progress,
        })
    }

    /// Every achievement with its progress, in catalog order.
    pub fn all(&self) -> Vec<AchievementView<'_>> {
        self.views(|_| true)
    }

    /// Achievements in one category.
    pub fn by_category(&self, category: AchievementCategory) -> Vec<AchievementView<'_>> {
        self.views(|v| v.definition.category == category)
    }

    /// Unlocked achievements, hidden ones included.
    pub fn unlocked(&self) -> Vec<AchievementView<'_>> {
        self.views(|v| v.progress.unlocked)
    }

    /// Locked achievements that are not hidden.
    pub fn locked(&self) -> Vec<AchievementView<'_>> {
        self.views(|v| !v.progress.unlocked && !v.definition.hidden)
    }

    /// Unlocked achievements eligible for the profile showcase.
    pub fn showcase(&self) -> Vec<AchievementView<'_>> {
        self.views(|v| v.progress.unlocked && v.definition.showcase)
    }

    /// Definitions the tracker cannot evaluate.
    pub fn unsupported(&self) -> Vec<&AchievementDefinition> {
        self.catalog
            .all()
            .iter()
            .filter(|d| !is_supported(d.requirement.requirement_type))
            .collect()
    }

    /// Reward XP of every unlocked achievement.
    pub fn total_xp(&self) -> u64 {
        self.unlocked()
            .iter()
            .fold(0_u64, |acc, v| acc.saturating_add(u64::from(v.definition.rewards.xp)))
    }

    /// Rounded percent of non-hidden achievements unlocked. 0 when the
    /// catalog has no visible entries.
    pub fn completion_rate(&self) -> u32 {
        let visible = self.views(|v| !v.definition.hidden);
        let total = u32::try_from(visible.len()).unwrap_or(u32::MAX);
        if total == 0 {
            return 0;
        }
        let unlocked = visible.iter().filter(|v| v.progress.unlocked).count();
        let unlocked = u32::try_from(unlocked).unwrap_or(u32::MAX);
        unlocked
            .saturating_mul(100)
            .saturating_add(total / 2)
            .checked_div(total)
            .unwrap_or(0)
    }

    fn views(&self, keep: impl Fn(&AchievementView<'_>) -> bool) -> Vec<AchievementView<'_>> {
        self.catalog
            .all()
            .iter()
            .filter_map(|definition| {
                self.progress
                    .get(&definition.achievement_id)
                    .map(|progress| AchievementView {
                        definition,
                        progress,
                    })
            })
            .filter(keep)
            .collect()
    }
}

/// Whether the tracker can measure this requirement type.
pub const fn is_supported(requirement_type: RequirementType) -> bool {
    !matches!(
        requirement_type,
        RequirementType::PerfectHour | RequirementType::PerfectDay
    )
}

fn measure(
    definition: &AchievementDefinition,
    stats: &PlayerStats,
) -> Result<u32, AchievementError> {
    let requirement = definition.requirement;
    match requirement.requirement_type {
        RequirementType::QuestsCompleted => Ok(stats.quests_completed),
        RequirementType::Streak => Ok(stats.streak),
        RequirementType::Level => Ok(stats.level),
        RequirementType::QuestTime => Ok(match requirement.window {
            Some(window) => completions_in_window(&stats.activity, window),
            None => stats
                .activity
                .completions_by_hour
                .values()
                .fold(0_u32, |acc, n| acc.saturating_add(*n)),
        }),
        RequirementType::WeekendQuests => Ok(weekend_days_covered(&stats.activity)),
        RequirementType::PerfectHour | RequirementType::PerfectDay => {
            Err(AchievementError::UnsupportedRequirement {
                achievement_id: definition.achievement_id.clone(),
                requirement_type: requirement.requirement_type,
            })
        }
    }
}

fn percent(current: u32, target: u32) -> u32 {
    if target == 0 {
        return 100;
    }
    let pct = u64::from(current)
        .saturating_mul(100)
        .checked_div(u64::from(target))
        .unwrap_or(100);
    u32::try_from(pct.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use posturemon_progression::activity::record_quest_activity;

    use super::*;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn tracker() -> AchievementTracker {
        AchievementTracker::new(Arc::new(AchievementCatalog::builtin()))
    }

    fn id(slug: &str) -> AchievementId {
        AchievementId::new(slug)
    }

    fn stats_with_quests(n: u32) -> PlayerStats {
        PlayerStats {
            quests_completed: n,
            ..PlayerStats::default()
        }
    }

    #[test]
    fn first_quest_unlocks_once() {
        let mut t = tracker();
        let stats = stats_with_quests(1);
        let first = t.update_progress(&id("first-quest"), &stats, at(2, 12));
        assert!(first.as_ref().is_ok_and(Option::is_some));
        let again = t.update_progress(&id("first-quest"), &stats, at(3, 12));
        assert_eq!(again, Ok(None));
        let record = t.get(&id("first-quest")).map(|v| v.progress.clone());
        assert_eq!(record.and_then(|r| r.unlocked_at), Some(at(2, 12)));
    }

    #[test]
    fn progress_is_integer_percent() {
        let mut t = tracker();
        let result = t.update_progress(&id("quest-novice"), &stats_with_quests(3), at(2, 12));
        assert_eq!(result, Ok(None));
        let view = t.get(&id("quest-novice"));
        let view = view.map(|v| (v.progress.current, v.progress.progress));
        assert_eq!(view, Some((3, 30)));
    }

    #[test]
    fn progress_never_decreases_while_locked() {
        let mut t = tracker();
        let mut stats = PlayerStats {
            streak: 5,
            ..PlayerStats::default()
        };
        let _ = t.update_progress(&id("week-warrior"), &stats, at(2, 12));
        stats.streak = 1;
        let _ = t.update_progress(&id("week-warrior"), &stats, at(3, 12));
        let view = t.get(&id("week-warrior"));
        let view = view.map(|v| (v.progress.current, v.progress.progress));
        assert_eq!(view, Some((5, 71)));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut t = tracker();
        let result = t.update_progress(&id("nope"), &PlayerStats::default(), at(2, 12));
        assert_eq!(result, Err(AchievementError::NotFound(id("nope"))));
    }

    #[test]
    fn perfect_posture_is_unsupported() {
        let mut t = tracker();
        let stats = PlayerStats::default();
        let result = t.update_progress(&id("perfect-posture"), &stats, at(2, 12));
        assert!(matches!(
            result,
            Err(AchievementError::UnsupportedRequirement { .. })
        ));
        let unsupported: Vec<&str> = t
            .unsupported()
            .iter()
            .map(|d| d.achievement_id.as_str())
            .collect();
        assert_eq!(unsupported, vec!["perfect-posture", "perfect-day"]);
    }

    #[test]
    fn check_all_unlocks_in_catalog_order() {
        let mut t = tracker();
        let stats = PlayerStats {
            level: 5,
            quests_completed: 10,
            streak: 3,
            ..PlayerStats::default()
        };
        let unlocked: Vec<String> = t
            .check_all(&stats, at(2, 12))
            .into_iter()
            .map(|u| u.definition.achievement_id.to_string())
            .collect();
        assert_eq!(
            unlocked,
            vec!["first-quest", "3-day-streak", "quest-novice", "level-5"]
        );
        assert!(t.check_all(&stats, at(2, 13)).is_empty());
    }

    #[test]
    fn quest_time_uses_window() {
        let mut t = tracker();
        let mut stats = PlayerStats::default();
        record_quest_activity(&mut stats.activity, at(2, 23));
        let unlocked: Vec<String> = t
            .check_all(&stats, at(2, 23))
            .into_iter()
            .map(|u| u.definition.achievement_id.to_string())
            .collect();
        assert_eq!(unlocked, vec!["night-owl"]);
    }

    #[test]
    fn weekend_warrior_needs_both_days() {
        let mut t = tracker();
        let mut stats = PlayerStats::default();
        record_quest_activity(&mut stats.activity, at(7, 12));
        let saturday = t.update_progress(&id("weekend-warrior"), &stats, at(7, 12));
        assert_eq!(saturday, Ok(None));
        record_quest_activity(&mut stats.activity, at(8, 12));
        let result = t.update_progress(&id("weekend-warrior"), &stats, at(8, 12));
        assert!(result.is_ok_and(|u| u.is_some_and(|u| u.unlocked_at == at(8, 12))));
    }

    #[test]
    fn locked_excludes_hidden() {
        let t = tracker();
        let locked: Vec<&str> = t
            .locked()
            .iter()
            .map(|v| v.definition.achievement_id.as_str())
            .collect();
        assert_eq!(locked.len(), 13);
        assert!(!locked.contains(&"night-owl"));
        assert!(!locked.contains(&"weekend-warrior"));
    }

    #[test]
    fn hidden_unlock_shows_in_unlocked() {
        let mut t = tracker();
        let mut stats = PlayerStats::default();
        record_quest_activity(&mut stats.activity, at(2, 22));
        let _ = t.check_all(&stats, at(2, 22));
        let unlocked = t.unlocked();
        assert!(unlocked.iter().any(|v| v.definition.achievement_id.as_str() == "night-owl"));
    }

    #[test]
    fn aggregates() {
        let mut t = tracker();
        let stats = PlayerStats {
            level: 10,
            ..PlayerStats::default()
        };
        let _ = t.check_all(&stats, at(2, 12));
        assert_eq!(t.total_xp(), 350);
        let showcase: Vec<&str> = t
            .showcase()
            .iter()
            .map(|v| v.definition.achievement_id.as_str())
            .collect();
        assert_eq!(showcase, vec!["level-10"]);
        assert_eq!(t.completion_rate(), 15);
        assert_eq!(t.by_category(AchievementCategory::Milestones).len(), 3);
    }

    #[test]
    fn records_roundtrip_through_json() {
        let mut t = tracker();
        let _ = t.check_all(&stats_with_quests(4), at(2, 12));
        let json = serde_json::to_string(&t.records()).unwrap_or_default();
        let records: Vec<AchievementProgress> = serde_json::from_str(&json).unwrap_or_default();
        let catalog = Arc::new(AchievementCatalog::builtin());
        let restored = AchievementTracker::from_records(catalog, records);
        assert_eq!(restored, t);
    }

    #[test]
    fn unknown_records_are_dropped() {
        let mut stray = AchievementProgress::locked(id("retired"));
        stray.current = 3;
        let catalog = Arc::new(AchievementCatalog::builtin());
        let t = AchievementTracker::from_records(catalog, vec![stray]);
        assert!(t.get(&id("retired")).is_none());
        assert_eq!(t.records().len(), 15);
    }
}
