//! Per-user quest completion history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use posturemon_types::{QuestId, QuestRecord};

/// Completion counts and timestamps for one player, keyed by quest id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestLog {
    records: BTreeMap<QuestId, QuestRecord>,
}

impl QuestLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records. Later duplicates replace earlier ones.
    pub fn from_records(records: Vec<QuestRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.quest_id.clone(), record))
                .collect(),
        }
    }

    /// Persistable records ordered by quest id.
    pub fn records(&self) -> Vec<QuestRecord> {
        self.records.values().cloned().collect()
    }

    /// Count one completion of `quest_id` at `at`. Returns the new count.
    pub fn record_completion(&mut self, quest_id: &QuestId, at: DateTime<Utc>) -> u32 {
        let record = self
            .records
            .entry(quest_id.clone())
            .or_insert_with(|| QuestRecord {
                quest_id: quest_id.clone(),
                times_completed: 0,
                last_completed: None,
            });
        record.times_completed = record.times_completed.saturating_add(1);
        record.last_completed = Some(at);
        record.times_completed
    }

    /// How often `quest_id` was completed.
    pub fn times_completed(&self, quest_id: &QuestId) -> u32 {
        self.records
            .get(quest_id)
            .map_or(0, |record| record.times_completed)
    }

    /// When `quest_id` was last completed.
    pub fn last_completed(&self, quest_id: &QuestId) -> Option<DateTime<Utc>> {
        self.records
            .get(quest_id)
            .and_then(|record| record.last_completed)
    }

    /// Ids of every quest completed at least once.
    pub fn completed_ids(&self) -> Vec<QuestId> {
        self.records
            .values()
            .filter(|record| record.times_completed > 0)
            .map(|record| record.quest_id.clone())
            .collect()
    }

    /// Completions across all quests.
    pub fn total_completions(&self) -> u32 {
        self.records
            .values()
            .fold(0_u32, |acc, record| acc.saturating_add(record.times_completed))
    }
}
