//! The quest currently being played.
//!
//! A session copies its definition at start so the running quest is
//! unaffected by later catalog changes. Phases are laid out back to back
//! from `started_at_ms`.

use posturemon_types::{QuestDefinition, QuestId, QuestPhase};
use serde::{Deserialize, Serialize};

/// An in-progress quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSession {
    quest: QuestDefinition,
    started_at_ms: i64,
    progress: u32,
}

impl QuestSession {
    /// Begin `quest` at `started_at_ms`.
    pub fn start(quest: &QuestDefinition, started_at_ms: i64) -> Self {
        Self {
            quest: quest.clone(),
            started_at_ms,
            progress: 0,
        }
    }

    /// The running quest's id.
    pub const fn quest_id(&self) -> &QuestId {
        &self.quest.quest_id
    }

    /// The running quest.
    pub const fn quest(&self) -> &QuestDefinition {
        &self.quest
    }

    /// Unix milliseconds when the session began.
    pub const fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    /// Reported completion percent (0--100).
    pub const fn progress(&self) -> u32 {
        self.progress
    }

    /// Set the completion percent, clamped to 100.
    pub fn set_progress(&mut self, percent: u32) {
        self.progress = percent.min(100);
    }

    /// Milliseconds since start; 0 for timestamps before the start.
    pub fn elapsed_ms(&self, now_ms: i64) -> u64 {
        u64::try_from(now_ms.saturating_sub(self.started_at_ms)).unwrap_or(0)
    }

    /// Planned length of the quest in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        u64::from(self.quest.duration_secs).saturating_mul(1_000)
    }

    /// The phase scheduled at `now_ms`, or `None` once every phase has run.
    pub fn phase_at(&self, now_ms: i64) -> Option<&QuestPhase> {
        let elapsed = self.elapsed_ms(now_ms);
        let mut phase_end: u64 = 0;
        for phase in &self.quest.phases {
            let phase_ms = u64::from(phase.duration_secs).saturating_mul(1_000);
            phase_end = phase_end.saturating_add(phase_ms);
            if elapsed < phase_end {
                return Some(phase);
            }
        }
        None
    }

    /// Whether the planned duration has elapsed.
    pub fn is_finished(&self, now_ms: i64) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms()
    }
}

/// Whether `score` satisfies the phase's posture validation. Phases
/// without validation always pass.
pub fn phase_passes(phase: &QuestPhase, score: f64) -> bool {
    match phase
        .validation
        .as_ref()
        .and_then(|criteria| criteria.min_posture_score)
    {
        Some(min) => score >= f64::from(min),
        None => true,
    }
}
