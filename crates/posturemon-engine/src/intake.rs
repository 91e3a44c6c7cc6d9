//! JSON-lines command intake from the polling collaborator.
//!
//! One command per line, tagged by `type`:
//!
//! ```text
//! {"type":"reading","status":"GOOD POSTURE","distance":3.2,"timestamp":1767261600000}
//! {"type":"start-quest","quest_id":"micro-break"}
//! {"type":"complete-quest","quest_id":"micro-break","options":{"speed_bonus":true}}
//! {"type":"feed"}
//! {"type":"save"}
//! ```
//!
//! Commands that need a clock accept an optional RFC 3339 `at`; it
//! defaults to the time the line is processed.

use chrono::{DateTime, Utc};
use posturemon_core::{CoreError, GameStore};
use posturemon_quests::RewardOptions;
use posturemon_types::{PostureReading, QuestId};
use serde::Deserialize;
use tracing::debug;

/// A single intake command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// A raw posture reading.
    Reading(PostureReading),
    /// Begin a quest session.
    StartQuest {
        /// Quest to start.
        quest_id: QuestId,
        /// When it started.
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    /// Report progress on the active quest.
    QuestProgress {
        /// Percent complete (clamped to 100).
        percent: u32,
    },
    /// Abandon the active quest.
    EndQuest,
    /// Complete a quest and collect its rewards.
    CompleteQuest {
        /// Quest completed.
        quest_id: QuestId,
        /// How it was completed.
        #[serde(default)]
        options: RewardOptions,
        /// When it was completed.
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    /// Feed the pet.
    Feed {
        /// When the pet was fed.
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    /// Extend the streak by one day.
    IncrementStreak {
        /// When the streak was extended.
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    /// Persist the snapshot now.
    Save,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// Nothing further.
    None,
    /// Write the snapshot.
    Save,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Apply a command to the store.
///
/// Quest completions and explicit `save` commands ask for a snapshot
/// write; everything else is in-memory only.
pub fn apply(
    store: &mut GameStore,
    command: Command,
    now: DateTime<Utc>,
) -> Result<Followup, CoreError> {
    match command {
        Command::Reading(reading) => {
            store.ingest_reading(&reading)?;
            Ok(Followup::None)
        }
        Command::StartQuest { quest_id, at } => {
            store.start_quest(&quest_id, at.unwrap_or(now))?;
            Ok(Followup::None)
        }
        Command::QuestProgress { percent } => {
            let progress = store.update_quest_progress(percent)?;
            debug!(progress, "quest progress updated");
            Ok(Followup::None)
        }
        Command::EndQuest => {
            store.end_quest()?;
            Ok(Followup::None)
        }
        Command::CompleteQuest {
            quest_id,
            options,
            at,
        } => {
            store.complete_quest(&quest_id, &options, at.unwrap_or(now))?;
            Ok(Followup::Save)
        }
        Command::Feed { at } => {
            store.feed_pet(at.unwrap_or(now));
            Ok(Followup::None)
        }
        Command::IncrementStreak { at } => {
            store.increment_streak(at.unwrap_or(now))?;
            Ok(Followup::None)
        }
        Command::Save => Ok(Followup::Save),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use posturemon_core::GameConfig;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn parses_reading_with_backend_keys() {
        let line = r#"{"type":"reading","status":"SLOUCHING","distance":12.5,"timestamp":1000}"#;
        let command = parse_line(line).ok().flatten();
        let Some(Command::Reading(reading)) = command else {
            panic!("expected a reading, got {command:?}");
        };
        assert_eq!(reading.status_label, "SLOUCHING");
        assert_eq!(reading.timestamp_ms, 1000);
        assert!(reading.person_detected);
    }

    #[test]
    fn parses_quest_completion_with_defaults() {
        let line = r#"{"type":"complete-quest","quest_id":"breathing"}"#;
        let command = parse_line(line).ok().flatten();
        assert_eq!(
            command,
            Some(Command::CompleteQuest {
                quest_id: QuestId::new("breathing"),
                options: RewardOptions::default(),
                at: None,
            })
        );
    }

    #[test]
    fn parses_unit_commands() {
        assert_eq!(parse_line(r#"{"type":"save"}"#).ok().flatten(), Some(Command::Save));
        assert_eq!(
            parse_line(r#"{"type":"end-quest"}"#).ok().flatten(),
            Some(Command::EndQuest)
        );
        assert_eq!(
            parse_line(r#"{"type":"feed"}"#).ok().flatten(),
            Some(Command::Feed { at: None })
        );
    }

    #[test]
    fn blank_and_malformed_lines() {
        assert!(matches!(parse_line("   "), Ok(None)));
        assert!(parse_line("{\"type\":\"dance\"}").is_err());
        assert!(parse_line("not json").is_err());
    }

    #[test]
    fn completion_requests_save() {
        let mut store = GameStore::new(GameConfig::default(), now());
        let command = Command::CompleteQuest {
            quest_id: QuestId::new("micro-break"),
            options: RewardOptions::default(),
            at: None,
        };
        assert!(matches!(apply(&mut store, command, now()), Ok(Followup::Save)));
        assert_eq!(store.player().quests_completed, 1);

        let feed = Command::Feed { at: None };
        assert!(matches!(apply(&mut store, feed, now()), Ok(Followup::None)));
    }

    #[test]
    fn quest_errors_propagate() {
        let mut store = GameStore::new(GameConfig::default(), now());
        let result = apply(&mut store, Command::EndQuest, now());
        assert!(result.is_err());
    }
}
