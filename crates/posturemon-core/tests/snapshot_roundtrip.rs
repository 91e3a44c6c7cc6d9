//! Snapshot save/load round-trips through the persistence adapters.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use posturemon_achievements::AchievementCatalog;
use posturemon_core::{CoreError, GameConfig, GameStore, JsonFileStore, MemoryStore, SnapshotStore};
use posturemon_quests::{QuestCatalog, RewardOptions};
use posturemon_types::{AchievementId, GameSnapshot, QuestId, SNAPSHOT_VERSION};

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).single().unwrap()
}

fn played_store() -> GameStore {
    let mut store = GameStore::new(GameConfig::default(), at(2, 9));
    store.set_calibrated(true);
    let micro_break = QuestId::new("micro-break");
    for day in 2..6 {
        store
            .complete_quest(&micro_break, &RewardOptions::default(), at(day, 8))
            .unwrap();
    }
    store.increment_streak(at(5, 9)).unwrap();
    store.feed_pet(at(5, 9));
    store
}

fn restore(snapshot: GameSnapshot) -> Result<GameStore, CoreError> {
    GameStore::from_snapshot(
        GameConfig::default(),
        Arc::new(QuestCatalog::builtin()),
        Arc::new(AchievementCatalog::builtin()),
        snapshot,
    )
}

#[test]
fn memory_roundtrip_preserves_derived_state() {
    let store = played_store();
    let mut memory = MemoryStore::new();
    memory.save(&store.snapshot(at(5, 10))).unwrap();

    let loaded = memory.load().unwrap().unwrap();
    assert_eq!(loaded.version, SNAPSHOT_VERSION);
    let restored = restore(loaded).unwrap();

    assert_eq!(restored.player(), store.player());
    assert_eq!(restored.pet(), store.pet());
    assert_eq!(restored.achievements(), store.achievements());
    assert_eq!(restored.quest_log(), store.quest_log());
    assert_eq!(restored.state().streak, store.state().streak);
    assert!(restored.is_calibrated());

    let early_bird = restored
        .achievements()
        .get(&AchievementId::new("early-bird"))
        .unwrap();
    assert!(early_bird.progress.unlocked);
    assert_eq!(early_bird.progress.unlocked_at, Some(at(2, 8)));
}

#[test]
fn json_file_roundtrip() {
    let dir = std::env::temp_dir().join(format!("posturemon-{}", uuid::Uuid::now_v7()));
    let path = dir.join("nested").join("save.json");
    let mut file = JsonFileStore::new(&path);
    assert!(file.load().unwrap().is_none());

    let store = played_store();
    let snapshot = store.snapshot(at(5, 10));
    file.save(&snapshot).unwrap();
    assert!(path.exists());
    assert_eq!(file.load().unwrap(), Some(snapshot.clone()));

    // A second save replaces the first.
    let mut later = snapshot;
    later.saved_at = Some(at(6, 10));
    file.save(&later).unwrap();
    assert_eq!(file.load().unwrap(), Some(later));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn newer_snapshot_version_is_rejected() {
    let mut snapshot = played_store().snapshot(at(5, 10));
    snapshot.version = SNAPSHOT_VERSION.saturating_add(1);
    assert!(matches!(
        restore(snapshot),
        Err(CoreError::UnsupportedSnapshotVersion { .. })
    ));
}

#[test]
fn inconsistent_level_is_normalized() {
    let mut snapshot = played_store().snapshot(at(5, 10));
    let expected_level = snapshot.player.level;
    let expected_xp = snapshot.player.xp;
    snapshot.player.level = 42;
    snapshot.player.xp = 7;

    let restored = restore(snapshot).unwrap();
    assert_eq!(restored.player().level, expected_level);
    assert_eq!(restored.player().xp, expected_xp);
    assert_eq!(restored.pet().level, expected_level);
}

#[test]
fn missing_optional_sections_default() {
    let snapshot = played_store().snapshot(at(5, 10));
    let mut value = serde_json::to_value(&snapshot).unwrap();
    let object = value.as_object_mut().unwrap();
    object.remove("quest_log");
    object.remove("streak");
    object.remove("saved_at");

    let parsed: GameSnapshot = serde_json::from_value(value).unwrap();
    assert!(parsed.quest_log.is_empty());
    assert_eq!(parsed.saved_at, None);

    let restored = restore(parsed).unwrap();
    assert_eq!(restored.player().quests_completed, 4);
    assert!(restored.quest_log().completed_ids().is_empty());
}
