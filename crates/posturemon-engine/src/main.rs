//! Engine binary for the Posturemon progression engine.
//!
//! Wires the game store to its collaborators: configuration, the snapshot
//! file, and the JSON-lines feed produced by the posture polling loop.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `POSTUREMON_CONFIG` or `posturemon-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Restore the game store from the snapshot file, or start fresh
//! 4. Apply commands from stdin until end of input
//! 5. Save the snapshot and print the derived state as JSON

mod error;
mod intake;
mod observer_callback;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use posturemon_achievements::AchievementCatalog;
use posturemon_core::{GameConfig, GameStore, JsonFileStore, SnapshotStore};
use posturemon_quests::QuestCatalog;
use posturemon_scoring::HistorySummary;
use posturemon_types::{AchievementId, PetState, PlayerStats, QuestId};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::intake::Followup;
use crate::observer_callback::TracingObserver;

/// Environment variable naming the config file.
const ENV_CONFIG: &str = "POSTUREMON_CONFIG";

/// Config file used when `POSTUREMON_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "posturemon-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, the snapshot file, or stdin/stdout
/// fail. Malformed or rejected commands are logged and skipped.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!(
        snapshot_path = %config.storage.snapshot_path.display(),
        max_level = config.progression.max_level,
        history_capacity = config.scoring.history_capacity,
        "posturemon-engine starting"
    );

    // 3. Restore or create the store.
    let mut snapshots = JsonFileStore::new(config.storage.snapshot_path.clone());
    let mut store = open_store(config, &snapshots)?;
    store.subscribe(Box::new(TracingObserver));
    store.connect_camera();

    // 4. Apply commands.
    let stats = run_intake(&mut store, &mut snapshots)?;
    store.disconnect_camera();

    // 5. Save and report.
    snapshots.save(&store.snapshot(Utc::now()))?;
    print_report(&store)?;

    info!(
        applied = stats.applied,
        rejected = stats.rejected,
        malformed = stats.malformed,
        level = store.player().level,
        total_xp = store.player().total_xp,
        "posturemon-engine shutdown complete"
    );
    Ok(())
}

/// Load configuration from `POSTUREMON_CONFIG`, falling back to
/// `posturemon-config.yaml`, then to built-in defaults.
fn load_config() -> Result<GameConfig, EngineError> {
    let config_path = std::env::var(ENV_CONFIG)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        Ok(GameConfig::from_file(&config_path)?)
    } else {
        let mut config = GameConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level. Logs go to stderr; stdout carries the report.
fn init_tracing(config: &GameConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Restore from the snapshot if one exists, otherwise start a new player.
fn open_store(config: GameConfig, snapshots: &JsonFileStore) -> Result<GameStore, EngineError> {
    let Some(snapshot) = snapshots.load()? else {
        info!("No snapshot found, starting a new player");
        return Ok(GameStore::new(config, Utc::now()));
    };
    let store = GameStore::from_snapshot(
        config,
        Arc::new(QuestCatalog::builtin()),
        Arc::new(AchievementCatalog::builtin()),
        snapshot,
    )?;
    info!(
        user_id = %store.state().user_id,
        level = store.player().level,
        quests_completed = store.player().quests_completed,
        "Player restored from snapshot"
    );
    Ok(store)
}

/// Counters for one intake run.
#[derive(Debug, Default)]
struct IntakeStats {
    applied: u64,
    rejected: u64,
    malformed: u64,
}

/// Read commands from stdin until end of input.
fn run_intake(
    store: &mut GameStore,
    snapshots: &mut JsonFileStore,
) -> Result<IntakeStats, EngineError> {
    let mut stats = IntakeStats::default();
    let stdin = std::io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let line_number = index.saturating_add(1);
        let command = match intake::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                stats.malformed = stats.malformed.saturating_add(1);
                warn!(line_number, error = %e, "Skipping malformed command");
                continue;
            }
        };
        match intake::apply(store, command, Utc::now()) {
            Ok(Followup::Save) => {
                stats.applied = stats.applied.saturating_add(1);
                // A failed mid-run save is retried by the final save.
                if let Err(e) = snapshots.save(&store.snapshot(Utc::now())) {
                    warn!(line_number, error = %e, "Snapshot save failed");
                }
            }
            Ok(Followup::None) => {
                stats.applied = stats.applied.saturating_add(1);
            }
            Err(e) => {
                stats.rejected = stats.rejected.saturating_add(1);
                warn!(line_number, error = %e, "Command rejected");
            }
        }
    }
    Ok(stats)
}

/// Derived state printed on shutdown.
#[derive(Debug, Serialize)]
struct Report<'a> {
    player: &'a PlayerStats,
    pet: &'a PetState,
    level_progress: u32,
    achievements_unlocked: Vec<&'a AchievementId>,
    achievement_completion: u32,
    history: HistorySummary,
    next_quest: Option<&'a QuestId>,
}

/// Print the derived state as one JSON document on stdout.
fn print_report(store: &GameStore) -> Result<(), EngineError> {
    let mut rng = rand::rng();
    let report = Report {
        player: store.player(),
        pet: store.pet(),
        level_progress: store.level_progress()?,
        achievements_unlocked: store
            .achievements()
            .unlocked()
            .into_iter()
            .map(|view| &view.definition.achievement_id)
            .collect(),
        achievement_completion: store.achievements().completion_rate(),
        history: store.history_summary(),
        next_quest: store.next_quest(&mut rng).map(|quest| &quest.quest_id),
    };
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    Ok(())
}
