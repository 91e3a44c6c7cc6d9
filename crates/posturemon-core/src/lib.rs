//! State container, observers, persistence, and configuration for the
//! Posturemon progression engine.
//!
//! # Modules
//!
//! - [`store`] -- The single-writer game store and its commands
//! - [`observer`] -- Committed-event notifications
//! - [`snapshot`] -- Snapshot save/load adapters
//! - [`config`] -- YAML configuration loading
//! - [`error`] -- Error types

pub mod config;
pub mod error;
pub mod observer;
pub mod snapshot;
pub mod store;

pub use config::{ConfigError, GameConfig};
pub use error::CoreError;
pub use observer::{GameEvent, NoOpObserver, StoreObserver, XpSource};
pub use snapshot::{JsonFileStore, MemoryStore, PersistError, SnapshotStore};
pub use store::{GameState, GameStore, QuestOutcome};
