//! Snapshot save/load adapters.
//!
//! The store produces a [`GameSnapshot`]; an adapter turns it into bytes
//! somewhere durable. Saving happens at lifecycle points chosen by the
//! caller, never implicitly on mutation.

use std::path::{Path, PathBuf};

use posturemon_types::GameSnapshot;

/// Errors that can occur when reading or writing snapshots.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Filesystem access failed.
    #[error("snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot JSON invalid: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Durable home for one user's snapshot.
pub trait SnapshotStore {
    /// Read the saved snapshot. `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<GameSnapshot>, PersistError>;

    /// Replace the saved snapshot.
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistError>;
}

/// A snapshot kept as a JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<GameSnapshot>, PersistError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&contents)?;
        tracing::info!(path = %self.path.display(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        let temp = self.temp_path();
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            level = snapshot.player.level,
            total_xp = snapshot.player.total_xp,
            "snapshot saved"
        );
        Ok(())
    }
}

/// A snapshot kept in memory as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self { contents: None }
    }

    /// The raw JSON last saved, if any.
    pub fn raw(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<GameSnapshot>, PersistError> {
        self.contents
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(PersistError::from)
    }

    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistError> {
        self.contents = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}
