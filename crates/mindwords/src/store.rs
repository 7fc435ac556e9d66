//! Local persistence of the player name and level.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::Level;

/// Simple persisted key-value pairs for the player.
///
/// Defaults: no name, level 1.
pub trait LocalStore: Send {
    /// Loads the saved player name, if any.
    fn load_name(&self) -> Result<Option<String>, StoreError>;

    /// Saves the player name.
    fn save_name(&mut self, name: &str) -> Result<(), StoreError>;

    /// Loads the saved level.
    fn load_level(&self) -> Result<Level, StoreError>;

    /// Saves the level.
    fn save_level(&mut self, level: Level) -> Result<(), StoreError>;
}

/// On-disk preferences document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Prefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default = "default_level")]
    level: i64,
}

fn default_level() -> i64 {
    1
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            name: None,
            level: default_level(),
        }
    }
}

/// Why the preferences file could not be loaded.
enum ReadFailure {
    Io(StoreError),
    Parse(StoreError),
}

impl From<ReadFailure> for StoreError {
    fn from(failure: ReadFailure) -> Self {
        match failure {
            ReadFailure::Io(e) | ReadFailure::Parse(e) => e,
        }
    }
}

/// Preferences stored as a small TOML file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file is created on
    /// first save.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating FileStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read(&self) -> Result<Prefs, ReadFailure> {
        if !self.path.exists() {
            debug!("Preferences file missing, using defaults");
            return Ok(Prefs::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ReadFailure::Io(StoreError::new(format!("Failed to read preferences: {}", e)))
        })?;
        toml::from_str(&content).map_err(|e| {
            ReadFailure::Parse(StoreError::new(format!("Failed to parse preferences: {}", e)))
        })
    }

    /// Loads the document a save starts from. An unparseable file is
    /// replaced by the defaults; read errors are still reported.
    fn read_for_update(&self) -> Result<Prefs, StoreError> {
        match self.read() {
            Ok(prefs) => Ok(prefs),
            Err(ReadFailure::Parse(e)) => {
                warn!(
                    path = %self.path.display(),
                    error = %e.message,
                    "Overwriting corrupt preferences"
                );
                Ok(Prefs::default())
            }
            Err(ReadFailure::Io(e)) => Err(e),
        }
    }

    #[instrument(skip(self, prefs), fields(path = %self.path.display()))]
    fn write(&self, prefs: &Prefs) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = toml::to_string(prefs)
            .map_err(|e| StoreError::new(format!("Failed to encode preferences: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::new(format!("Failed to write preferences: {}", e)))?;
        debug!("Preferences written");
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn load_name(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.name)
    }

    #[instrument(skip(self))]
    fn save_name(&mut self, name: &str) -> Result<(), StoreError> {
        let mut prefs = self.read_for_update()?;
        prefs.name = Some(name.to_string());
        self.write(&prefs)
    }

    fn load_level(&self) -> Result<Level, StoreError> {
        Ok(Level::from_raw(self.read()?.level))
    }

    #[instrument(skip(self))]
    fn save_level(&mut self, level: Level) -> Result<(), StoreError> {
        let mut prefs = self.read_for_update()?;
        prefs.level = i64::from(level.get());
        self.write(&prefs)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: Option<String>,
    level: Level,
}

impl MemoryStore {
    /// Creates an empty store at level 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `level`.
    pub fn with_level(level: Level) -> Self {
        Self { name: None, level }
    }
}

impl LocalStore for MemoryStore {
    fn load_name(&self) -> Result<Option<String>, StoreError> {
        Ok(self.name.clone())
    }

    fn save_name(&mut self, name: &str) -> Result<(), StoreError> {
        self.name = Some(name.to_string());
        Ok(())
    }

    fn load_level(&self) -> Result<Level, StoreError> {
        Ok(self.level)
    }

    fn save_level(&mut self, level: Level) -> Result<(), StoreError> {
        self.level = level;
        Ok(())
    }
}

/// Local store error.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
