//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use mindwords_round::RoundRules;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable holding the leaderboard's private (write) code.
pub const DREAMLO_PRIVATE_ENV: &str = "DREAMLO_PRIVATE_CODE";
/// Environment variable holding the leaderboard's public (read) code.
pub const DREAMLO_PUBLIC_ENV: &str = "DREAMLO_PUBLIC_CODE";
/// Environment variable holding the optional API Ninjas key.
pub const NINJAS_KEY_ENV: &str = "API_NINJAS_KEY";

/// Configuration for the game and its external services.
///
/// Every field has a default, so an empty or missing TOML file is valid.
/// Secrets are read from the environment by [`AppConfig::apply_env`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the random-word service.
    word_api_url: String,

    /// Base URL of the Datamuse word-finding service.
    datamuse_url: String,

    /// Base URL of the API Ninjas service.
    ninjas_url: String,

    /// API Ninjas key; rhyme and thesaurus lookups are skipped without it.
    ninjas_key: Option<String>,

    /// Base URL of the dreamlo leaderboard.
    dreamlo_url: String,

    /// Dreamlo private code, needed to submit scores.
    dreamlo_private_code: Option<String>,

    /// Dreamlo public code, needed to read scores.
    dreamlo_public_code: Option<String>,

    /// TCP connect timeout for HTTP calls, in seconds.
    connect_timeout_secs: u64,

    /// Whole-request timeout for HTTP calls, in seconds.
    request_timeout_secs: u64,

    /// Attempts to fetch a word of the right length before giving up.
    word_attempts: u32,

    /// Wrong full-word guesses allowed per round.
    max_tries: u32,

    /// Rows shown by the leaderboard view.
    leaderboard_limit: usize,

    /// Where the player name and level are saved.
    prefs_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            word_api_url: "https://random-word-api.herokuapp.com".to_string(),
            datamuse_url: "https://api.datamuse.com".to_string(),
            ninjas_url: "https://api.api-ninjas.com".to_string(),
            ninjas_key: None,
            dreamlo_url: "https://www.dreamlo.com".to_string(),
            dreamlo_private_code: None,
            dreamlo_public_code: None,
            connect_timeout_secs: 15,
            request_timeout_secs: 20,
            word_attempts: 6,
            max_tries: RoundRules::MAX_TRIES,
            leaderboard_limit: 30,
            prefs_path: PathBuf::from("mindwords_prefs.toml"),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!("Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise uses defaults, then overlays
    /// secrets from the environment.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        Ok(config.apply_env())
    }

    /// Fills secrets from `DREAMLO_PRIVATE_CODE`, `DREAMLO_PUBLIC_CODE` and
    /// `API_NINJAS_KEY` when they are set and non-blank.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Self {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            dreamlo_private_code: read(DREAMLO_PRIVATE_ENV).or(self.dreamlo_private_code),
            dreamlo_public_code: read(DREAMLO_PUBLIC_ENV).or(self.dreamlo_public_code),
            ninjas_key: read(NINJAS_KEY_ENV).or(self.ninjas_key),
            ..self
        }
    }

    /// Round rules with the configured try budget.
    pub fn round_rules(&self) -> RoundRules {
        RoundRules::with_max_tries(self.max_tries)
    }

    /// Connect timeout as a duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
