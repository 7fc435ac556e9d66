//! External collaborators: word source, tip source and leaderboard.
//!
//! Each collaborator is a trait so the session can be driven against fakes;
//! the concrete clients talk HTTP through a shared `reqwest::Client`.

mod leaderboard;
mod tips;
mod words;

pub use leaderboard::{
    DEFAULT_PLAYER_NAME, DreamloClient, LeaderboardError, MAX_NAME_LEN, ScoreRow,
    parse_leaderboard, rank_scores, sanitize_name,
};
pub use tips::{DatamuseTipClient, Tip};
pub use words::{
    RandomWordClient, WordSourceError, WordSourceErrorKind, fetch_word_with_retries,
};

use tracing::{info, instrument};

use crate::{AppConfig, LengthRange};

/// Source of random secret words.
#[async_trait::async_trait]
pub trait WordSource: Send + Sync {
    /// Fetches one lowercase alphabetic word, ideally with a length inside
    /// `range`. Callers must still check the length.
    async fn fetch_random_word(&self, range: LengthRange) -> Result<String, WordSourceError>;
}

/// Best-effort source of a descriptive tip for the answer.
#[async_trait::async_trait]
pub trait TipSource: Send + Sync {
    /// Returns a tip for `word`. Never fails; degrades to a generic tip.
    async fn tip_for(&self, word: &str) -> Tip;
}

/// Remote leaderboard.
#[async_trait::async_trait]
pub trait Leaderboard: Send + Sync {
    /// Submits a score. The name is sanitized before it is sent.
    async fn submit_score(
        &self,
        name: &str,
        score: u64,
        elapsed_seconds: u64,
    ) -> Result<(), LeaderboardError>;

    /// Fetches up to `limit` rows, highest score first.
    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError>;
}

/// Builds the HTTP client shared by all services, with the configured
/// connect and request timeouts so no call blocks indefinitely.
#[instrument(skip(config))]
pub fn http_client(config: &AppConfig) -> reqwest::Result<reqwest::Client> {
    info!(
        connect_timeout_secs = *config.connect_timeout_secs(),
        request_timeout_secs = *config.request_timeout_secs(),
        "Building HTTP client"
    );
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .user_agent(concat!("mindwords/", env!("CARGO_PKG_VERSION")))
        .build()
}
