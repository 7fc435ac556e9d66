//! Dreamlo leaderboard client, score ranking and name sanitization.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::Leaderboard;

/// Name submitted when sanitization leaves nothing.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Longest name accepted by the leaderboard, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct ScoreRow {
    /// Player name.
    pub name: String,
    /// Submitted total score.
    pub score: u64,
    /// Seconds elapsed when the score was submitted.
    pub seconds: u64,
}

/// Cleans a player name for submission.
///
/// Non-ASCII characters are dropped, whitespace runs collapse to a single
/// space, the ends are trimmed and the result is cut to
/// [`MAX_NAME_LEN`] characters. An empty result becomes
/// [`DEFAULT_PLAYER_NAME`].
#[instrument]
pub fn sanitize_name(input: &str) -> String {
    let ascii: String = input.chars().filter(char::is_ascii).collect();
    let collapsed = ascii.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_NAME_LEN).collect();
    let trimmed = truncated.trim_end();

    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sorts rows by score, highest first, keeping the input order of ties,
/// and keeps at most `limit` rows.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn rank_scores(mut rows: Vec<ScoreRow>, limit: usize) -> Vec<ScoreRow> {
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows.truncate(limit);
    rows
}

#[derive(Debug, Deserialize)]
struct Envelope {
    dreamlo: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(default)]
    leaderboard: Option<Board>,
}

#[derive(Debug, Deserialize)]
struct Board {
    #[serde(default)]
    entry: Option<OneOrMany>,
}

/// Dreamlo returns a bare object for a single entry and an array otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    // Tried first: an array would also deserialize positionally into `Entry`.
    Many(Vec<Entry>),
    One(Entry),
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    name: serde_json::Value,
    #[serde(default)]
    score: serde_json::Value,
    #[serde(default)]
    seconds: serde_json::Value,
}

impl Entry {
    fn into_row(self) -> ScoreRow {
        let name = match self.name {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        ScoreRow::new(name, lenient_number(&self.score), lenient_number(&self.seconds))
    }
}

/// Reads a number that may arrive as a JSON number or a string. Anything
/// unreadable counts as 0.
fn lenient_number(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Parses a dreamlo JSON leaderboard into unranked rows.
///
/// A missing or null leaderboard or entry list means no scores yet.
///
/// # Errors
///
/// Returns [`LeaderboardError`] if the body is not a dreamlo document.
#[instrument(skip(body), fields(len = body.len()))]
pub fn parse_leaderboard(body: &str) -> Result<Vec<ScoreRow>, LeaderboardError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| LeaderboardError::new(format!("bad json: {}", e)))?;

    let rows: Vec<ScoreRow> = match envelope.dreamlo.leaderboard.and_then(|b| b.entry) {
        Some(OneOrMany::One(entry)) => vec![entry.into_row()],
        Some(OneOrMany::Many(entries)) => entries.into_iter().map(Entry::into_row).collect(),
        None => Vec::new(),
    };

    debug!(count = rows.len(), "Parsed leaderboard");
    Ok(rows)
}

/// Client for the dreamlo leaderboard service.
///
/// Writes use the private code, reads use the public code.
#[derive(Debug, Clone)]
pub struct DreamloClient {
    http: reqwest::Client,
    base_url: String,
    private_code: Option<String>,
    public_code: Option<String>,
}

impl DreamloClient {
    /// Creates a client. Missing codes make the matching call fail with a
    /// configuration message instead of reaching the network.
    #[instrument(skip(http, private_code, public_code))]
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        private_code: Option<String>,
        public_code: Option<String>,
    ) -> Self {
        info!(
            can_submit = private_code.is_some(),
            can_read = public_code.is_some(),
            "Creating DreamloClient"
        );
        Self {
            http,
            base_url,
            private_code,
            public_code,
        }
    }

    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, LeaderboardError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| LeaderboardError::new(format!("bad leaderboard url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| LeaderboardError::new("leaderboard url cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GETs `url`, returning the status and body.
    #[instrument(skip_all, fields(path = url.path()))]
    async fn get(
        &self,
        url: reqwest::Url,
    ) -> Result<(reqwest::StatusCode, String), LeaderboardError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Leaderboard request failed");
            LeaderboardError::new(format!("request failed: {}", e))
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LeaderboardError::new(format!("unreadable response: {}", e)))?;
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl Leaderboard for DreamloClient {
    #[instrument(skip(self))]
    async fn submit_score(
        &self,
        name: &str,
        score: u64,
        elapsed_seconds: u64,
    ) -> Result<(), LeaderboardError> {
        let code = self
            .private_code
            .as_deref()
            .ok_or_else(|| LeaderboardError::new("leaderboard private code not configured"))?;
        let name = sanitize_name(name);
        let url = self.url(&[
            "lb",
            code,
            "add-pipe",
            &name,
            &score.to_string(),
            &elapsed_seconds.to_string(),
        ])?;

        let (status, body) = self.get(url).await?;
        let accepted = body.to_ascii_lowercase().contains("ok") || body.contains('|');
        if status.is_success() && accepted {
            info!(%name, score, elapsed_seconds, "Score submitted");
            Ok(())
        } else {
            warn!(%status, "Score submission rejected");
            Err(LeaderboardError::new(format!("add failed: HTTP {}", status.as_u16())))
        }
    }

    #[instrument(skip(self))]
    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        let code = self
            .public_code
            .as_deref()
            .ok_or_else(|| LeaderboardError::new("leaderboard public code not configured"))?;
        let url = self.url(&["lb", code, "json"])?;

        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            warn!(%status, "Leaderboard fetch rejected");
            return Err(LeaderboardError::new(format!("json failed: HTTP {}", status.as_u16())));
        }

        let rows = rank_scores(parse_leaderboard(&body)?, limit);
        info!(count = rows.len(), "Fetched leaderboard");
        Ok(rows)
    }
}

/// Leaderboard error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Leaderboard error: {} at {}:{}", message, file, line)]
pub struct LeaderboardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LeaderboardError {
    /// Creates a new leaderboard error with caller location tracking.
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
