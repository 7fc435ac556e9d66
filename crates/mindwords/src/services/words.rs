//! Random-word service client and bounded retry policy.

use derive_more::{Display, Error};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::WordSource;
use crate::LengthRange;

/// HTTP client for a random-word API.
///
/// `GET {base}/word?number=1&length=N` answers with a JSON array of words.
/// The service only filters by exact length, so `N` is rolled uniformly
/// inside the requested range.
#[derive(Debug, Clone)]
pub struct RandomWordClient {
    http: reqwest::Client,
    base_url: String,
}

impl RandomWordClient {
    /// Creates a client for the service at `base_url`.
    #[instrument(skip(http))]
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        info!("Creating RandomWordClient");
        Self { http, base_url }
    }

    fn word_url(&self, length: usize) -> Result<reqwest::Url, WordSourceError> {
        let mut url = reqwest::Url::parse(&format!("{}/word", self.base_url.trim_end_matches('/')))
            .map_err(|e| WordSourceError::new(WordSourceErrorKind::Request(e.to_string())))?;
        url.query_pairs_mut()
            .append_pair("number", "1")
            .append_pair("length", &length.to_string());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl WordSource for RandomWordClient {
    #[instrument(skip(self), fields(range = %range))]
    async fn fetch_random_word(&self, range: LengthRange) -> Result<String, WordSourceError> {
        let length = rand::thread_rng().gen_range(range.min()..=range.max());
        let url = self.word_url(length)?;
        debug!(%url, length, "Requesting random word");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Word request failed");
            WordSourceError::new(WordSourceErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Word service returned an error status");
            return Err(WordSourceError::new(WordSourceErrorKind::Request(format!(
                "HTTP {}",
                status
            ))));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WordSourceError::new(WordSourceErrorKind::Request(e.to_string())))?;
        let words: Vec<serde_json::Value> = serde_json::from_str(&body)
            .map_err(|e| WordSourceError::new(WordSourceErrorKind::Malformed(e.to_string())))?;

        let word: String = words
            .first()
            .and_then(|w| w.as_str())
            .unwrap_or_default()
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphabetic())
            .collect();

        if !range.contains(word.chars().count()) {
            return Err(WordSourceError::new(WordSourceErrorKind::OutOfRange {
                word,
                range,
            }));
        }

        debug!(length = word.chars().count(), "Received word");
        Ok(word)
    }
}

/// Asks `source` for a word up to `attempts` times.
///
/// Transient failures and words outside `range` (or with non-letters) are
/// retried; after the last attempt the error kind is
/// [`WordSourceErrorKind::Exhausted`].
#[instrument(skip(source), fields(range = %range))]
pub async fn fetch_word_with_retries(
    source: &dyn WordSource,
    range: LengthRange,
    attempts: u32,
) -> Result<String, WordSourceError> {
    let attempts = attempts.max(1);

    for attempt in 1..=attempts {
        match source.fetch_random_word(range).await {
            Ok(word)
                if !word.is_empty()
                    && word.chars().all(char::is_alphabetic)
                    && range.contains(word.chars().count()) =>
            {
                info!(attempt, "Fetched word");
                return Ok(word.to_lowercase());
            }
            Ok(word) => {
                warn!(attempt, length = word.chars().count(), "Word rejected, retrying");
            }
            Err(e) => {
                warn!(attempt, error = %e, "Word fetch failed, retrying");
            }
        }
    }

    warn!(attempts, "Giving up on word fetch");
    Err(WordSourceError::new(WordSourceErrorKind::Exhausted(attempts)))
}

/// What went wrong while fetching a word.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WordSourceErrorKind {
    /// Network failure, timeout or non-success status.
    #[display("request failed: {}", _0)]
    Request(String),

    /// The response was not a JSON array of words.
    #[display("malformed response: {}", _0)]
    Malformed(String),

    /// The word did not fit the requested length range.
    #[display("word {:?} is outside {} letters", word, range)]
    OutOfRange {
        /// The word received.
        word: String,
        /// The range requested.
        range: LengthRange,
    },

    /// Every attempt failed.
    #[display("no usable word after {} attempts", _0)]
    Exhausted(u32),
}

/// Word source error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Word source error: {} at {}:{}", kind, file, line)]
pub struct WordSourceError {
    /// What went wrong.
    pub kind: WordSourceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl WordSourceError {
    /// Creates a new word source error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: WordSourceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns true when retries were used up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, WordSourceErrorKind::Exhausted(_))
    }
}
