//! Rhyme / similar-word tips.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::TipSource;

/// A tip about the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tip {
    /// A word that rhymes with the answer.
    Rhyme(String),
    /// A word with a similar meaning.
    Similar(String),
    /// Fallback when no lookup succeeded.
    Generic {
        /// Number of letters in the answer.
        length: usize,
    },
}

impl Tip {
    /// The fallback tip for `word`.
    pub fn generic(word: &str) -> Self {
        Tip::Generic {
            length: word.chars().count(),
        }
    }
}

impl std::fmt::Display for Tip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tip::Rhyme(w) => write!(f, "Tip: rhymes with '{}'.", w),
            Tip::Similar(w) => write!(f, "Tip: similar to '{}'.", w),
            Tip::Generic { length } => {
                write!(f, "Tip: think of a common {}-letter noun or verb.", length)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    #[serde(default)]
    word: String,
}

#[derive(Debug, Deserialize)]
struct ThesaurusResponse {
    #[serde(default)]
    synonyms: Vec<String>,
}

/// API Ninjas endpoint and key.
#[derive(Debug, Clone)]
struct NinjasApi {
    base_url: String,
    key: String,
}

/// Tip source backed by Datamuse, optionally preferring API Ninjas.
///
/// Lookup order: Ninjas rhyme, Ninjas thesaurus (only with a key), Datamuse
/// rhyme, Datamuse means-like, then the generic tip.
#[derive(Debug, Clone)]
pub struct DatamuseTipClient {
    http: reqwest::Client,
    datamuse_url: String,
    ninjas: Option<NinjasApi>,
}

impl DatamuseTipClient {
    /// Creates a Datamuse-only client.
    #[instrument(skip(http))]
    pub fn new(http: reqwest::Client, datamuse_url: String) -> Self {
        info!("Creating DatamuseTipClient");
        Self {
            http,
            datamuse_url,
            ninjas: None,
        }
    }

    /// Enables API Ninjas lookups. Blank keys are ignored.
    #[instrument(skip(self, key))]
    pub fn with_ninjas(mut self, base_url: String, key: Option<String>) -> Self {
        self.ninjas = key
            .filter(|k| !k.trim().is_empty())
            .map(|key| NinjasApi { base_url, key });
        debug!(enabled = self.ninjas.is_some(), "API Ninjas lookups");
        self
    }

    fn url(base: &str, path: &str, pairs: &[(&str, &str)]) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}{}", base.trim_end_matches('/'), path)).ok()?;
        url.query_pairs_mut().extend_pairs(pairs);
        Some(url)
    }

    /// GETs `url` and returns the body of a successful response.
    #[instrument(skip_all, fields(host = url.host_str().unwrap_or_default(), path = url.path()))]
    async fn get(&self, url: reqwest::Url, api_key: Option<&str>) -> Option<String> {
        let mut request = self.http.get(url);
        if let Some(key) = api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Tip request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "Tip service returned an error status");
            return None;
        }
        response.text().await.ok()
    }

    #[instrument(skip_all)]
    async fn ninjas_rhyme(&self, ninjas: &NinjasApi, word: &str) -> Option<String> {
        let url = Self::url(&ninjas.base_url, "/v1/rhyme", &[("word", word)])?;
        let body = self.get(url, Some(&ninjas.key)).await?;
        let rhymes: Vec<String> = serde_json::from_str(&body).ok()?;
        rhymes.into_iter().find(|w| usable(w, word))
    }

    #[instrument(skip_all)]
    async fn ninjas_synonym(&self, ninjas: &NinjasApi, word: &str) -> Option<String> {
        let url = Self::url(&ninjas.base_url, "/v1/thesaurus", &[("word", word)])?;
        let body = self.get(url, Some(&ninjas.key)).await?;
        let thesaurus: ThesaurusResponse = serde_json::from_str(&body).ok()?;
        thesaurus.synonyms.into_iter().find(|w| usable(w, word))
    }

    /// Datamuse lookup; `param` is `rel_rhy` for rhymes or `ml` for
    /// means-like.
    #[instrument(skip(self, word))]
    async fn datamuse(&self, param: &str, word: &str) -> Option<String> {
        let url = Self::url(&self.datamuse_url, "/words", &[(param, word), ("max", "5")])?;
        let body = self.get(url, None).await?;
        let words: Vec<DatamuseWord> = serde_json::from_str(&body).ok()?;
        words.into_iter().map(|w| w.word).find(|w| usable(w, word))
    }
}

/// A lookup result is usable if it is not blank and is not the answer.
fn usable(candidate: &str, answer: &str) -> bool {
    !candidate.trim().is_empty() && !candidate.eq_ignore_ascii_case(answer)
}

#[async_trait::async_trait]
impl TipSource for DatamuseTipClient {
    #[instrument(skip(self, word))]
    async fn tip_for(&self, word: &str) -> Tip {
        let word = word.to_lowercase();

        if let Some(ninjas) = &self.ninjas {
            if let Some(rhyme) = self.ninjas_rhyme(ninjas, &word).await {
                return Tip::Rhyme(rhyme);
            }
            if let Some(synonym) = self.ninjas_synonym(ninjas, &word).await {
                return Tip::Similar(synonym);
            }
        }

        if let Some(rhyme) = self.datamuse("rel_rhy", &word).await {
            return Tip::Rhyme(rhyme);
        }
        if let Some(similar) = self.datamuse("ml", &word).await {
            return Tip::Similar(similar);
        }

        debug!("No tip lookups succeeded, using generic tip");
        Tip::generic(&word)
    }
}
