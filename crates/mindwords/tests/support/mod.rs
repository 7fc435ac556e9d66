//! In-process fakes for the remote collaborators.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mindwords::{
    GameDriver, LengthRange, Leaderboard, LeaderboardError, MemoryStore, ScoreRow, Session, Tip,
    TipSource, WordSource, WordSourceError, WordSourceErrorKind,
};
use mindwords_round::RoundRules;

/// Always answers with the same word, or always fails.
pub struct FixedWords(pub Option<String>);

#[async_trait::async_trait]
impl WordSource for FixedWords {
    async fn fetch_random_word(&self, _range: LengthRange) -> Result<String, WordSourceError> {
        self.0.clone().ok_or_else(|| {
            WordSourceError::new(WordSourceErrorKind::Request("offline".to_string()))
        })
    }
}

/// Always rhymes with "yellow".
pub struct FixedTip;

#[async_trait::async_trait]
impl TipSource for FixedTip {
    async fn tip_for(&self, _word: &str) -> Tip {
        Tip::Rhyme("yellow".to_string())
    }
}

/// Records submissions and serves them back.
#[derive(Default)]
pub struct RecordingBoard {
    pub rows: Mutex<Vec<ScoreRow>>,
}

#[async_trait::async_trait]
impl Leaderboard for RecordingBoard {
    async fn submit_score(
        &self,
        name: &str,
        score: u64,
        elapsed_seconds: u64,
    ) -> Result<(), LeaderboardError> {
        self.rows
            .lock()
            .expect("Lock poisoned")
            .push(ScoreRow::new(name.to_string(), score, elapsed_seconds));
        Ok(())
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        let rows = self.rows.lock().expect("Lock poisoned").clone();
        Ok(mindwords::rank_scores(rows, limit))
    }
}

/// A driver over a fresh in-memory session that always serves `word`.
pub fn driver(
    word: Option<&str>,
    board: Arc<RecordingBoard>,
) -> (
    GameDriver<MemoryStore>,
    tokio::sync::mpsc::UnboundedReceiver<mindwords::DriverMessage>,
) {
    let session = Session::new(MemoryStore::new(), RoundRules::default());
    GameDriver::new(
        session,
        Arc::new(FixedWords(word.map(str::to_string))),
        Arc::new(FixedTip),
        board,
        3,
    )
}
