//! Async glue between the session and its remote collaborators.
//!
//! Word and tip lookups run as tokio tasks. Their results come back over an
//! unbounded channel tagged with the generation they were issued for, and
//! [`GameDriver::apply`] drops anything that no longer matches the session.

use std::sync::Arc;

use mindwords_round::HintOutcome;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::services::{
    Leaderboard, LeaderboardError, ScoreRow, Tip, TipSource, WordSource, WordSourceError,
    fetch_word_with_retries, sanitize_name,
};
use crate::session::{Session, SessionError, SessionEvent, Turn, WordDelivery, WordRequest};
use crate::LocalStore;

/// Result of a background task.
#[derive(Debug)]
pub enum DriverMessage {
    /// A word fetch finished.
    Word {
        /// Generation the fetch was issued for.
        generation: u64,
        /// Fetched word or the reason there is none.
        result: Result<String, WordSourceError>,
    },
    /// A tip lookup finished.
    Tip {
        /// Generation the lookup was issued for.
        generation: u64,
        /// The tip.
        tip: Tip,
    },
}

/// What applying a background result changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The result belonged to a superseded round and was dropped.
    Stale,
    /// A new round started.
    RoundStarted,
    /// The word could not be loaded.
    LoadFailed,
    /// A tip for the current round arrived.
    Tip(Tip),
}

/// Runs a [`Session`] against remote services.
pub struct GameDriver<S: LocalStore> {
    session: Session<S>,
    words: Arc<dyn WordSource>,
    tips: Arc<dyn TipSource>,
    leaderboard: Arc<dyn Leaderboard>,
    word_attempts: u32,
    tx: mpsc::UnboundedSender<DriverMessage>,
}

impl<S: LocalStore> GameDriver<S> {
    /// Creates a driver and the receiver its background results arrive on.
    #[instrument(skip(session, words, tips, leaderboard))]
    pub fn new(
        session: Session<S>,
        words: Arc<dyn WordSource>,
        tips: Arc<dyn TipSource>,
        leaderboard: Arc<dyn Leaderboard>,
        word_attempts: u32,
    ) -> (Self, mpsc::UnboundedReceiver<DriverMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        info!("Creating GameDriver");
        (
            Self {
                session,
                words,
                tips,
                leaderboard,
                word_attempts,
                tx,
            },
            rx,
        )
    }

    /// The driven session.
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Mutable access to the driven session.
    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    /// Requests the first word.
    pub fn start(&mut self) {
        let request = self.session.request_word();
        self.fetch_word(request);
    }

    /// Abandons the current round and fetches another.
    pub fn skip(&mut self) {
        let request = self.session.skip();
        self.fetch_word(request);
    }

    /// Retries a failed load.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        let request = self.session.retry()?;
        self.fetch_word(request);
        Ok(())
    }

    /// Full-word guess.
    pub fn guess(&mut self, candidate: &str) -> Result<Turn, SessionError> {
        let turn = self.session.guess(candidate)?;
        Ok(self.follow_up(turn))
    }

    /// Letter-count clue.
    pub fn letter_count(&mut self, letter: char) -> Result<Turn, SessionError> {
        let turn = self.session.letter_count(letter)?;
        Ok(self.follow_up(turn))
    }

    /// Length clue.
    pub fn length_clue(&mut self) -> Result<Turn, SessionError> {
        let turn = self.session.length_clue()?;
        Ok(self.follow_up(turn))
    }

    /// Hint. A granted hint also starts a tip lookup for the same round.
    #[instrument(skip(self))]
    pub fn hint(&mut self) -> Result<Turn, SessionError> {
        let tip_word = self
            .session
            .round()
            .map(|r| r.answer_for_tip().to_string());
        let generation = self.session.generation();

        let turn = self.session.hint()?;
        let granted = turn
            .events
            .iter()
            .any(|e| matches!(e, SessionEvent::Hint(HintOutcome::Revealed { .. })));
        if granted
            && !turn.restarts()
            && let Some(word) = tip_word
        {
            self.fetch_tip(generation, word);
        }
        Ok(self.follow_up(turn))
    }

    /// Applies a background result to the session.
    #[instrument(skip(self, message))]
    pub fn apply(&mut self, message: DriverMessage) -> Applied {
        match message {
            DriverMessage::Word { generation, result } => {
                match self.session.receive_word(generation, result) {
                    WordDelivery::Started => Applied::RoundStarted,
                    WordDelivery::Stale => Applied::Stale,
                    WordDelivery::Failed => Applied::LoadFailed,
                }
            }
            DriverMessage::Tip { generation, tip } => {
                if generation == self.session.generation() && self.session.round().is_some() {
                    Applied::Tip(tip)
                } else {
                    debug!(generation, "Discarding stale tip");
                    Applied::Stale
                }
            }
        }
    }

    /// Submits the session total with the seconds spent on the current
    /// round.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<String, LeaderboardError> {
        let name = sanitize_name(self.session.player());
        let total = self.session.total();
        let seconds = self.session.elapsed_seconds();
        self.leaderboard.submit_score(&name, total, seconds).await?;
        Ok(name)
    }

    /// Fetches the top of the leaderboard.
    pub async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRow>, LeaderboardError> {
        self.leaderboard.top_scores(limit).await
    }

    fn follow_up(&self, turn: Turn) -> Turn {
        if let Some(request) = turn.next {
            self.fetch_word(request);
        }
        turn
    }

    #[instrument(skip(self))]
    fn fetch_word(&self, request: WordRequest) {
        let words = Arc::clone(&self.words);
        let tx = self.tx.clone();
        let attempts = self.word_attempts;
        tokio::spawn(async move {
            let result = fetch_word_with_retries(words.as_ref(), request.range, attempts).await;
            if tx
                .send(DriverMessage::Word {
                    generation: request.generation,
                    result,
                })
                .is_err()
            {
                warn!(generation = request.generation, "Driver gone, dropping word");
            }
        });
    }

    #[instrument(skip(self, word))]
    fn fetch_tip(&self, generation: u64, word: String) {
        let tips = Arc::clone(&self.tips);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let tip = tips.tip_for(&word).await;
            if tx.send(DriverMessage::Tip { generation, tip }).is_err() {
                warn!(generation, "Driver gone, dropping tip");
            }
        });
    }
}
