//! Session controller: sequences rounds and keeps cross-round progress.
//!
//! The session never talks to the network. It hands out [`WordRequest`]s
//! tagged with a generation and accepts the results through
//! [`Session::receive_word`], discarding anything from a superseded
//! generation.

use std::time::Instant;

use mindwords_round::{
    HintOutcome, LengthClue, LetterCount, Round, RoundError, RoundOutcome, RoundRules,
};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::services::{WordSourceError, sanitize_name};
use crate::{LengthRange, Level, LocalStore};

/// A request for a new secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRequest {
    /// Generation the result must be delivered with.
    pub generation: u64,
    /// Accepted word lengths.
    pub range: LengthRange,
}

/// Where the session is between rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No word requested yet.
    Idle,
    /// Waiting for the word of `generation`.
    Loading {
        /// Generation of the outstanding request.
        generation: u64,
    },
    /// A round is in progress.
    Playing(Round),
    /// The word source gave up; waiting for an explicit retry.
    LoadFailed {
        /// Player-facing reason.
        reason: String,
    },
}

/// Result of delivering a word to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordDelivery {
    /// A new round started.
    Started,
    /// The result belonged to a superseded request and was dropped.
    Stale,
    /// No usable word; the session is in [`SessionPhase::LoadFailed`].
    Failed,
}

/// Something the player should be told after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Wrong guess, round continues.
    Missed {
        /// Score after the penalty.
        score: u32,
        /// Wrong guesses left.
        tries_left: u32,
    },
    /// The word was guessed.
    Solved {
        /// Points banked from this round.
        score: u32,
        /// Level reached.
        level: Level,
        /// Running total after banking.
        total: u64,
    },
    /// Out of tries; the answer is shown.
    Revealed {
        /// The answer.
        answer: String,
    },
    /// Score hit zero; a new round is forced without revealing the answer.
    ScoreExhausted,
    /// Letter count clue.
    Clue(LetterCount),
    /// Length clue.
    LengthClue(LengthClue),
    /// Outcome of a hint request.
    Hint(HintOutcome),
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Missed { .. } => write!(f, "Nope. Keep trying…"),
            SessionEvent::Solved { score, .. } => write!(f, "Correct! +{}", score),
            SessionEvent::Revealed { answer } => {
                write!(f, "Out of tries. It was {}", answer.to_uppercase())
            }
            SessionEvent::ScoreExhausted => write!(f, "Score reached 0. New word…"),
            SessionEvent::Clue(clue) => write!(f, "{}", clue),
            SessionEvent::LengthClue(clue) => write!(f, "{}", clue),
            SessionEvent::Hint(outcome) => write!(f, "{}", outcome),
        }
    }
}

/// Everything an action produced: messages in order, plus the word request
/// to issue when the round ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Turn {
    /// Events for the player.
    pub events: Vec<SessionEvent>,
    /// Follow-up request when a new round must be fetched.
    pub next: Option<WordRequest>,
}

impl Turn {
    fn single(event: SessionEvent) -> Self {
        Self {
            events: vec![event],
            next: None,
        }
    }

    /// Returns true if the round ended and a new word is needed.
    pub fn restarts(&self) -> bool {
        self.next.is_some()
    }
}

/// Session error.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum SessionError {
    /// The action needs a round in progress.
    #[display("No active round")]
    NoActiveRound,
    /// Retry is only possible after a failed load.
    #[display("Nothing to retry")]
    NotFailed,
    /// The round engine rejected the action.
    #[display("{}", _0)]
    #[from]
    Round(#[error(source)] RoundError),
}

/// Cross-round progress for one player.
#[derive(Debug)]
pub struct Session<S: LocalStore> {
    player: String,
    level: Level,
    total: u64,
    solved: u32,
    generation: u64,
    phase: SessionPhase,
    rules: RoundRules,
    store: S,
    round_started: Instant,
}

impl<S: LocalStore> Session<S> {
    /// Creates a session, restoring the player name and level from `store`.
    ///
    /// Unreadable preferences fall back to defaults.
    #[instrument(skip(store, rules))]
    pub fn new(store: S, rules: RoundRules) -> Self {
        let player = store.load_name().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load player name");
            None
        });
        let level = store.load_level().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load level");
            Level::FIRST
        });

        info!(%level, has_name = player.is_some(), "Session created");
        Self {
            player: player.unwrap_or_default(),
            level,
            total: 0,
            solved: 0,
            generation: 0,
            phase: SessionPhase::Idle,
            rules,
            store,
            round_started: Instant::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Player name, possibly empty.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Current level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Sum of banked round scores.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Rounds won.
    pub fn solved(&self) -> u32 {
        self.solved
    }

    /// Generation of the latest word request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The round in progress, if any.
    pub fn round(&self) -> Option<&Round> {
        match &self.phase {
            SessionPhase::Playing(round) => Some(round),
            _ => None,
        }
    }

    /// Rules new rounds are created with.
    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whole seconds since the current round started.
    pub fn elapsed_seconds(&self) -> u64 {
        self.round_started.elapsed().as_secs()
    }

    // ─────────────────────────────────────────────────────────────
    //  Loading
    // ─────────────────────────────────────────────────────────────

    /// Supersedes any outstanding request and asks for a word at the
    /// current level.
    #[instrument(skip(self), fields(level = %self.level))]
    pub fn request_word(&mut self) -> WordRequest {
        self.generation += 1;
        self.phase = SessionPhase::Loading {
            generation: self.generation,
        };
        let request = WordRequest {
            generation: self.generation,
            range: self.level.length_range(),
        };
        debug!(generation = request.generation, range = %request.range, "Word requested");
        request
    }

    /// Delivers the result of a word request.
    #[instrument(skip(self, result), fields(current = self.generation, ok = result.is_ok()))]
    pub fn receive_word(
        &mut self,
        generation: u64,
        result: Result<String, WordSourceError>,
    ) -> WordDelivery {
        let expected = matches!(
            self.phase,
            SessionPhase::Loading { generation: g } if g == generation
        );
        if !expected {
            debug!(generation, "Discarding stale word");
            return WordDelivery::Stale;
        }

        let round = result
            .map_err(|e| e.to_string())
            .and_then(|word| Round::with_rules(&word, self.rules).map_err(|e| e.to_string()));

        match round {
            Ok(round) => {
                info!(generation, length = round.len(), "Round started");
                self.phase = SessionPhase::Playing(round);
                self.round_started = Instant::now();
                WordDelivery::Started
            }
            Err(reason) => {
                warn!(generation, %reason, "Word load failed");
                self.phase = SessionPhase::LoadFailed { reason };
                WordDelivery::Failed
            }
        }
    }

    /// Restarts loading after a failure.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFailed`] unless the last load failed.
    #[instrument(skip(self))]
    pub fn retry(&mut self) -> Result<WordRequest, SessionError> {
        if !matches!(self.phase, SessionPhase::LoadFailed { .. }) {
            return Err(SessionError::NotFailed);
        }
        Ok(self.request_word())
    }

    /// Abandons the current round, if any, without touching the counters.
    #[instrument(skip(self))]
    pub fn skip(&mut self) -> WordRequest {
        info!("Round skipped");
        self.request_word()
    }

    // ─────────────────────────────────────────────────────────────
    //  Player actions
    // ─────────────────────────────────────────────────────────────

    /// Forwards a full-word guess and reacts to the outcome.
    ///
    /// The caller validates the guess first; see
    /// [`mindwords_round::GuessContract`].
    #[instrument(skip(self))]
    pub fn guess(&mut self, candidate: &str) -> Result<Turn, SessionError> {
        let round = self.round_mut()?;
        let outcome = round.guess(candidate)?;
        let score = round.score();
        let tries_left = round.tries_left();

        match outcome {
            RoundOutcome::Win => Ok(self.bank_win(score)),
            RoundOutcome::OutOfTries { answer } => {
                info!("Out of tries");
                Ok(Turn {
                    events: vec![SessionEvent::Revealed { answer }],
                    next: Some(self.request_word()),
                })
            }
            RoundOutcome::Continue => Ok(self.check_exhausted(Turn::single(
                SessionEvent::Missed { score, tries_left },
            ))),
        }
    }

    /// Forwards a letter-count clue.
    #[instrument(skip(self))]
    pub fn letter_count(&mut self, letter: char) -> Result<Turn, SessionError> {
        let clue = self.round_mut()?.letter_count(letter)?;
        Ok(self.check_exhausted(Turn::single(SessionEvent::Clue(clue))))
    }

    /// Forwards a length clue.
    #[instrument(skip(self))]
    pub fn length_clue(&mut self) -> Result<Turn, SessionError> {
        let clue = self.round_mut()?.length_clue()?;
        Ok(self.check_exhausted(Turn::single(SessionEvent::LengthClue(clue))))
    }

    /// Forwards a hint request.
    pub fn hint(&mut self) -> Result<Turn, SessionError> {
        self.hint_with(&mut rand::thread_rng())
    }

    /// Forwards a hint request, picking the position with `rng`.
    #[instrument(skip(self, rng))]
    pub fn hint_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Turn, SessionError> {
        let outcome = self.round_mut()?.hint_letter_with(rng)?;
        Ok(self.check_exhausted(Turn::single(SessionEvent::Hint(outcome))))
    }

    /// Changes the player name, persisting the sanitized form.
    #[instrument(skip(self))]
    pub fn set_player(&mut self, name: &str) -> &str {
        self.player = sanitize_name(name);
        if let Err(e) = self.store.save_name(&self.player) {
            warn!(error = %e, "Failed to persist player name");
        }
        &self.player
    }

    fn round_mut(&mut self) -> Result<&mut Round, SessionError> {
        match &mut self.phase {
            SessionPhase::Playing(round) => Ok(round),
            _ => Err(SessionError::NoActiveRound),
        }
    }

    fn bank_win(&mut self, score: u32) -> Turn {
        self.total += u64::from(score);
        self.solved += 1;
        self.level = self.level.next();
        if let Err(e) = self.store.save_level(self.level) {
            warn!(error = %e, "Failed to persist level");
        }

        info!(score, total = self.total, level = %self.level, "Round solved");
        Turn {
            events: vec![SessionEvent::Solved {
                score,
                level: self.level,
                total: self.total,
            }],
            next: Some(self.request_word()),
        }
    }

    /// Forces a new round when the score has been drained.
    fn check_exhausted(&mut self, mut turn: Turn) -> Turn {
        if self.round().is_some_and(Round::score_exhausted) {
            info!("Score exhausted, forcing new round");
            turn.events.push(SessionEvent::ScoreExhausted);
            turn.next = Some(self.request_word());
        }
        turn
    }
}
