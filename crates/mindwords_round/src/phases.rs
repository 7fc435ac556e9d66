//! Round phases and guess outcomes.

use serde::{Deserialize, Serialize};

/// Phase of a round's state machine.
///
/// `Won` and `LostOutOfTries` are terminal: once reached, every further
/// action on the round is rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoundPhase {
    /// Round accepts guesses and clues.
    #[default]
    Active,
    /// The answer was guessed.
    Won,
    /// The try budget ran out.
    LostOutOfTries,
}

impl RoundPhase {
    /// Returns true for `Won` and `LostOutOfTries`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundPhase::Active)
    }
}

/// Result of a full-word guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Wrong guess, round continues.
    Continue,
    /// Correct guess, every position is revealed.
    Win,
    /// Wrong guess that exhausted the try budget. Carries the answer so the
    /// caller can show it.
    OutOfTries {
        /// The secret word.
        answer: String,
    },
}

impl RoundOutcome {
    /// Returns true if the round must now be discarded.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::Continue)
    }
}
