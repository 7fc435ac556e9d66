//! Scoring constants for a round.

use serde::{Deserialize, Serialize};

/// Scoring and gating rules applied by a [`Round`](crate::Round).
///
/// The defaults are the shipped game rules: start at 100, lose 10 per wrong
/// full-word guess, lose 5 per clue, at most 10 guesses, hint after 5 guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRules {
    /// Wrong full-word guesses allowed before the round is lost.
    pub max_tries: u32,
    /// Score at the start of the round; also the upper bound of the score.
    pub starting_score: u32,
    /// Points lost on a wrong full-word guess.
    pub wrong_guess_penalty: u32,
    /// Points lost on any clue (letter count, length, hint).
    pub clue_penalty: u32,
    /// Wrong guesses required before the hint unlocks.
    pub hint_unlock_tries: u32,
}

impl RoundRules {
    /// Default number of wrong guesses per round.
    pub const MAX_TRIES: u32 = 10;
    /// Default starting score.
    pub const STARTING_SCORE: u32 = 100;
    /// Default wrong-guess penalty.
    pub const WRONG_GUESS_PENALTY: u32 = 10;
    /// Default clue penalty.
    pub const CLUE_PENALTY: u32 = 5;
    /// Default hint unlock threshold.
    pub const HINT_UNLOCK_TRIES: u32 = 5;

    /// Returns the default rules with a different try budget.
    pub fn with_max_tries(max_tries: u32) -> Self {
        Self {
            max_tries,
            ..Self::default()
        }
    }
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            max_tries: Self::MAX_TRIES,
            starting_score: Self::STARTING_SCORE,
            wrong_guess_penalty: Self::WRONG_GUESS_PENALTY,
            clue_penalty: Self::CLUE_PENALTY,
            hint_unlock_tries: Self::HINT_UNLOCK_TRIES,
        }
    }
}
