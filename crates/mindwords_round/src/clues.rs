//! Clue results returned by the round engine.
//!
//! Each result carries structured data for callers and renders the player
//! message through `Display`.

use serde::{Deserialize, Serialize};

/// Result of a letter-count clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LetterCount {
    /// The letter asked about, lowercased.
    pub letter: char,
    /// How many times it occurs in the answer.
    pub count: usize,
}

impl std::fmt::Display for LetterCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.letter.to_ascii_uppercase();
        match self.count {
            0 => write!(f, "No '{}' here.", shown),
            1 => write!(f, "There is 1 '{}'.", shown),
            n => write!(f, "There are {} '{}'.", n, shown),
        }
    }
}

/// Result of a length clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LengthClue {
    /// Number of letters in the answer.
    pub length: usize,
}

impl std::fmt::Display for LengthClue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "It has {} letters.", self.length)
    }
}

/// Result of asking for the one-time hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintOutcome {
    /// One position was revealed and the score was charged.
    Revealed {
        /// Zero-based position in the answer.
        index: usize,
        /// Letter at that position.
        letter: char,
    },
    /// Not enough wrong guesses yet.
    NotUnlocked {
        /// Wrong guesses required before the hint unlocks.
        unlock_tries: u32,
    },
    /// The hint was already granted this round.
    AlreadyUsed,
    /// Every position is already revealed.
    NothingToReveal,
}

impl HintOutcome {
    /// Returns true if the hint was granted.
    pub fn is_revealed(&self) -> bool {
        matches!(self, HintOutcome::Revealed { .. })
    }
}

impl std::fmt::Display for HintOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HintOutcome::Revealed { index, letter } => write!(
                f,
                "Revealed: position {} is '{}'.",
                index + 1,
                letter.to_ascii_uppercase()
            ),
            HintOutcome::NotUnlocked { unlock_tries } => {
                write!(f, "Hints unlock after {} guesses.", unlock_tries)
            }
            HintOutcome::AlreadyUsed => write!(f, "Hint already used."),
            HintOutcome::NothingToReveal => write!(f, "Everything's already revealed."),
        }
    }
}
