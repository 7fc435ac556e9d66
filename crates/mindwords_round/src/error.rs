//! Errors produced by the round engine.

/// Error that can occur when creating a round or applying a player action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RoundError {
    /// The secret word is empty.
    #[display("Answer must contain at least one letter")]
    EmptyAnswer,

    /// The secret word contains something other than letters.
    #[display("Answer {:?} must contain letters only", _0)]
    InvalidAnswer(String),

    /// A full-word guess does not have the answer's length.
    #[display("Guess must be {} letters, got {}", expected, actual)]
    GuessLengthMismatch {
        /// Length of the answer.
        expected: usize,
        /// Length of the submitted guess.
        actual: usize,
    },

    /// A full-word guess contains something other than letters.
    #[display("Guess {:?} must contain letters only", _0)]
    NonAlphabeticGuess(String),

    /// A letter clue was requested for a non-letter character.
    #[display("{:?} is not a letter", _0)]
    NonAlphabeticLetter(char),

    /// The round already reached a terminal outcome and must be discarded.
    #[display("Round is already over")]
    RoundOver,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for RoundError {}
