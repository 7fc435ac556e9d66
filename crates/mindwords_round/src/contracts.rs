//! Contract-based validation for player actions.
//!
//! Callers are expected to validate input before it reaches the engine;
//! these contracts let them do so with the same rules the engine enforces.

use super::invariants::RoundInvariants;
use super::{Round, RoundError};
use tracing::{instrument, warn};

/// Precondition: a guess contains letters only.
pub struct GuessIsAlphabetic;

impl GuessIsAlphabetic {
    /// Checks the guess characters.
    #[instrument]
    pub fn check(candidate: &str) -> Result<(), RoundError> {
        if !candidate.is_empty() && candidate.chars().all(char::is_alphabetic) {
            Ok(())
        } else {
            Err(RoundError::NonAlphabeticGuess(candidate.to_string()))
        }
    }
}

/// Precondition: a guess has the same length as the answer.
pub struct GuessMatchesLength;

impl GuessMatchesLength {
    /// Checks the guess length against the mask length.
    #[instrument]
    pub fn check(candidate: &str, expected: usize) -> Result<(), RoundError> {
        let actual = candidate.chars().count();
        if actual == expected {
            Ok(())
        } else {
            Err(RoundError::GuessLengthMismatch { expected, actual })
        }
    }
}

/// Contract for full-word guesses.
///
/// Preconditions:
/// - Guess contains letters only
/// - Guess length equals the answer length
///
/// Postconditions:
/// - All round invariants hold
pub struct GuessContract;

impl GuessContract {
    /// Checks preconditions before a guess is scored.
    #[instrument(skip(round))]
    pub fn pre(round: &Round, candidate: &str) -> Result<(), RoundError> {
        GuessIsAlphabetic::check(candidate)?;
        GuessMatchesLength::check(candidate, round.len())?;
        Ok(())
    }

    /// Checks postconditions after any action.
    #[instrument(skip(round))]
    pub fn post(round: &Round) -> Result<(), RoundError> {
        RoundInvariants::check_all(round).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Round invariant violated");
            RoundError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
