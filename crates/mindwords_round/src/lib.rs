//! Round scoring and guess-resolution engine for mindwords.
//!
//! A [`Round`] tracks one secret word, a score that only goes down, a
//! bounded budget of wrong full-word guesses, the set of revealed letter
//! positions, and a one-time hint. Player actions return structured
//! outcomes; presentation is left to callers.
//!
//! # Example
//!
//! ```
//! use mindwords_round::{Round, RoundOutcome};
//!
//! let mut round = Round::new("hello").unwrap();
//! let clue = round.letter_count('l').unwrap();
//! assert_eq!(clue.count, 2);
//! assert_eq!(round.mask().to_string(), "••ll•");
//! assert_eq!(round.guess("HELLO").unwrap(), RoundOutcome::Win);
//! assert_eq!(round.score(), 95);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clues;
mod contracts;
mod error;
mod invariants;
mod mask;
mod phases;
mod round;
mod rules;

pub use clues::{HintOutcome, LengthClue, LetterCount};
pub use contracts::{GuessContract, GuessIsAlphabetic, GuessMatchesLength};
pub use error::RoundError;
pub use invariants::{
    HintRequiresUnlock, Invariant, InvariantViolation, RevealedInBounds, RoundInvariants,
    ScoreBounded, TriesBounded, WonRevealsAll,
};
pub use mask::Mask;
pub use phases::{RoundOutcome, RoundPhase};
pub use round::Round;
pub use rules::RoundRules;
