//! The round state machine.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::clues::{HintOutcome, LengthClue, LetterCount};
use super::contracts::GuessContract;
use super::mask::Mask;
use super::phases::{RoundOutcome, RoundPhase};
use super::rules::RoundRules;
use super::RoundError;

/// One play instance bound to a single secret word.
///
/// Holds the whole round state explicitly: score, wrong-guess count,
/// revealed positions and the hint flag. Full-word guesses are the only
/// action that consumes the try budget; clues only cost score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub(crate) answer: String,
    pub(crate) rules: RoundRules,
    pub(crate) score: u32,
    pub(crate) tries: u32,
    pub(crate) revealed: BTreeSet<usize>,
    pub(crate) hint_used: bool,
    pub(crate) phase: RoundPhase,
}

impl Round {
    /// Creates a round with the default rules.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::EmptyAnswer`] or [`RoundError::InvalidAnswer`]
    /// if the answer is not a non-empty run of letters.
    #[instrument(skip_all)]
    pub fn new(answer: &str) -> Result<Self, RoundError> {
        Self::with_rules(answer, RoundRules::default())
    }

    /// Creates a round with custom rules.
    ///
    /// A try budget of zero is raised to one so the first wrong guess ends
    /// the round. The starting score is capped at
    /// [`RoundRules::STARTING_SCORE`].
    #[instrument(skip_all)]
    pub fn with_rules(answer: &str, rules: RoundRules) -> Result<Self, RoundError> {
        let answer: String = answer.chars().flat_map(char::to_lowercase).collect();
        if answer.is_empty() {
            return Err(RoundError::EmptyAnswer);
        }
        if !answer.chars().all(char::is_alphabetic) {
            return Err(RoundError::InvalidAnswer(answer));
        }

        let rules = RoundRules {
            max_tries: rules.max_tries.max(1),
            starting_score: rules.starting_score.min(RoundRules::STARTING_SCORE),
            ..rules
        };

        debug!(length = answer.chars().count(), max_tries = rules.max_tries, "Creating round");
        Ok(Self {
            answer,
            score: rules.starting_score,
            rules,
            tries: 0,
            revealed: BTreeSet::new(),
            hint_used: false,
            phase: RoundPhase::Active,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Wrong full-word guesses so far.
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Wrong guesses left before the round is lost.
    pub fn tries_left(&self) -> u32 {
        self.rules.max_tries.saturating_sub(self.tries)
    }

    /// The rules this round is scored with.
    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns true once the hint has been granted.
    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    /// Indices whose letters are disclosed.
    pub fn revealed_positions(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    /// Number of letters in the answer.
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    /// Always false; a round cannot be built from an empty answer.
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// Returns true when the score has been drained to zero.
    ///
    /// The engine does not end the round on its own; the session treats this
    /// as a forced restart.
    pub fn score_exhausted(&self) -> bool {
        self.score == 0
    }

    /// Lowercased answer for the tip lookup.
    pub fn answer_for_tip(&self) -> &str {
        &self.answer
    }

    /// The answer, once the round has finished.
    pub fn answer(&self) -> Option<&str> {
        self.phase.is_terminal().then_some(self.answer.as_str())
    }

    /// Produces the player-visible mask.
    pub fn mask(&self) -> Mask {
        Mask::new(
            self.answer
                .chars()
                .enumerate()
                .map(|(i, c)| self.revealed.contains(&i).then_some(c))
                .collect(),
        )
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Scores a full-word guess.
    ///
    /// A correct guess (case-insensitive) reveals everything and wins
    /// without touching the score. A wrong guess costs a try and the
    /// wrong-guess penalty before the try budget is checked, so the last
    /// wrong guess is both penalized and terminal.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::RoundOver`] on a finished round and a contract
    /// error if the guess is not letters-only with the answer's length.
    #[instrument(skip(self), fields(tries = self.tries, score = self.score))]
    pub fn guess(&mut self, candidate: &str) -> Result<RoundOutcome, RoundError> {
        self.ensure_active()?;
        GuessContract::pre(self, candidate)?;

        let matches = candidate
            .chars()
            .flat_map(char::to_lowercase)
            .eq(self.answer.chars());

        if matches {
            self.revealed.extend(0..self.len());
            self.phase = RoundPhase::Won;
            info!(score = self.score, tries = self.tries, "Round won");
            self.verify()?;
            return Ok(RoundOutcome::Win);
        }

        self.tries += 1;
        self.charge(self.rules.wrong_guess_penalty);

        let outcome = if self.tries >= self.rules.max_tries {
            self.phase = RoundPhase::LostOutOfTries;
            info!(score = self.score, "Round lost, out of tries");
            RoundOutcome::OutOfTries {
                answer: self.answer.clone(),
            }
        } else {
            debug!(tries = self.tries, score = self.score, "Wrong guess");
            RoundOutcome::Continue
        };

        self.verify()?;
        Ok(outcome)
    }

    /// Counts occurrences of a letter and reveals each match.
    ///
    /// Costs the clue penalty whether or not the letter occurs. Does not
    /// consume a try.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn letter_count(&mut self, letter: char) -> Result<LetterCount, RoundError> {
        self.ensure_active()?;
        if !letter.is_alphabetic() {
            return Err(RoundError::NonAlphabeticLetter(letter));
        }
        let letter = letter.to_lowercase().next().unwrap_or(letter);

        let positions: Vec<usize> = self
            .answer
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == letter)
            .map(|(i, _)| i)
            .collect();
        self.revealed.extend(positions.iter().copied());
        self.charge(self.rules.clue_penalty);

        debug!(%letter, count = positions.len(), score = self.score, "Letter count clue");
        self.verify()?;
        Ok(LetterCount {
            letter,
            count: positions.len(),
        })
    }

    /// Returns the answer length for the clue penalty. Does not consume a try.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn length_clue(&mut self) -> Result<LengthClue, RoundError> {
        self.ensure_active()?;
        self.charge(self.rules.clue_penalty);
        debug!(score = self.score, "Length clue");
        self.verify()?;
        Ok(LengthClue { length: self.len() })
    }

    /// Grants the one-time hint using the thread-local random source.
    pub fn hint_letter(&mut self) -> Result<HintOutcome, RoundError> {
        self.hint_letter_with(&mut rand::thread_rng())
    }

    /// Grants the one-time hint, picking the position with `rng`.
    ///
    /// Refusals (not unlocked, already used, nothing hidden) leave the
    /// round untouched.
    #[instrument(skip(self, rng), fields(tries = self.tries, hint_used = self.hint_used))]
    pub fn hint_letter_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<HintOutcome, RoundError> {
        self.ensure_active()?;

        if self.tries < self.rules.hint_unlock_tries {
            return Ok(HintOutcome::NotUnlocked {
                unlock_tries: self.rules.hint_unlock_tries,
            });
        }
        if self.hint_used {
            return Ok(HintOutcome::AlreadyUsed);
        }

        let hidden: Vec<(usize, char)> = self
            .answer
            .chars()
            .enumerate()
            .filter(|(i, _)| !self.revealed.contains(i))
            .collect();
        let Some(&(index, letter)) = hidden.choose(rng) else {
            return Ok(HintOutcome::NothingToReveal);
        };

        self.revealed.insert(index);
        self.hint_used = true;
        self.charge(self.rules.clue_penalty);

        info!(index, score = self.score, "Hint granted");
        self.verify()?;
        Ok(HintOutcome::Revealed { index, letter })
    }

    /// Re-checks all invariants, e.g. after deserializing a snapshot.
    pub fn check_invariants(&self) -> Result<(), RoundError> {
        GuessContract::post(self)
    }

    fn ensure_active(&self) -> Result<(), RoundError> {
        if self.phase.is_terminal() {
            return Err(RoundError::RoundOver);
        }
        Ok(())
    }

    fn charge(&mut self, penalty: u32) {
        self.score = self.score.saturating_sub(penalty);
    }

    #[cfg(debug_assertions)]
    fn verify(&self) -> Result<(), RoundError> {
        GuessContract::post(self)
    }

    #[cfg(not(debug_assertions))]
    fn verify(&self) -> Result<(), RoundError> {
        Ok(())
    }
}
