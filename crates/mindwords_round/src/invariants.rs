//! First-class invariants for a round.
//!
//! Each invariant is a logical property that must hold after every action.
//! They are checked in debug builds and can be tested independently.

use super::{Round, RoundRules};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariant: `0 <= score <= min(starting_score, 100)`.
pub struct ScoreBounded;

impl Invariant<Round> for ScoreBounded {
    fn holds(round: &Round) -> bool {
        round.score() <= round.rules().starting_score
            && round.score() <= RoundRules::STARTING_SCORE
    }

    fn description() -> &'static str {
        "Score stays within [0, starting score] and never exceeds 100"
    }
}

/// Invariant: `0 <= tries <= max_tries`.
pub struct TriesBounded;

impl Invariant<Round> for TriesBounded {
    fn holds(round: &Round) -> bool {
        round.tries() <= round.rules().max_tries
    }

    fn description() -> &'static str {
        "Tries never exceed the try budget"
    }
}

/// Invariant: every revealed index points into the answer.
pub struct RevealedInBounds;

impl Invariant<Round> for RevealedInBounds {
    fn holds(round: &Round) -> bool {
        let len = round.len();
        round.revealed_positions().iter().all(|&i| i < len)
    }

    fn description() -> &'static str {
        "Revealed positions lie inside the answer"
    }
}

/// Invariant: the hint can only have been granted after it unlocked.
pub struct HintRequiresUnlock;

impl Invariant<Round> for HintRequiresUnlock {
    fn holds(round: &Round) -> bool {
        !round.hint_used() || round.tries() >= round.rules().hint_unlock_tries
    }

    fn description() -> &'static str {
        "Hint is only used once unlocked"
    }
}

/// Invariant: a won round shows the whole answer.
pub struct WonRevealsAll;

impl Invariant<Round> for WonRevealsAll {
    fn holds(round: &Round) -> bool {
        round.phase() != super::RoundPhase::Won || round.revealed_positions().len() == round.len()
    }

    fn description() -> &'static str {
        "A won round has every position revealed"
    }
}

/// All round invariants, checked together.
pub struct RoundInvariants;

impl RoundInvariants {
    /// Checks every invariant, collecting all violations.
    pub fn check_all(round: &Round) -> Result<(), Vec<InvariantViolation>> {
        let checks: [(bool, &'static str); 5] = [
            (ScoreBounded::holds(round), ScoreBounded::description()),
            (TriesBounded::holds(round), TriesBounded::description()),
            (RevealedInBounds::holds(round), RevealedInBounds::description()),
            (HintRequiresUnlock::holds(round), HintRequiresUnlock::description()),
            (WonRevealsAll::holds(round), WonRevealsAll::description()),
        ];

        let violations: Vec<_> = checks
            .iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, description)| InvariantViolation::new(*description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_round_holds() {
        let round = Round::new("hello").unwrap();
        assert!(RoundInvariants::check_all(&round).is_ok());
    }

    #[test]
    fn test_score_overflow_violates() {
        let mut round = Round::new("hello").unwrap();
        round.score = 101;
        assert!(!ScoreBounded::holds(&round));
    }

    #[test]
    fn test_score_above_hundred_violates_with_generous_rules() {
        let mut round = Round::new("hello").unwrap();
        round.rules.starting_score = 150;
        round.score = 150;
        assert!(!ScoreBounded::holds(&round));
    }

    #[test]
    fn test_tries_overflow_violates() {
        let mut round = Round::new("hello").unwrap();
        round.tries = 11;
        assert!(!TriesBounded::holds(&round));
    }

    #[test]
    fn test_out_of_bounds_reveal_violates() {
        let mut round = Round::new("hello").unwrap();
        round.revealed.insert(5);
        let violations = RoundInvariants::check_all(&round).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, RevealedInBounds::description());
    }

    #[test]
    fn test_early_hint_violates() {
        let mut round = Round::new("hello").unwrap();
        round.hint_used = true;
        assert!(!HintRequiresUnlock::holds(&round));
    }
}
