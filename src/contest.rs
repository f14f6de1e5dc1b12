//! Trivia contest protocol types.
//!
//! Battles are decided outside the engine by a quiz round. When an
//! attack reaches a defended territory the engine emits a
//! [`ContestRequest`] tagged with a [`ContestHandle`], suspends the
//! action, and waits for the caller to hand back a [`ScorePair`] for
//! that handle. The engine never talks to a question source itself.

use serde::{Deserialize, Serialize};

use crate::board::player::PlayerId;

/// Upper bound for a single side's contest score.
pub const MAX_SCORE: u8 = 100;

/// The two sides' scores from one quiz round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub attacker: u8,
    pub defender: u8,
}

impl ScorePair {
    /// Synthesized result for an attack on an empty territory.
    pub const WALKOVER: ScorePair = ScorePair {
        attacker: MAX_SCORE,
        defender: 0,
    };

    pub const fn new(attacker: u8, defender: u8) -> Self {
        ScorePair { attacker, defender }
    }

    /// Both sides failed every question.
    pub const fn is_double_zero(self) -> bool {
        self.attacker == 0 && self.defender == 0
    }

    /// Equal nonzero scores still count as a tie.
    pub const fn is_tie(self) -> bool {
        self.attacker == self.defender
    }

    /// True while both sides are at or below [`MAX_SCORE`].
    pub const fn in_range(self) -> bool {
        self.attacker <= MAX_SCORE && self.defender <= MAX_SCORE
    }
}

/// Question difficulty, derived from the size of the committed force.
///
/// Small raiding parties face harder questions than massed assaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Maps the attacker's committed unit count to a difficulty tier.
    pub const fn from_attacker_total(total: u32) -> Difficulty {
        match total {
            0..=2 => Difficulty::Hard,
            3..=4 => Difficulty::Medium,
            _ => Difficulty::Easy,
        }
    }

    /// Returns the lowercase name of this tier.
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque token pairing a contest result with the battle that asked
/// for it. Handles are unique within a match and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContestHandle(pub u64);

impl std::fmt::Display for ContestHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "contest #{}", self.0)
    }
}

/// What the engine asks the quiz provider to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRequest {
    /// Category tied to the attack's dominant troop type.
    pub category: String,
    pub difficulty: Difficulty,
    pub attacker: PlayerId,
    /// None when the target territory is unclaimed.
    pub defender: Option<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_tiers_by_committed_force() {
        assert_eq!(Difficulty::from_attacker_total(0), Difficulty::Hard);
        assert_eq!(Difficulty::from_attacker_total(1), Difficulty::Hard);
        assert_eq!(Difficulty::from_attacker_total(2), Difficulty::Hard);
        assert_eq!(Difficulty::from_attacker_total(3), Difficulty::Medium);
        assert_eq!(Difficulty::from_attacker_total(4), Difficulty::Medium);
        assert_eq!(Difficulty::from_attacker_total(5), Difficulty::Easy);
        assert_eq!(Difficulty::from_attacker_total(40), Difficulty::Easy);
    }

    #[test]
    fn score_pair_predicates() {
        assert!(ScorePair::new(0, 0).is_double_zero());
        assert!(ScorePair::new(0, 0).is_tie());
        assert!(!ScorePair::new(60, 60).is_double_zero());
        assert!(ScorePair::new(60, 60).is_tie());
        assert!(!ScorePair::new(80, 20).is_tie());
    }

    #[test]
    fn walkover_is_a_clean_attacker_win() {
        assert_eq!(ScorePair::WALKOVER.attacker, MAX_SCORE);
        assert_eq!(ScorePair::WALKOVER.defender, 0);
        assert!(!ScorePair::WALKOVER.is_tie());
    }

    #[test]
    fn range_check_honors_max_score() {
        assert!(ScorePair::new(100, 100).in_range());
        assert!(!ScorePair::new(101, 0).in_range());
        assert!(!ScorePair::new(0, 255).in_range());
    }

    #[test]
    fn handles_compare_by_value() {
        assert_eq!(ContestHandle(3), ContestHandle(3));
        assert_ne!(ContestHandle(3), ContestHandle(4));
        assert_eq!(ContestHandle(9).to_string(), "contest #9");
    }
}
