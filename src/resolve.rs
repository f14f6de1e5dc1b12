//! Battle resolution.
//!
//! Turns a contest [`ScorePair`] plus the two engaged forces into
//! surviving forces. The math here is pure: it never touches the map or
//! the players, so the orchestrator can apply the result (ownership,
//! points, eliminations) in one place and tests can pin the numbers
//! directly.
//!
//! Casualty selection samples uniformly from the flattened multiset of
//! units, so a force of 3 infantry and 1 cavalry loses the cavalry with
//! probability 1/4 per casualty, not 1/2.

use rand::Rng;

use crate::board::troops::TroopSet;
use crate::contest::ScorePair;

/// Lower and upper bounds on the winner's survival rate.
const SURVIVAL_FLOOR: f64 = 0.3;
const SURVIVAL_CEIL: f64 = 0.8;

/// How a battle ended, judged purely from the score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// Both sides scored zero; every engaged unit is destroyed.
    Annihilation,
    /// Equal nonzero scores; both forces shrink to the smaller total.
    Standoff,
    AttackerVictory,
    DefenderVictory,
}

impl BattleOutcome {
    pub fn classify(scores: ScorePair) -> BattleOutcome {
        if scores.is_double_zero() {
            BattleOutcome::Annihilation
        } else if scores.is_tie() {
            BattleOutcome::Standoff
        } else if scores.attacker > scores.defender {
            BattleOutcome::AttackerVictory
        } else {
            BattleOutcome::DefenderVictory
        }
    }
}

/// Surviving forces after one battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// What remains of the committed attacking force.
    pub attacker_survivors: TroopSet,
    /// What remains of the defending garrison.
    pub defender_survivors: TroopSet,
}

/// Resolves a battle between the committed attackers and the defending
/// garrison under the given scores.
pub fn resolve_battle(
    scores: ScorePair,
    attackers: &TroopSet,
    defenders: &TroopSet,
    rng: &mut impl Rng,
) -> BattleResult {
    let outcome = BattleOutcome::classify(scores);
    let (attacker_survivors, defender_survivors) = match outcome {
        BattleOutcome::Annihilation => (TroopSet::new(), TroopSet::new()),
        BattleOutcome::Standoff => {
            let floor = attackers.total().min(defenders.total());
            (
                sample_units(attackers, floor, rng),
                sample_units(defenders, floor, rng),
            )
        }
        BattleOutcome::AttackerVictory => (
            winner_survivors(attackers, scores.attacker, scores.defender, rng),
            TroopSet::new(),
        ),
        BattleOutcome::DefenderVictory => (
            TroopSet::new(),
            winner_survivors(defenders, scores.defender, scores.attacker, rng),
        ),
    };
    BattleResult {
        outcome,
        attacker_survivors,
        defender_survivors,
    }
}

/// The winner's survival rate: 0.4 plus 0.4 times the score margin
/// over the combined score, clamped to [0.3, 0.8].
pub fn survival_rate(winner_score: u8, loser_score: u8) -> f64 {
    let sum = winner_score as f64 + loser_score as f64;
    if sum == 0.0 {
        return SURVIVAL_CEIL;
    }
    let dominance = (winner_score as f64 - loser_score as f64) / sum;
    (0.4 + 0.4 * dominance).clamp(SURVIVAL_FLOOR, SURVIVAL_CEIL)
}

/// Applies attrition to the winning force. A shutout (loser scored
/// zero) costs the winner nothing; any contested win keeps at least one
/// unit.
pub fn winner_survivors(
    force: &TroopSet,
    winner_score: u8,
    loser_score: u8,
    rng: &mut impl Rng,
) -> TroopSet {
    if force.is_empty() || loser_score == 0 {
        return force.clone();
    }
    let rate = survival_rate(winner_score, loser_score);
    let keep = ((force.total() as f64 * rate).round() as u32).max(1);
    sample_units(force, keep, rng)
}

/// Keeps `keep` units chosen uniformly from the flattened multiset.
/// Returns the whole force when `keep` meets or exceeds its size.
pub fn sample_units(force: &TroopSet, keep: u32, rng: &mut impl Rng) -> TroopSet {
    let units = force.flatten();
    let keep = keep as usize;
    if keep >= units.len() {
        return force.clone();
    }

    // Fisher-Yates partial shuffle.
    let mut indices: Vec<usize> = (0..units.len()).collect();
    for i in 0..keep {
        let j = rng.gen_range(i..indices.len());
        indices.swap(i, j);
    }

    indices[..keep].iter().map(|&i| (units[i], 1u32)).collect()
}
