//! Turn action state machine and target generation.
//!
//! At any moment the acting player is either idle, lining up an attack
//! or a troop move from a chosen source, or frozen waiting for a trivia
//! contest to come back. The orchestrator drives the transitions; this
//! module defines the states and computes which neighboring territories
//! a prepared action may legally land on.

use crate::board::graph::WorldGraph;
use crate::board::player::PlayerId;
use crate::board::state::MapState;
use crate::board::territory::Territory;
use crate::board::troops::TroopSet;
use crate::contest::{ContestHandle, ContestRequest};

/// A prepared attack or move: committed troops waiting on a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    /// Territory the troops set out from.
    pub source: Territory,
    /// Units the player committed to the action.
    pub troops: TroopSet,
    /// Legal destinations, computed when the action was prepared.
    pub targets: Vec<Territory>,
}

impl Commitment {
    /// True if `t` is one of the legal destinations.
    pub fn allows(&self, t: Territory) -> bool {
        self.targets.contains(&t)
    }
}

/// An attack suspended mid-flight while its quiz round runs.
///
/// `committed` has already been deducted from the source garrison and
/// `defenders` snapshots the target at the moment battle was joined, so
/// the resolution applies cleanly even though other state is readable
/// in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBattle {
    pub source: Territory,
    pub target: Territory,
    pub committed: TroopSet,
    pub defenders: TroopSet,
    pub handle: ContestHandle,
    pub request: ContestRequest,
}

/// Where the acting player stands within their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    /// No action underway; selections merely inspect territories.
    Idle,
    /// An attack is prepared and awaiting a target selection.
    Attack(Commitment),
    /// A troop transfer is prepared and awaiting a target selection.
    Move(Commitment),
    /// A battle is waiting on its contest result.
    Contest(PendingBattle),
}

impl ActionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ActionState::Idle)
    }

    /// True while a contest result is outstanding.
    pub fn is_contest(&self) -> bool {
        matches!(self, ActionState::Contest(_))
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ActionState::Idle => "idle",
            ActionState::Attack(_) => "attack",
            ActionState::Move(_) => "move",
            ActionState::Contest(_) => "contest",
        }
    }
}

impl Default for ActionState {
    fn default() -> Self {
        ActionState::Idle
    }
}

/// Neighbors of `source` an attack from `player` may strike: everything
/// adjacent that the player does not own, unclaimed ground included.
pub fn attack_targets(
    graph: &WorldGraph,
    map: &MapState,
    source: Territory,
    player: PlayerId,
) -> Vec<Territory> {
    graph
        .neighbors_of(source)
        .iter()
        .copied()
        .filter(|t| !map.territory(*t).is_owned_by(player))
        .collect()
}

/// Neighbors of `source` a move from `player` may reinforce: only
/// territory the player already owns.
pub fn move_targets(
    graph: &WorldGraph,
    map: &MapState,
    source: Territory,
    player: PlayerId,
) -> Vec<Territory> {
    graph
        .neighbors_of(source)
        .iter()
        .copied()
        .filter(|t| map.territory(*t).is_owned_by(player))
        .collect()
}
