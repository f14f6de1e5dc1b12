//! Map state representation.
//!
//! Holds the mutable snapshot of the world at a given point in a match:
//! who owns each territory, which troops garrison it, and which troop
//! types have already acted this turn. The per-territory records live in
//! a fixed-size array indexed by `Territory as usize`, so lookups never
//! touch a hash map.

use std::collections::BTreeSet;

use super::player::PlayerId;
use super::territory::{Territory, ALL_TERRITORIES, TERRITORY_COUNT};
use super::troops::TroopSet;

/// Ownership, garrison, and per-turn action flags for one territory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerritoryState {
    /// Controlling player, or None while unclaimed.
    pub owner: Option<PlayerId>,
    /// Units stationed here.
    pub troops: TroopSet,
    /// Troop types that already attacked or moved this turn.
    acted: BTreeSet<String>,
}

impl TerritoryState {
    /// Adds units of one type to the garrison.
    pub fn add_troops(&mut self, kind: &str, n: u32) {
        self.troops.add(kind, n);
    }

    /// Removes units, clamped per type at zero.
    pub fn remove_troops(&mut self, troops: &TroopSet) {
        self.troops.remove_all(troops);
    }

    /// Empties the garrison and forgets all action flags.
    pub fn clear_troops(&mut self) {
        self.troops.clear();
        self.acted.clear();
    }

    /// Flags every troop type present in `troops` as having acted.
    pub fn mark_acted(&mut self, troops: &TroopSet) {
        for kind in troops.kinds() {
            self.acted.insert(kind.to_string());
        }
    }

    /// Clears the acted flags at the turn boundary.
    pub fn reset_acted(&mut self) {
        self.acted.clear();
    }

    /// True if `kind` has attacked or moved this turn.
    pub fn has_acted(&self, kind: &str) -> bool {
        self.acted.contains(kind)
    }

    /// True if any stationed troop type can still act this turn.
    pub fn has_actionable_troops(&self) -> bool {
        self.troops.kinds().any(|k| !self.acted.contains(k))
    }

    /// The subset of the garrison whose types have not yet acted.
    pub fn available_for_action(&self) -> TroopSet {
        self.troops
            .iter()
            .filter(|(kind, _)| !self.acted.contains(*kind))
            .collect()
    }

    /// True if `player` controls this territory.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}

/// Complete territory map at a point in time.
///
/// Indexed by `Territory as usize` for O(1) lookup; the array is fixed
/// at world size so territory records are never inserted or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapState {
    territories: [TerritoryState; TERRITORY_COUNT],
}

impl MapState {
    /// Creates a map with every territory unowned and empty.
    pub fn empty() -> Self {
        MapState {
            territories: std::array::from_fn(|_| TerritoryState::default()),
        }
    }

    /// Read access to one territory's record.
    pub fn territory(&self, t: Territory) -> &TerritoryState {
        &self.territories[t as usize]
    }

    /// Write access to one territory's record.
    pub fn territory_mut(&mut self, t: Territory) -> &mut TerritoryState {
        &mut self.territories[t as usize]
    }

    /// Sets or clears the owner of a territory.
    pub fn set_owner(&mut self, t: Territory, owner: Option<PlayerId>) {
        self.territories[t as usize].owner = owner;
    }

    /// All territories currently controlled by `player`.
    pub fn owned_by(&self, player: PlayerId) -> Vec<Territory> {
        ALL_TERRITORIES
            .iter()
            .copied()
            .filter(|t| self.territory(*t).is_owned_by(player))
            .collect()
    }

    /// How many territories `player` controls.
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.territories
            .iter()
            .filter(|s| s.is_owned_by(player))
            .count()
    }

    /// True if `player` controls every territory in `group`.
    pub fn owns_all(&self, player: PlayerId, group: &[Territory]) -> bool {
        group.iter().all(|t| self.territory(*t).is_owned_by(player))
    }
}

impl Default for MapState {
    fn default() -> Self {
        MapState::empty()
    }
}
