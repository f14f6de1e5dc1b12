//! World representation and match-state types.
//!
//! Contains the core data structures for territories, continents, the
//! adjacency graph, troop multisets, players, and the overall map state.

pub mod continent;
pub mod graph;
pub mod player;
pub mod state;
pub mod territory;
pub mod troops;

pub use continent::{Continent, ContinentInfo, ALL_CONTINENTS, CONTINENT_COUNT, CONTINENT_INFO};
pub use graph::{WorldGraph, EDGES, EDGE_COUNT};
pub use player::{
    AnswerStats, CategoryTally, Player, PlayerColor, PlayerId, ALL_COLORS, COLOR_COUNT,
};
pub use state::{MapState, TerritoryState};
pub use territory::{Territory, TerritoryInfo, ALL_TERRITORIES, TERRITORY_COUNT, TERRITORY_INFO};
pub use troops::TroopSet;
