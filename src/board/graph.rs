//! Adjacency graph for the standard world map.
//!
//! `EDGES` lists each undirected border exactly once; `WorldGraph` wires
//! them into per-territory neighbor lists at build time through
//! `add_edge`, which is symmetric and idempotent. The graph is undirected
//! and connected, within continents and across the fixed intercontinental
//! borders.

use super::territory::{Territory, TERRITORY_COUNT};

/// Number of undirected borders on the standard map.
pub const EDGE_COUNT: usize = 83;

/// Alias territory names for readability of the edge table.
use Territory::*;

/// Every undirected border, listed once. Grouped by continent, with the
/// intercontinental borders at the end.
pub static EDGES: [(Territory, Territory); EDGE_COUNT] = [
    // North America - 16
    (Alaska, NorthwestTerritory),
    (Alaska, Alberta),
    (NorthwestTerritory, Alberta),
    (NorthwestTerritory, Ontario),
    (NorthwestTerritory, Greenland),
    (Greenland, Ontario),
    (Greenland, Quebec),
    (Alberta, Ontario),
    (Alberta, WesternUnitedStates),
    (Ontario, Quebec),
    (Ontario, WesternUnitedStates),
    (Ontario, EasternUnitedStates),
    (Quebec, EasternUnitedStates),
    (WesternUnitedStates, EasternUnitedStates),
    (WesternUnitedStates, CentralAmerica),
    (EasternUnitedStates, CentralAmerica),
    // South America - 5
    (Venezuela, Brazil),
    (Venezuela, Peru),
    (Brazil, Peru),
    (Brazil, Argentina),
    (Peru, Argentina),
    // Europe - 12
    (Iceland, GreatBritain),
    (Iceland, Scandinavia),
    (GreatBritain, Scandinavia),
    (GreatBritain, NorthernEurope),
    (GreatBritain, WesternEurope),
    (Scandinavia, NorthernEurope),
    (Scandinavia, Ukraine),
    (NorthernEurope, Ukraine),
    (NorthernEurope, SouthernEurope),
    (NorthernEurope, WesternEurope),
    (WesternEurope, SouthernEurope),
    (SouthernEurope, Ukraine),
    // Africa - 9
    (NorthAfrica, Egypt),
    (NorthAfrica, EastAfrica),
    (NorthAfrica, Congo),
    (Egypt, EastAfrica),
    (EastAfrica, Congo),
    (EastAfrica, SouthAfrica),
    (EastAfrica, Madagascar),
    (Congo, SouthAfrica),
    (SouthAfrica, Madagascar),
    // Asia - 22
    (Ural, Siberia),
    (Ural, China),
    (Ural, Afghanistan),
    (Siberia, Yakutsk),
    (Siberia, Irkutsk),
    (Siberia, Mongolia),
    (Siberia, China),
    (Yakutsk, Kamchatka),
    (Yakutsk, Irkutsk),
    (Kamchatka, Irkutsk),
    (Kamchatka, Mongolia),
    (Kamchatka, Japan),
    (Irkutsk, Mongolia),
    (Mongolia, Japan),
    (Mongolia, China),
    (Afghanistan, China),
    (Afghanistan, India),
    (Afghanistan, MiddleEast),
    (China, India),
    (China, Siam),
    (MiddleEast, India),
    (India, Siam),
    // Australia - 5
    (Indonesia, NewGuinea),
    (Indonesia, WesternAustralia),
    (NewGuinea, WesternAustralia),
    (NewGuinea, EasternAustralia),
    (WesternAustralia, EasternAustralia),
    // Intercontinental - 14
    (Alaska, Kamchatka),
    (Greenland, Iceland),
    (CentralAmerica, Venezuela),
    (Brazil, NorthAfrica),
    (WesternEurope, NorthAfrica),
    (SouthernEurope, NorthAfrica),
    (SouthernEurope, Egypt),
    (SouthernEurope, MiddleEast),
    (Ukraine, Ural),
    (Ukraine, Afghanistan),
    (Ukraine, MiddleEast),
    (Egypt, MiddleEast),
    (EastAfrica, MiddleEast),
    (Siam, Indonesia),
];

/// Mutual-neighbor lists for every territory.
///
/// Neighbor lists are stored per territory, indexed by discriminant, so
/// entities never hold references to each other.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    neighbors: [Vec<Territory>; TERRITORY_COUNT],
}

impl WorldGraph {
    /// Creates a graph with no edges.
    pub fn empty() -> Self {
        WorldGraph {
            neighbors: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Creates the standard world graph from the `EDGES` table.
    pub fn standard() -> Self {
        let mut graph = WorldGraph::empty();
        for &(a, b) in EDGES.iter() {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Adds an undirected border between two territories.
    ///
    /// The edge is recorded on both sides; repeated calls (in either
    /// argument order) are no-ops, as are self-loops.
    pub fn add_edge(&mut self, a: Territory, b: Territory) {
        if a == b {
            return;
        }
        let fwd = &mut self.neighbors[a as usize];
        if !fwd.contains(&b) {
            fwd.push(b);
        }
        let rev = &mut self.neighbors[b as usize];
        if !rev.contains(&a) {
            rev.push(a);
        }
    }

    /// Returns the neighbors of a territory, in insertion order.
    pub fn neighbors_of(&self, t: Territory) -> &[Territory] {
        &self.neighbors[t as usize]
    }

    /// Returns true if the two territories share a border.
    pub fn is_adjacent(&self, a: Territory, b: Territory) -> bool {
        self.neighbors[a as usize].contains(&b)
    }
}

impl Default for WorldGraph {
    fn default() -> Self {
        WorldGraph::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::territory::ALL_TERRITORIES;

    #[test]
    fn edge_table_has_no_duplicates_or_loops() {
        for (i, &(a, b)) in EDGES.iter().enumerate() {
            assert_ne!(a, b, "self-loop at entry {}", i);
            let dupes = EDGES
                .iter()
                .filter(|&&(x, y)| (x == a && y == b) || (x == b && y == a))
                .count();
            assert_eq!(dupes, 1, "border {}-{} listed more than once", a, b);
        }
    }

    #[test]
    fn standard_graph_is_symmetric() {
        let graph = WorldGraph::standard();
        for t in ALL_TERRITORIES.iter() {
            for n in graph.neighbors_of(*t) {
                assert!(
                    graph.is_adjacent(*n, *t),
                    "{} -> {} has no reverse edge",
                    t,
                    n
                );
            }
        }
    }

    #[test]
    fn add_edge_is_mutual() {
        let mut graph = WorldGraph::empty();
        graph.add_edge(Territory::Japan, Territory::Mongolia);
        assert!(graph.is_adjacent(Territory::Japan, Territory::Mongolia));
        assert!(graph.is_adjacent(Territory::Mongolia, Territory::Japan));
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut graph = WorldGraph::empty();
        graph.add_edge(Territory::Japan, Territory::Mongolia);
        graph.add_edge(Territory::Japan, Territory::Mongolia);
        graph.add_edge(Territory::Mongolia, Territory::Japan);
        assert_eq!(graph.neighbors_of(Territory::Japan).len(), 1);
        assert_eq!(graph.neighbors_of(Territory::Mongolia).len(), 1);
    }

    #[test]
    fn add_edge_ignores_self_loop() {
        let mut graph = WorldGraph::empty();
        graph.add_edge(Territory::Japan, Territory::Japan);
        assert!(graph.neighbors_of(Territory::Japan).is_empty());
    }

    #[test]
    fn directed_entry_count() {
        let graph = WorldGraph::standard();
        let total: usize = ALL_TERRITORIES
            .iter()
            .map(|t| graph.neighbors_of(*t).len())
            .sum();
        assert_eq!(total, EDGE_COUNT * 2);
    }

    #[test]
    fn every_territory_has_a_neighbor() {
        let graph = WorldGraph::standard();
        for t in ALL_TERRITORIES.iter() {
            assert!(
                !graph.neighbors_of(*t).is_empty(),
                "{} is unreachable",
                t
            );
        }
    }

    #[test]
    fn graph_is_connected() {
        let graph = WorldGraph::standard();
        let mut visited = [false; TERRITORY_COUNT];
        let mut stack = vec![Territory::Alaska];
        while let Some(t) = stack.pop() {
            if visited[t as usize] {
                continue;
            }
            visited[t as usize] = true;
            for n in graph.neighbors_of(t) {
                stack.push(*n);
            }
        }
        assert!(visited.iter().all(|v| *v), "map is not fully connected");
    }

    #[test]
    fn degree_spot_checks() {
        let graph = WorldGraph::standard();
        assert_eq!(graph.neighbors_of(Territory::Japan).len(), 2);
        assert_eq!(graph.neighbors_of(Territory::Madagascar).len(), 2);
        assert_eq!(graph.neighbors_of(Territory::Ontario).len(), 6);
        assert_eq!(graph.neighbors_of(Territory::NorthAfrica).len(), 6);
    }

    #[test]
    fn intercontinental_borders() {
        let graph = WorldGraph::standard();
        assert!(graph.is_adjacent(Territory::Alaska, Territory::Kamchatka));
        assert!(graph.is_adjacent(Territory::Brazil, Territory::NorthAfrica));
        assert!(graph.is_adjacent(Territory::Siam, Territory::Indonesia));
        // No shortcut across the Pacific from Japan.
        assert!(!graph.is_adjacent(Territory::Japan, Territory::Alaska));
    }
}
