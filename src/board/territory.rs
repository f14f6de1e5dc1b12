//! Territory definitions and metadata for the standard world map.
//!
//! All 42 territories are enumerated, grouped by continent. Territory
//! metadata (display name, continent) is stored in a compile-time lookup
//! table indexed by the `Territory` enum discriminant. Mutable per-match
//! state (owner, troops) lives in `board::state`, not here.

use super::continent::Continent;

/// The number of territories on the standard map.
pub const TERRITORY_COUNT: usize = 42;

/// A territory on the standard map.
///
/// Variants are grouped by continent in index order. The `#[repr(u8)]`
/// attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Territory {
    // North America
    Alaska = 0,
    NorthwestTerritory = 1,
    Greenland = 2,
    Alberta = 3,
    Ontario = 4,
    Quebec = 5,
    WesternUnitedStates = 6,
    EasternUnitedStates = 7,
    CentralAmerica = 8,
    // South America
    Venezuela = 9,
    Brazil = 10,
    Peru = 11,
    Argentina = 12,
    // Europe
    Iceland = 13,
    GreatBritain = 14,
    Scandinavia = 15,
    NorthernEurope = 16,
    WesternEurope = 17,
    SouthernEurope = 18,
    Ukraine = 19,
    // Africa
    NorthAfrica = 20,
    Egypt = 21,
    EastAfrica = 22,
    Congo = 23,
    SouthAfrica = 24,
    Madagascar = 25,
    // Asia
    Ural = 26,
    Siberia = 27,
    Yakutsk = 28,
    Kamchatka = 29,
    Irkutsk = 30,
    Mongolia = 31,
    Japan = 32,
    Afghanistan = 33,
    China = 34,
    MiddleEast = 35,
    India = 36,
    Siam = 37,
    // Australia
    Indonesia = 38,
    NewGuinea = 39,
    WesternAustralia = 40,
    EasternAustralia = 41,
}

/// All territory variants in index order.
pub const ALL_TERRITORIES: [Territory; TERRITORY_COUNT] = [
    Territory::Alaska, Territory::NorthwestTerritory, Territory::Greenland,
    Territory::Alberta, Territory::Ontario, Territory::Quebec,
    Territory::WesternUnitedStates, Territory::EasternUnitedStates,
    Territory::CentralAmerica, Territory::Venezuela, Territory::Brazil,
    Territory::Peru, Territory::Argentina, Territory::Iceland,
    Territory::GreatBritain, Territory::Scandinavia, Territory::NorthernEurope,
    Territory::WesternEurope, Territory::SouthernEurope, Territory::Ukraine,
    Territory::NorthAfrica, Territory::Egypt, Territory::EastAfrica,
    Territory::Congo, Territory::SouthAfrica, Territory::Madagascar,
    Territory::Ural, Territory::Siberia, Territory::Yakutsk,
    Territory::Kamchatka, Territory::Irkutsk, Territory::Mongolia,
    Territory::Japan, Territory::Afghanistan, Territory::China,
    Territory::MiddleEast, Territory::India, Territory::Siam,
    Territory::Indonesia, Territory::NewGuinea, Territory::WesternAustralia,
    Territory::EasternAustralia,
];

impl Territory {
    /// Returns the display name for this territory.
    pub const fn name(self) -> &'static str {
        TERRITORY_INFO[self as usize].name
    }

    /// Returns the continent this territory belongs to.
    pub const fn continent(self) -> Continent {
        TERRITORY_INFO[self as usize].continent
    }

    /// Looks up a territory by its display name.
    pub fn from_name(name: &str) -> Option<Territory> {
        ALL_TERRITORIES.iter().find(|t| t.name() == name).copied()
    }
}

impl std::fmt::Display for Territory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static metadata for a territory.
pub struct TerritoryInfo {
    pub name: &'static str,
    pub continent: Continent,
}

/// Compile-time lookup table: index by `Territory as usize`.
pub static TERRITORY_INFO: [TerritoryInfo; TERRITORY_COUNT] = [
    // North America
    TerritoryInfo { name: "Alaska", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Northwest Territory", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Greenland", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Alberta", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Ontario", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Quebec", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Western United States", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Eastern United States", continent: Continent::NorthAmerica },
    TerritoryInfo { name: "Central America", continent: Continent::NorthAmerica },
    // South America
    TerritoryInfo { name: "Venezuela", continent: Continent::SouthAmerica },
    TerritoryInfo { name: "Brazil", continent: Continent::SouthAmerica },
    TerritoryInfo { name: "Peru", continent: Continent::SouthAmerica },
    TerritoryInfo { name: "Argentina", continent: Continent::SouthAmerica },
    // Europe
    TerritoryInfo { name: "Iceland", continent: Continent::Europe },
    TerritoryInfo { name: "Great Britain", continent: Continent::Europe },
    TerritoryInfo { name: "Scandinavia", continent: Continent::Europe },
    TerritoryInfo { name: "Northern Europe", continent: Continent::Europe },
    TerritoryInfo { name: "Western Europe", continent: Continent::Europe },
    TerritoryInfo { name: "Southern Europe", continent: Continent::Europe },
    TerritoryInfo { name: "Ukraine", continent: Continent::Europe },
    // Africa
    TerritoryInfo { name: "North Africa", continent: Continent::Africa },
    TerritoryInfo { name: "Egypt", continent: Continent::Africa },
    TerritoryInfo { name: "East Africa", continent: Continent::Africa },
    TerritoryInfo { name: "Congo", continent: Continent::Africa },
    TerritoryInfo { name: "South Africa", continent: Continent::Africa },
    TerritoryInfo { name: "Madagascar", continent: Continent::Africa },
    // Asia
    TerritoryInfo { name: "Ural", continent: Continent::Asia },
    TerritoryInfo { name: "Siberia", continent: Continent::Asia },
    TerritoryInfo { name: "Yakutsk", continent: Continent::Asia },
    TerritoryInfo { name: "Kamchatka", continent: Continent::Asia },
    TerritoryInfo { name: "Irkutsk", continent: Continent::Asia },
    TerritoryInfo { name: "Mongolia", continent: Continent::Asia },
    TerritoryInfo { name: "Japan", continent: Continent::Asia },
    TerritoryInfo { name: "Afghanistan", continent: Continent::Asia },
    TerritoryInfo { name: "China", continent: Continent::Asia },
    TerritoryInfo { name: "Middle East", continent: Continent::Asia },
    TerritoryInfo { name: "India", continent: Continent::Asia },
    TerritoryInfo { name: "Siam", continent: Continent::Asia },
    // Australia
    TerritoryInfo { name: "Indonesia", continent: Continent::Australia },
    TerritoryInfo { name: "New Guinea", continent: Continent::Australia },
    TerritoryInfo { name: "Western Australia", continent: Continent::Australia },
    TerritoryInfo { name: "Eastern Australia", continent: Continent::Australia },
];
