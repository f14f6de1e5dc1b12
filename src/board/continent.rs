//! Continent groupings and bonus metadata.
//!
//! A continent is a fixed set of territories; owning every territory of a
//! continent grants its holder the listed point bonus, and losing any one
//! of them revokes it. Membership is derived from the territory table and
//! mirrored here as static slices for cheap iteration.

use super::territory::Territory;

/// The number of continents on the standard map.
pub const CONTINENT_COUNT: usize = 6;

/// A continent on the standard map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Continent {
    NorthAmerica = 0,
    SouthAmerica = 1,
    Europe = 2,
    Africa = 3,
    Asia = 4,
    Australia = 5,
}

/// All continents in index order.
pub const ALL_CONTINENTS: [Continent; CONTINENT_COUNT] = [
    Continent::NorthAmerica,
    Continent::SouthAmerica,
    Continent::Europe,
    Continent::Africa,
    Continent::Asia,
    Continent::Australia,
];

impl Continent {
    /// Returns the display name for this continent.
    pub const fn name(self) -> &'static str {
        CONTINENT_INFO[self as usize].name
    }

    /// Returns the point bonus for holding the entire continent.
    pub const fn bonus_points(self) -> i32 {
        CONTINENT_INFO[self as usize].bonus_points
    }

    /// Returns the member territories of this continent.
    pub const fn territories(self) -> &'static [Territory] {
        CONTINENT_INFO[self as usize].territories
    }

    /// Looks up a continent by its display name.
    pub fn from_name(name: &str) -> Option<Continent> {
        ALL_CONTINENTS.iter().find(|c| c.name() == name).copied()
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static metadata for a continent.
pub struct ContinentInfo {
    pub name: &'static str,
    pub bonus_points: i32,
    pub territories: &'static [Territory],
}

/// Compile-time lookup table: index by `Continent as usize`.
pub static CONTINENT_INFO: [ContinentInfo; CONTINENT_COUNT] = [
    ContinentInfo {
        name: "North America",
        bonus_points: 500,
        territories: &[
            Territory::Alaska, Territory::NorthwestTerritory, Territory::Greenland,
            Territory::Alberta, Territory::Ontario, Territory::Quebec,
            Territory::WesternUnitedStates, Territory::EasternUnitedStates,
            Territory::CentralAmerica,
        ],
    },
    ContinentInfo {
        name: "South America",
        bonus_points: 200,
        territories: &[
            Territory::Venezuela, Territory::Brazil, Territory::Peru,
            Territory::Argentina,
        ],
    },
    ContinentInfo {
        name: "Europe",
        bonus_points: 500,
        territories: &[
            Territory::Iceland, Territory::GreatBritain, Territory::Scandinavia,
            Territory::NorthernEurope, Territory::WesternEurope,
            Territory::SouthernEurope, Territory::Ukraine,
        ],
    },
    ContinentInfo {
        name: "Africa",
        bonus_points: 300,
        territories: &[
            Territory::NorthAfrica, Territory::Egypt, Territory::EastAfrica,
            Territory::Congo, Territory::SouthAfrica, Territory::Madagascar,
        ],
    },
    ContinentInfo {
        name: "Asia",
        bonus_points: 700,
        territories: &[
            Territory::Ural, Territory::Siberia, Territory::Yakutsk,
            Territory::Kamchatka, Territory::Irkutsk, Territory::Mongolia,
            Territory::Japan, Territory::Afghanistan, Territory::China,
            Territory::MiddleEast, Territory::India, Territory::Siam,
        ],
    },
    ContinentInfo {
        name: "Australia",
        bonus_points: 200,
        territories: &[
            Territory::Indonesia, Territory::NewGuinea,
            Territory::WesternAustralia, Territory::EasternAustralia,
        ],
    },
];
