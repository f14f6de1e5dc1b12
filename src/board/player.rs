//! Player identity, wallet, and answer statistics.
//!
//! A player owns a deployable troop reserve (distinct from troops placed
//! on territories), a points total that drives reinforcements and
//! victory, and a derived score used for end-of-match ranking. Players
//! are addressed by `PlayerId`, an index into the orchestrator's player
//! list; they are never removed from that list, only flagged eliminated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::troops::TroopSet;

/// Score contribution of each correctly answered question.
const SCORE_PER_CORRECT: i32 = 10;

/// Index of a player in the orchestrator's player list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Number of selectable player colors (and the player cap).
pub const COLOR_COUNT: usize = 6;

/// A player's map color. Must be unique within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

/// All colors in standard order.
pub const ALL_COLORS: [PlayerColor; COLOR_COUNT] = [
    PlayerColor::Red,
    PlayerColor::Blue,
    PlayerColor::Green,
    PlayerColor::Yellow,
    PlayerColor::Purple,
    PlayerColor::Orange,
];

impl PlayerColor {
    /// Returns the lowercase name of this color.
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Purple => "purple",
            PlayerColor::Orange => "orange",
        }
    }

    /// Parses a color from its lowercase name.
    pub fn from_name(name: &str) -> Option<PlayerColor> {
        ALL_COLORS.iter().find(|c| c.name() == name).copied()
    }
}

/// Correct/wrong tallies for a single trivia category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub correct: u32,
    pub wrong: u32,
}

/// Global and per-category answer counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStats {
    correct: u32,
    wrong: u32,
    by_category: BTreeMap<String, CategoryTally>,
}

impl AnswerStats {
    /// Records one answered question in the global and category tallies.
    pub fn record(&mut self, category: &str, correct: bool) {
        let tally = self.by_category.entry(category.to_string()).or_default();
        if correct {
            self.correct += 1;
            tally.correct += 1;
        } else {
            self.wrong += 1;
            tally.wrong += 1;
        }
    }

    /// Total correct answers across all categories.
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Total wrong answers across all categories.
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// Tally for one category (zeroes if never answered).
    pub fn category(&self, category: &str) -> CategoryTally {
        self.by_category.get(category).copied().unwrap_or_default()
    }
}

/// A participant in the match.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    color: PlayerColor,
    points: i32,
    score: i32,
    reserve: TroopSet,
    stats: AnswerStats,
    eliminated: bool,
    winner: bool,
}

impl Player {
    /// Creates a player with empty reserve and zeroed counters.
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Player {
            name: name.into(),
            color,
            points: 0,
            score: 0,
            reserve: TroopSet::new(),
            stats: AnswerStats::default(),
            eliminated: false,
            winner: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    /// Points drive reinforcement size and the victory threshold. They
    /// can go negative under continent-loss penalties.
    pub fn points(&self) -> i32 {
        self.points
    }

    /// Derived ranking metric: points plus an accuracy bonus.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// The deployable troop pool, separate from territory inventories.
    pub fn reserve(&self) -> &TroopSet {
        &self.reserve
    }

    pub fn stats(&self) -> &AnswerStats {
        &self.stats
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn is_winner(&self) -> bool {
        self.winner
    }

    /// Applies a point delta of either sign and refreshes the score.
    pub fn modify_points(&mut self, delta: i32) {
        self.points += delta;
        self.refresh_score();
    }

    /// Adds units to the deployable reserve.
    pub fn add_troops(&mut self, kind: &str, n: u32) {
        self.reserve.add(kind, n);
    }

    /// Withdraws units from the reserve, clamped per type at zero.
    pub fn remove_troops(&mut self, troops: &TroopSet) {
        self.reserve.remove_all(troops);
    }

    /// Records an answered question and refreshes the score.
    pub fn record_answer(&mut self, category: &str, correct: bool) {
        self.stats.record(category, correct);
        self.refresh_score();
    }

    /// Marks the player eliminated. One-way; returns true only on the
    /// call that actually changed the flag.
    pub fn eliminate(&mut self) -> bool {
        let newly = !self.eliminated;
        self.eliminated = true;
        newly
    }

    /// Declared only by the orchestrator when the game ends.
    pub(crate) fn set_winner(&mut self) {
        self.winner = true;
    }

    fn refresh_score(&mut self) {
        self.score = self.points + SCORE_PER_CORRECT * self.stats.correct as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_name_roundtrip() {
        for c in ALL_COLORS.iter() {
            assert_eq!(PlayerColor::from_name(c.name()), Some(*c));
        }
        assert_eq!(PlayerColor::from_name("mauve"), None);
    }

    #[test]
    fn points_move_both_ways() {
        let mut p = Player::new("Ada", PlayerColor::Red);
        p.modify_points(300);
        assert_eq!(p.points(), 300);
        p.modify_points(-500);
        assert_eq!(p.points(), -200);
    }

    #[test]
    fn score_tracks_points_and_correct_answers() {
        let mut p = Player::new("Ada", PlayerColor::Red);
        p.modify_points(100);
        assert_eq!(p.score(), 100);
        p.record_answer("history", true);
        p.record_answer("history", true);
        p.record_answer("geography", false);
        assert_eq!(p.score(), 100 + 2 * SCORE_PER_CORRECT);
    }

    #[test]
    fn stats_tally_per_category() {
        let mut p = Player::new("Ada", PlayerColor::Red);
        p.record_answer("history", true);
        p.record_answer("history", false);
        p.record_answer("science", true);
        assert_eq!(p.stats().correct(), 2);
        assert_eq!(p.stats().wrong(), 1);
        assert_eq!(p.stats().category("history"), CategoryTally { correct: 1, wrong: 1 });
        assert_eq!(p.stats().category("sports"), CategoryTally::default());
    }

    #[test]
    fn eliminate_is_one_way_and_idempotent() {
        let mut p = Player::new("Ada", PlayerColor::Red);
        assert!(!p.is_eliminated());
        assert!(p.eliminate());
        assert!(!p.eliminate());
        assert!(p.is_eliminated());
    }

    #[test]
    fn reserve_withdrawal_clamps() {
        let mut p = Player::new("Ada", PlayerColor::Red);
        p.add_troops("infantry", 2);
        let ask: TroopSet = [("infantry", 5u32), ("cavalry", 1)].into_iter().collect();
        p.remove_troops(&ask);
        assert!(p.reserve().is_empty());
    }

    #[test]
    fn winner_flag_starts_false() {
        let p = Player::new("Ada", PlayerColor::Red);
        assert!(!p.is_winner());
    }
}
