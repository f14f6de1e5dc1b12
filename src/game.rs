//! Turn orchestration.
//!
//! [`Game`] owns the player list, the map, the action state machine,
//! and the continent/victory bookkeeping. It is the only writer of
//! territory and player state: UI layers feed it selections and
//! prepared actions, the quiz side feeds it contest results, and
//! everything else reads through accessors.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

use crate::action::{attack_targets, move_targets, ActionState, Commitment, PendingBattle};
use crate::board::continent::{Continent, ALL_CONTINENTS, CONTINENT_COUNT};
use crate::board::graph::WorldGraph;
use crate::board::player::{Player, PlayerColor, PlayerId, ALL_COLORS, COLOR_COUNT};
use crate::board::state::MapState;
use crate::board::territory::Territory;
use crate::board::troops::TroopSet;
use crate::catalog::TroopCatalog;
use crate::contest::{ContestHandle, ContestRequest, Difficulty, ScorePair};
use crate::resolve::{resolve_battle, BattleOutcome};

/// Errors surfaced by orchestrator operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("need at least two players, got {0}")]
    TooFewPlayers(usize),

    #[error("at most six players are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("duplicate player color '{0}'")]
    DuplicateColor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("the game is already decided")]
    GameOver,

    #[error("another action is already in flight")]
    ActionInFlight,

    #[error("a contest is awaiting its result")]
    ContestPending,

    #[error("no contest is awaiting a result")]
    NoActiveContest,

    #[error("result does not match the contest in flight: {0}")]
    StaleContest(ContestHandle),

    #[error("{0} is not owned by the current player")]
    NotYourTerritory(Territory),

    #[error("no troops were selected")]
    EmptySelection,

    #[error("{0} cannot supply the requested troops this turn")]
    UnavailableTroops(Territory),

    #[error("no legal targets from {0}")]
    NoValidTargets(Territory),

    #[error("cannot end the turn during an unresolved {0} action")]
    TurnLocked(&'static str),

    #[error("contest score {0} exceeds the maximum of 100")]
    ScoreOutOfRange(u8),

    #[error("unknown troop type '{0}'")]
    UnknownTroopType(String),

    #[error("the reserve cannot supply the requested troops")]
    ReserveShortfall,
}

/// Tunable match rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Territories dealt to each player at setup.
    pub starting_territories: usize,
    /// Units garrisoned on each starting territory.
    pub starting_garrison: u32,
    /// Units in each player's starting reserve.
    pub starting_reserve: u32,
    /// Points awarded for conquering a territory.
    pub capture_points: i32,
    /// Points per reinforcement unit at the turn boundary.
    pub reinforcement_divisor: i32,
    /// Victory threshold: `victory_base + victory_per_player * players`.
    pub victory_base: i32,
    pub victory_per_player: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_territories: 3,
            starting_garrison: 1,
            starting_reserve: 12,
            capture_points: 100,
            reinforcement_divisor: 200,
            victory_base: 1500,
            victory_per_player: 500,
        }
    }
}

impl GameConfig {
    /// Points needed to win with `players` at the table.
    pub fn victory_threshold(&self, players: usize) -> i32 {
        self.victory_base + self.victory_per_player * players as i32
    }
}

/// What a completed troop move changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub source: Territory,
    pub target: Territory,
    pub moved: TroopSet,
}

/// Everything a resolved battle changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub handle: ContestHandle,
    pub source: Territory,
    pub target: Territory,
    pub scores: ScorePair,
    pub outcome: BattleOutcome,
    pub attacker: PlayerId,
    pub defender: Option<PlayerId>,
    pub attacker_survivors: TroopSet,
    pub defender_survivors: TroopSet,
    /// True if the target changed hands.
    pub conquered: bool,
    pub continents_gained: Vec<Continent>,
    pub continents_lost: Vec<Continent>,
    pub eliminated: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

/// What the turn boundary changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub previous: PlayerId,
    pub current: PlayerId,
    /// Units granted to the incoming player's reserve.
    pub reinforcements: TroopSet,
}

/// What the current player could do from a territory right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerritoryOptions {
    pub can_deploy: bool,
    pub can_attack: bool,
    pub can_move: bool,
}

/// What came of a `select_territory` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Idle inspection; nothing mutated beyond the highlight.
    Inspected(Territory, TerritoryOptions),
    /// The selection was cleared.
    Cleared,
    /// The prepared action was called off; selection fell back to its
    /// source territory.
    Cancelled,
    /// A prepared move completed.
    Moved(MoveReport),
    /// The attack reached defended ground; a quiz round is needed.
    ContestStarted {
        handle: ContestHandle,
        request: ContestRequest,
    },
    /// The attack hit an undefended territory and resolved on the spot.
    Conquered(BattleReport),
    /// Input arrived while a contest was unresolved; nothing happened.
    Ignored,
}

/// The central coordinator of a match.
pub struct Game {
    config: GameConfig,
    catalog: TroopCatalog,
    graph: WorldGraph,
    map: MapState,
    players: Vec<Player>,
    current: usize,
    turn: u32,
    action: ActionState,
    selected: Option<Territory>,
    /// Which player is currently credited with each continent's bonus.
    continent_holder: [Option<PlayerId>; CONTINENT_COUNT],
    winner: Option<PlayerId>,
    next_handle: u64,
    rng: SmallRng,
}

impl Game {
    /// Creates a match with default rules, the standard catalog, and
    /// colors assigned in standard order.
    pub fn new(names: &[&str]) -> Result<Game, GameError> {
        Self::from_names(names, None)
    }

    /// Like [`Game::new`] but reproducible from a seed.
    pub fn seeded(names: &[&str], seed: u64) -> Result<Game, GameError> {
        Self::from_names(names, Some(seed))
    }

    fn from_names(names: &[&str], seed: Option<u64>) -> Result<Game, GameError> {
        if names.len() > COLOR_COUNT {
            return Err(GameError::TooManyPlayers(names.len()));
        }
        let roster: Vec<(&str, PlayerColor)> = names.iter().copied().zip(ALL_COLORS).collect();
        Self::with_roster(&roster, GameConfig::default(), TroopCatalog::standard(), seed)
    }

    /// Full-control constructor: explicit colors, rules, and catalog.
    /// Pass a seed for reproducible matches.
    pub fn with_roster(
        roster: &[(&str, PlayerColor)],
        config: GameConfig,
        catalog: TroopCatalog,
        seed: Option<u64>,
    ) -> Result<Game, GameError> {
        if roster.len() < 2 {
            return Err(GameError::TooFewPlayers(roster.len()));
        }
        if roster.len() > COLOR_COUNT {
            return Err(GameError::TooManyPlayers(roster.len()));
        }
        for (i, (_, color)) in roster.iter().enumerate() {
            if roster[..i].iter().any(|(_, c)| c == color) {
                return Err(GameError::DuplicateColor(color.name().to_string()));
            }
        }
        if config.reinforcement_divisor < 1 {
            return Err(GameError::InvalidConfig("reinforcement divisor must be at least 1"));
        }

        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        let players = roster
            .iter()
            .map(|(name, color)| Player::new(*name, *color))
            .collect();

        let mut game = Game {
            config,
            catalog,
            graph: WorldGraph::standard(),
            map: MapState::empty(),
            players,
            current: 0,
            turn: 1,
            action: ActionState::Idle,
            selected: None,
            continent_holder: [None; CONTINENT_COUNT],
            winner: None,
            next_handle: 1,
            rng,
        };
        game.deal_starting_positions();
        log::info!(
            "match started: {} players, victory at {} points",
            game.players.len(),
            game.victory_threshold()
        );
        Ok(game)
    }

    /// Deals each player a distinct continent, starting territories in
    /// it, and a reserve of deployable units.
    fn deal_starting_positions(&mut self) {
        let n = self.players.len();

        // Distinct random continent per player.
        let mut continents: Vec<Continent> = ALL_CONTINENTS.to_vec();
        for i in 0..n {
            let j = self.rng.gen_range(i..continents.len());
            continents.swap(i, j);
        }

        for idx in 0..n {
            let player = PlayerId(idx);
            let members = continents[idx].territories();
            let want = self.config.starting_territories;
            let grant = want.min(members.len());
            if grant < want {
                log::warn!(
                    "{} holds only {} territories, granting {} instead of {}",
                    continents[idx],
                    members.len(),
                    grant,
                    want
                );
            }

            let mut picks: Vec<Territory> = members.to_vec();
            for i in 0..grant {
                let j = self.rng.gen_range(i..picks.len());
                picks.swap(i, j);
            }
            for &t in &picks[..grant] {
                self.map.set_owner(t, Some(player));
                for _ in 0..self.config.starting_garrison {
                    let kind = self.catalog.random_kind(&mut self.rng);
                    self.map.territory_mut(t).troops.add(kind, 1);
                }
            }
            log::debug!(
                "{} starts in {} with {:?}",
                self.players[idx].name(),
                continents[idx],
                &picks[..grant]
            );

            for _ in 0..self.config.starting_reserve {
                let kind = self.catalog.random_kind(&mut self.rng);
                self.players[idx].add_troops(kind, 1);
            }
        }

        // A custom config may hand out whole continents up front. An
        // entry in the holder table always has a paid bonus behind it;
        // a later loss revokes exactly this much.
        for (i, continent) in ALL_CONTINENTS.iter().enumerate() {
            for idx in 0..n {
                if self.map.owns_all(PlayerId(idx), continent.territories()) {
                    self.continent_holder[i] = Some(PlayerId(idx));
                    self.players[idx].modify_points(continent.bonus_points());
                    log::info!(
                        "{} starts holding all of {} (+{} points)",
                        self.players[idx].name(),
                        continent,
                        continent.bonus_points()
                    );
                }
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TroopCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &WorldGraph {
        &self.graph
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn current_player(&self) -> PlayerId {
        PlayerId(self.current)
    }

    /// Turn counter, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn action(&self) -> &ActionState {
        &self.action
    }

    /// The territory currently highlighted for the UI, if any.
    pub fn selected(&self) -> Option<Territory> {
        self.selected
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Legal destinations of the prepared action; empty when idle or
    /// mid-contest.
    pub fn valid_targets(&self) -> &[Territory] {
        match &self.action {
            ActionState::Attack(c) | ActionState::Move(c) => &c.targets,
            _ => &[],
        }
    }

    /// Source and target set to highlight for a prepared action.
    pub fn blink_state(&self) -> Option<(Territory, &[Territory])> {
        match &self.action {
            ActionState::Attack(c) | ActionState::Move(c) => Some((c.source, &c.targets)),
            _ => None,
        }
    }

    /// The contextual actions open to the current player from `t`.
    pub fn territory_options(&self, t: Territory) -> TerritoryOptions {
        let player = self.current_player();
        if !self.map.territory(t).is_owned_by(player) {
            return TerritoryOptions::default();
        }
        let ready = self.map.territory(t).has_actionable_troops();
        TerritoryOptions {
            can_deploy: !self.players[player.0].reserve().is_empty(),
            can_attack: ready && !attack_targets(&self.graph, &self.map, t, player).is_empty(),
            can_move: ready && !move_targets(&self.graph, &self.map, t, player).is_empty(),
        }
    }

    /// Points needed to win this match.
    pub fn victory_threshold(&self) -> i32 {
        self.config.victory_threshold(self.players.len())
    }

    /// Players ranked by score, best first.
    pub fn rankings(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = (0..self.players.len()).map(PlayerId).collect();
        ids.sort_by_key(|id| std::cmp::Reverse(self.players[id.0].score()));
        ids
    }

    /// Credits an answered question to a player's statistics and score.
    pub fn record_answer(&mut self, player: PlayerId, category: &str, correct: bool) {
        self.players[player.0].record_answer(category, correct);
    }

    /// Moves troops from the current player's reserve onto an owned
    /// territory. Deployment is independent of the action state and
    /// never marks troops as acted.
    pub fn deploy_troops(&mut self, to: Territory, troops: &TroopSet) -> Result<(), GameError> {
        self.ensure_live()?;
        if troops.is_empty() {
            return Err(GameError::EmptySelection);
        }
        let player = self.current_player();
        if !self.map.territory(to).is_owned_by(player) {
            return Err(GameError::NotYourTerritory(to));
        }
        for kind in troops.kinds() {
            if !self.catalog.contains(kind) {
                return Err(GameError::UnknownTroopType(kind.to_string()));
            }
        }
        if !self.players[player.0].reserve().covers(troops) {
            return Err(GameError::ReserveShortfall);
        }

        self.players[player.0].remove_troops(troops);
        self.map.territory_mut(to).troops.merge(troops);
        log::info!("{} deploys {} to {}", self.players[player.0].name(), troops, to);
        Ok(())
    }

    /// Locks in an attack from `source`. The committed troops stay on
    /// the source until a target is chosen; the returned slice is the
    /// set of territories the attack may strike.
    pub fn prepare_attack(
        &mut self,
        source: Territory,
        troops: &TroopSet,
    ) -> Result<&[Territory], GameError> {
        self.prepare_action(source, troops, true)
    }

    /// Locks in a troop move from `source` toward adjacent friendly
    /// territory.
    pub fn prepare_move(
        &mut self,
        source: Territory,
        troops: &TroopSet,
    ) -> Result<&[Territory], GameError> {
        self.prepare_action(source, troops, false)
    }

    fn prepare_action(
        &mut self,
        source: Territory,
        troops: &TroopSet,
        is_attack: bool,
    ) -> Result<&[Territory], GameError> {
        self.ensure_live()?;
        if !self.action.is_idle() {
            return Err(GameError::ActionInFlight);
        }
        let player = self.current_player();
        if !self.map.territory(source).is_owned_by(player) {
            return Err(GameError::NotYourTerritory(source));
        }
        if troops.is_empty() {
            return Err(GameError::EmptySelection);
        }
        if !self.map.territory(source).available_for_action().covers(troops) {
            return Err(GameError::UnavailableTroops(source));
        }

        let targets = if is_attack {
            attack_targets(&self.graph, &self.map, source, player)
        } else {
            move_targets(&self.graph, &self.map, source, player)
        };
        if targets.is_empty() {
            return Err(GameError::NoValidTargets(source));
        }

        let kind = if is_attack { "attack" } else { "move" };
        log::info!(
            "{}: {} from {} committing {}",
            self.players[player.0].name(),
            kind,
            source,
            troops
        );
        let commitment = Commitment {
            source,
            troops: troops.clone(),
            targets,
        };
        self.action = if is_attack {
            ActionState::Attack(commitment)
        } else {
            ActionState::Move(commitment)
        };
        self.selected = Some(source);
        Ok(self.valid_targets())
    }

    /// Routes a territory selection (or a cleared selection) through
    /// the action state machine. While idle this is inspection; with an
    /// action prepared it either completes the action or cancels it;
    /// while a contest is unresolved it is ignored.
    pub fn select_territory(
        &mut self,
        choice: Option<Territory>,
    ) -> Result<SelectionOutcome, GameError> {
        self.ensure_live()?;
        match std::mem::take(&mut self.action) {
            ActionState::Idle => match choice {
                Some(t) => {
                    self.selected = Some(t);
                    Ok(SelectionOutcome::Inspected(t, self.territory_options(t)))
                }
                None => {
                    self.selected = None;
                    Ok(SelectionOutcome::Cleared)
                }
            },
            ActionState::Contest(pending) => {
                log::warn!("selection ignored while {} is unresolved", pending.handle);
                self.action = ActionState::Contest(pending);
                Ok(SelectionOutcome::Ignored)
            }
            ActionState::Attack(commitment) => match choice {
                Some(target) if commitment.allows(target) => self.begin_battle(commitment, target),
                other => Ok(self.cancel_commitment("attack", commitment, other)),
            },
            ActionState::Move(commitment) => match choice {
                Some(target) if commitment.allows(target) => {
                    Ok(self.complete_move(commitment, target))
                }
                other => Ok(self.cancel_commitment("move", commitment, other)),
            },
        }
    }

    /// Calls off a prepared attack or move. A no-op while idle; an
    /// unresolved contest cannot be abandoned from this side.
    pub fn cancel_action(&mut self) -> Result<(), GameError> {
        match std::mem::take(&mut self.action) {
            ActionState::Idle => Ok(()),
            ActionState::Contest(pending) => {
                self.action = ActionState::Contest(pending);
                Err(GameError::ContestPending)
            }
            ActionState::Attack(c) | ActionState::Move(c) => {
                log::info!("action from {} cancelled", c.source);
                self.selected = Some(c.source);
                Ok(())
            }
        }
    }

    /// Finishes the battle `handle` refers to with the contest's score
    /// pair. This is the single resume point of the two-phase contest
    /// protocol.
    pub fn resolve_contest(
        &mut self,
        handle: ContestHandle,
        scores: ScorePair,
    ) -> Result<BattleReport, GameError> {
        self.ensure_live()?;
        let pending = match std::mem::take(&mut self.action) {
            ActionState::Contest(p) => p,
            other => {
                self.action = other;
                return Err(GameError::NoActiveContest);
            }
        };
        if pending.handle != handle {
            log::warn!("dropped result for {}: {} is in flight", handle, pending.handle);
            self.action = ActionState::Contest(pending);
            return Err(GameError::StaleContest(handle));
        }
        if !scores.in_range() {
            let bad = scores.attacker.max(scores.defender);
            self.action = ActionState::Contest(pending);
            return Err(GameError::ScoreOutOfRange(bad));
        }
        Ok(self.apply_battle(pending, scores))
    }

    /// Closes the current player's turn: acted flags reset, play passes
    /// to the next surviving player, reinforcements land in their
    /// reserve.
    pub fn end_turn(&mut self) -> Result<TurnReport, GameError> {
        self.ensure_live()?;
        if !self.action.is_idle() {
            return Err(GameError::TurnLocked(self.action.name()));
        }

        let previous = self.current_player();
        for t in self.map.owned_by(previous) {
            self.map.territory_mut(t).reset_acted();
        }

        // Advance cyclically past eliminated players.
        let n = self.players.len();
        let mut next = self.current;
        for _ in 0..n {
            next = (next + 1) % n;
            if !self.players[next].is_eliminated() {
                break;
            }
        }
        self.current = next;
        self.turn += 1;
        self.selected = None;

        // Reinforcements scale with points but never vanish entirely.
        let due = (self.players[next].points() / self.config.reinforcement_divisor).max(1) as u32;
        let mut reinforcements = TroopSet::new();
        for _ in 0..due {
            let kind = self.catalog.random_kind(&mut self.rng);
            reinforcements.add(kind, 1);
        }
        for (kind, count) in reinforcements.iter() {
            self.players[next].add_troops(kind, count);
        }

        log::info!(
            "turn {}: {} to play, reinforced with {}",
            self.turn,
            self.players[next].name(),
            reinforcements
        );
        Ok(TurnReport {
            turn: self.turn,
            previous,
            current: PlayerId(next),
            reinforcements,
        })
    }

    /// Deducts the committed troops from the source and either resolves
    /// an undefended attack on the spot or suspends it as a contest.
    fn begin_battle(
        &mut self,
        commitment: Commitment,
        target: Territory,
    ) -> Result<SelectionOutcome, GameError> {
        let Commitment {
            source,
            troops: committed,
            ..
        } = commitment;
        let attacker = self.current_player();

        // Committed troops are in flight for the duration of the battle.
        self.map.territory_mut(source).remove_troops(&committed);
        let defender = self.map.territory(target).owner;
        let defenders = self.map.territory(target).troops.clone();

        let handle = ContestHandle(self.next_handle);
        self.next_handle += 1;

        let lead = committed.dominant_kind(&mut self.rng).unwrap_or_default();
        let category = self.catalog.category_of(lead).unwrap_or(lead).to_string();
        let difficulty = Difficulty::from_attacker_total(committed.total());
        let request = ContestRequest {
            category,
            difficulty,
            attacker,
            defender,
        };

        if defenders.is_empty() {
            // Undefended ground falls without a quiz round.
            log::info!(
                "{} takes undefended {} from {}",
                self.players[attacker.0].name(),
                target,
                source
            );
            let pending = PendingBattle {
                source,
                target,
                committed,
                defenders,
                handle,
                request,
            };
            let report = self.apply_battle(pending, ScorePair::WALKOVER);
            return Ok(SelectionOutcome::Conquered(report));
        }

        log::info!(
            "battle joined at {}: {} committing {} ({} {} quiz, {})",
            target,
            self.players[attacker.0].name(),
            committed,
            request.difficulty,
            request.category,
            handle
        );
        let pending = PendingBattle {
            source,
            target,
            committed,
            defenders,
            handle,
            request: request.clone(),
        };
        self.action = ActionState::Contest(pending);
        Ok(SelectionOutcome::ContestStarted { handle, request })
    }

    /// Applies a move commitment: transfer 1:1, both sides mark the
    /// moved types as acted.
    fn complete_move(&mut self, commitment: Commitment, target: Territory) -> SelectionOutcome {
        let Commitment { source, troops, .. } = commitment;
        let src = self.map.territory_mut(source);
        src.remove_troops(&troops);
        src.mark_acted(&troops);
        let tgt = self.map.territory_mut(target);
        tgt.troops.merge(&troops);
        tgt.mark_acted(&troops);
        self.selected = Some(target);
        log::info!("moved {} from {} to {}", troops, source, target);
        SelectionOutcome::Moved(MoveReport {
            source,
            target,
            moved: troops,
        })
    }

    fn cancel_commitment(
        &mut self,
        kind: &str,
        commitment: Commitment,
        choice: Option<Territory>,
    ) -> SelectionOutcome {
        match choice {
            Some(t) => log::info!("{} cancelled: {} is not a legal target", kind, t),
            None => log::info!("{} cancelled", kind),
        }
        self.selected = Some(commitment.source);
        SelectionOutcome::Cancelled
    }

    /// Applies a resolved battle: survivors, ownership, points,
    /// continent bonuses, elimination, and the victory check, in that
    /// order.
    fn apply_battle(&mut self, pending: PendingBattle, scores: ScorePair) -> BattleReport {
        let PendingBattle {
            source,
            target,
            committed,
            defenders,
            handle,
            request,
        } = pending;
        let attacker = request.attacker;
        let defender = request.defender;

        let result = resolve_battle(scores, &committed, &defenders, &mut self.rng);

        // The garrison fought with everything it had.
        self.map.territory_mut(target).remove_troops(&defenders);

        let mut conquered = false;
        match result.outcome {
            BattleOutcome::Annihilation => {
                log::info!("mutual annihilation at {}: all engaged troops lost", target);
            }
            BattleOutcome::Standoff => {
                // Attack survivors fall back and may act again.
                self.map
                    .territory_mut(source)
                    .troops
                    .merge(&result.attacker_survivors);
                self.map
                    .territory_mut(target)
                    .troops
                    .merge(&result.defender_survivors);
                log::info!(
                    "standoff at {}: both sides reduced to {} units",
                    target,
                    result.defender_survivors.total()
                );
            }
            BattleOutcome::AttackerVictory => {
                conquered = true;
                let tgt = self.map.territory_mut(target);
                tgt.troops.merge(&result.attacker_survivors);
                // Conquering troops are spent for the rest of the turn.
                tgt.mark_acted(&result.attacker_survivors);
                self.map.set_owner(target, Some(attacker));
                self.players[attacker.0].modify_points(self.config.capture_points);
                log::info!(
                    "{} conquers {} with {} surviving units",
                    self.players[attacker.0].name(),
                    target,
                    result.attacker_survivors.total()
                );
            }
            BattleOutcome::DefenderVictory => {
                self.map
                    .territory_mut(target)
                    .troops
                    .merge(&result.defender_survivors);
                log::info!(
                    "{} repelled at {}: defender keeps {} units",
                    self.players[attacker.0].name(),
                    target,
                    result.defender_survivors.total()
                );
            }
        }
        self.selected = Some(if conquered { target } else { source });

        // Continent bookkeeping runs for the former owner first, then
        // the new one; the holder table keeps both sides exactly-once.
        let continents_lost = match defender {
            Some(d) if conquered => self.revoke_continents(d),
            _ => Vec::new(),
        };
        let continents_gained = if conquered {
            self.award_continents(attacker)
        } else {
            Vec::new()
        };

        // A defender left with no territory is out of the game.
        let mut eliminated = None;
        if let Some(d) = defender {
            if conquered && self.map.owned_count(d) == 0 && self.players[d.0].eliminate() {
                log::info!("{} is eliminated", self.players[d.0].name());
                eliminated = Some(d);
            }
        }

        if conquered {
            self.check_victory(attacker);
        }

        BattleReport {
            handle,
            source,
            target,
            scores,
            outcome: result.outcome,
            attacker,
            defender,
            attacker_survivors: result.attacker_survivors,
            defender_survivors: result.defender_survivors,
            conquered,
            continents_gained,
            continents_lost,
            eliminated,
            winner: self.winner,
        }
    }

    /// Awards bonuses for continents the player newly holds in full.
    fn award_continents(&mut self, player: PlayerId) -> Vec<Continent> {
        let mut gained = Vec::new();
        for (i, continent) in ALL_CONTINENTS.iter().enumerate() {
            if self.continent_holder[i] != Some(player)
                && self.map.owns_all(player, continent.territories())
            {
                self.continent_holder[i] = Some(player);
                self.players[player.0].modify_points(continent.bonus_points());
                log::info!(
                    "{} holds all of {} (+{} points)",
                    self.players[player.0].name(),
                    continent,
                    continent.bonus_points()
                );
                gained.push(*continent);
            }
        }
        gained
    }

    /// Revokes bonuses for continents the player no longer holds.
    fn revoke_continents(&mut self, player: PlayerId) -> Vec<Continent> {
        let mut lost = Vec::new();
        for (i, continent) in ALL_CONTINENTS.iter().enumerate() {
            if self.continent_holder[i] == Some(player)
                && !self.map.owns_all(player, continent.territories())
            {
                self.continent_holder[i] = None;
                self.players[player.0].modify_points(-continent.bonus_points());
                log::info!(
                    "{} loses {} (-{} points)",
                    self.players[player.0].name(),
                    continent,
                    continent.bonus_points()
                );
                lost.push(*continent);
            }
        }
        lost
    }

    /// Declares a winner if `candidate` crossed the points threshold or
    /// stands alone. Does nothing once the match is decided.
    fn check_victory(&mut self, candidate: PlayerId) {
        if self.winner.is_some() {
            return;
        }
        let by_points = self.players[candidate.0].points() >= self.victory_threshold();
        let alive = self.players.iter().filter(|p| !p.is_eliminated()).count();
        let last_standing = alive == 1 && !self.players[candidate.0].is_eliminated();
        if by_points || last_standing {
            self.players[candidate.0].set_winner();
            self.winner = Some(candidate);
            log::info!(
                "{} wins the match{}",
                self.players[candidate.0].name(),
                if by_points { " on points" } else { " as the last player standing" }
            );
        }
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        if self.winner.is_some() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
