//! Warlore self-play demo.
//!
//! Plays a full match with random decisions, standing in for both the
//! UI and the quiz provider, then prints the final rankings.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --players N    Number of players, 2-6 (default: 4)
//!   --seed N       Random seed, 0 for entropy (default: 0)
//!   --max-turns N  Stop after this many turns (default: 200)
//!   --config PATH  Match rules as a JSON file (default: built-in)

use std::env;
use std::fs;
use std::process;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use warlore::board::{PlayerColor, ALL_COLORS};
use warlore::catalog::TroopCatalog;
use warlore::contest::{ScorePair, MAX_SCORE};
use warlore::game::{Game, GameConfig, SelectionOutcome};

const NAMES: [&str; 6] = ["Alexandra", "Babur", "Cyrus", "Dido", "Eleanor", "Frederick"];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut players: usize = 4;
    let mut seed: u64 = 0;
    let mut max_turns: u32 = 200;
    let mut config = GameConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                i += 1;
                players = args[i].parse().expect("invalid --players value");
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("invalid --seed value");
            }
            "--max-turns" => {
                i += 1;
                max_turns = args[i].parse().expect("invalid --max-turns value");
            }
            "--config" => {
                i += 1;
                let text = fs::read_to_string(&args[i]).expect("unreadable --config file");
                config = serde_json::from_str(&text).expect("invalid --config value");
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let names = &NAMES[..players.min(NAMES.len())];
    let roster: Vec<(&str, PlayerColor)> = names.iter().copied().zip(ALL_COLORS).collect();
    let game = Game::with_roster(
        &roster,
        config,
        TroopCatalog::standard(),
        match seed {
            0 => None,
            s => Some(s),
        },
    );
    let mut game = match game {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let mut rng = match seed {
        0 => SmallRng::from_entropy(),
        s => SmallRng::seed_from_u64(s.wrapping_add(1)),
    };

    while !game.is_over() && game.turn() <= max_turns {
        play_turn(&mut game, &mut rng);
    }

    println!("match over after {} turns", game.turn());
    for (rank, id) in game.rankings().iter().enumerate() {
        let p = game.player(*id);
        let status = if p.is_winner() {
            " (winner)"
        } else if p.is_eliminated() {
            " (eliminated)"
        } else {
            ""
        };
        println!(
            "  {}. {} [{}] {} points, {}/{} answers correct{}",
            rank + 1,
            p.name(),
            p.color().name(),
            p.score(),
            p.stats().correct(),
            p.stats().correct() + p.stats().wrong(),
            status
        );
    }
}

/// One player's turn: deploy the reserve, try a few actions, end.
fn play_turn(game: &mut Game, rng: &mut SmallRng) {
    let me = game.current_player();

    // Reinforce a random owned territory with the whole reserve.
    let reserve = game.player(me).reserve().clone();
    let owned = game.map().owned_by(me);
    if !reserve.is_empty() && !owned.is_empty() {
        let spot = owned[rng.gen_range(0..owned.len())];
        if let Err(e) = game.deploy_troops(spot, &reserve) {
            log::warn!("deploy to {} failed: {}", spot, e);
        }
    }

    for _ in 0..3 {
        if game.is_over() {
            return;
        }
        if !try_action(game, rng) {
            break;
        }
    }

    if !game.is_over() {
        if let Err(e) = game.end_turn() {
            log::warn!("could not end turn: {}", e);
        }
    }
}

/// Prepares and carries out one attack or move from a random territory.
/// Returns false when the player has nothing left to do.
fn try_action(game: &mut Game, rng: &mut SmallRng) -> bool {
    let me = game.current_player();
    let sources: Vec<_> = game
        .map()
        .owned_by(me)
        .into_iter()
        .filter(|t| game.map().territory(*t).has_actionable_troops())
        .collect();
    if sources.is_empty() {
        return false;
    }
    let source = sources[rng.gen_range(0..sources.len())];
    let commit = game.map().territory(source).available_for_action();

    // Favor attacks; fall back to a move when no enemy is in reach.
    let targets = if rng.gen_bool(0.7) {
        game.prepare_attack(source, &commit)
            .map(|t| t.to_vec())
            .or_else(|_| game.prepare_move(source, &commit).map(|t| t.to_vec()))
    } else {
        game.prepare_move(source, &commit)
            .map(|t| t.to_vec())
            .or_else(|_| game.prepare_attack(source, &commit).map(|t| t.to_vec()))
    };
    let targets = match targets {
        Ok(t) => t,
        Err(e) => {
            log::debug!("no action from {}: {}", source, e);
            return false;
        }
    };

    let target = targets[rng.gen_range(0..targets.len())];
    match game.select_territory(Some(target)) {
        Ok(SelectionOutcome::ContestStarted { handle, request }) => {
            // Stand in for the quiz: random percentage scores.
            let scores = ScorePair::new(
                rng.gen_range(0..=MAX_SCORE),
                rng.gen_range(0..=MAX_SCORE),
            );
            game.record_answer(request.attacker, &request.category, scores.attacker >= 50);
            if let Some(defender) = request.defender {
                game.record_answer(defender, &request.category, scores.defender >= 50);
            }
            if let Err(e) = game.resolve_contest(handle, scores) {
                log::warn!("contest resolution failed: {}", e);
            }
            true
        }
        Ok(_) => true,
        Err(e) => {
            log::warn!("selection failed: {}", e);
            false
        }
    }
}

fn print_usage() {
    eprintln!("Usage: warlore [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --players N    Number of players, 2-6 (default: 4)");
    eprintln!("  --seed N       Random seed, 0 for entropy (default: 0)");
    eprintln!("  --max-turns N  Stop after this many turns (default: 200)");
    eprintln!("  --config PATH  Match rules as a JSON file (default: built-in)");
    eprintln!("  --help         Show this message");
}
