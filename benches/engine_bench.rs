use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::rngs::StdRng;
use rand::SeedableRng;

use warlore::action::attack_targets;
use warlore::board::{MapState, PlayerId, TroopSet, WorldGraph, ALL_TERRITORIES};
use warlore::contest::ScorePair;
use warlore::game::Game;
use warlore::resolve::{resolve_battle, sample_units, survival_rate};

fn large_force() -> TroopSet {
    [
        ("infantry", 40u32),
        ("cavalry", 25),
        ("artillery", 15),
        ("archers", 20),
    ]
    .into_iter()
    .collect()
}

fn small_force() -> TroopSet {
    [("infantry", 6u32), ("cavalry", 4)].into_iter().collect()
}

/// A fully claimed map with mixed garrisons, split between two players.
fn contested_map() -> MapState {
    let mut map = MapState::empty();
    for (i, t) in ALL_TERRITORIES.into_iter().enumerate() {
        map.set_owner(t, Some(PlayerId(i % 2)));
        map.territory_mut(t).add_troops("infantry", (i as u32 % 5) + 1);
        map.territory_mut(t).add_troops("cavalry", i as u32 % 3);
    }
    map
}

fn bench_survival_rate(c: &mut Criterion) {
    c.bench_function("survival_rate_full_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for w in 0..=100u8 {
                for l in 0..=w {
                    acc += survival_rate(black_box(w), black_box(l));
                }
            }
            acc
        })
    });
}

fn bench_resolve_battle_decisive(c: &mut Criterion) {
    let attackers = large_force();
    let defenders = small_force();
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("resolve_battle_decisive_100_units", |b| {
        b.iter(|| {
            resolve_battle(
                black_box(ScorePair::new(80, 20)),
                black_box(&attackers),
                black_box(&defenders),
                &mut rng,
            )
        })
    });
}

fn bench_resolve_battle_standoff(c: &mut Criterion) {
    let attackers = large_force();
    let defenders = small_force();
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("resolve_battle_standoff", |b| {
        b.iter(|| {
            resolve_battle(
                black_box(ScorePair::new(55, 55)),
                black_box(&attackers),
                black_box(&defenders),
                &mut rng,
            )
        })
    });
}

fn bench_sample_units(c: &mut Criterion) {
    let force = large_force();
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("sample_units_keep_half", |b| {
        b.iter(|| sample_units(black_box(&force), black_box(50), &mut rng))
    });
}

fn bench_attack_targets(c: &mut Criterion) {
    let graph = WorldGraph::standard();
    let map = contested_map();
    c.bench_function("attack_targets_whole_map", |b| {
        b.iter(|| {
            for t in ALL_TERRITORIES {
                let _ = attack_targets(black_box(&graph), black_box(&map), t, PlayerId(0));
            }
        })
    });
}

fn bench_map_clone(c: &mut Criterion) {
    let map = contested_map();
    c.bench_function("map_state_clone", |b| b.iter(|| black_box(&map).clone()));
}

fn bench_match_setup(c: &mut Criterion) {
    c.bench_function("match_setup_4_players", |b| {
        b.iter(|| Game::seeded(&["Alexandra", "Babur", "Cyrus", "Dido"], 42).unwrap())
    });
}

fn bench_prepare_and_cancel(c: &mut Criterion) {
    let mut game = Game::seeded(&["Ada", "Grace"], 9).unwrap();
    let mut picked = None;
    for source in game.map().owned_by(PlayerId(0)) {
        let commit = game.map().territory(source).available_for_action();
        if commit.is_empty() {
            continue;
        }
        if game.prepare_attack(source, &commit).is_ok() {
            game.cancel_action().unwrap();
            picked = Some((source, commit));
            break;
        }
    }
    let (source, commit) = picked.expect("a starting territory can attack");

    c.bench_function("prepare_and_cancel_attack", |b| {
        b.iter(|| {
            game.prepare_attack(black_box(source), black_box(&commit)).unwrap();
            game.cancel_action().unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_survival_rate,
    bench_resolve_battle_decisive,
    bench_resolve_battle_standoff,
    bench_sample_units,
    bench_attack_targets,
    bench_map_clone,
    bench_match_setup,
    bench_prepare_and_cancel,
);
criterion_main!(benches);
