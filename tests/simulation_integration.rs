//! Integration tests for the simulation layer
//!
//! These tests run the full tick pipeline over real generated worlds:
//! - Store query ordering guarantees the systems rely on
//! - Combat to the death: corpse, loot container, experience award
//! - Corpse decay clearing the store and the tile back-reference
//! - Passive regeneration over time
//! - A smoke run over a generated overworld

use mistvale::core::config::SimulationConfig;
use mistvale::core::console::BufferedConsole;
use mistvale::ecs::components::{Component, ComponentKind, MonsterKind, Vocation, Weapon};
use mistvale::ecs::Store;
use mistvale::grid::{Grid, TileItem};
use mistvale::simulation::{run_tick, spawn_all, spawn_monster, spawn_player, Context};
use mistvale::worldgen::{generate, MapKind};

fn open_grid(w: usize, h: usize) -> Grid {
    let mut grid = Grid::new(w, h, 32.0);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let border = x == 0 || y == 0 || x == w as i32 - 1 || y == h as i32 - 1;
            grid.push_item(x, y, if border { TileItem::Wall } else { TileItem::Grass });
        }
    }
    grid
}

// ============================================================================
// Store ordering
// ============================================================================

/// Systems assume query results come back in creation order; the first
/// match of a singleton query is "the" player.
#[test]
fn test_query_order_is_creation_order() {
    let mut store = Store::new();
    let mut grid = open_grid(32, 32);
    let config = SimulationConfig::default();

    let player = spawn_player(&mut store, &mut grid, Vocation::Druid, 64.0, 64.0, &config, 0.0);
    let first = spawn_monster(&mut store, &mut grid, MonsterKind::Rat, 200.0, 64.0, 0.0);
    let second = spawn_monster(&mut store, &mut grid, MonsterKind::Wolf, 300.0, 64.0, 0.0);

    let ids = store.query(&[ComponentKind::Position]);
    assert_eq!(ids, vec![player, first, second]);

    let players = store.query(&[ComponentKind::Player]);
    assert_eq!(players, vec![player]);
}

// ============================================================================
// Combat lifecycle
// ============================================================================

/// Kill a rat, verify the full death cascade, then fast-forward past the
/// decay timer and verify the corpse vanishes.
#[test]
fn test_kill_loot_decay_lifecycle() {
    let mut store = Store::new();
    let mut grid = open_grid(32, 32);
    let config = SimulationConfig::default();
    let mut console = BufferedConsole::default();

    let player = spawn_player(&mut store, &mut grid, Vocation::Knight, 100.0, 100.0, &config, 0.0);
    // In melee range of the player
    let rat = spawn_monster(&mut store, &mut grid, MonsterKind::Rat, 120.0, 100.0, 0.0);

    // Overwhelming weapon so the rat dies within a couple of swings
    store.add_component(
        player,
        Component::Weapon(Weapon { name: "doom blade".into(), base_damage: 500.0, attack_skill: 50 }),
    );

    let dt = 1.0 / 20.0;
    let mut now = 0.0;
    for tick in 0..200 {
        now = tick as f64 * dt as f64;
        let mut ctx = Context {
            store: &mut store,
            grid: &mut grid,
            console: &mut console,
            config: &config,
            now,
        };
        run_tick(&mut ctx, dt);
        if !store.is_live(rat) {
            break;
        }
    }

    assert!(!store.is_live(rat), "rat should have died");
    assert!(store.is_live(player));

    // Death cascade: corpse with an inventory, experience award, messages
    let corpses = store.query(&[ComponentKind::Corpse]);
    assert_eq!(corpses.len(), 1);
    assert!(store.inventory(corpses[0]).is_some());
    assert_eq!(store.experience(player).unwrap().points, 5);
    assert!(console.messages.iter().any(|m| m.contains("The rat is dead.")));

    // Fast-forward past the decay timer
    let mut ctx = Context {
        store: &mut store,
        grid: &mut grid,
        console: &mut console,
        config: &config,
        now: now + config.corpse_decay as f64 + 1.0,
    };
    run_tick(&mut ctx, dt);
    assert!(store.query(&[ComponentKind::Corpse]).is_empty());
}

#[test]
fn test_player_levels_up_from_large_kill() {
    let mut store = Store::new();
    let mut grid = open_grid(32, 32);
    let config = SimulationConfig::default();
    let mut console = BufferedConsole::default();

    let player = spawn_player(&mut store, &mut grid, Vocation::Knight, 100.0, 100.0, &config, 0.0);
    let troll = spawn_monster(&mut store, &mut grid, MonsterKind::Troll, 120.0, 100.0, 0.0);
    // Seed enough points that the troll's 120 crosses the level-2 line
    if let Some(exp) = store.experience_mut(player) {
        exp.points = 90;
    }
    store.add_component(
        player,
        Component::Weapon(Weapon { name: "doom blade".into(), base_damage: 5000.0, attack_skill: 50 }),
    );
    let base_health = store.health(player).unwrap().max;

    let dt = 1.0 / 20.0;
    for tick in 0..400 {
        let mut ctx = Context {
            store: &mut store,
            grid: &mut grid,
            console: &mut console,
            config: &config,
            now: tick as f64 * dt as f64,
        };
        run_tick(&mut ctx, dt);
        if !store.is_live(troll) {
            break;
        }
    }

    assert!(!store.is_live(troll));
    let exp = store.experience(player).unwrap();
    assert_eq!(exp.points, 210);
    assert_eq!(exp.level, 3, "90 + 120 points pays for levels 2 and 3");
    // Knight growth: +15 health per level
    assert_eq!(store.health(player).unwrap().max, base_health + 30.0);
    assert!(console.messages.iter().any(|m| m.contains("You advanced to level 3.")));
}

// ============================================================================
// Regeneration
// ============================================================================

#[test]
fn test_player_regenerates_over_time() {
    let mut store = Store::new();
    let mut grid = open_grid(32, 32);
    let config = SimulationConfig::default();
    let mut console = BufferedConsole::default();

    let player = spawn_player(&mut store, &mut grid, Vocation::Paladin, 100.0, 100.0, &config, 0.0);
    if let Some(h) = store.health_mut(player) {
        h.current = 50.0;
    }

    // Simulate 31 seconds: ten regen intervals at 3s each
    let dt = 1.0 / 20.0;
    for tick in 0..620 {
        let mut ctx = Context {
            store: &mut store,
            grid: &mut grid,
            console: &mut console,
            config: &config,
            now: tick as f64 * dt as f64,
        };
        run_tick(&mut ctx, dt);
    }

    let health = store.health(player).unwrap();
    assert!(
        (health.current - 70.0).abs() < 0.01,
        "ten regen ticks of 2.0 each, got {}",
        health.current
    );
}

// ============================================================================
// Smoke run over a generated world
// ============================================================================

/// Generate a real overworld, materialize everything, and run fifteen
/// simulated seconds. The point is that nothing panics, every live
/// entity stays on the map, and the monster population only shrinks.
#[test]
fn test_generated_overworld_smoke_run() {
    let generated = generate(96, 96, 1337, MapKind::Overworld);
    let mut grid = generated.grid;
    let mut store = Store::new();
    let mut console = BufferedConsole::default();
    let config = SimulationConfig::default();

    spawn_all(&mut store, &mut grid, &generated.spawns, 0.0);
    let monsters_before = store.query(&[ComponentKind::Monster]).len();
    assert!(monsters_before > 0);

    spawn_player(
        &mut store,
        &mut grid,
        Vocation::Knight,
        47.0 * 32.0 + 6.0,
        49.0 * 32.0 + 2.0,
        &config,
        0.0,
    );

    let dt = 1.0 / 20.0;
    for tick in 0..300 {
        let mut ctx = Context {
            store: &mut store,
            grid: &mut grid,
            console: &mut console,
            config: &config,
            now: tick as f64 * dt as f64,
        };
        run_tick(&mut ctx, dt);
    }

    let world_w = 96.0 * 32.0;
    for id in store.query(&[ComponentKind::Position, ComponentKind::Collider]) {
        let p = store.position(id).unwrap();
        assert!(p.x > 0.0 && p.x < world_w, "entity {id:?} escaped on x: {}", p.x);
        assert!(p.y > 0.0 && p.y < world_w, "entity {id:?} escaped on y: {}", p.y);
    }

    let monsters_after = store.query(&[ComponentKind::Monster]).len();
    assert!(monsters_after <= monsters_before);
}
