//! Melee combat, death handling, loot, and experience
//!
//! Attacks are gated by the per-entity `Cooldown` component against the
//! tick clock; there is no ambient attack timer anywhere else. Damage
//! variance, crit rolls, and loot rolls deliberately use an unseeded
//! process RNG: combat outcomes vary run to run even on a fixed world
//! seed, which only governs generation.

use rand::Rng;

use crate::core::types::EntityId;
use crate::ecs::components::{
    Component, ComponentKind, Corpse, Decay, Inventory, ItemStack, Position, Vocation,
};
use crate::simulation::spawn::monster_stats;
use crate::simulation::tick::Context;

/// Total experience required to sit at `level`
///
/// The cubic growth curve: 50/3 * (L^3 - 6L^2 + 17L - 12).
pub fn experience_for_level(level: u32) -> u64 {
    let l = level as i64;
    let cubic = l * l * l - 6 * l * l + 17 * l - 12;
    (50 * cubic / 3).max(0) as u64
}

/// Per-level stat growth by vocation: (health, mana)
fn vocation_growth(vocation: Vocation) -> (f32, f32) {
    match vocation {
        Vocation::Knight => (15.0, 5.0),
        Vocation::Paladin => (10.0, 15.0),
        Vocation::Sorcerer => (5.0, 30.0),
        Vocation::Druid => (5.0, 30.0),
    }
}

/// Attempt one melee attack from `attacker` against `target`
///
/// Returns true if the attack fired. A still-cooling attacker or a
/// missing weapon/health pairing is a quiet no-op, not an error; the
/// caller retries next tick.
pub fn resolve_attack(ctx: &mut Context, attacker: EntityId, target: EntityId) -> bool {
    let Some(&cooldown) = ctx.store.cooldown(attacker) else { return false };
    if ctx.now - cooldown.last_attack < cooldown.interval as f64 {
        return false;
    }
    let Some(weapon) = ctx.store.weapon(attacker).cloned() else { return false };
    if ctx.store.health(target).is_none() {
        return false;
    }

    let mut rng = rand::thread_rng();

    // Raw roll: weapon base plus skill scaling, jittered by the variance
    // band, then a flat crit chance
    let skill_bonus = weapon.attack_skill as f32 * 0.5;
    let spread = ctx.config.damage_variance;
    let jitter = rng.gen_range(1.0 - spread..=1.0 + spread);
    let mut damage = (weapon.base_damage + skill_bonus) * jitter;

    let crit = rng.gen_bool(ctx.config.crit_chance);
    if crit {
        damage *= ctx.config.crit_multiplier;
    }

    // Mitigation from the defender, floored at zero
    let mitigation = ctx
        .store
        .defense(target)
        .map(|d| d.armor + d.shield_skill as f32 * 0.2)
        .unwrap_or(0.0);
    let dealt = (damage - mitigation).max(0.0);

    let mut died = false;
    if let Some(health) = ctx.store.health_mut(target) {
        health.current -= dealt;
        died = health.current <= 0.0;
    }

    if let Some(c) = ctx.store.cooldown_mut(attacker) {
        c.last_attack = ctx.now;
    }

    announce_hit(ctx, attacker, target, dealt, crit);
    tracing::debug!(?attacker, ?target, dealt, crit, "attack resolved");

    if died {
        handle_death(ctx, target, Some(attacker));
    }
    true
}

fn announce_hit(ctx: &mut Context, attacker: EntityId, target: EntityId, dealt: f32, crit: bool) {
    let attacker_is_player = ctx.store.player(attacker).is_some();
    let target_is_player = ctx.store.player(target).is_some();

    let msg = if attacker_is_player {
        let name = monster_name(ctx, target);
        if crit {
            format!("You critically hit a {name} for {dealt:.0}.")
        } else {
            format!("You hit a {name} for {dealt:.0}.")
        }
    } else if target_is_player {
        let name = monster_name(ctx, attacker);
        format!("A {name} hits you for {dealt:.0}.")
    } else {
        return;
    };
    ctx.console.add_message(&msg);
}

fn monster_name(ctx: &Context, id: EntityId) -> &'static str {
    ctx.store
        .monster(id)
        .map(|m| monster_stats(m.kind).name)
        .unwrap_or("creature")
}

/// Death cascade: corpse with rolled loot, occupancy release, entity
/// removal, and experience for a player killer
pub fn handle_death(ctx: &mut Context, target: EntityId, killer: Option<EntityId>) {
    let pos = ctx.store.position(target).copied();
    let monster = ctx.store.monster(target).copied();
    let target_was_player = ctx.store.player(target).is_some();

    // Release the tile back-reference through the one sanctioned path
    if let Some(p) = pos {
        let cell = footprint_cell(ctx, target, p);
        ctx.grid.commit_occupancy(target, Some(cell), None);
    }

    let mut dropped = Vec::new();
    if let Some(p) = pos {
        let loot = monster
            .map(|m| roll_loot(m.kind))
            .unwrap_or_default();
        dropped = loot.clone();
        spawn_corpse(ctx, p, loot);
    }

    if let Some(m) = monster {
        let name = monster_stats(m.kind).name;
        ctx.console.add_message(&format!("The {name} is dead."));
        if !dropped.is_empty() {
            let listing = dropped
                .iter()
                .map(|s| format!("{} {}", s.count, s.name))
                .collect::<Vec<_>>()
                .join(", ");
            ctx.console
                .add_message(&format!("The corpse contains: {listing}."));
        }
    } else if target_was_player {
        ctx.console.add_message("You are dead.");
    }

    ctx.store.remove_entity(target);

    if let (Some(m), Some(k)) = (monster, killer) {
        if ctx.store.player(k).is_some() {
            award_experience(ctx, k, m.experience_yield);
        }
    }
}

fn footprint_cell(ctx: &Context, id: EntityId, pos: Position) -> (i32, i32) {
    let (cx, cy) = match ctx.store.collider(id) {
        Some(c) => (pos.x + c.offset_x + c.w / 2.0, pos.y + c.offset_y + c.h / 2.0),
        None => (pos.x, pos.y),
    };
    ctx.grid.world_to_cell(cx, cy)
}

fn spawn_corpse(ctx: &mut Context, pos: Position, loot: Vec<ItemStack>) {
    let corpse = ctx.store.create_entity();
    ctx.store.add_component(corpse, Component::Position(pos));
    ctx.store.add_component(corpse, Component::Corpse(Corpse));
    ctx.store.add_component(
        corpse,
        Component::Decay(Decay { expires_at: ctx.now + ctx.config.corpse_decay as f64 }),
    );
    ctx.store
        .add_component(corpse, Component::Inventory(Inventory { items: loot }));
}

/// Roll each catalog row independently; empty results are normal
fn roll_loot(kind: crate::ecs::components::MonsterKind) -> Vec<ItemStack> {
    let mut rng = rand::thread_rng();
    monster_stats(kind)
        .loot
        .iter()
        .filter_map(|entry| {
            rng.gen_bool(entry.chance).then(|| ItemStack {
                name: entry.item.to_string(),
                count: rng.gen_range(entry.min_count..=entry.max_count),
            })
        })
        .collect()
}

/// Add experience and apply every level-up it pays for
///
/// Level-ups cascade: one large award can cross several thresholds, each
/// applying the vocation's growth and announcing itself.
pub fn award_experience(ctx: &mut Context, id: EntityId, amount: u64) {
    let Some(vocation) = ctx.store.player(id).map(|p| p.vocation) else { return };
    let Some(exp) = ctx.store.experience_mut(id) else { return };

    exp.points += amount;
    let points = exp.points;
    let mut level = exp.level;
    let mut gained = 0u32;
    while points >= experience_for_level(level + 1) {
        level += 1;
        gained += 1;
    }
    exp.level = level;

    ctx.console
        .add_message(&format!("You gained {amount} experience."));

    if gained == 0 {
        return;
    }

    let (health_growth, mana_growth) = vocation_growth(vocation);
    if let Some(h) = ctx.store.health_mut(id) {
        h.max += health_growth * gained as f32;
        h.current = h.max;
    }
    if let Some(m) = ctx.store.mana_mut(id) {
        m.max += mana_growth * gained as f32;
        m.current = m.max;
    }
    ctx.console
        .add_message(&format!("You advanced to level {level}."));
    tracing::debug!(?id, level, "level up");
}

/// Drive melee for every combat-capable entity
///
/// Monsters in melee range of the player swing at it; the player swings
/// back at the nearest monster in range. Both sides go through the same
/// cooldown-gated [`resolve_attack`].
pub fn combat_system(ctx: &mut Context) {
    let Some(&player) = ctx
        .store
        .query(&[ComponentKind::Player, ComponentKind::Position])
        .first()
    else {
        return;
    };
    let Some(player_pos) = ctx.store.position(player).map(|p| p.as_vec2()) else { return };
    let melee = ctx.config.melee_range;

    let monsters = ctx.store.query(&[
        ComponentKind::Monster,
        ComponentKind::Position,
        ComponentKind::Cooldown,
    ]);

    let mut nearest: Option<(EntityId, f32)> = None;
    for id in monsters {
        let Some(pos) = ctx.store.position(id).map(|p| p.as_vec2()) else { continue };
        let dist = pos.distance(&player_pos);
        if dist <= melee {
            resolve_attack(ctx, id, player);
            // The swing may have killed the player
            if !ctx.store.is_live(player) {
                return;
            }
        }
        if dist <= melee && nearest.map(|(_, d)| dist < d).unwrap_or(true) {
            nearest = Some((id, dist));
        }
    }

    if let Some((target, _)) = nearest {
        if ctx.store.is_live(target) {
            resolve_attack(ctx, player, target);
        }
    }
}
