//! Tick orchestration
//!
//! One `Context` threads every shared collaborator through the systems
//! as plain borrowed arguments; nothing in the simulation reads ambient
//! or global state. The clock is a plain f64 second count owned by the
//! caller, so tests can dial time directly.

use crate::core::config::SimulationConfig;
use crate::core::console::Console;
use crate::ecs::components::ComponentKind;
use crate::ecs::Store;
use crate::grid::Grid;
use crate::simulation::{ai, combat, movement};

/// Borrowed view of everything a system may touch during one tick
pub struct Context<'a> {
    pub store: &'a mut Store,
    pub grid: &'a mut Grid,
    pub console: &'a mut dyn Console,
    pub config: &'a SimulationConfig,
    /// Simulation clock in seconds
    pub now: f64,
}

/// Run one fixed-order simulation tick
///
/// Order is part of the contract: combat resolves against the positions
/// movement committed last tick, AI reacts to combat's outcome, regen
/// and decay run on the updated clock, and movement commits last so the
/// next tick's combat sees settled positions.
pub fn run_tick(ctx: &mut Context, dt: f32) {
    combat::combat_system(ctx);
    ai::ai_system(ctx);
    regen_system(ctx);
    decay_system(ctx);
    movement::resolve_movement(ctx.store, ctx.grid, ctx.config, dt);
}

/// Passive health and mana restoration on a per-entity timer
pub fn regen_system(ctx: &mut Context) {
    for id in ctx.store.query(&[ComponentKind::Regen, ComponentKind::Health]) {
        let Some(&regen) = ctx.store.regen(id) else { continue };
        if ctx.now < regen.next_at {
            continue;
        }

        if let Some(h) = ctx.store.health_mut(id) {
            h.current = (h.current + ctx.config.health_regen).min(h.max);
        }
        if let Some(m) = ctx.store.mana_mut(id) {
            m.current = (m.current + ctx.config.mana_regen).min(m.max);
        }
        if let Some(r) = ctx.store.regen_mut(id) {
            r.next_at = ctx.now + ctx.config.regen_interval as f64;
        }
    }
}

/// Remove expired short-lived entities (corpses past their timer)
pub fn decay_system(ctx: &mut Context) {
    for id in ctx.store.query(&[ComponentKind::Decay]) {
        let Some(&decay) = ctx.store.decay(id) else { continue };
        if ctx.now < decay.expires_at {
            continue;
        }

        if let Some(&pos) = ctx.store.position(id) {
            let cell = ctx.grid.world_to_cell(pos.x, pos.y);
            ctx.grid.commit_occupancy(id, Some(cell), None);
        }
        ctx.store.remove_entity(id);
        tracing::debug!(?id, "decayed entity removed");
    }
}
