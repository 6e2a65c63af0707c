//! AI behavior evaluation
//!
//! Behavior is recomputed from thresholds every tick with no stored
//! transition history and no hysteresis band; an entity sitting exactly
//! at the detection radius or the flee fraction can oscillate between
//! behaviors on consecutive ticks. That oscillation is a documented,
//! tested property of the design, not a bug.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::ecs::components::{ComponentKind, Velocity};
use crate::simulation::tick::Context;

/// Tagged behavior decision, separated from movement so the transition
/// logic is unit-testable in isolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Move directly away from the player
    Flee,
    /// Move toward the player, stopping within melee range
    Chase,
    /// Drift toward a periodically re-rolled nearby point
    Wander,
}

/// Pure threshold evaluation
///
/// Priority: flee beats chase beats wander. `player_distance` is absent
/// when no player exists (the monster wanders).
pub fn evaluate(
    health_fraction: f32,
    player_distance: Option<f32>,
    config: &SimulationConfig,
) -> Behavior {
    match player_distance {
        Some(_) if health_fraction < config.flee_health_fraction => Behavior::Flee,
        Some(d) if d <= config.detection_radius => Behavior::Chase,
        _ => Behavior::Wander,
    }
}

/// Apply behavior decisions to every AI entity's velocity
pub fn ai_system(ctx: &mut Context) {
    let player_pos = ctx
        .store
        .query(&[ComponentKind::Player, ComponentKind::Position])
        .first()
        .and_then(|&id| ctx.store.position(id))
        .map(|p| p.as_vec2());

    let agents = ctx.store.query(&[
        ComponentKind::Ai,
        ComponentKind::Position,
        ComponentKind::Velocity,
    ]);

    let mut rng = rand::thread_rng();

    for id in agents {
        let Some(pos) = ctx.store.position(id).map(|p| p.as_vec2()) else { continue };
        let health_fraction = ctx
            .store
            .health(id)
            .map(|h| h.current / h.max)
            .unwrap_or(1.0);
        let player_distance = player_pos.map(|p| pos.distance(&p));

        let behavior = evaluate(health_fraction, player_distance, ctx.config);

        let Some(&ai) = ctx.store.ai(id) else { continue };
        let velocity = match behavior {
            Behavior::Flee => {
                // player_pos is Some whenever Flee is selected
                let away = (pos - player_pos.unwrap_or_default()).normalize();
                Velocity { x: away.x * ai.speed, y: away.y * ai.speed }
            }
            Behavior::Chase => {
                let target = player_pos.unwrap_or_default();
                if pos.distance(&target) <= ctx.config.melee_range {
                    Velocity::default()
                } else {
                    let toward = (target - pos).normalize();
                    Velocity { x: toward.x * ai.speed, y: toward.y * ai.speed }
                }
            }
            Behavior::Wander => {
                let mut target = ai.wander_target;
                if ctx.now >= ai.wander_deadline {
                    target = Vec2::new(
                        pos.x + rng.gen_range(-ctx.config.wander_radius..=ctx.config.wander_radius),
                        pos.y + rng.gen_range(-ctx.config.wander_radius..=ctx.config.wander_radius),
                    );
                    if let Some(state) = ctx.store.ai_mut(id) {
                        state.wander_target = target;
                        state.wander_deadline = ctx.now + ctx.config.wander_interval as f64;
                    }
                }
                if pos.distance(&target) < 2.0 {
                    Velocity::default()
                } else {
                    let toward = (target - pos).normalize();
                    Velocity { x: toward.x * ai.speed, y: toward.y * ai.speed }
                }
            }
        };

        if let Some(v) = ctx.store.velocity_mut(id) {
            *v = velocity;
        }
    }
}
