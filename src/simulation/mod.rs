//! Simulation systems: movement, AI, combat, spawning, and the tick loop

pub mod ai;
pub mod combat;
pub mod movement;
pub mod spawn;
pub mod tick;

pub use ai::{ai_system, evaluate, Behavior};
pub use combat::{award_experience, combat_system, resolve_attack};
pub use movement::resolve_movement;
pub use spawn::{spawn_all, spawn_monster, spawn_player};
pub use tick::{decay_system, regen_system, run_tick, Context};
