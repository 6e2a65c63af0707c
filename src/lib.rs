//! Mistvale - tile-based real-time RPG simulation core

pub mod core;
pub mod ecs;
pub mod grid;
pub mod simulation;
pub mod worldgen;
