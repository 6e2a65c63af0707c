//! Simulation configuration with documented constants
//!
//! All gameplay tuning numbers are collected here with explanations of
//! their purpose and how they interact with each other. Generation-side
//! constants (attempt budgets, spawn counts) are fixed by contract and
//! live next to the generators instead.

use serde::{Deserialize, Serialize};

use crate::core::error::{MistvaleError, Result};

/// Configuration for the simulation systems
///
/// Changing these values affects gameplay pacing, not generation
/// determinism; map layout depends only on (width, height, seed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === GRID ===
    /// Size of one tile in world units
    ///
    /// Positions are continuous; an entity occupies the tile at
    /// floor(position / tile_size). All footprint math assumes this.
    pub tile_size: f32,

    // === AI ===
    /// Distance within which a monster notices the player (world units)
    ///
    /// Larger values make the map feel more hostile; chase decisions are
    /// re-evaluated from scratch every tick, so this is also the radius
    /// at which behavior can oscillate near the boundary.
    pub detection_radius: f32,

    /// Distance at which a chasing monster stops and attacks
    ///
    /// Must be well below detection_radius or monsters never close in.
    pub melee_range: f32,

    /// Health fraction below which a monster flees
    ///
    /// Evaluated as current/max each tick with no hysteresis band;
    /// oscillation at the threshold is a documented property.
    pub flee_health_fraction: f32,

    /// Seconds between wander target re-rolls
    pub wander_interval: f32,

    /// Radius around the current position for wander targets (world units)
    pub wander_radius: f32,

    // === COMBAT ===
    /// Seconds between attacks for an entity with no weapon-specific value
    pub base_attack_cooldown: f32,

    /// Probability that a hit is critical
    pub crit_chance: f64,

    /// Damage multiplier applied on a critical hit
    pub crit_multiplier: f32,

    /// Fractional +/- variance applied to computed damage
    ///
    /// At 0.2, a 50-damage hit lands between 40 and 60 before mitigation.
    pub damage_variance: f32,

    // === REGENERATION ===
    /// Seconds between passive regeneration ticks
    pub regen_interval: f32,

    /// Health restored per regeneration tick
    pub health_regen: f32,

    /// Mana restored per regeneration tick
    pub mana_regen: f32,

    // === DECAY ===
    /// Seconds a corpse persists before it is removed from the store
    pub corpse_decay: f32,

    // === TERRAIN ===
    /// Speed multiplier while the entity's center is over water
    pub water_speed_multiplier: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,

            detection_radius: 220.0,
            melee_range: 40.0,
            flee_health_fraction: 0.25,
            wander_interval: 2.5,
            wander_radius: 120.0,

            base_attack_cooldown: 1.0,
            crit_chance: 0.1,
            crit_multiplier: 1.5,
            damage_variance: 0.2,

            regen_interval: 3.0,
            health_regen: 2.0,
            mana_regen: 4.0,

            corpse_decay: 60.0,

            water_speed_multiplier: 0.5,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// missing fields
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.tile_size <= 0.0 {
            return Err(MistvaleError::InvalidConfig(
                "tile_size must be positive".into(),
            ));
        }

        if self.melee_range >= self.detection_radius {
            return Err(MistvaleError::InvalidConfig(format!(
                "melee_range ({}) must be < detection_radius ({})",
                self.melee_range, self.detection_radius
            )));
        }

        if !(0.0..1.0).contains(&self.flee_health_fraction) {
            return Err(MistvaleError::InvalidConfig(format!(
                "flee_health_fraction ({}) must be in [0, 1)",
                self.flee_health_fraction
            )));
        }

        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(MistvaleError::InvalidConfig(format!(
                "crit_chance ({}) must be in [0, 1]",
                self.crit_chance
            )));
        }

        Ok(())
    }
}
