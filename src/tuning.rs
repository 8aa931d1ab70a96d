//! Data-driven game balance
//!
//! Every physics and gameplay constant the simulation reads lives here so a
//! host can override them from JSON. Defaults match [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Physics and gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Gravity & jumping ===
    pub gravity: f32,
    /// Extra gravity while rising with jump released
    pub jump_cut_multiplier: f32,
    pub jump_force: f32,
    pub max_fall_speed: f32,
    pub glide_fall_speed: f32,
    pub max_jumps: u8,

    // === Horizontal movement ===
    pub move_speed: f32,
    pub ground_accel: f32,
    pub air_accel: f32,
    pub ground_friction: f32,
    pub air_resistance: f32,
    pub turn_multiplier: f32,

    // === Projectiles ===
    pub bullet_speed: f32,
    /// Ticks between automatic shots
    pub fire_rate: u32,
    pub bullet_lifetime_ms: f64,

    // === Enemies & items ===
    pub enemy_speed: f32,
    pub wing_duration_ms: f64,
    pub bonus_wing_chance: f64,

    // === World ===
    pub fall_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_cut_multiplier: JUMP_CUT_MULTIPLIER,
            jump_force: JUMP_FORCE,
            max_fall_speed: MAX_FALL_SPEED,
            glide_fall_speed: GLIDE_FALL_SPEED,
            max_jumps: MAX_JUMPS,

            move_speed: MOVE_SPEED,
            ground_accel: ACCELERATION,
            air_accel: AIR_CONTROL_ACCEL,
            ground_friction: FRICTION,
            air_resistance: AIR_RESISTANCE,
            turn_multiplier: TURN_MULTIPLIER,

            bullet_speed: BULLET_SPEED,
            fire_rate: FIRE_RATE,
            bullet_lifetime_ms: BULLET_LIFETIME_MS,

            enemy_speed: ENEMY_SPEED,
            wing_duration_ms: WING_DURATION_MS,
            bonus_wing_chance: BONUS_WING_CHANCE,

            fall_margin: FALL_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Acceleration for the current contact state
    pub fn accel(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_accel
        } else {
            self.air_accel
        }
    }

    /// Friction for the current contact state
    pub fn friction(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_friction
        } else {
            self.air_resistance
        }
    }
}
