//! Wingjump - a tile-based side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, collisions, level state)
//! - `levels`: Built-in level catalog
//! - `campaign`: In-memory level progression
//! - `tuning`: Data-driven physics and gameplay constants
//! - `error`: Crate error type

pub mod campaign;
pub mod error;
pub mod levels;
pub mod sim;
pub mod tuning;

pub use campaign::Campaign;
pub use error::{Error, Result};
pub use levels::LevelDef;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Edge length of one map tile in world pixels
    pub const TILE_SIZE: f32 = 40.0;

    /// Player box
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Player spawn when a map has no start marker
    pub const DEFAULT_START: (f32, f32) = (100.0, 100.0);

    /// Gravity added to vy every tick (px/tick²)
    pub const GRAVITY: f32 = 0.72;
    /// Gravity multiplier while rising without holding jump
    pub const JUMP_CUT_MULTIPLIER: f32 = 2.5;
    /// Launch velocity for both the first and the double jump
    pub const JUMP_FORCE: f32 = -19.0;
    /// Horizontal speed cap (px/tick)
    pub const MOVE_SPEED: f32 = 5.0;
    /// Terminal fall speed (px/tick)
    pub const MAX_FALL_SPEED: f32 = 16.0;
    /// Pinned descent speed while gliding
    pub const GLIDE_FALL_SPEED: f32 = 2.0;
    /// Multiplier applied to acceleration when reversing direction
    pub const TURN_MULTIPLIER: f32 = 2.0;
    /// Maximum jumps between landings
    pub const MAX_JUMPS: u8 = 2;

    pub const ACCELERATION: f32 = 0.3;
    pub const FRICTION: f32 = 0.6;
    pub const AIR_RESISTANCE: f32 = 0.05;
    pub const AIR_CONTROL_ACCEL: f32 = 0.4;

    /// Projectile speed (px/tick)
    pub const BULLET_SPEED: f32 = 6.0;
    /// Projectile box
    pub const BULLET_SIZE: f32 = 10.0;
    /// Ticks between automatic shots
    pub const FIRE_RATE: u32 = 45;
    /// Projectile lifetime in milliseconds
    pub const BULLET_LIFETIME_MS: f64 = 1000.0;

    /// Enemy patrol speed (px/tick)
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SIZE: f32 = 30.0;

    /// Wing power-up duration in milliseconds
    pub const WING_DURATION_MS: f64 = 10_000.0;
    /// Chance that a platform tile grows a bonus wing above it
    pub const BONUS_WING_CHANCE: f64 = 0.10;

    /// Distance below the map bottom at which the player counts as fallen
    pub const FALL_MARGIN: f32 = 200.0;

    /// Floating text lifetime (ticks)
    pub const FLOATING_TEXT_LIFE: u32 = 60;
    /// Particles spawned per festive jump
    pub const JUMP_PARTICLE_COUNT: usize = 5;
}
