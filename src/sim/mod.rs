//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One physics step per tick, wall-clock delta only for timers
//! - Seeded RNG only
//! - Stable iteration order (map order, then spawn order)
//! - No rendering, audio or platform dependencies

pub mod behavior;
pub mod collision;
pub mod level;
pub mod map;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, move_player};
pub use level::{DeathCause, TickEvents, Transition, transition};
pub use map::{MapReport, ParseOptions, ParsedMap, parse_map, validate_map};
pub use rect::Rect;
pub use state::{
    Enemy, FloatingText, Item, ItemKind, LevelPhase, LevelSession, MapKind, Particle, Player,
    Projectile, Tile, TileKind, World,
};
pub use tick::{TickInput, TickOutcome, tick};
