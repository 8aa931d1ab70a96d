//! Level state and core simulation types
//!
//! Plain data records only. Behavior lives in `physics`, `behavior` and
//! `level`; the session that owns all of it is [`LevelSession`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::DeathCause;
use super::map::{ParseOptions, ParsedMap, parse_map};
use super::rect::Rect;
use crate::consts::*;
use crate::levels::LevelDef;
use crate::tuning::Tuning;

/// Tile alphabet of a level map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Platform,
    Spike,
    Lava,
    Start,
    End,
    Monster,
    Wing,
    Portal,
}

impl TileKind {
    /// Decode a map character. Unknown characters yield `None`.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            ' ' => TileKind::Empty,
            'X' => TileKind::Wall,
            '-' => TileKind::Platform,
            '^' => TileKind::Spike,
            'L' => TileKind::Lava,
            'S' => TileKind::Start,
            'E' => TileKind::End,
            'M' => TileKind::Monster,
            'W' => TileKind::Wing,
            'P' => TileKind::Portal,
            _ => return None,
        })
    }

    /// Blocks movement (platforms only from above)
    pub fn is_solid(&self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Platform)
    }

    /// Kills the player on any overlap
    pub fn is_lethal(&self) -> bool {
        matches!(self, TileKind::Spike | TileKind::Lava)
    }
}

/// A piece of static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub rect: Rect,
}

/// Which map of the level is currently simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapKind {
    #[default]
    Main,
    Secret,
}

/// Lifecycle phase of a level session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelPhase {
    #[default]
    Running,
    Dead(DeathCause),
    Won { secret_completed: bool },
}

/// The player-controlled box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub dead: bool,
    pub won: bool,
    pub facing_right: bool,
    /// Jumps used since the last landing (0..=2)
    pub jump_count: u8,
    /// Remaining wing power-up time
    pub wing_time_left_ms: f64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::square(pos, PLAYER_SIZE),
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            dead: false,
            won: false,
            facing_right: true,
            jump_count: 0,
            wing_time_left_ms: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.rect.position()
    }

    /// Move to `pos` and drop all momentum
    pub fn place_at(&mut self, pos: Vec2) {
        self.rect.set_position(pos);
        self.vx = 0.0;
        self.vy = 0.0;
    }

    pub fn has_wings(&self) -> bool {
        self.wing_time_left_ms > 0.0
    }

    /// Count down the power-up, clamping at exactly zero
    pub fn tick_wings(&mut self, elapsed_ms: f64) {
        if self.wing_time_left_ms > 0.0 {
            self.wing_time_left_ms = (self.wing_time_left_ms - elapsed_ms).max(0.0);
        }
    }
}

/// A patrolling monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub vx: f32,
    pub dead: bool,
}

/// An auto-fired shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    pub vx: f32,
    /// Session clock at spawn
    pub created_at_ms: f64,
}

impl Projectile {
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.created_at_ms
    }
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Wing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub rect: Rect,
    pub collected: bool,
}

/// Rising text popup (e.g. on pickup)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    /// Ticks remaining
    pub life: u32,
}

/// A decorative particle with simple ballistic motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub glyph: char,
    pub scale: f32,
}

/// Per-map entity collections, rebuilt whenever the active map changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub floating_texts: Vec<FloatingText>,
    pub particles: Vec<Particle>,
    /// Ticks since the last shot
    pub shoot_timer: u32,
    pub(crate) next_id: u32,
}

impl World {
    /// Fresh collections seeded from a parsed map
    pub fn from_map(map: &ParsedMap) -> Self {
        let mut world = Self {
            enemies: map.enemies.clone(),
            items: map.items.clone(),
            ..Default::default()
        };
        let max_spawn_id = world
            .enemies
            .iter()
            .map(|e| e.id)
            .chain(world.items.iter().map(|i| i.id))
            .max();
        world.next_id = max_spawn_id.map_or(0, |id| id + 1);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.dead)
    }
}

/// Complete state of one level being played
#[derive(Debug, Clone)]
pub struct LevelSession {
    pub level: LevelDef,
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: LevelPhase,
    pub active_map: MapKind,
    /// Set once the secret branch has been finished in this playthrough
    pub secret_completed: bool,
    /// Main-map position saved on branch entry
    pub saved_return_position: Option<Vec2>,
    /// Geometry and spawns of the active map
    pub map: ParsedMap,
    pub player: Player,
    pub world: World,
    /// Milliseconds of unpaused play
    pub clock_ms: f64,
    pub paused: bool,
}

impl LevelSession {
    /// Start a level from its default spawn
    pub fn new(level: LevelDef, tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = Self::load_map(&level, &tuning, MapKind::Main, false, &mut rng);
        let player = Player::new(map.start);
        let world = World::from_map(&map);
        log::info!(
            "Level {} \"{}\" loaded ({} tiles, {} enemies, {} items, {}s limit)",
            level.id,
            level.name,
            map.tiles.len(),
            world.enemies.len(),
            world.items.len(),
            level.time_limit_secs
        );
        Self {
            level,
            tuning,
            seed,
            rng,
            phase: LevelPhase::Running,
            active_map: MapKind::Main,
            secret_completed: false,
            saved_return_position: None,
            map,
            player,
            world,
            clock_ms: 0.0,
            paused: false,
        }
    }

    /// Retry: throw away everything and start over with the same seed
    pub fn restart(&mut self) {
        *self = Self::new(self.level.clone(), self.tuning.clone(), self.seed);
    }

    /// Parse the rows for `kind` with this session's RNG
    pub(crate) fn load_map(
        level: &LevelDef,
        tuning: &Tuning,
        kind: MapKind,
        secret_completed: bool,
        rng: &mut Pcg32,
    ) -> ParsedMap {
        let rows = match kind {
            MapKind::Main => level.rows.as_slice(),
            MapKind::Secret => level.secret_rows.as_slice(),
        };
        let options = ParseOptions {
            map_kind: kind,
            secret_already_completed: secret_completed,
            scatter_bonus_wings: level.scatter_bonus_wings,
            bonus_wing_chance: tuning.bonus_wing_chance,
            enemy_speed: tuning.enemy_speed,
        };
        parse_map(rows, &options, rng)
    }

    pub fn time_limit_ms(&self) -> f64 {
        f64::from(self.level.time_limit_secs) * 1000.0
    }

    /// Countdown remaining, never negative
    pub fn time_remaining_ms(&self) -> f64 {
        (self.time_limit_ms() - self.clock_ms).max(0.0)
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != LevelPhase::Running
    }

    /// Entering or having finished the secret turns on jump particles
    pub fn festive(&self) -> bool {
        self.active_map == MapKind::Secret || self.secret_completed
    }

    /// Bottom of the map plus the fall margin
    pub fn kill_plane_y(&self) -> f32 {
        self.map.height_px + self.tuning.fall_margin
    }
}
