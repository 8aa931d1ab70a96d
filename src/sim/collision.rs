//! Collision detection and response against the static tile grid
//!
//! Movement is resolved one axis at a time: the full X displacement first,
//! then the full Y displacement. Platforms are one-way and only stop bodies
//! falling onto them.

use super::rect::Rect;
use super::state::{Player, Tile, TileKind};

/// Result of moving a body through the tile grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Touched a spike or lava tile; resolution stopped there
    pub lethal: bool,
    /// Stopped by a tile on the X axis
    pub hit_side: bool,
    /// Came to rest on top of a solid tile
    pub landed: bool,
    /// Stopped by a wall above
    pub hit_head: bool,
}

impl CollisionResult {
    fn lethal() -> Self {
        Self {
            lethal: true,
            ..Default::default()
        }
    }
}

/// Push `rect` out of `tile` against the direction of horizontal travel
#[inline]
pub fn snap_horizontal(rect: &mut Rect, vx: f32, tile: &Rect) {
    if vx > 0.0 {
        rect.x = tile.x - rect.w;
    } else if vx < 0.0 {
        rect.x = tile.x + tile.w;
    }
}

/// Move the player by its velocity and resolve against `tiles`.
///
/// Updates position, velocity, `grounded` and `jump_count`. Returns as soon
/// as a lethal tile is touched, leaving the rest of the move unresolved.
pub fn move_player(player: &mut Player, tiles: &[Tile]) -> CollisionResult {
    let mut result = CollisionResult::default();

    // X axis
    player.rect.x += player.vx;
    for tile in tiles {
        if !player.rect.intersects(&tile.rect) {
            continue;
        }
        if tile.kind.is_lethal() {
            return CollisionResult::lethal();
        }
        if tile.kind.is_solid() {
            snap_horizontal(&mut player.rect, player.vx, &tile.rect);
            player.vx = 0.0;
            result.hit_side = true;
        }
    }

    // Y axis
    player.rect.y += player.vy;
    player.grounded = false;
    for tile in tiles {
        if !player.rect.intersects(&tile.rect) {
            continue;
        }
        if tile.kind.is_lethal() {
            return CollisionResult::lethal();
        }
        if !tile.kind.is_solid() {
            continue;
        }
        if player.vy > 0.0 {
            player.rect.y = tile.rect.y - player.rect.h;
            player.grounded = true;
            player.vy = 0.0;
            player.jump_count = 0;
            result.landed = true;
        } else if player.vy < 0.0 && tile.kind == TileKind::Wall {
            player.rect.y = tile.rect.bottom();
            player.vy = 0.0;
            result.hit_head = true;
        }
    }

    result
}

/// Whether a solid tile (wall or platform) overlaps `probe`
pub fn has_floor(probe: &Rect, tiles: &[Tile]) -> bool {
    tiles
        .iter()
        .any(|t| t.kind.is_solid() && probe.intersects(&t.rect))
}

/// Whether a wall tile overlaps `rect`
pub fn hits_wall(rect: &Rect, tiles: &[Tile]) -> bool {
    tiles
        .iter()
        .any(|t| t.kind == TileKind::Wall && rect.intersects(&t.rect))
}
