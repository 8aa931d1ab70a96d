//! Level map parsing
//!
//! Turns rows of tile characters into static geometry plus spawn descriptors.
//! Marker tiles (start, exit, monsters, wings, portals) are consumed here and
//! never become geometry.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Enemy, Item, ItemKind, MapKind, Tile, TileKind};
use crate::consts::*;

/// Parser switches
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    pub map_kind: MapKind,
    /// Suppresses portals in the main map
    pub secret_already_completed: bool,
    /// Scatter bonus wings above platforms (main map only)
    pub scatter_bonus_wings: bool,
    pub bonus_wing_chance: f64,
    pub enemy_speed: f32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            map_kind: MapKind::Main,
            secret_already_completed: false,
            scatter_bonus_wings: false,
            bonus_wing_chance: BONUS_WING_CHANCE,
            enemy_speed: ENEMY_SPEED,
        }
    }
}

/// Geometry and spawns produced from a text map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMap {
    pub tiles: Vec<Tile>,
    /// Player spawn (top-left of the player box)
    pub start: Vec2,
    /// False when the map had no start marker and `start` is the default
    pub has_start: bool,
    pub exit: Option<Rect>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub portals: Vec<Rect>,
    pub width_px: f32,
    pub height_px: f32,
}

/// Parse `rows` in row-major order.
///
/// `rng` only feeds the bonus wing scatter, so a seeded generator makes the
/// whole result reproducible.
pub fn parse_map<S, R>(rows: &[S], options: &ParseOptions, rng: &mut R) -> ParsedMap
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut map = ParsedMap {
        start: Vec2::new(DEFAULT_START.0, DEFAULT_START.1),
        ..Default::default()
    };
    let mut next_id = 0u32;
    let mut columns = 0usize;

    let suppress_portals =
        options.map_kind == MapKind::Main && options.secret_already_completed;
    let scatter = options.map_kind == MapKind::Main && options.scatter_bonus_wings;
    let wing_chance = options.bonus_wing_chance.clamp(0.0, 1.0);

    for (row_index, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let y = row_index as f32 * TILE_SIZE;
        let mut row_len = 0usize;

        for (col_index, c) in row.chars().enumerate() {
            row_len = col_index + 1;
            let x = col_index as f32 * TILE_SIZE;
            let cell = Rect::new(x, y, TILE_SIZE, TILE_SIZE);

            let kind = TileKind::from_char(c).unwrap_or_else(|| {
                log::warn!(
                    "Unknown tile '{}' at row {}, column {}; treating as wall",
                    c,
                    row_index,
                    col_index
                );
                TileKind::Wall
            });

            match kind {
                TileKind::Empty => {}
                TileKind::Start => {
                    map.start = Vec2::new(
                        x + (TILE_SIZE - PLAYER_SIZE) / 2.0,
                        y + (TILE_SIZE - PLAYER_SIZE),
                    );
                    map.has_start = true;
                }
                TileKind::End => {
                    map.exit = Some(cell);
                }
                TileKind::Monster => {
                    map.enemies.push(Enemy {
                        id: next_id,
                        rect: Rect::new(x + 5.0, y + 10.0, ENEMY_SIZE, ENEMY_SIZE),
                        vx: options.enemy_speed,
                        dead: false,
                    });
                    next_id += 1;
                }
                TileKind::Wing => {
                    map.items.push(wing_item(next_id, cell));
                    next_id += 1;
                }
                TileKind::Portal => {
                    if !suppress_portals {
                        map.portals.push(cell);
                    }
                }
                TileKind::Wall | TileKind::Platform | TileKind::Spike | TileKind::Lava => {
                    map.tiles.push(Tile { kind, rect: cell });

                    if scatter && kind == TileKind::Platform && rng.random_bool(wing_chance) {
                        let above = Rect::new(x, y - TILE_SIZE, TILE_SIZE, TILE_SIZE);
                        map.items.push(wing_item(next_id, above));
                        next_id += 1;
                    }
                }
            }
        }

        columns = columns.max(row_len);
    }

    map.width_px = columns as f32 * TILE_SIZE;
    map.height_px = rows.len() as f32 * TILE_SIZE;

    if !map.has_start {
        log::warn!("Map has no start marker; spawning at default position");
    }
    if map.exit.is_none() {
        log::warn!("Map has no exit marker; level cannot be won");
    }

    map
}

fn wing_item(id: u32, rect: Rect) -> Item {
    Item {
        id,
        kind: ItemKind::Wing,
        rect,
        collected: false,
    }
}

/// Authoring diagnostics for a map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapReport {
    pub starts: usize,
    pub exits: usize,
    pub portals: usize,
    pub enemies: usize,
    /// Indices of rows whose length differs from the first row
    pub ragged_rows: Vec<usize>,
    /// `(row, column, char)` of characters outside the tile alphabet
    pub unknown_tiles: Vec<(usize, usize, char)>,
}

impl MapReport {
    /// Exactly one start and one exit, rectangular, known alphabet
    pub fn is_clean(&self) -> bool {
        self.starts == 1
            && self.exits == 1
            && self.ragged_rows.is_empty()
            && self.unknown_tiles.is_empty()
    }

    /// A map without an exit can be played but never won
    pub fn is_winnable(&self) -> bool {
        self.exits > 0
    }
}

/// Inspect a map without building anything from it
pub fn validate_map<S: AsRef<str>>(rows: &[S]) -> MapReport {
    let mut report = MapReport::default();
    let expected = rows.first().map(|r| r.as_ref().chars().count());

    for (row_index, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if Some(row.chars().count()) != expected {
            report.ragged_rows.push(row_index);
        }
        for (col_index, c) in row.chars().enumerate() {
            match TileKind::from_char(c) {
                Some(TileKind::Start) => report.starts += 1,
                Some(TileKind::End) => report.exits += 1,
                Some(TileKind::Portal) => report.portals += 1,
                Some(TileKind::Monster) => report.enemies += 1,
                Some(_) => {}
                None => report.unknown_tiles.push((row_index, col_index, c)),
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn parse(rows: &[&str], options: &ParseOptions) -> ParsedMap {
        let mut rng = Pcg32::seed_from_u64(1);
        parse_map(rows, options, &mut rng)
    }

    #[test]
    fn test_markers_become_spawns_not_tiles() {
        let rows = ["S M W P E", "XXXXXXXXX"];
        let map = parse(&rows, &ParseOptions::default());

        assert_eq!(map.tiles.len(), 9);
        assert!(map.tiles.iter().all(|t| t.kind == TileKind::Wall));
        assert_eq!(map.enemies.len(), 1);
        assert_eq!(map.items.len(), 1);
        assert_eq!(map.portals.len(), 1);
        assert_eq!(map.exit, Some(Rect::new(320.0, 0.0, 40.0, 40.0)));
    }

    #[test]
    fn test_start_is_bottom_aligned_and_centered() {
        let map = parse(&["   ", " S "], &ParseOptions::default());
        assert!(map.has_start);
        assert_eq!(map.start, Vec2::new(45.0, 50.0));
        // Player bottom sits on the tile bottom
        assert_eq!(map.start.y + PLAYER_SIZE, 80.0);
    }

    #[test]
    fn test_missing_start_defaults() {
        let map = parse(&["XXX"], &ParseOptions::default());
        assert!(!map.has_start);
        assert_eq!(map.start, Vec2::new(100.0, 100.0));
        assert!(map.exit.is_none());
    }

    #[test]
    fn test_last_exit_wins() {
        let map = parse(&["E  E"], &ParseOptions::default());
        assert_eq!(map.exit.unwrap().x, 120.0);
    }

    #[test]
    fn test_enemy_spawn_offset_and_speed() {
        let map = parse(&[" M"], &ParseOptions::default());
        let enemy = &map.enemies[0];
        assert_eq!(enemy.rect, Rect::new(45.0, 10.0, 30.0, 30.0));
        assert_eq!(enemy.vx, ENEMY_SPEED);
        assert!(!enemy.dead);
    }

    #[test]
    fn test_portal_suppressed_after_secret_in_main_only() {
        let rows = ["P"];
        let main_done = ParseOptions {
            secret_already_completed: true,
            ..Default::default()
        };
        assert!(parse(&rows, &main_done).portals.is_empty());

        let secret_done = ParseOptions {
            map_kind: MapKind::Secret,
            secret_already_completed: true,
            ..Default::default()
        };
        assert_eq!(parse(&rows, &secret_done).portals.len(), 1);
    }

    #[test]
    fn test_bonus_wings_are_seed_deterministic() {
        let rows = ["----------------------------------------"; 4];
        let options = ParseOptions {
            scatter_bonus_wings: true,
            ..Default::default()
        };
        let a = parse_map(&rows, &options, &mut Pcg32::seed_from_u64(42));
        let b = parse_map(&rows, &options, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.items, b.items);
        // 160 platforms at 10% should produce some, but not all
        assert!(!a.items.is_empty());
        assert!(a.items.len() < 80);
        // Each bonus wing sits one tile above a platform
        for item in &a.items {
            assert!(
                a.tiles
                    .iter()
                    .any(|t| t.rect.x == item.rect.x && t.rect.y == item.rect.y + TILE_SIZE)
            );
        }
    }

    #[test]
    fn test_bonus_wings_never_in_secret() {
        let rows = ["--------------------"; 4];
        let options = ParseOptions {
            map_kind: MapKind::Secret,
            scatter_bonus_wings: true,
            bonus_wing_chance: 1.0,
            ..Default::default()
        };
        assert!(parse(&rows, &options).items.is_empty());
    }

    #[test]
    fn test_ragged_rows_use_longest_width() {
        let map = parse(&["XX", "XXXX", "X"], &ParseOptions::default());
        assert_eq!(map.width_px, 160.0);
        assert_eq!(map.height_px, 120.0);
        assert_eq!(map.tiles.len(), 7);
    }

    #[test]
    fn test_unknown_char_is_wall() {
        let map = parse(&["#"], &ParseOptions::default());
        assert_eq!(map.tiles[0].kind, TileKind::Wall);
    }

    #[test]
    fn test_validate_map_reports_defects() {
        let report = validate_map(&["S  S", "XX?", "XXXX"]);
        assert_eq!(report.starts, 2);
        assert_eq!(report.exits, 0);
        assert_eq!(report.ragged_rows, vec![1]);
        assert_eq!(report.unknown_tiles, vec![(1, 2, '?')]);
        assert!(!report.is_clean());
        assert!(!report.is_winnable());

        let clean = validate_map(&["S  E", "XXXX"]);
        assert!(clean.is_clean());
    }
}
