//! Per-tick behavior of non-player entities
//!
//! Enemies patrol, projectiles fly and expire, items wait to be picked up,
//! and transient effects decay.

use glam::Vec2;
use rand::Rng;

use super::collision::{has_floor, hits_wall, snap_horizontal};
use super::rect::Rect;
use super::state::{FloatingText, ItemKind, Particle, Player, Projectile, Tile, World};
use crate::consts::*;
use crate::tuning::Tuning;

/// Glyphs used by festive jump particles
pub const PARTICLE_GLYPHS: [char; 4] = ['❄', '🎄', '✨', '🎁'];

/// Move every live enemy one tick. Returns true if one touched the player.
///
/// Enemies turn around at any tile they bump into and at ledges. Contact is
/// lethal to the player only.
pub fn step_enemies(world: &mut World, tiles: &[Tile], player: &Rect) -> bool {
    let mut player_hit = false;

    for enemy in world.enemies.iter_mut().filter(|e| !e.dead) {
        enemy.rect.x += enemy.vx;

        let mut turn_around = false;
        for tile in tiles {
            if enemy.rect.intersects(&tile.rect) {
                turn_around = true;
                snap_horizontal(&mut enemy.rect, enemy.vx, &tile.rect);
            }
        }

        if !turn_around {
            let probe_x = if enemy.vx > 0.0 {
                enemy.rect.right() + 5.0
            } else {
                enemy.rect.x - 5.0
            };
            let probe = Rect::new(probe_x, enemy.rect.bottom() + 5.0, 2.0, 2.0);
            turn_around = !has_floor(&probe, tiles);
        }

        if turn_around {
            enemy.vx = -enemy.vx;
        }

        if enemy.rect.intersects(player) {
            player_hit = true;
        }
    }

    player_hit
}

/// Advance the auto-fire counter and spawn a shot when it fills
pub fn fire_projectile(world: &mut World, player: &Player, now_ms: f64, tuning: &Tuning) {
    world.shoot_timer += 1;
    if world.shoot_timer < tuning.fire_rate {
        return;
    }
    world.shoot_timer = 0;

    let center = player.rect.center();
    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        rect: Rect::new(
            center.x - BULLET_SIZE / 2.0,
            center.y - BULLET_SIZE / 2.0,
            BULLET_SIZE,
            BULLET_SIZE,
        ),
        vx: if player.facing_right {
            tuning.bullet_speed
        } else {
            -tuning.bullet_speed
        },
        created_at_ms: now_ms,
    });
}

/// Move projectiles, drop expired or wall-blocked ones, then resolve enemy
/// hits. Returns the ids of enemies killed this tick.
pub fn step_projectiles(world: &mut World, tiles: &[Tile], now_ms: f64, tuning: &Tuning) -> Vec<u32> {
    for projectile in &mut world.projectiles {
        projectile.rect.x += projectile.vx;
    }
    world.projectiles.retain(|p| {
        p.age_ms(now_ms) <= tuning.bullet_lifetime_ms && !hits_wall(&p.rect, tiles)
    });

    // Each projectile is consumed by the first live enemy it overlaps
    let mut killed = Vec::new();
    let enemies = &mut world.enemies;
    world.projectiles.retain(|p| {
        match enemies
            .iter_mut()
            .find(|e| !e.dead && e.rect.intersects(&p.rect))
        {
            Some(enemy) => {
                enemy.dead = true;
                killed.push(enemy.id);
                false
            }
            None => true,
        }
    });

    for id in &killed {
        log::debug!("Enemy {} destroyed", id);
    }
    killed
}

/// Collect items touching the player. Returns the kinds picked up.
pub fn collect_items(world: &mut World, player: &mut Player, tuning: &Tuning) -> Vec<ItemKind> {
    let mut picked = Vec::new();

    for item in world.items.iter_mut().filter(|i| !i.collected) {
        if !item.rect.intersects(&player.rect) {
            continue;
        }
        item.collected = true;
        match item.kind {
            ItemKind::Wing => {
                player.wing_time_left_ms = tuning.wing_duration_ms;
            }
        }
        picked.push(item.kind);
    }

    for kind in &picked {
        let text = match kind {
            ItemKind::Wing => "WINGS!",
        };
        let id = world.next_entity_id();
        world.floating_texts.push(FloatingText {
            id,
            pos: Vec2::new(player.rect.x, player.rect.y - 20.0),
            text: text.to_string(),
            life: FLOATING_TEXT_LIFE,
        });
        log::debug!("Picked up {:?}", kind);
    }

    picked
}

/// Decay floating texts and particles, purging the expired ones
pub fn step_effects(world: &mut World) {
    for particle in &mut world.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    world.particles.retain(|p| p.life > 0);

    for text in &mut world.floating_texts {
        text.pos.y -= 1.0;
        text.life = text.life.saturating_sub(1);
    }
    world.floating_texts.retain(|t| t.life > 0);
}

/// Burst of particles at the player's feet
pub fn spawn_jump_particles<R: Rng + ?Sized>(world: &mut World, player: &Player, rng: &mut R) {
    let origin = Vec2::new(player.rect.center().x, player.rect.bottom());
    for _ in 0..JUMP_PARTICLE_COUNT {
        let id = world.next_entity_id();
        world.particles.push(Particle {
            id,
            pos: origin,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                -rng.random::<f32>() * 3.0 - 1.0,
            ),
            life: rng.random_range(40..60),
            glyph: PARTICLE_GLYPHS[rng.random_range(0..PARTICLE_GLYPHS.len())],
            scale: 0.5 + rng.random::<f32>() * 0.5,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Item, TileKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn wall(x: f32, y: f32) -> Tile {
        Tile {
            kind: TileKind::Wall,
            rect: Rect::new(x, y, TILE_SIZE, TILE_SIZE),
        }
    }

    fn floor(cols: usize) -> Vec<Tile> {
        (0..cols).map(|i| wall(i as f32 * TILE_SIZE, 40.0)).collect()
    }

    fn enemy(id: u32, x: f32, vx: f32) -> Enemy {
        Enemy {
            id,
            rect: Rect::new(x, 10.0, ENEMY_SIZE, ENEMY_SIZE),
            vx,
            dead: false,
        }
    }

    fn far_away() -> Rect {
        Rect::new(10_000.0, 10_000.0, PLAYER_SIZE, PLAYER_SIZE)
    }

    #[test]
    fn test_enemy_patrols_on_floor() {
        let tiles = floor(10);
        let mut world = World {
            enemies: vec![enemy(0, 100.0, 2.0)],
            ..Default::default()
        };
        step_enemies(&mut world, &tiles, &far_away());
        assert_eq!(world.enemies[0].rect.x, 102.0);
        assert_eq!(world.enemies[0].vx, 2.0);
    }

    #[test]
    fn test_enemy_turns_at_ledge() {
        // Floor ends at x = 200
        let tiles = floor(5);
        let mut world = World {
            enemies: vec![enemy(0, 160.0, 2.0)],
            ..Default::default()
        };
        step_enemies(&mut world, &tiles, &far_away());
        // Probe at 162 + 30 + 5 = 197 is still on floor
        assert_eq!(world.enemies[0].vx, 2.0);
        step_enemies(&mut world, &tiles, &far_away());
        // Probe at 199..201 still overlaps the last tile
        assert_eq!(world.enemies[0].vx, 2.0);
        step_enemies(&mut world, &tiles, &far_away());
        // Probe at 201 has no floor
        assert_eq!(world.enemies[0].vx, -2.0);
    }

    #[test]
    fn test_enemy_bounces_off_wall() {
        let mut tiles = floor(10);
        tiles.push(wall(200.0, 0.0));
        let mut world = World {
            enemies: vec![enemy(0, 169.0, 2.0)],
            ..Default::default()
        };
        step_enemies(&mut world, &tiles, &far_away());
        assert_eq!(world.enemies[0].rect.right(), 200.0);
        assert_eq!(world.enemies[0].vx, -2.0);
    }

    #[test]
    fn test_enemy_contact_reports_player_hit() {
        let tiles = floor(10);
        let mut world = World {
            enemies: vec![enemy(0, 100.0, 2.0)],
            ..Default::default()
        };
        let player = Rect::new(120.0, 10.0, PLAYER_SIZE, PLAYER_SIZE);
        assert!(step_enemies(&mut world, &tiles, &player));
        assert!(!world.enemies[0].dead);
    }

    #[test]
    fn test_dead_enemies_are_frozen() {
        let tiles = floor(10);
        let mut dead = enemy(0, 100.0, 2.0);
        dead.dead = true;
        let mut world = World {
            enemies: vec![dead],
            ..Default::default()
        };
        let player = Rect::new(100.0, 10.0, PLAYER_SIZE, PLAYER_SIZE);
        assert!(!step_enemies(&mut world, &tiles, &player));
        assert_eq!(world.enemies[0].rect.x, 100.0);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_fire_cadence_and_direction() {
        let tuning = Tuning::default();
        let mut world = World::default();
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.facing_right = false;

        for _ in 0..FIRE_RATE - 1 {
            fire_projectile(&mut world, &player, 0.0, &tuning);
        }
        assert!(world.projectiles.is_empty());

        fire_projectile(&mut world, &player, 0.0, &tuning);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.shoot_timer, 0);
        let shot = &world.projectiles[0];
        assert_eq!(shot.vx, -BULLET_SPEED);
        assert_eq!(shot.rect.center(), player.rect.center());
    }

    #[test]
    fn test_projectile_lifetime() {
        let tuning = Tuning::default();
        let mut world = World::default();
        world.projectiles.push(Projectile {
            id: 0,
            rect: Rect::new(0.0, 0.0, BULLET_SIZE, BULLET_SIZE),
            vx: 6.0,
            created_at_ms: 0.0,
        });
        step_projectiles(&mut world, &[], 999.0, &tuning);
        assert_eq!(world.projectiles.len(), 1);
        step_projectiles(&mut world, &[], 1001.0, &tuning);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_stops_at_wall_not_platform() {
        let tuning = Tuning::default();
        let platform = Tile {
            kind: TileKind::Platform,
            rect: Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE),
        };
        let mut world = World::default();
        world.projectiles.push(Projectile {
            id: 0,
            rect: Rect::new(10.0, 10.0, BULLET_SIZE, BULLET_SIZE),
            vx: 6.0,
            created_at_ms: 0.0,
        });
        step_projectiles(&mut world, &[platform], 0.0, &tuning);
        assert_eq!(world.projectiles.len(), 1);
        step_projectiles(&mut world, &[wall(0.0, 0.0)], 0.0, &tuning);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_kills_first_enemy_only() {
        let tuning = Tuning::default();
        let mut world = World {
            enemies: vec![enemy(3, 100.0, 2.0), enemy(4, 100.0, 2.0)],
            ..Default::default()
        };
        world.projectiles.push(Projectile {
            id: 9,
            rect: Rect::new(100.0, 20.0, BULLET_SIZE, BULLET_SIZE),
            vx: 0.0,
            created_at_ms: 0.0,
        });

        let killed = step_projectiles(&mut world, &[], 0.0, &tuning);

        assert_eq!(killed, vec![3]);
        assert!(world.enemies[0].dead);
        assert!(!world.enemies[1].dead);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_wing_pickup() {
        let tuning = Tuning::default();
        let mut world = World::default();
        world.items.push(Item {
            id: 0,
            kind: ItemKind::Wing,
            rect: Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE),
            collected: false,
        });
        let mut player = Player::new(Vec2::new(10.0, 10.0));

        assert_eq!(collect_items(&mut world, &mut player, &tuning), vec![ItemKind::Wing]);
        assert!(world.items[0].collected);
        assert_eq!(player.wing_time_left_ms, WING_DURATION_MS);
        assert_eq!(world.floating_texts.len(), 1);
        assert_eq!(world.floating_texts[0].text, "WINGS!");
        assert_eq!(world.floating_texts[0].pos, Vec2::new(10.0, -10.0));

        // Collected items stay collected
        player.wing_time_left_ms = 0.0;
        assert!(collect_items(&mut world, &mut player, &tuning).is_empty());
        assert_eq!(player.wing_time_left_ms, 0.0);
    }

    #[test]
    fn test_effects_decay_and_purge() {
        let mut world = World::default();
        world.floating_texts.push(FloatingText {
            id: 0,
            pos: Vec2::new(0.0, 50.0),
            text: "hi".into(),
            life: 2,
        });
        world.particles.push(Particle {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            life: 1,
            glyph: '❄',
            scale: 1.0,
        });

        step_effects(&mut world);
        assert!(world.particles.is_empty());
        assert_eq!(world.floating_texts[0].pos.y, 49.0);

        step_effects(&mut world);
        assert!(world.floating_texts.is_empty());
    }

    #[test]
    fn test_jump_particles_are_seeded() {
        let player = Player::new(Vec2::new(0.0, 0.0));
        let mut a = World::default();
        let mut b = World::default();
        spawn_jump_particles(&mut a, &player, &mut Pcg32::seed_from_u64(5));
        spawn_jump_particles(&mut b, &player, &mut Pcg32::seed_from_u64(5));
        assert_eq!(a.particles, b.particles);
        assert_eq!(a.particles.len(), JUMP_PARTICLE_COUNT);
        for p in &a.particles {
            assert!((40..60).contains(&p.life));
            assert!(p.vel.y < -1.0 + f32::EPSILON && p.vel.y >= -4.0);
            assert!(PARTICLE_GLYPHS.contains(&p.glyph));
        }
    }
}
