//! Player kinematics
//!
//! Frame-based integration: velocities are in pixels per tick and every call
//! advances exactly one tick regardless of wall-clock delta.

use super::state::Player;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Apply horizontal input or friction.
pub fn apply_horizontal(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    let accel = tuning.accel(player.grounded);

    if input.left {
        // Reversing gets a boost for snappier turns
        let turn = if player.vx > 0.0 { tuning.turn_multiplier } else { 1.0 };
        player.vx = (player.vx - accel * turn).max(-tuning.move_speed);
        player.facing_right = false;
    } else if input.right {
        let turn = if player.vx < 0.0 { tuning.turn_multiplier } else { 1.0 };
        player.vx = (player.vx + accel * turn).min(tuning.move_speed);
        player.facing_right = true;
    } else {
        let friction = tuning.friction(player.grounded);
        if player.vx > 0.0 {
            player.vx = (player.vx - friction).max(0.0);
        } else if player.vx < 0.0 {
            player.vx = (player.vx + friction).min(0.0);
        }
    }
}

/// Handle an edge-triggered jump press. Returns true if the player launched.
pub fn try_jump(player: &mut Player, input: &TickInput, tuning: &Tuning) -> bool {
    if !input.jump_pressed {
        return false;
    }

    if player.grounded {
        player.vy = tuning.jump_force;
        player.grounded = false;
        player.jump_count = 1;
        true
    } else if player.jump_count < tuning.max_jumps {
        // Double jump is the same strength
        player.vy = tuning.jump_force;
        player.jump_count += 1;
        true
    } else {
        false
    }
}

/// Gliding pins the fall speed while wings are active and jump is held
pub fn is_gliding(player: &Player, input: &TickInput) -> bool {
    player.has_wings() && player.vy > 0.0 && input.jump_held
}

/// Apply gravity, jump cut and glide.
pub fn apply_vertical(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    if is_gliding(player, input) {
        player.vy = tuning.glide_fall_speed;
        return;
    }

    let gravity = if player.vy < 0.0 && !input.jump_held {
        tuning.gravity * tuning.jump_cut_multiplier
    } else {
        tuning.gravity
    };
    player.vy = (player.vy + gravity).min(tuning.max_fall_speed);
}

/// One tick of player velocity integration (position is moved by collision).
/// Returns true if a jump launched this tick.
pub fn integrate(player: &mut Player, input: &TickInput, tuning: &Tuning) -> bool {
    apply_horizontal(player, input, tuning);
    let jumped = try_jump(player, input, tuning);
    apply_vertical(player, input, tuning);
    jumped
}
