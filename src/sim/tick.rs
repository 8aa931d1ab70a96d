//! Per-frame simulation step
//!
//! Movement is integrated once per call; the countdown, power-up timer and
//! projectile ages use the wall-clock delta the host reports.

use serde::{Deserialize, Serialize};

use super::behavior::{
    collect_items, fire_projectile, spawn_jump_particles, step_effects, step_enemies,
    step_projectiles,
};
use super::collision::move_player;
use super::level::{DeathCause, TickEvents, Transition};
use super::physics;
use super::state::{LevelPhase, LevelSession, MapKind};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump went down this frame (edge)
    pub jump_pressed: bool,
    /// Jump is currently down (level)
    pub jump_held: bool,
    /// Wall-clock time since the previous tick
    pub elapsed_ms: f64,
    /// Pause toggle
    pub pause: bool,
}

/// What a tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    Dead { cause: DeathCause },
    Won { secret_completed: bool },
    BranchChanged { to: MapKind },
}

impl TickOutcome {
    /// The host should stop ticking after this
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Dead { .. } | TickOutcome::Won { .. })
    }
}

impl From<Transition> for TickOutcome {
    fn from(t: Transition) -> Self {
        match t {
            Transition::Stay => TickOutcome::Continue,
            Transition::Die(cause) => TickOutcome::Dead { cause },
            Transition::Win { secret_completed } => TickOutcome::Won { secret_completed },
            Transition::EnterSecret => TickOutcome::BranchChanged {
                to: MapKind::Secret,
            },
            Transition::ReturnFromSecret => TickOutcome::BranchChanged { to: MapKind::Main },
        }
    }
}

/// Advance the level by one frame
pub fn tick(session: &mut LevelSession, input: &TickInput) -> TickOutcome {
    // Handle pause toggle
    if input.pause {
        session.set_paused(!session.paused);
    }

    // Finished levels keep reporting how they ended
    match session.phase {
        LevelPhase::Dead(cause) => return TickOutcome::Dead { cause },
        LevelPhase::Won { secret_completed } => return TickOutcome::Won { secret_completed },
        LevelPhase::Running => {}
    }

    // Paused: nothing moves and elapsed time is dropped
    if session.paused {
        return TickOutcome::Continue;
    }

    let mut events = TickEvents::default();
    let elapsed_ms = input.elapsed_ms.max(0.0);

    // Countdown
    session.clock_ms += elapsed_ms;
    if session.time_remaining_ms() <= 0.0 {
        events.timed_out = true;
        return session.resolve(&events).into();
    }

    session.player.tick_wings(elapsed_ms);

    // Player
    let jumped = physics::integrate(&mut session.player, input, &session.tuning);
    if jumped && session.festive() {
        spawn_jump_particles(&mut session.world, &session.player, &mut session.rng);
    }

    let contact = move_player(&mut session.player, &session.map.tiles);
    events.touched_hazard = contact.lethal;
    events.fell_out = !contact.lethal && session.player.rect.y > session.kill_plane_y();
    if events.touched_hazard || events.fell_out {
        return session.resolve(&events).into();
    }

    // Enemies and portals
    let player_rect = session.player.rect;
    events.touched_enemy = step_enemies(&mut session.world, &session.map.tiles, &player_rect);
    events.touched_portal = session
        .map
        .portals
        .iter()
        .any(|portal| portal.intersects(&player_rect));
    if events.touched_enemy || events.touched_portal {
        return session.resolve(&events).into();
    }

    // Projectiles
    fire_projectile(
        &mut session.world,
        &session.player,
        session.clock_ms,
        &session.tuning,
    );
    step_projectiles(
        &mut session.world,
        &session.map.tiles,
        session.clock_ms,
        &session.tuning,
    );

    // Items and effects
    collect_items(&mut session.world, &mut session.player, &session.tuning);
    step_effects(&mut session.world);

    // Exit
    events.reached_exit = session
        .map
        .exit
        .is_some_and(|exit| exit.intersects(&session.player.rect));

    session.resolve(&events).into()
}
