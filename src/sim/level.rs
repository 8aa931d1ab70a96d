//! Level state machine
//!
//! Physics and behavior only report what happened during a tick as
//! [`TickEvents`]. [`transition`] turns those into at most one state change,
//! in fixed priority order, and [`LevelSession::apply`] carries it out.

use serde::{Deserialize, Serialize};

use super::state::{LevelPhase, LevelSession, MapKind, World};

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Timeout,
    Hazard,
    Enemy,
    Fell,
}

/// Observations gathered during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub timed_out: bool,
    pub touched_hazard: bool,
    pub touched_enemy: bool,
    pub fell_out: bool,
    pub touched_portal: bool,
    pub reached_exit: bool,
}

impl TickEvents {
    fn death(&self) -> Option<DeathCause> {
        if self.touched_hazard {
            Some(DeathCause::Hazard)
        } else if self.touched_enemy {
            Some(DeathCause::Enemy)
        } else if self.fell_out {
            Some(DeathCause::Fell)
        } else {
            None
        }
    }
}

/// A state change decided for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Stay,
    Die(DeathCause),
    EnterSecret,
    ReturnFromSecret,
    Win { secret_completed: bool },
}

/// Pick the highest-priority transition for `events`.
///
/// Order: timeout, death, portal, secret exit, main exit. Terminal phases
/// never transition again.
pub fn transition(
    phase: LevelPhase,
    active_map: MapKind,
    secret_completed: bool,
    events: &TickEvents,
) -> Transition {
    if phase != LevelPhase::Running {
        return Transition::Stay;
    }
    if events.timed_out {
        return Transition::Die(DeathCause::Timeout);
    }
    if let Some(cause) = events.death() {
        return Transition::Die(cause);
    }
    if events.touched_portal {
        return match active_map {
            MapKind::Main => Transition::EnterSecret,
            MapKind::Secret => Transition::ReturnFromSecret,
        };
    }
    if events.reached_exit {
        return match active_map {
            MapKind::Secret => Transition::ReturnFromSecret,
            MapKind::Main => Transition::Win { secret_completed },
        };
    }
    Transition::Stay
}

impl LevelSession {
    /// Decide and apply the transition for `events`
    pub fn resolve(&mut self, events: &TickEvents) -> Transition {
        let t = transition(self.phase, self.active_map, self.secret_completed, events);
        self.apply(t);
        t
    }

    /// Carry out a transition's effects on the session
    pub fn apply(&mut self, t: Transition) {
        match t {
            Transition::Stay => {}
            Transition::Die(cause) => {
                self.phase = LevelPhase::Dead(cause);
                self.player.dead = true;
                log::info!(
                    "Player died ({:?}) at {:.0}ms on level {}",
                    cause,
                    self.clock_ms,
                    self.level.id
                );
            }
            Transition::Win { secret_completed } => {
                self.phase = LevelPhase::Won { secret_completed };
                self.player.won = true;
                log::info!(
                    "Level {} complete in {:.0}ms (secret: {})",
                    self.level.id,
                    self.clock_ms,
                    secret_completed
                );
            }
            Transition::EnterSecret => self.enter_secret(),
            Transition::ReturnFromSecret => self.return_from_secret(),
        }
    }

    fn enter_secret(&mut self) {
        self.saved_return_position = Some(self.player.position());
        self.switch_map(MapKind::Secret);
        let start = self.map.start;
        self.player.place_at(start);
        log::info!("Entered secret branch of level {}", self.level.id);
    }

    fn return_from_secret(&mut self) {
        self.secret_completed = true;
        self.switch_map(MapKind::Main);
        let back = self.saved_return_position.take().unwrap_or(self.map.start);
        self.player.place_at(back);
        log::info!("Secret completed, returning to level {}", self.level.id);
    }

    /// Load `kind` and rebuild every per-map entity collection
    fn switch_map(&mut self, kind: MapKind) {
        self.active_map = kind;
        self.map = Self::load_map(
            &self.level,
            &self.tuning,
            kind,
            self.secret_completed,
            &mut self.rng,
        );
        self.world = World::from_map(&self.map);
    }
}
