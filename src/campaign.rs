//! Campaign progression
//!
//! Tracks which levels are unlocked and a few one-shot flags across level
//! sessions. Kept in memory; hosts that want it to survive a restart can
//! round-trip it through JSON.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::levels::{self, CUSTOM_LEVEL_ID, LEVEL_COUNT, LevelDef};
use crate::sim::LevelSession;
use crate::tuning::Tuning;

/// Level that introduces the wing power-up
pub const WING_TUTORIAL_LEVEL: u32 = 2;

/// Where to go after a level is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextStep {
    Level(u32),
    /// Every main level cleared
    Victory { secret_found: bool },
    /// A custom level was cleared; hand control back to the editor
    Editor,
}

/// Progress across levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub unlocked: BTreeSet<u32>,
    /// The secret branch was finished at least once
    pub secret_found: bool,
    pub wing_tutorial_seen: bool,
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new()
    }
}

impl Campaign {
    /// Fresh campaign with only the first level open
    pub fn new() -> Self {
        Self {
            unlocked: BTreeSet::from([1]),
            secret_found: false,
            wing_tutorial_seen: false,
        }
    }

    pub fn is_unlocked(&self, id: u32) -> bool {
        self.unlocked.contains(&id)
    }

    /// Whether starting `id` should pop the wing tutorial first
    pub fn shows_wing_tutorial(&self, id: u32) -> bool {
        id == WING_TUTORIAL_LEVEL && !self.wing_tutorial_seen
    }

    /// Build a session for a main level.
    ///
    /// The session starts paused while the wing tutorial is showing; call
    /// [`Campaign::close_tutorial`] and unpause it to begin.
    pub fn start_level(&self, id: u32, tuning: Tuning, seed: u64) -> Result<LevelSession> {
        let def = levels::require(id)?;
        if !self.is_unlocked(id) {
            log::warn!("Starting locked level {}", id);
        }
        Ok(self.start(def, tuning, seed))
    }

    /// Build a session for editor rows
    pub fn start_custom<S: AsRef<str>>(&self, rows: &[S], tuning: Tuning, seed: u64) -> LevelSession {
        self.start(levels::custom_level(rows), tuning, seed)
    }

    fn start(&self, def: LevelDef, tuning: Tuning, seed: u64) -> LevelSession {
        let tutorial = self.shows_wing_tutorial(def.id);
        let mut session = LevelSession::new(def, tuning, seed);
        if tutorial {
            session.set_paused(true);
        }
        session
    }

    pub fn close_tutorial(&mut self) {
        self.wing_tutorial_seen = true;
    }

    /// Record a cleared level and unlock the one after it
    pub fn record_completion(&mut self, id: u32, secret_completed: bool) {
        if secret_completed {
            self.secret_found = true;
        }
        if id != CUSTOM_LEVEL_ID && id < LEVEL_COUNT && self.unlocked.insert(id + 1) {
            log::info!("Unlocked level {}", id + 1);
        }
    }

    /// What follows a cleared level
    pub fn next_step(&self, id: u32) -> NextStep {
        if id == CUSTOM_LEVEL_ID {
            NextStep::Editor
        } else if id < LEVEL_COUNT {
            NextStep::Level(id + 1)
        } else {
            NextStep::Victory {
                secret_found: self.secret_found,
            }
        }
    }

    /// Leave the victory screen: every level stays open, the secret resets
    pub fn finish(&mut self) {
        self.unlocked = (1..=LEVEL_COUNT).collect();
        self.secret_found = false;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::levels::EDITOR_STARTER;

    #[test]
    fn test_new_campaign() {
        let campaign = Campaign::new();
        assert!(campaign.is_unlocked(1));
        assert!(!campaign.is_unlocked(2));
        assert!(!campaign.secret_found);
    }

    #[test]
    fn test_completion_unlocks_next() {
        let mut campaign = Campaign::new();
        campaign.record_completion(1, false);
        assert!(campaign.is_unlocked(2));
        assert!(!campaign.secret_found);

        campaign.record_completion(2, true);
        assert!(campaign.is_unlocked(3));
        assert!(campaign.secret_found);

        // Nothing after the last level
        campaign.record_completion(3, false);
        assert_eq!(campaign.unlocked.len(), 3);
        assert!(campaign.secret_found);
    }

    #[test]
    fn test_custom_completion_unlocks_nothing() {
        let mut campaign = Campaign::new();
        campaign.record_completion(CUSTOM_LEVEL_ID, true);
        assert_eq!(campaign.unlocked, BTreeSet::from([1]));
        assert_eq!(campaign.next_step(CUSTOM_LEVEL_ID), NextStep::Editor);
    }

    #[test]
    fn test_next_step_and_victory() {
        let mut campaign = Campaign::new();
        assert_eq!(campaign.next_step(1), NextStep::Level(2));
        assert_eq!(campaign.next_step(2), NextStep::Level(3));
        assert_eq!(
            campaign.next_step(3),
            NextStep::Victory {
                secret_found: false
            }
        );

        campaign.record_completion(3, true);
        assert_eq!(
            campaign.next_step(3),
            NextStep::Victory { secret_found: true }
        );

        campaign.finish();
        assert!((1..=3).all(|id| campaign.is_unlocked(id)));
        assert!(!campaign.secret_found);
    }

    #[test]
    fn test_wing_tutorial_pauses_level_two_once() {
        let mut campaign = Campaign::new();
        let session = campaign.start_level(2, Tuning::default(), 1).unwrap();
        assert!(session.paused);

        let session = campaign.start_level(1, Tuning::default(), 1).unwrap();
        assert!(!session.paused);

        campaign.close_tutorial();
        let session = campaign.start_level(2, Tuning::default(), 1).unwrap();
        assert!(!session.paused);
    }

    #[test]
    fn test_unknown_level_errors() {
        let campaign = Campaign::new();
        assert!(matches!(
            campaign.start_level(42, Tuning::default(), 1),
            Err(Error::UnknownLevel(42))
        ));
    }

    #[test]
    fn test_start_custom() {
        let campaign = Campaign::new();
        let session = campaign.start_custom(EDITOR_STARTER, Tuning::default(), 3);
        assert_eq!(session.level.id, CUSTOM_LEVEL_ID);
        assert_eq!(session.time_remaining_ms(), 120_000.0);
        assert!(session.map.exit.is_some());
    }

    #[test]
    fn test_json_round_trip() {
        let mut campaign = Campaign::new();
        campaign.record_completion(1, true);
        campaign.close_tutorial();
        let json = campaign.to_json().unwrap();
        assert_eq!(Campaign::from_json(&json).unwrap(), campaign);
    }
}
