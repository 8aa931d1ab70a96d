//! Built-in level catalog
//!
//! Maps are rows of tile characters (see [`crate::sim::TileKind`]), one
//! 40-pixel tile per character. Rows may differ in length.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Id given to editor-made levels
pub const CUSTOM_LEVEL_ID: u32 = 99;
/// Countdown for editor-made levels
pub const CUSTOM_TIME_LIMIT_SECS: u32 = 120;
/// Number of levels in the main campaign
pub const LEVEL_COUNT: u32 = 3;

/// Everything needed to start a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: u32,
    pub name: String,
    pub time_limit_secs: u32,
    pub rows: Vec<String>,
    /// Map entered through a portal
    pub secret_rows: Vec<String>,
    /// Grow random wing pickups above platforms
    pub scatter_bonus_wings: bool,
}

impl LevelDef {
    fn builtin(id: u32, name: &str, time_limit_secs: u32, rows: &[&str], bonus: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            time_limit_secs,
            rows: to_rows(rows),
            secret_rows: to_rows(SECRET_GROTTO),
            scatter_bonus_wings: bonus,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_LEVEL_ID
    }
}

fn to_rows(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|r| r.to_string()).collect()
}

/// All main campaign levels, in play order
pub fn catalog() -> Vec<LevelDef> {
    (1..=LEVEL_COUNT).filter_map(level).collect()
}

/// Look up a main campaign level
pub fn level(id: u32) -> Option<LevelDef> {
    match id {
        1 => Some(LevelDef::builtin(1, "Sunny Meadows", 45, SUNNY_MEADOWS, false)),
        2 => Some(LevelDef::builtin(2, "Dusty Canyon", 90, DUSTY_CANYON, true)),
        3 => Some(LevelDef::builtin(3, "Void Station", 150, VOID_STATION, true)),
        _ => None,
    }
}

/// Like [`level`] but an unknown id is an error
pub fn require(id: u32) -> Result<LevelDef> {
    level(id).ok_or(Error::UnknownLevel(id))
}

/// Wrap editor rows as a playable level
pub fn custom_level<S: AsRef<str>>(rows: &[S]) -> LevelDef {
    LevelDef {
        id: CUSTOM_LEVEL_ID,
        name: "Custom Level".to_string(),
        time_limit_secs: CUSTOM_TIME_LIMIT_SECS,
        rows: rows.iter().map(|r| r.as_ref().to_string()).collect(),
        secret_rows: to_rows(SECRET_GROTTO),
        scatter_bonus_wings: false,
    }
}

/// Level 1
pub const SUNNY_MEADOWS: &[&str] = &[
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "X                                                                                                                                  X",
    "X                                                                                                                                  X",
    "X                                                                                                                                  X",
    "X                                                                                                                                  X",
    "X                                                                                                     ---                          X",
    "X                                                                                                                                  X",
    "X                                                ---                  XXXX                           ---             ---           X",
    "X                                                                    XX  XX               ---                        ---           X",
    "X   S                                                               XX    XX                M              M                       X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX   XX  XX    XX    XX           XXXXXXXX   XX    XX    XXXXXXXX    XXXXXXXX    XXXXXXXX    XXXX  E   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX^^^XX^^XX^^^^XX^^^^XX^^^^^^^^^^^XXXXXXXX^^^XX^^^^XX^^^^XXXXXXXX^^^^XXXXXXXX^^^^XXXXXXXX^^^^XXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

/// Level 2
pub const DUSTY_CANYON: &[&str] = &[
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "X                                                                                                                                                    X",
    "X                                                                                                                                                    X",
    "X                                           W                                                                                                        X",
    "X                                          ---                                                                                                       X",
    "X                                                                                                                                                    X",
    "X                                    ---         ---                                                                                                 X",
    "X                                                                                                                                                    X",
    "X                             ---                       ---                                                                                          X",
    "X                                                                                                                 XXX                                X",
    "X                      ---                                                                                       XX XX                               X",
    "X                                                                     ---                                       XX   XX                              X",
    "X               ---                                                                                            XX     XX                             X",
    "X                                                                                       ---                   XX       XX                            X",
    "X         ---                                                                                               XX           XX        M      E          X",
    "X   S                                                                                                      XX             XX      XXXX  XXXXX        X",
    "XXXXXXX                                                                                                    XX             XX      XXXX  XXXXX        X",
    "XXXXXXX^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^XX             XX^^^^^^XXXX^^XXXXX^^^^^^^^X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

/// Level 3
pub const VOID_STATION: &[&str] = &[
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "X                                                                                                                                                                                                          X",
    "X                                                                                                                                                                                                          X",
    "X                                                                                                                                                                                                          X",
    "X                                                                                                                                                                                                          X",
    "X                                                                                                                                             ---                                                          X",
    "X                                                                                                                            ---                                                                           X",
    "X                                                                                                            ---                                            ---                                            X",
    "X                                                                                           ---                                                                                                            X",
    "X                                                                           ---                          ---                                              XXXX                             X",
    "X                                                          ---                                                                                                          XX    XX                           X",
    "X                                                                           W                                                                                         XX        XX                         X",
    "X                                             ---                        ---                                                                                        XX            XX                       X",
    "X                                                                                                                                                                 XX                XX                     X",
    "X                                      ---           ---           ---                  ---        P                                                            XX        M           XX                   X",
    "X                                                                                ---            XXXX           ---           ---                              XX                        XX                 X",
    "X                              ---           M                                         W                                      ---       ---                 XX                            XX               X",
    "X                   XXXX                                                                                                                                  XX                                XX             X",
    "X                  XX  XX                                                                                                                               XX                                    XX           X",
    "X                 XX    XX                                                                                                                            XX                                        XX         X",
    "X       ---      XX      XX               XXXXX          ---            XXXXX          ---           XXXXX          ---         XXXXX               XX              M                             XX       X",
    "X             XXXX        XXXX           XX   XX                       XX   XX                      XX   XX                    XX   XX             XX                                              XX      X",
    "X  S        XXX              XXX       XXX     XXX        M          XXX     XXX                  XXX     XXX                XXX     XXX           XX                                                X  E   X",
    "XXXXXXX^^^^^XX                XX^^^^^^^XX       XX^^^^^^^^^^^^^^^^^^^XX       XX^^^^^^^^^^^^^^^^^^XX       XX^^^^^^^^^^^^^^^^XX       XX^^^^^^^^^^^XX                                                XXXXXXX",
    "XXXXXXX^^^^^XX                XX^^^^^^^XX       XX^^^^^^^^^^^^^^^^^^^XX       XX^^^^^^^^^^^^^^^^^^XX       XX^^^^^^^^^^^^^^^^XX       XX^^^^^^^^^^^XX                                                XXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

/// Secret branch shared by every level
pub const SECRET_GROTTO: &[&str] = &[
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "X                                                                                                  X",
    "X                                                                                                  X",
    "X                                                                                                  X",
    "X                                 ---                                                              X",
    "X                          ---           ---                                                       X",
    "X                                                                                                  X",
    "X                    ---                        ---                                                X",
    "X                                                                                                  X",
    "X             ---                                     ---                                          X",
    "X                                                                 ---                              X",
    "X      ---              ^            ^           ^          ---            P                       X",
    "X                  ---  X   ---      X    ---    X    ---                                          X",
    "X   S            XX     X            X           X                                                 X",
    "XXXXXXX^^^^^^^^XX^^^^^^^X^^^^^^^^^^^^X^^^^^^^^^^^X^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

/// Blank 14x60 editor canvas with a start ledge and an exit
pub const EDITOR_STARTER: &[&str] = &[
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "                                                            ",
    "   S                                                        ",
    "XXXXXXX                                                    E",
    "XXXXXXX                                                  XXX",
    "XXXXXXX                                                  XXX",
];
